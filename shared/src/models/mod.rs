//! Domain models for the Crop Advisor application

mod analysis;
mod crop;
mod geocoding;
mod notice;
mod registration;

pub use analysis::*;
pub use crop::*;
pub use geocoding::*;
pub use notice::*;
pub use registration::*;
