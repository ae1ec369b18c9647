//! HTTP handlers for the navigation shell

pub mod analysis;
pub mod health;
pub mod layout;
pub mod registration;

pub use analysis::*;
pub use health::*;
pub use registration::*;
