//! External API integrations

pub mod crop_api;
pub mod nominatim;

pub use crop_api::{CropApi, CropApiClient};
pub use nominatim::{NominatimClient, ReverseGeocoder};
