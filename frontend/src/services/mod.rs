//! Application services: shared state, storage, and host capabilities

pub mod crop_store;
pub mod geocoding;
pub mod geolocation;
pub mod speech;
pub mod storage;

pub use crop_store::{CropChanges, CropStore};
pub use geocoding::{GeocodeLookup, GeocodingAdapter, LocationName, LookupTicket};
pub use geolocation::{ConfiguredGeolocator, Geolocator};
pub use speech::{CommandSpeech, SharedSpeech, SilentSpeech};
pub use storage::{FileKeyValueStore, SharedStorage};
