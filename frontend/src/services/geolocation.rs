//! Device position acquisition

use async_trait::async_trait;
use shared::{Coordinates, GeolocationError};

/// Source of the device's current position
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}

/// Geolocator reporting the position set in configuration
///
/// A host without a configured position behaves like a browser without
/// geolocation support.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredGeolocator {
    position: Option<Coordinates>,
}

impl ConfiguredGeolocator {
    pub fn new(position: Option<Coordinates>) -> Self {
        Self { position }
    }
}

#[async_trait]
impl Geolocator for ConfiguredGeolocator {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        self.position.ok_or(GeolocationError::Unsupported)
    }
}
