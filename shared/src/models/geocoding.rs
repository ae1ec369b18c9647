//! Reverse geocoding models

use serde::{Deserialize, Serialize};

/// Place name shown when the lookup returns no display name
pub const UNKNOWN_LOCATION: &str = "Unknown location";

/// The part of a Nominatim `/reverse` response the application reads
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReverseGeocodeResponse {
    #[serde(default)]
    pub display_name: Option<String>,
}

impl ReverseGeocodeResponse {
    /// The display name, or the fixed fallback when absent or blank
    pub fn place_name(self) -> String {
        self.display_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_LOCATION.to_string())
    }
}
