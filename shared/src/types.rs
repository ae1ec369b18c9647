//! Common types used across the application

use serde::{Deserialize, Serialize};

/// GPS coordinates in decimal degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// The map's fallback center when nothing has been cached yet
    pub fn origin() -> Self {
        Self::default()
    }

    /// The `[lat, lng]` pair as stored in the position cache
    pub fn as_pair(&self) -> [f64; 2] {
        [self.lat, self.lng]
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.lat, self.lng)
    }
}

/// Where a marker move originated
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MapEvent {
    #[default]
    Click,
    Drag,
    Geolocation,
}

impl std::fmt::Display for MapEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapEvent::Click => write!(f, "click"),
            MapEvent::Drag => write!(f, "drag"),
            MapEvent::Geolocation => write!(f, "geolocation"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_conversion() {
        let coords = Coordinates::from([40.0, -3.0]);
        assert_eq!(coords.lat, 40.0);
        assert_eq!(coords.lng, -3.0);
        assert_eq!(coords.as_pair(), [40.0, -3.0]);
    }

    #[test]
    fn test_origin_is_zero() {
        assert_eq!(Coordinates::origin(), Coordinates::new(0.0, 0.0));
    }

    #[test]
    fn test_map_event_serializes_lowercase() {
        let json = serde_json::to_string(&MapEvent::Drag).unwrap();
        assert_eq!(json, "\"drag\"");
        let parsed: MapEvent = serde_json::from_str("\"click\"").unwrap();
        assert_eq!(parsed, MapEvent::Click);
    }
}
