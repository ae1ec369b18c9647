//! Last-known map position, persisted so it survives a reload

use crate::capabilities::{KeyValueStore, StorageError};
use crate::types::Coordinates;

/// Storage key holding the `[lat, lng]` pair
pub const POSITION_KEY: &str = "position";

/// Durable slot for the last known marker position
#[derive(Debug, Clone)]
pub struct PositionCache<S> {
    store: S,
}

impl<S: KeyValueStore> PositionCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read the cached pair; `None` when never written or unreadable as a pair
    pub fn try_load(&self) -> Result<Option<Coordinates>, StorageError> {
        let Some(raw) = self.store.get(POSITION_KEY)? else {
            return Ok(None);
        };
        Ok(serde_json::from_str::<[f64; 2]>(&raw)
            .ok()
            .map(Coordinates::from))
    }

    /// The cached position, or `(0, 0)` when nothing usable is stored
    pub fn load(&self) -> Coordinates {
        self.try_load().ok().flatten().unwrap_or_else(Coordinates::origin)
    }

    /// Overwrite the cached position
    pub fn save(&self, position: Coordinates) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&position.as_pair())
            .map_err(|e| StorageError(e.to_string()))?;
        self.store.set(POSITION_KEY, &raw)
    }
}
