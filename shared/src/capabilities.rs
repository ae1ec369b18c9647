//! Host capabilities the application relies on
//!
//! Durable key-value storage, speech synthesis, geolocation failures and
//! notices are provided by whatever hosts the views: the browser through the
//! WASM bindings, or the frontend server process.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::models::Notice;

/// Failure of a durable storage backend
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Storage error: {0}")]
pub struct StorageError(pub String);

/// Durable string key-value slot store (`localStorage` in a browser)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Process-local key-value store
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StorageError(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Text-to-speech engine
///
/// Both operations are fire-and-forget; the engine alone knows whether
/// synthesis is active.
pub trait SpeechSynthesizer {
    fn speak(&self, text: &str);

    fn stop(&self);

    fn is_speaking(&self) -> bool;
}

/// Why the device position could not be obtained
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Geolocation is not supported")]
    Unsupported,
}

impl GeolocationError {
    pub fn notice(&self) -> Notice {
        match self {
            GeolocationError::PermissionDenied => Notice::location_denied(),
            GeolocationError::Unsupported => Notice::geolocation_unsupported(),
        }
    }
}

/// Receiver of user-visible notices
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice)
    }
}

/// Queue of notices waiting to be displayed
#[derive(Debug, Default)]
pub struct NoticeBoard {
    pending: Mutex<VecDeque<Notice>>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every pending notice, oldest first
    pub fn drain(&self) -> Vec<Notice> {
        match self.pending.lock() {
            Ok(mut pending) => pending.drain(..).collect(),
            Err(poisoned) => poisoned.into_inner().drain(..).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.pending.lock().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for NoticeBoard {
    fn notify(&self, notice: Notice) {
        match self.pending.lock() {
            Ok(mut pending) => pending.push_back(notice),
            Err(poisoned) => poisoned.into_inner().push_back(notice),
        }
    }
}
