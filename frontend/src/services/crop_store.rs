//! Crop shared state
//!
//! A single slot holding the active crop record for the lifetime of the
//! process. Views receive a handle at construction time; nothing reaches it
//! through a global.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use shared::CropRecord;
use tokio::sync::watch;

/// Receiver side of the shared state, woken on every write
pub type CropChanges = watch::Receiver<Option<CropRecord>>;

/// Single-slot, last-write-wins store for the active crop
#[derive(Clone)]
pub struct CropStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    slot: watch::Sender<Option<CropRecord>>,
    revision: AtomicU64,
}

impl CropStore {
    /// Create an empty store
    pub fn new() -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            inner: Arc::new(StoreInner {
                slot,
                revision: AtomicU64::new(0),
            }),
        }
    }

    /// The current record, `None` until the first submission
    pub fn read(&self) -> Option<CropRecord> {
        self.inner.slot.borrow().clone()
    }

    /// Replace the current record and wake every subscriber
    pub fn write(&self, record: CropRecord) {
        tracing::debug!(crop = %record.crop, "Publishing crop record");
        self.inner.slot.send_replace(Some(record));
        self.inner.revision.fetch_add(1, Ordering::SeqCst);
    }

    /// Subscribe to future writes
    pub fn subscribe(&self) -> CropChanges {
        self.inner.slot.subscribe()
    }

    /// Number of writes since creation
    pub fn revision(&self) -> u64 {
        self.inner.revision.load(Ordering::SeqCst)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.slot.borrow().is_none()
    }
}

impl Default for CropStore {
    fn default() -> Self {
        Self::new()
    }
}
