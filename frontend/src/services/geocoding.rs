//! Geocoding adapter and the displayed place name
//!
//! Lookups are issued once per marker move with no retry. Each lookup holds
//! a ticket; only the newest ticket may update the displayed name, so a slow
//! response for an older point never overwrites a newer one.

use std::sync::{Arc, Mutex};

use shared::Coordinates;

use crate::error::AppResult;
use crate::external::ReverseGeocoder;

/// Resolves coordinates into place names
#[derive(Clone)]
pub struct GeocodingAdapter {
    geocoder: Arc<dyn ReverseGeocoder>,
}

impl GeocodingAdapter {
    pub fn new(geocoder: Arc<dyn ReverseGeocoder>) -> Self {
        Self { geocoder }
    }

    /// Resolve a point; falls back to "Unknown location" when no name is given
    pub async fn resolve(&self, at: Coordinates) -> AppResult<String> {
        match self.geocoder.reverse(at).await {
            Ok(response) => Ok(response.place_name()),
            Err(e) => {
                tracing::error!("Error obtaining location name for {}: {}", at, e);
                Err(e)
            }
        }
    }
}

/// Ticket identifying one issued lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LookupTicket(u64);

#[derive(Debug, Default)]
struct NameState {
    name: String,
    issued: u64,
}

/// The place name shown under the map
#[derive(Debug, Default)]
pub struct LocationName {
    state: Mutex<NameState>,
}

impl LocationName {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> String {
        self.lock().name.clone()
    }

    /// Issue a ticket for a new lookup, superseding all earlier ones
    pub fn issue(&self) -> LookupTicket {
        let mut state = self.lock();
        state.issued += 1;
        LookupTicket(state.issued)
    }

    /// Apply a resolved name if `ticket` is still the newest one
    pub fn apply(&self, ticket: LookupTicket, name: String) -> bool {
        let mut state = self.lock();
        if ticket.0 != state.issued {
            tracing::debug!(
                ticket = ticket.0,
                newest = state.issued,
                "Discarding stale location name"
            );
            return false;
        }
        state.name = name;
        true
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, NameState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// A lookup issued for one marker position, run outside any view lock
#[must_use = "a lookup does nothing until it is run"]
pub struct GeocodeLookup {
    adapter: GeocodingAdapter,
    slot: Arc<LocationName>,
    ticket: LookupTicket,
    at: Coordinates,
}

impl GeocodeLookup {
    pub fn new(adapter: GeocodingAdapter, slot: Arc<LocationName>, at: Coordinates) -> Self {
        let ticket = slot.issue();
        Self {
            adapter,
            slot,
            ticket,
            at,
        }
    }

    pub fn ticket(&self) -> LookupTicket {
        self.ticket
    }

    pub fn at(&self) -> Coordinates {
        self.at
    }

    /// Perform the lookup; returns whether the displayed name changed.
    /// On failure the previous name stays.
    pub async fn run(self) -> bool {
        match self.adapter.resolve(self.at).await {
            Ok(name) => self.slot.apply(self.ticket, name),
            Err(_) => false,
        }
    }

    /// Run the lookup on the runtime without waiting for it
    pub fn spawn(self) -> tokio::task::JoinHandle<bool> {
        tokio::spawn(self.run())
    }
}
