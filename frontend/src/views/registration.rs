//! Crop registration view
//!
//! Holds the in-progress form and the map marker. Submitting is split in
//! two steps: the shared-state write happens synchronously and always, the
//! registration request afterwards is best-effort and never undoes it.

use std::sync::Arc;

use chrono::Datelike;
use shared::{
    Coordinates, CropDraft, CropField, CropRecord, MapEvent, Notice, Notifier, PositionCache,
    RegisterOutcome,
};

use crate::error::{AppError, AppResult};
use crate::external::CropApi;
use crate::services::{
    CropStore, GeocodeLookup, GeocodingAdapter, Geolocator, LocationName, SharedStorage,
};

/// Notice sink shared with the shell
pub type SharedNotifier = Arc<dyn Notifier + Send + Sync>;

/// What happened to the registration request after the state write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationResult {
    Registered { message: String },
    Duplicate,
    Failed,
}

/// The form, the marker and their collaborators
pub struct RegistrationView {
    draft: CropDraft,
    marker: Coordinates,
    store: CropStore,
    api: Arc<dyn CropApi>,
    positions: PositionCache<SharedStorage>,
    geocoding: GeocodingAdapter,
    location_name: Arc<LocationName>,
    notifier: SharedNotifier,
}

impl RegistrationView {
    /// Mount the view: empty draft, marker at the cached position
    pub fn new(
        store: CropStore,
        api: Arc<dyn CropApi>,
        storage: SharedStorage,
        geocoding: GeocodingAdapter,
        notifier: SharedNotifier,
    ) -> Self {
        let positions = PositionCache::new(storage);
        let marker = positions.load();
        tracing::debug!("Registration view mounted at {}", marker);

        Self {
            draft: CropDraft::default(),
            marker,
            store,
            api,
            positions,
            geocoding,
            location_name: Arc::new(LocationName::new()),
            notifier,
        }
    }

    pub fn draft(&self) -> &CropDraft {
        &self.draft
    }

    pub fn marker(&self) -> Coordinates {
        self.marker
    }

    pub fn location_name(&self) -> String {
        self.location_name.current()
    }

    /// Merge one form control's value into the draft
    pub fn update_field(&mut self, name: &str, value: impl Into<String>) -> AppResult<()> {
        let field: CropField = name.parse()?;
        self.draft.set(field, value);
        Ok(())
    }

    /// Merge a whole posted form. Nothing is merged if any name is unknown.
    pub fn update_fields<I>(&mut self, fields: I) -> AppResult<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let parsed = fields
            .into_iter()
            .map(|(name, value)| -> AppResult<(CropField, String)> {
                Ok((name.parse()?, value))
            })
            .collect::<AppResult<Vec<_>>>()?;
        for (field, value) in parsed {
            self.draft.set(field, value);
        }
        Ok(())
    }

    /// Clear every draft field; shared state and marker stay as they are
    pub fn reset_form(&mut self) {
        self.draft.clear();
    }

    /// Ask the host for the device position once
    ///
    /// On success the marker moves there and a lookup is returned for the
    /// caller to run; on failure a notice is raised and the marker stays put.
    pub async fn acquire_location(&mut self, geolocator: &dyn Geolocator) -> Option<GeocodeLookup> {
        match geolocator.current_position().await {
            Ok(position) => Some(self.move_marker(position, MapEvent::Geolocation)),
            Err(e) => {
                tracing::warn!("Could not obtain device position: {}", e);
                self.notifier.notify(e.notice());
                None
            }
        }
    }

    /// Move the marker (click, drag, or geolocation) and start a lookup
    pub fn move_marker(&mut self, to: Coordinates, event: MapEvent) -> GeocodeLookup {
        tracing::debug!(%event, "Marker moved to {}", to);
        self.marker = to;
        if let Err(e) = self.remember_position(to) {
            tracing::error!("Failed to cache position: {}", e);
        }
        GeocodeLookup::new(self.geocoding.clone(), self.location_name.clone(), to)
    }

    fn remember_position(&self, at: Coordinates) -> AppResult<()> {
        self.positions.save(at)?;
        Ok(())
    }

    /// Finalize the draft at the marker and publish it to shared state
    ///
    /// Returns the request to send. Fails only when the form is incomplete,
    /// in which case nothing is written.
    pub fn begin_submit(&mut self) -> AppResult<PendingRegistration> {
        let record = self
            .draft
            .finalize(self.marker, chrono::Local::now().year())
            .map_err(AppError::from)?;

        self.store.write(record.clone());

        Ok(PendingRegistration {
            record,
            api: self.api.clone(),
            notifier: self.notifier.clone(),
        })
    }

    /// Both submission steps back to back
    pub async fn submit(&mut self) -> AppResult<RegistrationResult> {
        let pending = self.begin_submit()?;
        Ok(pending.send().await)
    }
}

/// A registration request waiting to be sent
#[must_use = "the registration request is only sent by `send`"]
pub struct PendingRegistration {
    record: CropRecord,
    api: Arc<dyn CropApi>,
    notifier: SharedNotifier,
}

impl PendingRegistration {
    pub fn record(&self) -> &CropRecord {
        &self.record
    }

    /// Send the record once and raise the matching notice
    pub async fn send(self) -> RegistrationResult {
        match self.api.register(&self.record).await {
            Ok(RegisterOutcome::Registered { message }) => {
                tracing::info!(crop = %self.record.crop, "Crop registered");
                self.notifier.notify(Notice::registered(message.clone()));
                RegistrationResult::Registered { message }
            }
            Ok(RegisterOutcome::Duplicate) => {
                tracing::warn!(crop = %self.record.crop, "Backend reported a duplicate crop");
                self.notifier.notify(Notice::duplicate_record());
                RegistrationResult::Duplicate
            }
            Err(e) => {
                tracing::error!("Error sending data: {}", e);
                self.notifier.notify(Notice::registration_failed());
                RegistrationResult::Failed
            }
        }
    }
}
