//! Analysis views (precipitation, drought)
//!
//! Each view reads the shared crop, asks the content-generation endpoint for
//! a narrative in its analysis context, and exposes read-aloud controls.
//! Phases: `Idle -> Loading -> Success | Error`.

use std::sync::Arc;

use serde::Serialize;
use shared::{AnalysisContext, CropRecord, RecommendationRequest, SpeechSynthesizer, NO_CROP_MESSAGE};
use tokio::sync::Mutex;

use crate::external::CropApi;
use crate::services::{CropChanges, CropStore};

/// Observable phase of an analysis view
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Error,
}

/// What a render of the view shows
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnalysisSnapshot {
    pub context: AnalysisContext,
    pub phase: Phase,
    pub loading: bool,
    pub error: Option<String>,
    pub recommendation: Option<String>,
    pub record: Option<CropRecord>,
}

impl AnalysisSnapshot {
    /// Placeholder shown while another task holds the view
    pub fn loading(context: AnalysisContext, record: Option<CropRecord>) -> Self {
        Self {
            context,
            phase: Phase::Loading,
            loading: true,
            error: None,
            recommendation: None,
            record,
        }
    }
}

pub struct AnalysisView {
    context: AnalysisContext,
    store: CropStore,
    api: Arc<dyn CropApi>,
    phase: Phase,
    error: Option<String>,
    recommendation: Option<String>,
    record: Option<CropRecord>,
    fetched_for: Option<CropRecord>,
    mounted: bool,
}

impl AnalysisView {
    pub fn new(context: AnalysisContext, store: CropStore, api: Arc<dyn CropApi>) -> Self {
        Self {
            context,
            store,
            api,
            phase: Phase::Idle,
            error: None,
            recommendation: None,
            record: None,
            fetched_for: None,
            mounted: false,
        }
    }

    pub fn context(&self) -> AnalysisContext {
        self.context
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn recommendation(&self) -> Option<&str> {
        self.recommendation.as_deref()
    }

    pub fn snapshot(&self) -> AnalysisSnapshot {
        AnalysisSnapshot {
            context: self.context,
            phase: self.phase,
            loading: self.is_loading(),
            error: self.error.clone(),
            recommendation: self.recommendation.clone(),
            record: self.record.clone(),
        }
    }

    /// Entering the view: fetch unless the current crop already has a
    /// successful recommendation. Returns whether a request was issued.
    pub async fn mount(&mut self) -> bool {
        self.mounted = true;
        self.sync().await
    }

    /// Shared state was written. Only a view that has been opened follows
    /// it, and a record it already has a recommendation for is skipped.
    pub async fn store_changed(&mut self) -> bool {
        if !self.mounted {
            tracing::debug!(context = %self.context, "View not opened yet, deferring fetch");
            return false;
        }
        self.sync().await
    }

    async fn sync(&mut self) -> bool {
        let current = self.store.read();
        if current.is_some() && current == self.fetched_for && self.phase == Phase::Success {
            self.record = current;
            return false;
        }
        self.refresh().await
    }

    /// Re-read shared state and fetch when a crop is present
    pub async fn refresh(&mut self) -> bool {
        self.record = self.store.read();
        let Some(record) = self.record.clone() else {
            tracing::debug!(context = %self.context, "No crop registered yet");
            return false;
        };
        self.fetch(record).await;
        true
    }

    async fn fetch(&mut self, record: CropRecord) {
        self.phase = Phase::Loading;
        self.error = None;
        self.recommendation = None;

        let request = RecommendationRequest::new(&record, self.context);
        match self.api.generate_content(&request).await {
            Ok(content) => {
                tracing::info!(context = %self.context, crop = %record.crop, "Recommendation received");
                self.recommendation = Some(content);
                self.fetched_for = Some(record);
                self.phase = Phase::Success;
            }
            Err(e) => {
                tracing::error!(context = %self.context, "Error: {}", e);
                self.error = Some(NO_CROP_MESSAGE.to_string());
                self.fetched_for = None;
                self.phase = Phase::Error;
            }
        }
    }

    /// Speak the current recommendation, if there is one
    pub fn read_aloud(&self, speech: &dyn SpeechSynthesizer) -> bool {
        match self.recommendation.as_deref() {
            Some(text) if !text.is_empty() => {
                speech.speak(text);
                true
            }
            _ => false,
        }
    }
}

/// Forward every shared-state write to `view` until the store goes away
pub async fn follow_store(view: Arc<Mutex<AnalysisView>>, mut changes: CropChanges) {
    while changes.changed().await.is_ok() {
        changes.borrow_and_update();
        let mut view = view.lock().await;
        view.store_changed().await;
    }
    tracing::debug!("Crop store closed, analysis follower exiting");
}
