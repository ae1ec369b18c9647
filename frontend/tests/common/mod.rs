//! Test doubles for the frontend's outside collaborators
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use crop_advisor::{
    external::{CropApi, ReverseGeocoder},
    services::{Geolocator, SharedStorage},
    AppError, AppResult, Capabilities,
};
use shared::{
    AgriculturalPractice, Coordinates, CropRecord, CultivationArea, GeolocationError,
    MemoryKeyValueStore, RecommendationRequest, RegisterOutcome, ReverseGeocodeResponse,
    SpeechSynthesizer,
};

/// The crop used throughout the analysis tests
pub fn corn() -> CropRecord {
    CropRecord {
        crop: "corn".to_string(),
        cultivation_a: CultivationArea::Small,
        agricultural_p: AgriculturalPractice::Irrigation,
        lat: 10.0,
        lng: 20.0,
        prediction_year: 2025,
        prediction_month: 6,
    }
}

#[derive(Debug, Clone)]
pub enum RegisterBehavior {
    Registered(String),
    Duplicate,
    Fail,
}

#[derive(Debug, Clone)]
pub enum ContentBehavior {
    Content(String),
    Fail,
}

/// Scriptable recommendation backend
pub struct FakeApi {
    register: Mutex<RegisterBehavior>,
    content: Mutex<ContentBehavior>,
    pub registered: Mutex<Vec<CropRecord>>,
    pub requests: Mutex<Vec<RecommendationRequest>>,
}

impl FakeApi {
    pub fn new(register: RegisterBehavior, content: ContentBehavior) -> Arc<Self> {
        Arc::new(Self {
            register: Mutex::new(register),
            content: Mutex::new(content),
            registered: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn ok() -> Arc<Self> {
        Self::new(
            RegisterBehavior::Registered("Crop saved".to_string()),
            ContentBehavior::Content("Expect moderate rainfall.".to_string()),
        )
    }

    pub fn set_content(&self, behavior: ContentBehavior) {
        *self.content.lock().unwrap() = behavior;
    }

    pub fn register_calls(&self) -> usize {
        self.registered.lock().unwrap().len()
    }

    pub fn content_calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CropApi for FakeApi {
    async fn register(&self, record: &CropRecord) -> AppResult<RegisterOutcome> {
        self.registered.lock().unwrap().push(record.clone());
        match self.register.lock().unwrap().clone() {
            RegisterBehavior::Registered(message) => Ok(RegisterOutcome::Registered { message }),
            RegisterBehavior::Duplicate => Ok(RegisterOutcome::Duplicate),
            RegisterBehavior::Fail => Err(AppError::RegistrationFailed(
                "API returned 500 Internal Server Error".to_string(),
            )),
        }
    }

    async fn generate_content(&self, request: &RecommendationRequest) -> AppResult<String> {
        self.requests.lock().unwrap().push(request.clone());
        match self.content.lock().unwrap().clone() {
            ContentBehavior::Content(text) => Ok(text),
            ContentBehavior::Fail => Err(AppError::RecommendationFailed(
                "API returned 500 Internal Server Error".to_string(),
            )),
        }
    }
}

/// Geocoder naming each point after its coordinates
#[derive(Default)]
pub struct FakeGeocoder {
    pub lookups: Mutex<Vec<Coordinates>>,
    pub fail: bool,
    pub anonymous: bool,
}

impl FakeGeocoder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Self::default()
        })
    }

    pub fn anonymous() -> Arc<Self> {
        Arc::new(Self {
            anonymous: true,
            ..Self::default()
        })
    }

    pub fn calls(&self) -> usize {
        self.lookups.lock().unwrap().len()
    }
}

pub fn place(at: Coordinates) -> String {
    format!("Place at {}", at)
}

#[async_trait]
impl ReverseGeocoder for FakeGeocoder {
    async fn reverse(&self, at: Coordinates) -> AppResult<ReverseGeocodeResponse> {
        self.lookups.lock().unwrap().push(at);
        if self.fail {
            return Err(AppError::GeocodingFailed("connection refused".to_string()));
        }
        Ok(ReverseGeocodeResponse {
            display_name: (!self.anonymous).then(|| place(at)),
        })
    }
}

pub struct FakeGeolocator(pub Result<Coordinates, GeolocationError>);

#[async_trait]
impl Geolocator for FakeGeolocator {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        self.0
    }
}

/// Speech engine recording what it was asked to do
#[derive(Default)]
pub struct RecordingSpeech {
    pub spoken: Mutex<Vec<String>>,
    pub stops: AtomicUsize,
}

impl SpeechSynthesizer for RecordingSpeech {
    fn speak(&self, text: &str) {
        self.spoken.lock().unwrap().push(text.to_string());
    }

    fn stop(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
    }

    fn is_speaking(&self) -> bool {
        !self.spoken.lock().unwrap().is_empty() && self.stops.load(Ordering::SeqCst) == 0
    }
}

pub fn memory_storage() -> SharedStorage {
    Arc::new(MemoryKeyValueStore::new())
}

pub fn capabilities(
    api: Arc<FakeApi>,
    geocoder: Arc<FakeGeocoder>,
    storage: SharedStorage,
    speech: Arc<RecordingSpeech>,
) -> Capabilities {
    Capabilities {
        api,
        geocoder,
        storage,
        speech,
    }
}
