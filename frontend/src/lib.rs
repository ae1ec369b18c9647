//! Crop Advisor - frontend host
//!
//! Lets a user register a crop (type, area, practice, location, prediction
//! date) and read AI-generated precipitation and drought recommendations
//! for it. The views run here; the registration/recommendation backend and
//! the geocoder are external services.

use std::sync::Arc;

use axum::{routing::get, Router};
use shared::{AnalysisContext, NoticeBoard, Notifier};
use tokio::sync::Mutex;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod logging;
pub mod routes;
pub mod services;
pub mod views;

pub use config::Config;
pub use error::{AppError, AppResult};

use external::{CropApi, CropApiClient, NominatimClient, ReverseGeocoder};
use services::{CropStore, FileKeyValueStore, GeocodingAdapter, SharedSpeech, SharedStorage};
use views::{AnalysisView, RegistrationView};

/// Outside collaborators the views are wired to
#[derive(Clone)]
pub struct Capabilities {
    pub api: Arc<dyn CropApi>,
    pub geocoder: Arc<dyn ReverseGeocoder>,
    pub storage: SharedStorage,
    pub speech: SharedSpeech,
}

impl Capabilities {
    /// The real HTTP clients, file storage and speech engine
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let api: Arc<dyn CropApi> = Arc::new(CropApiClient::new(config.api.base_url.clone()));
        let geocoder: Arc<dyn ReverseGeocoder> = Arc::new(NominatimClient::new(
            config.geocoding.base_url.clone(),
            &config.geocoding.user_agent,
        )?);
        let storage: SharedStorage =
            Arc::new(FileKeyValueStore::new(config.storage.position_file.clone()));
        let speech = services::speech::from_config(&config.speech);

        Ok(Self {
            api,
            geocoder,
            storage,
            speech,
        })
    }
}

/// One analysis view per context
pub struct AnalysisViews {
    pub precipitation: Arc<Mutex<AnalysisView>>,
    pub drought: Arc<Mutex<AnalysisView>>,
}

impl AnalysisViews {
    pub fn get(&self, context: AnalysisContext) -> &Arc<Mutex<AnalysisView>> {
        match context {
            AnalysisContext::Precipitation => &self.precipitation,
            AnalysisContext::Drought => &self.drought,
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: CropStore,
    pub registration: Arc<Mutex<RegistrationView>>,
    pub analyses: Arc<AnalysisViews>,
    pub notices: Arc<NoticeBoard>,
    pub speech: SharedSpeech,
}

impl AppState {
    /// Wire the views to an empty crop store and the given capabilities
    pub fn new(config: Config, capabilities: Capabilities) -> Self {
        let store = CropStore::new();
        let notices = Arc::new(NoticeBoard::new());
        let notifier: Arc<dyn Notifier + Send + Sync> = notices.clone();

        let registration = RegistrationView::new(
            store.clone(),
            capabilities.api.clone(),
            capabilities.storage.clone(),
            GeocodingAdapter::new(capabilities.geocoder.clone()),
            notifier,
        );

        let analysis_view = |context| {
            Arc::new(Mutex::new(AnalysisView::new(
                context,
                store.clone(),
                capabilities.api.clone(),
            )))
        };
        let analyses = AnalysisViews {
            precipitation: analysis_view(AnalysisContext::Precipitation),
            drought: analysis_view(AnalysisContext::Drought),
        };

        Self {
            config: Arc::new(config),
            store,
            registration: Arc::new(Mutex::new(registration)),
            analyses: Arc::new(analyses),
            notices,
            speech: capabilities.speech,
        }
    }

    /// Keep both analysis views in step with the crop store
    pub fn spawn_analysis_followers(&self) -> Vec<tokio::task::JoinHandle<()>> {
        AnalysisContext::ALL
            .into_iter()
            .map(|context| {
                let view = self.analyses.get(context).clone();
                tokio::spawn(views::follow_store(view, self.store.subscribe()))
            })
            .collect()
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(routes::shell_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

