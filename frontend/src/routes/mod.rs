//! Route table for the navigation shell

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Shell routes: the registration view and both analysis views
pub fn shell_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::home))
        .merge(registration_routes())
        .merge(precipitation_routes())
        .merge(drought_routes())
}

/// Crop registration routes
fn registration_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/registerCrop",
            get(handlers::registration_page).post(handlers::submit_registration),
        )
        .route("/registerCrop/reset", post(handlers::reset_form))
        .route("/registerCrop/location", post(handlers::move_marker))
}

/// Precipitation analysis routes
fn precipitation_routes() -> Router<AppState> {
    Router::new()
        .route("/analysisCropP", get(handlers::precipitation_page))
        .route("/analysisCropP/speak", post(handlers::precipitation_speak))
        .route("/analysisCropP/stop", post(handlers::precipitation_stop))
}

/// Drought analysis routes
fn drought_routes() -> Router<AppState> {
    Router::new()
        .route("/analysisCropD", get(handlers::drought_page))
        .route("/analysisCropD/speak", post(handlers::drought_speak))
        .route("/analysisCropD/stop", post(handlers::drought_stop))
}
