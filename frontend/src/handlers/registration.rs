//! HTTP handlers for the crop registration view

use axum::{
    extract::State,
    response::{Html, Redirect},
    Form,
};
use chrono::Datelike;
use serde::Deserialize;
use shared::{parse_coordinate, Coordinates, CropField, MapEvent, Notice, Notifier};

use crate::error::{AppError, AppResult};
use crate::handlers::layout;
use crate::AppState;

const REGISTER_PATH: &str = "/registerCrop";

/// Layout with no view mounted
pub async fn home(State(state): State<AppState>) -> Html<String> {
    layout::page(layout::APP_TITLE, &state.notices.drain(), "")
}

/// Render the form, marker and place name
pub async fn registration_page(State(state): State<AppState>) -> Html<String> {
    let main = {
        let view = state.registration.lock().await;
        layout::registration_form(
            view.draft(),
            view.marker(),
            &view.location_name(),
            chrono::Local::now().year(),
        )
    };
    layout::page("Register Crop", &state.notices.drain(), &main)
}

/// Apply the posted form fields, then submit
///
/// The shared-state write happens under the view lock; the registration
/// request is sent after the lock is released.
pub async fn submit_registration(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> AppResult<Redirect> {
    let pending = {
        let mut view = state.registration.lock().await;
        view.update_fields(fields)?;
        match view.begin_submit() {
            Ok(pending) => Some(pending),
            Err(e @ AppError::Validation { .. }) => {
                tracing::debug!("Incomplete form: {}", e);
                state.notices.notify(Notice::error(e.to_string()));
                None
            }
            Err(e) => return Err(e),
        }
    };

    if let Some(pending) = pending {
        pending.send().await;
    }
    Ok(Redirect::to(REGISTER_PATH))
}

/// "Delete Data": clear the draft
pub async fn reset_form(State(state): State<AppState>) -> Redirect {
    state.registration.lock().await.reset_form();
    Redirect::to(REGISTER_PATH)
}

/// A click or drag reported by the map widget
#[derive(Debug, Deserialize)]
pub struct MapEventInput {
    pub lat: String,
    pub lng: String,
    #[serde(default)]
    pub source: MapEvent,
}

/// Move the marker and resolve the new place name in the background
pub async fn move_marker(
    State(state): State<AppState>,
    Form(input): Form<MapEventInput>,
) -> AppResult<Redirect> {
    let to = Coordinates::new(
        parse_coordinate(CropField::Lat, &input.lat)?,
        parse_coordinate(CropField::Lng, &input.lng)?,
    );
    let lookup = state.registration.lock().await.move_marker(to, input.source);
    lookup.spawn();
    Ok(Redirect::to(REGISTER_PATH))
}
