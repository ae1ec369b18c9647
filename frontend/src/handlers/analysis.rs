//! HTTP handlers for the precipitation and drought views

use axum::{
    extract::State,
    response::{Html, Redirect},
};
use shared::AnalysisContext;

use crate::handlers::layout;
use crate::views::AnalysisSnapshot;
use crate::AppState;

/// Mount the view for `context` and render it
///
/// If a refresh triggered by a store change is still running, the page shows
/// the loading state instead of waiting for it.
async fn render(state: &AppState, context: AnalysisContext) -> Html<String> {
    let snapshot = match state.analyses.get(context).try_lock() {
        Ok(mut view) => {
            view.mount().await;
            view.snapshot()
        }
        Err(_) => AnalysisSnapshot::loading(context, state.store.read()),
    };
    layout::page(
        context.tag(),
        &state.notices.drain(),
        &layout::analysis(&snapshot),
    )
}

/// A view busy fetching has no text to read yet
async fn speak(state: &AppState, context: AnalysisContext) -> Redirect {
    let spoken = match state.analyses.get(context).try_lock() {
        Ok(view) => view.read_aloud(&*state.speech),
        Err(_) => false,
    };
    if !spoken {
        tracing::debug!(%context, "Nothing to read aloud");
    }
    Redirect::to(context.path())
}

async fn stop(state: &AppState, context: AnalysisContext) -> Redirect {
    state.speech.stop();
    Redirect::to(context.path())
}

pub async fn precipitation_page(State(state): State<AppState>) -> Html<String> {
    render(&state, AnalysisContext::Precipitation).await
}

pub async fn precipitation_speak(State(state): State<AppState>) -> Redirect {
    speak(&state, AnalysisContext::Precipitation).await
}

pub async fn precipitation_stop(State(state): State<AppState>) -> Redirect {
    stop(&state, AnalysisContext::Precipitation).await
}

pub async fn drought_page(State(state): State<AppState>) -> Html<String> {
    render(&state, AnalysisContext::Drought).await
}

pub async fn drought_speak(State(state): State<AppState>) -> Redirect {
    speak(&state, AnalysisContext::Drought).await
}

pub async fn drought_stop(State(state): State<AppState>) -> Redirect {
    stop(&state, AnalysisContext::Drought).await
}
