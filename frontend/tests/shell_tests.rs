//! Navigation shell tests
//!
//! Drives the router in-process: page rendering, form posts, redirects
//! and notices carried over to the next page.

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::Datelike;
use common::*;
use crop_advisor::{config::Config, create_app, AppState};
use serde_json::Value;
use shared::{AnalysisContext, Coordinates, KeyValueStore, NO_CROP_MESSAGE, POSITION_KEY};
use tower::ServiceExt;

struct Shell {
    app: Router,
    state: AppState,
    api: Arc<FakeApi>,
    geocoder: Arc<FakeGeocoder>,
    speech: Arc<RecordingSpeech>,
}

fn shell_with(api: Arc<FakeApi>) -> Shell {
    let geocoder = FakeGeocoder::new();
    let speech = Arc::new(RecordingSpeech::default());
    let state = AppState::new(
        Config::default(),
        capabilities(
            api.clone(),
            geocoder.clone(),
            memory_storage(),
            speech.clone(),
        ),
    );
    Shell {
        app: create_app(state.clone()),
        state,
        api,
        geocoder,
        speech,
    }
}

fn shell() -> Shell {
    shell_with(FakeApi::ok())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn post_form(app: &Router, uri: &str, form: &str) -> (StatusCode, Option<String>) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    (response.status(), location)
}

fn corn_form() -> String {
    format!(
        "crop=corn&cultivationA=small&agriculturalP=irrigation&predictionYear={}&predictionMonth=6",
        chrono::Local::now().year()
    )
}

// ============================================================================
// Layout
// ============================================================================

#[tokio::test]
async fn test_every_page_has_navigation() {
    let s = shell();
    for uri in ["/", "/registerCrop", "/analysisCropP", "/analysisCropD"] {
        let (status, html) = get(&s.app, uri).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert!(html.contains(r#"href="/registerCrop""#), "{}", uri);
        assert!(html.contains(">Precipitation</a>"), "{}", uri);
        assert!(html.contains(">Droughts</a>"), "{}", uri);
    }
}

#[tokio::test]
async fn test_health_reports_registration() {
    let s = shell();
    let (status, body) = get(&s.app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["crop_registered"], false);

    s.state.store.write(corn());
    let (_, body) = get(&s.app, "/health").await;
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["crop_registered"], true);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let s = shell();
    let (status, _) = get(&s.app, "/analysisCropX").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn test_registration_page_lists_options() {
    let s = shell();
    let (_, html) = get(&s.app, "/registerCrop").await;
    assert!(html.contains("Small (0.5 - 2 hectares)"));
    assert!(html.contains("Crop Rotation"));
    assert!(html.contains(&chrono::Local::now().year().to_string()));
    assert!(html.contains("Delete Data"));
    assert!(html.contains(r#"value="Analyze""#));
}

#[tokio::test]
async fn test_submit_registers_and_shows_notice() {
    let s = shell();

    let (status, location) = post_form(&s.app, "/registerCrop", &corn_form()).await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/registerCrop"));
    assert_eq!(s.state.store.revision(), 1);
    assert_eq!(s.state.store.read().unwrap().crop, "corn");
    assert_eq!(s.api.register_calls(), 1);

    let (_, html) = get(&s.app, "/registerCrop").await;
    assert!(html.contains("The results are ready, you can visit them."));
    assert!(html.contains("Crop saved"));

    // Notices are shown once
    let (_, html) = get(&s.app, "/registerCrop").await;
    assert!(!html.contains("Crop saved"));
}

#[tokio::test]
async fn test_incomplete_submit_shows_error_and_writes_nothing() {
    let s = shell();

    let (status, _) = post_form(&s.app, "/registerCrop", "crop=corn").await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert!(s.state.store.is_empty());
    assert_eq!(s.api.register_calls(), 0);
    let (_, html) = get(&s.app, "/registerCrop").await;
    assert!(html.contains("notice-error"));
    // The draft survives the failed submit
    assert!(html.contains(r#"value="corn""#));
}

#[tokio::test]
async fn test_unknown_form_field_is_bad_request() {
    let s = shell();
    let (status, _) = post_form(&s.app, "/registerCrop", "harvestDate=2025-01-01").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rejected_form_leaves_draft_untouched() {
    let s = shell();

    let (status, _) = post_form(&s.app, "/registerCrop", "crop=wheat&harvestDate=2025-01-01").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(s.state.registration.lock().await.draft().is_empty());
    assert!(s.state.store.is_empty());
}

#[tokio::test]
async fn test_reset_clears_draft_only() {
    let s = shell();
    post_form(&s.app, "/registerCrop", &corn_form()).await;

    let (status, location) = post_form(&s.app, "/registerCrop/reset", "").await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/registerCrop"));
    assert!(s.state.registration.lock().await.draft().is_empty());
    assert_eq!(s.state.store.read().unwrap().crop, "corn");
}

#[tokio::test]
async fn test_map_event_moves_marker_and_caches_position() {
    let s = shell();

    let (status, _) = post_form(
        &s.app,
        "/registerCrop/location",
        "source=drag&lat=40&lng=-3",
    )
    .await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    let view = s.state.registration.lock().await;
    assert_eq!(view.marker(), Coordinates::new(40.0, -3.0));
    drop(view);

    let mut attempts = 0;
    while s.geocoder.calls() == 0 && attempts < 100 {
        tokio::time::sleep(Duration::from_millis(10)).await;
        attempts += 1;
    }
    assert_eq!(s.geocoder.calls(), 1);
}

#[tokio::test]
async fn test_map_event_out_of_range_is_rejected() {
    let s = shell();
    let (status, _) = post_form(&s.app, "/registerCrop/location", "lat=91&lng=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(s.geocoder.calls(), 0);
}

#[tokio::test]
async fn test_position_survives_restart() {
    let storage = memory_storage();
    let make = |storage| {
        let state = AppState::new(
            Config::default(),
            capabilities(
                FakeApi::ok(),
                FakeGeocoder::new(),
                storage,
                Arc::new(RecordingSpeech::default()),
            ),
        );
        (create_app(state.clone()), state)
    };

    let (app, _) = make(storage.clone());
    post_form(&app, "/registerCrop/location", "lat=12.5&lng=7.25").await;
    assert_eq!(
        storage.get(POSITION_KEY).unwrap().as_deref(),
        Some("[12.5,7.25]")
    );

    let (_, state) = make(storage);
    assert_eq!(
        state.registration.lock().await.marker(),
        Coordinates::new(12.5, 7.25)
    );
}

// ============================================================================
// Analysis
// ============================================================================

#[tokio::test]
async fn test_analysis_without_crop_shows_empty_record() {
    let s = shell();
    let (status, html) = get(&s.app, "/analysisCropP").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<pre>{}</pre>"));
    assert!(!html.contains("Recommendations:"));
    assert_eq!(s.api.content_calls(), 0);
}

#[tokio::test]
async fn test_analysis_after_registration_shows_recommendation() {
    let s = shell();
    post_form(&s.app, "/registerCrop", &corn_form()).await;

    let (_, html) = get(&s.app, "/analysisCropP").await;

    assert!(html.contains("Recommendations:"));
    assert!(html.contains("Expect moderate rainfall."));
    assert!(html.contains("&quot;crop&quot;: &quot;corn&quot;"));
    let requests = s.api.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].context, AnalysisContext::Precipitation);
}

#[tokio::test]
async fn test_drought_failure_shows_message() {
    let s = shell_with(FakeApi::new(
        RegisterBehavior::Registered("ok".to_string()),
        ContentBehavior::Fail,
    ));
    s.state.store.write(corn());

    let (_, html) = get(&s.app, "/analysisCropD").await;

    assert!(html.contains(NO_CROP_MESSAGE));
    assert!(!html.contains("Recommendations:"));
}

#[tokio::test]
async fn test_read_aloud_and_stop() {
    let s = shell();
    s.state.store.write(corn());
    get(&s.app, "/analysisCropD").await;

    let (status, location) = post_form(&s.app, "/analysisCropD/speak", "").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/analysisCropD"));
    assert_eq!(
        *s.speech.spoken.lock().unwrap(),
        vec!["Expect moderate rainfall.".to_string()]
    );

    post_form(&s.app, "/analysisCropD/stop", "").await;
    assert_eq!(s.speech.stops.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_stop_does_not_wait_for_busy_view() {
    let s = shell();
    let busy = s.state.analyses.drought.lock().await;

    let stopped = tokio::time::timeout(
        Duration::from_millis(500),
        post_form(&s.app, "/analysisCropD/stop", ""),
    )
    .await;

    let (status, _) = stopped.expect("stop should not wait for the view");
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(s.speech.stops.load(Ordering::SeqCst), 1);
    drop(busy);
}

#[tokio::test]
async fn test_speak_on_busy_view_reads_nothing() {
    let s = shell();
    s.state.store.write(corn());
    get(&s.app, "/analysisCropP").await;
    let busy = s.state.analyses.precipitation.lock().await;

    let spoken = tokio::time::timeout(
        Duration::from_millis(500),
        post_form(&s.app, "/analysisCropP/speak", ""),
    )
    .await;

    assert!(spoken.is_ok());
    assert!(s.speech.spoken.lock().unwrap().is_empty());
    drop(busy);
}

// ============================================================================
// Followers
// ============================================================================

async fn settle() {
    tokio::time::sleep(Duration::from_millis(200)).await;
}

fn calls_for(api: &FakeApi, context: AnalysisContext) -> usize {
    api.requests
        .lock()
        .unwrap()
        .iter()
        .filter(|r| r.context == context)
        .count()
}

#[tokio::test]
async fn test_registration_fetches_once_per_opened_view() {
    let s = shell();
    let followers = s.state.spawn_analysis_followers();

    post_form(&s.app, "/registerCrop", &corn_form()).await;
    settle().await;
    let (_, html) = get(&s.app, "/analysisCropP").await;
    settle().await;

    assert!(html.contains("Expect moderate rainfall."));
    assert_eq!(calls_for(&s.api, AnalysisContext::Precipitation), 1);
    assert_eq!(calls_for(&s.api, AnalysisContext::Drought), 0);

    for follower in followers {
        follower.abort();
    }
}

#[tokio::test]
async fn test_opened_view_follows_new_registration_once() {
    let s = shell();
    let followers = s.state.spawn_analysis_followers();

    get(&s.app, "/analysisCropP").await;
    post_form(&s.app, "/registerCrop", &corn_form()).await;
    settle().await;
    let (_, html) = get(&s.app, "/analysisCropP").await;
    settle().await;

    assert!(html.contains("Expect moderate rainfall."));
    assert_eq!(calls_for(&s.api, AnalysisContext::Precipitation), 1);
    assert_eq!(calls_for(&s.api, AnalysisContext::Drought), 0);

    for follower in followers {
        follower.abort();
    }
}
