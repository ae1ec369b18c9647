//! Crop Advisor - frontend server
//!
//! Serves the navigation shell and hosts the registration and analysis
//! views for a single local session.

use std::net::SocketAddr;

use crop_advisor::{
    config::Config,
    create_app, logging,
    services::{ConfiguredGeolocator, GeocodeLookup},
    AppState, Capabilities,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    // Initialize tracing
    logging::init_logging(&config.logging);

    tracing::info!("Starting Crop Advisor");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!("Recommendation backend: {}", config.api.base_url);

    let capabilities = Capabilities::from_config(&config)?;
    let geolocator = ConfiguredGeolocator::new(config.location.device_position());
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    // Create application state
    let state = AppState::new(config, capabilities);
    let _followers = state.spawn_analysis_followers();

    // Mount the registration view: one geolocation request
    let lookup: Option<GeocodeLookup> = state
        .registration
        .lock()
        .await
        .acquire_location(&geolocator)
        .await;
    if let Some(lookup) = lookup {
        lookup.spawn();
    }

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
