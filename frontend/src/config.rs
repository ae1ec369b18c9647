//! Configuration management for the Crop Advisor frontend
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with CROP_ prefix

use std::path::PathBuf;

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::Coordinates;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Shell server configuration
    pub server: ServerConfig,

    /// Registration and recommendation backend
    pub api: ApiConfig,

    /// Reverse geocoding service
    pub geocoding: GeocodingConfig,

    /// Durable client-side storage
    pub storage: StorageConfig,

    /// Device position reported by the host
    #[serde(default)]
    pub location: LocationConfig,

    /// Text-to-speech engine
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Logging output
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL for `/register` and `/generate-content`
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeocodingConfig {
    /// Nominatim base URL
    pub base_url: String,

    /// User-Agent sent to Nominatim (required by its usage policy)
    pub user_agent: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// JSON file backing the position cache
    pub position_file: PathBuf,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LocationConfig {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl LocationConfig {
    /// The configured device position, if both halves are present
    pub fn device_position(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SpeechConfig {
    /// External TTS program receiving the text as its last argument
    pub command: Option<String>,

    /// Extra arguments placed before the text
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset
    pub filter: String,

    /// Emit JSON lines instead of human readable output
    pub json: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("CROP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("api.base_url", "http://localhost:5000")?
            .set_default("geocoding.base_url", "https://nominatim.openstreetmap.org")?
            .set_default(
                "geocoding.user_agent",
                format!("crop-advisor/{}", env!("CARGO_PKG_VERSION")),
            )?
            .set_default("storage.position_file", "data/position.json")?
            .set_default("logging.filter", "crop_advisor=debug,tower_http=debug")?
            .set_default("logging.json", false)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CROP_ prefix)
            .add_source(
                Environment::with_prefix("CROP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            api: ApiConfig {
                base_url: "http://localhost:5000".to_string(),
            },
            geocoding: GeocodingConfig {
                base_url: "https://nominatim.openstreetmap.org".to_string(),
                user_agent: format!("crop-advisor/{}", env!("CARGO_PKG_VERSION")),
            },
            storage: StorageConfig {
                position_file: PathBuf::from("data/position.json"),
            },
            location: LocationConfig::default(),
            speech: SpeechConfig::default(),
            logging: LoggingConfig {
                filter: "crop_advisor=debug,tower_http=debug".to_string(),
                json: false,
            },
        }
    }
}
