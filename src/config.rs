//! Application configuration loaded from environment variables.
//!
//! Everything has a sensible default so the server runs out of the box for
//! local development.

use std::env;
use std::path::PathBuf;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Optional JSON seed file; the built-in catalog is used when unset
    pub activities_path: Option<PathBuf>,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Reject signups once an activity reaches `max_participants`
    pub enforce_capacity: bool,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8000,
            frontend_url: "http://localhost:8000".to_string(),
            activities_path: None,
            static_dir: PathBuf::from("static"),
            enforce_capacity: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            activities_path: env::var("ACTIVITIES_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("static")),
            enforce_capacity: match env::var("ENFORCE_CAPACITY") {
                Ok(raw) => parse_bool("ENFORCE_CAPACITY", &raw)?,
                Err(_) => false,
            },
        })
    }

    /// Whether `static_dir` exists, logging where the web client is served
    /// from. A relative default only resolves when started from the crate
    /// root.
    pub fn static_dir_available(&self) -> bool {
        let resolved = std::path::absolute(&self.static_dir)
            .unwrap_or_else(|_| self.static_dir.clone());

        if resolved.is_dir() {
            tracing::info!(path = %resolved.display(), "Serving web client");
            true
        } else {
            tracing::warn!(
                path = %resolved.display(),
                "Static directory not found; set STATIC_DIR to serve the web client"
            );
            false
        }
    }
}

fn parse_bool(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            value: raw.to_string(),
        }),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}
