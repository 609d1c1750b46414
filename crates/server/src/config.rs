//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `DISPATCH_DATA_DIR` - Directory for persisted collections (default: ./data)
//! - `DISPATCH_HOST` - Bind address (default: 127.0.0.1)
//! - `DISPATCH_PORT` - Listen port (default: 3000)
//! - `GOOGLE_MAPS_API_KEY` - Google Maps web services key; when absent,
//!   sequencing and geocoding endpoints respond with 503
//! - `GOOGLE_MAPS_BASE_URL` - Override the Google API base URL (tests/mocks)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

/// Default Google Maps web services base URL.
const DEFAULT_MAPS_BASE_URL: &str = "https://maps.googleapis.com";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Dispatch server configuration.
#[derive(Clone)]
pub struct Config {
    /// Directory holding the persisted JSON collections
    pub data_dir: PathBuf,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Google Maps configuration; `None` when no API key is configured
    pub maps: Option<MapsConfig>,
}

/// Google Maps web services configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct MapsConfig {
    /// API key for the Directions, Distance Matrix, and Geocoding services
    pub api_key: SecretString,
    /// Base URL for the web services (overridable for tests)
    pub base_url: String,
}

impl std::fmt::Debug for MapsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapsConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("data_dir", &self.data_dir)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("maps", &self.maps)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = std::env::var("DISPATCH_DATA_DIR")
            .map_or_else(|_| PathBuf::from("./data"), PathBuf::from);

        let host = parse_env_or("DISPATCH_HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = parse_env_or("DISPATCH_PORT", 3000)?;

        let maps = std::env::var("GOOGLE_MAPS_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .map(|key| MapsConfig {
                api_key: SecretString::from(key),
                base_url: std::env::var("GOOGLE_MAPS_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_MAPS_BASE_URL.to_string()),
            });

        Ok(Self {
            data_dir,
            host,
            port,
            maps,
        })
    }

    /// Socket address to bind the server to.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Parse an optional environment variable, falling back to a default.
fn parse_env_or<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidEnvVar(name.to_string(), value)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_or_default() {
        let port = parse_env_or("DISPATCH_TEST_UNSET_PORT", 3000u16).expect("default");
        assert_eq!(port, 3000);
    }

    #[test]
    fn test_default_maps_base_url() {
        assert!(DEFAULT_MAPS_BASE_URL.starts_with("https://"));
    }
}
