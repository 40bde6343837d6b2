//! Client configuration loaded via OrthoConfig.
//!
//! Values come from `FLEET_CLIENT_*` environment variables or an optional
//! configuration file; missing values fall back to the defaults below.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_PREDICTION_BASE_URL: &str = "http://127.0.0.1:8002";
const DEFAULT_LOGIN_TIMEOUT_MS: u64 = 3_000;
const DEFAULT_PREDICTION_TIMEOUT_MS: u64 = 30_000;

/// Errors raised while interpreting settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A URL setting did not parse.
    #[error("invalid {field}: {message}")]
    InvalidUrl {
        /// Setting name.
        field: &'static str,
        /// Parser message.
        message: String,
    },
    /// An HTTP client could not be built.
    #[error("failed to build HTTP client: {message}")]
    Client {
        /// reqwest message.
        message: String,
    },
}

/// Endpoints and deadlines for the backend and prediction services.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FLEET_CLIENT")]
pub struct ClientSettings {
    /// Backend API base URL.
    pub api_base_url: Option<String>,
    /// Prediction service base URL.
    pub prediction_base_url: Option<String>,
    /// Deadline for login and registration, in milliseconds.
    pub login_timeout_ms: Option<u64>,
    /// Deadline for resource requests, in milliseconds. Unset means none.
    pub request_timeout_ms: Option<u64>,
    /// Deadline for prediction requests, in milliseconds.
    pub prediction_timeout_ms: Option<u64>,
}

impl ClientSettings {
    /// Backend API base URL, falling back to the local default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] when the value does not parse.
    pub fn api_base_url(&self) -> Result<Url, ConfigError> {
        parse_url(
            "api_base_url",
            self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL),
        )
    }

    /// Prediction service base URL, falling back to the local default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] when the value does not parse.
    pub fn prediction_base_url(&self) -> Result<Url, ConfigError> {
        parse_url(
            "prediction_base_url",
            self.prediction_base_url
                .as_deref()
                .unwrap_or(DEFAULT_PREDICTION_BASE_URL),
        )
    }

    /// Login and registration deadline.
    pub fn login_timeout(&self) -> Duration {
        Duration::from_millis(self.login_timeout_ms.unwrap_or(DEFAULT_LOGIN_TIMEOUT_MS))
    }

    /// Resource request deadline, if any.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    /// Prediction request deadline.
    pub fn prediction_timeout(&self) -> Duration {
        Duration::from_millis(
            self.prediction_timeout_ms
                .unwrap_or(DEFAULT_PREDICTION_TIMEOUT_MS),
        )
    }
}

fn parse_url(field: &'static str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw.trim()).map_err(|err| ConfigError::InvalidUrl {
        field,
        message: err.to_string(),
    })
}
