//! HTTP outbound adapters.
//!
//! Thin reqwest implementations of the domain ports. Transport details
//! (URL joining, deadlines, status mapping, detail extraction) live in
//! [`transport`]; each adapter only shapes requests and decodes responses.

mod access_client;
mod dto;
mod prediction_client;
mod resource_client;
pub mod transport;

pub use access_client::HttpAccessClient;
pub use prediction_client::HttpPredictionClient;
pub use resource_client::HttpResourceClient;
pub use transport::HttpTransport;

use crate::config::{ClientSettings, ConfigError};
use crate::domain::ResourceKind;

/// Every adapter the client needs, built from one settings value.
#[derive(Debug, Clone)]
pub struct HttpClients {
    access: HttpAccessClient,
    resources: HttpTransport,
    prediction: HttpPredictionClient,
}

impl HttpClients {
    /// Build the adapters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a URL is malformed or a reqwest client
    /// cannot be constructed.
    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ConfigError> {
        let api = settings.api_base_url()?;
        let access = HttpTransport::new(api.clone(), Some(settings.login_timeout()))
            .map_err(client_error)?;
        let resources =
            HttpTransport::new(api, settings.request_timeout()).map_err(client_error)?;
        let prediction = HttpTransport::new(
            settings.prediction_base_url()?,
            Some(settings.prediction_timeout()),
        )
        .map_err(client_error)?;
        Ok(Self {
            access: HttpAccessClient::new(access),
            resources,
            prediction: HttpPredictionClient::new(prediction),
        })
    }

    /// Login and registration adapter.
    pub fn access(&self) -> HttpAccessClient {
        self.access.clone()
    }

    /// Adapter for one composite resource.
    pub fn resource(&self, kind: ResourceKind) -> HttpResourceClient {
        HttpResourceClient::new(self.resources.clone(), kind.descriptor())
    }

    /// Prediction service adapter.
    pub fn prediction(&self) -> HttpPredictionClient {
        self.prediction.clone()
    }
}

fn client_error(error: reqwest::Error) -> ConfigError {
    ConfigError::Client {
        message: error.to_string(),
    }
}
