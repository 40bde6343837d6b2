//! Shared reqwest plumbing for the backend adapters.
//!
//! Owns the base URL, the client with its deadline, and the mapping from
//! transport outcomes to [`ResourceError`].

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::dto::ErrorBodyDto;
use crate::domain::ports::ResourceError;

/// Base URL plus a configured reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base: Url,
}

impl HttpTransport {
    /// Build a transport. `timeout` bounds every request; `None` means no
    /// deadline.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base: with_trailing_slash(base),
        })
    }

    /// Base URL every path is resolved against.
    pub fn base(&self) -> &Url {
        &self.base
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ResourceError> {
        let url = self
            .base
            .join(path)
            .map_err(|err| ResourceError::decode(format!("invalid endpoint path {path:?}: {err}")))?;
        debug!(%method, %url, "sending request");
        Ok(self
            .client
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json"))
    }

    /// Send a request with an optional JSON body and return the raw success
    /// body.
    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Vec<u8>, ResourceError> {
        let mut request = self.request(method.clone(), path)?;
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            let error = map_status_error(status, bytes.as_ref());
            warn!(%method, path, status = status.as_u16(), error = %error, "request failed");
            return Err(error);
        }
        debug!(%method, path, status = status.as_u16(), "request succeeded");
        Ok(bytes.to_vec())
    }

    /// Send a request and decode the JSON success body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<T, ResourceError> {
        let bytes = self.send(method, path, body).await?;
        serde_json::from_slice(&bytes)
            .map_err(|err| ResourceError::decode(format!("invalid JSON payload: {err}")))
    }

    /// Send a request and report only its status.
    pub(crate) async fn status_of(&self, method: Method, path: &str) -> Result<u16, ResourceError> {
        let response = self
            .request(method, path)?
            .send()
            .await
            .map_err(map_transport_error)?;
        Ok(response.status().as_u16())
    }
}

fn with_trailing_slash(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

fn map_transport_error(error: reqwest::Error) -> ResourceError {
    ResourceError::network(error.to_string(), error.is_timeout())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ResourceError {
    ResourceError::from_status(status.as_u16(), extract_detail(body))
}

/// Pull the backend's human-readable `detail` out of an error body.
///
/// Accepts `{"detail": "text"}` and the validation shape
/// `{"detail": [{"msg": "text"}, ...]}`.
fn extract_detail(body: &[u8]) -> Option<String> {
    let parsed: ErrorBodyDto = serde_json::from_slice(body).ok()?;
    parsed
        .into_detail()
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}
