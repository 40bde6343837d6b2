//! Reqwest-backed adapter for the prediction service.

use async_trait::async_trait;
use reqwest::Method;
use tracing::info;

use super::transport::HttpTransport;
use crate::domain::ports::{PredictionOutcome, PredictionSource, ResourceError};

const PREDICT_PATH: &str = "ml/predict";

/// Prediction service reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    transport: HttpTransport,
}

impl HttpPredictionClient {
    /// Wrap a transport pointed at the prediction service.
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl PredictionSource for HttpPredictionClient {
    async fn trigger(&self) -> Result<PredictionOutcome, ResourceError> {
        let status = self.transport.status_of(Method::GET, PREDICT_PATH).await?;
        info!(status, "prediction triggered");
        Ok(PredictionOutcome { status })
    }
}
