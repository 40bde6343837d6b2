//! Driven port for triggering the fleet prediction model.

use async_trait::async_trait;

use super::resource_error::ResourceError;

/// Outcome of a prediction trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictionOutcome {
    /// HTTP status returned by the prediction service.
    pub status: u16,
}

impl PredictionOutcome {
    /// Whether the service accepted the request.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Port for the prediction service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PredictionSource: Send + Sync {
    /// Ask the service to run a prediction and report its response status.
    ///
    /// Only a missing response is an error; any status is an outcome.
    async fn trigger(&self) -> Result<PredictionOutcome, ResourceError>;
}
