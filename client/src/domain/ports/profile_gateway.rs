//! Driven port for self-service profile edits by drivers and mechanics.

use async_trait::async_trait;

use super::resource_error::SubmitError;
use crate::domain::CompositePayload;

/// Port updating the authenticated account's own composite profile.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileGateway: Send + Sync {
    /// Submit both groups of the caller's profile in one request.
    async fn update_profile(&self, payload: &CompositePayload) -> Result<(), SubmitError>;
}
