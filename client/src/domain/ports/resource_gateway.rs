//! Driven port for one composite resource on the backend.
//!
//! One gateway instance is bound to one resource kind. Writes take a
//! [`CompositePayload`], so every create and update is a single call carrying
//! both attribute groups.

use async_trait::async_trait;

use super::resource_error::{FetchError, SubmitError};
use crate::domain::{CompositeEntity, CompositePayload, EntityId, PrimarySummary};

/// Port for reading and writing one composite resource.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceGateway: Send + Sync {
    /// Fetch every summary, in server order. No pagination.
    async fn list(&self) -> Result<Vec<PrimarySummary>, FetchError>;

    /// Fetch one full record. Unknown ids fail with
    /// [`ResourceError::NotFound`](super::ResourceError::NotFound).
    async fn get_detail(&self, id: &EntityId) -> Result<CompositeEntity, FetchError>;

    /// Create a record from both groups in one request.
    ///
    /// Not idempotent: repeating a failed create may produce a new record.
    async fn create(&self, payload: &CompositePayload) -> Result<(), SubmitError>;

    /// Update the record `id` from both groups in one request.
    async fn update(&self, id: &EntityId, payload: &CompositePayload) -> Result<(), SubmitError>;

    /// Delete the record `id`. A record that is already absent counts as
    /// removed.
    async fn remove(&self, id: &EntityId) -> Result<(), SubmitError>;
}
