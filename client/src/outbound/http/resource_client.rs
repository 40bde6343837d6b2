//! Reqwest-backed composite resource adapter.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use super::transport::HttpTransport;
use crate::domain::ports::{FetchError, ProfileGateway, ResourceGateway, SubmitError};
use crate::domain::{
    CompositeEntity, CompositePayload, EntityId, PrimarySummary, ResourceDescriptor,
};

/// One composite resource reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpResourceClient {
    transport: HttpTransport,
    descriptor: &'static ResourceDescriptor,
}

impl HttpResourceClient {
    /// Bind a transport to one resource.
    pub fn new(transport: HttpTransport, descriptor: &'static ResourceDescriptor) -> Self {
        Self {
            transport,
            descriptor,
        }
    }

    /// Resource this client talks to.
    pub fn descriptor(&self) -> &'static ResourceDescriptor {
        self.descriptor
    }
}

#[async_trait]
impl ResourceGateway for HttpResourceClient {
    async fn list(&self) -> Result<Vec<PrimarySummary>, FetchError> {
        let items: Vec<Value> = self
            .transport
            .send_json(Method::GET, &self.descriptor.list_path(), None)
            .await?;
        items
            .into_iter()
            .map(|item| PrimarySummary::from_value(self.descriptor, item))
            .collect()
    }

    async fn get_detail(&self, id: &EntityId) -> Result<CompositeEntity, FetchError> {
        let body: Value = self
            .transport
            .send_json(Method::GET, &self.descriptor.detail_path(*id), None)
            .await?;
        CompositeEntity::from_response(self.descriptor, body)
    }

    async fn create(&self, payload: &CompositePayload) -> Result<(), SubmitError> {
        let body = payload.to_body(self.descriptor);
        self.transport
            .send(Method::POST, &self.descriptor.create_path(), Some(&body))
            .await
            .map(drop)
    }

    async fn update(&self, id: &EntityId, payload: &CompositePayload) -> Result<(), SubmitError> {
        let body = payload.to_body(self.descriptor);
        self.transport
            .send(Method::PUT, &self.descriptor.update_path(*id), Some(&body))
            .await
            .map(drop)
    }

    async fn remove(&self, id: &EntityId) -> Result<(), SubmitError> {
        match self
            .transport
            .send(Method::DELETE, &self.descriptor.delete_path(*id), None)
            .await
        {
            Ok(_) => Ok(()),
            Err(error) if error.is_not_found() => {
                debug!(resource = self.descriptor.base_path(), %id, "delete of absent record");
                Ok(())
            }
            Err(error) => Err(error),
        }
    }
}

#[async_trait]
impl ProfileGateway for HttpResourceClient {
    async fn update_profile(&self, payload: &CompositePayload) -> Result<(), SubmitError> {
        let body = payload.to_body(self.descriptor);
        self.transport
            .send(Method::PUT, &self.descriptor.profile_path(), Some(&body))
            .await
            .map(drop)
    }
}
