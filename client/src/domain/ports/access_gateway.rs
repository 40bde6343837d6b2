//! Driven port for the backend access endpoints.
//!
//! The adapter applies the bounded login deadline; callers see a deadline
//! overrun as [`ResourceError::Network`] with `timed_out` set.

use async_trait::async_trait;

use super::resource_error::ResourceError;
use crate::domain::{LoginCredentials, RegistrationRequest, Role};

/// Successful login response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginGrant {
    /// Role reported by the backend.
    pub role: Role,
}

/// Port for login and account registration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessGateway: Send + Sync {
    /// Exchange credentials for the account's role.
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginGrant, ResourceError>;

    /// Register a new account. A duplicate account fails with
    /// [`ResourceError::Conflict`].
    async fn register(&self, request: &RegistrationRequest) -> Result<(), ResourceError>;
}
