//! Session context: owns the authenticated identity and decides where the
//! user is routed.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use super::auth::{AuthError, Identity, LoginCredentials};
use super::ports::{AccessGateway, ResourceError};
use super::registration::{Registration, RegistrationValidationError};
use super::role::Destination;

/// Registration failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    /// The form failed local validation; nothing was sent.
    #[error("{0}")]
    Invalid(#[from] RegistrationValidationError),
    /// The backend rejected the registration or could not be reached.
    #[error("{0}")]
    Request(#[from] ResourceError),
}

/// Holds the identity of the signed-in user, if any.
///
/// The identity lives only in memory; nothing is persisted.
pub struct SessionContext<A> {
    access: Arc<A>,
    identity: Option<Identity>,
}

impl<A> SessionContext<A> {
    /// Create a signed-out session.
    pub fn new(access: Arc<A>) -> Self {
        Self {
            access,
            identity: None,
        }
    }

    /// Current identity.
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Where the presentation layer should currently be: the identity's home,
    /// or the landing page when signed out.
    pub fn destination(&self) -> Destination {
        self.identity
            .as_ref()
            .map_or(Destination::Landing, Identity::destination)
    }

    /// Whether the current user may open `destination`.
    pub fn may_access(&self, destination: Destination) -> bool {
        match &self.identity {
            Some(identity) => identity.role().may_access(destination),
            None => destination == Destination::Landing,
        }
    }

    /// Drop the identity. Safe to call when already signed out.
    pub fn logout(&mut self) {
        if let Some(identity) = self.identity.take() {
            info!(role = %identity.role(), "signed out");
        }
    }
}

impl<A> SessionContext<A>
where
    A: AccessGateway,
{
    /// Authenticate and store the resulting identity.
    ///
    /// On failure the previous identity, if any, is left in place.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let credentials = LoginCredentials::try_from_parts(email, password)?;
        let grant = self.access.login(&credentials).await.map_err(|err| {
            warn!(error = %err, "login rejected");
            err
        })?;

        let identity = Identity::new(credentials.email(), grant.role);
        info!(role = %identity.role(), destination = %identity.destination(), "signed in");
        self.identity = Some(identity.clone());
        Ok(identity)
    }

    /// Register a new account. The session's identity is not changed.
    ///
    /// `today` fills a driver's missing first-ride date.
    pub async fn register(
        &self,
        registration: Registration,
        today: NaiveDate,
    ) -> Result<(), RegistrationError> {
        let request = registration.into_request(today)?;
        self.access.register(&request).await.map_err(|err| {
            warn!(role = request.role, error = %err, "registration rejected");
            RegistrationError::from(err)
        })?;
        info!(role = request.role, "account registered");
        Ok(())
    }
}
