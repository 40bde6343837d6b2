//! Authentication primitives: login credentials and the resulting identity.
//!
//! Credentials are validated before any request leaves the client so a blank
//! form never reaches the backend.

use std::fmt;

use zeroize::Zeroizing;

use super::ports::ResourceError;
use super::role::{Destination, Role};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials sent to the access endpoint.
///
/// ## Invariants
/// - `email` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use fleet_client::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ops@fleet.test ", "hunter2").unwrap();
/// assert_eq!(creds.email(), "ops@fleet.test");
/// assert_eq!(creds.password(), "hunter2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used as the account key.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Authenticated user held by the session context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    email: String,
    role: Role,
}

impl Identity {
    /// Create an identity for an authenticated account.
    pub fn new(email: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            role,
        }
    }

    /// Account email.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Role reported by the backend.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Routing hint for the presentation layer.
    pub fn destination(&self) -> Destination {
        self.role.home()
    }
}

/// Login failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The credentials were rejected locally before any request was sent.
    #[error("Login failed: {0}")]
    Invalid(#[from] LoginValidationError),
    /// The backend rejected the login or could not be reached.
    #[error("Login failed: {}", .0.detail())]
    Request(#[from] ResourceError),
}
