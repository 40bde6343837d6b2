//! Transport-agnostic failure taxonomy shared by every backend port.
//!
//! Adapters translate protocol outcomes into these variants; the view model
//! and session context only ever see this shape.

use super::define_port_error;

/// Display text used when the backend supplied no detail message.
pub const GENERIC_FAILURE: &str = "An error occurred";

const NOT_FOUND_FALLBACK: &str = "no record with this id";
const CONFLICT_FALLBACK: &str = "duplicate record";

define_port_error! {
    /// Errors surfaced while calling the backend API.
    pub enum ResourceError {
        /// No response arrived, either because the connection failed or the
        /// request deadline elapsed.
        Network {
            /// Transport failure description.
            message: String,
            /// Whether the configured deadline elapsed.
            timed_out: bool,
        } => "network error: {message}",
        /// The backend has no record for the requested id (404).
        NotFound {
            /// Server detail, or a fallback description.
            message: String,
        } => "not found: {message}",
        /// The backend refused to create a duplicate record (409).
        Conflict {
            /// Server detail, or a fallback description.
            message: String,
        } => "resource already exists: {message}",
        /// Any other rejected status outside 5xx, including unexpected 3xx.
        Client {
            /// HTTP status code.
            status: u16,
            /// Server detail, or the generic failure text.
            message: String,
        } => "request rejected with status {status}: {message}",
        /// A 5xx failure.
        Server {
            /// HTTP status code.
            status: u16,
            /// Server detail, or the generic failure text.
            message: String,
        } => "server error {status}: {message}",
        /// A success response whose body did not have the expected shape.
        Decode {
            /// Decoder failure description.
            message: String,
        } => "unexpected response payload: {message}",
    }
}

/// Failure reading a collection or a single record.
pub type FetchError = ResourceError;

/// Failure submitting a create, update, or delete.
pub type SubmitError = ResourceError;

impl ResourceError {
    /// Classify a non-success HTTP status.
    ///
    /// `detail` is the human-readable message extracted from the response
    /// body; blank values are treated as absent.
    ///
    /// # Examples
    /// ```
    /// use fleet_client::domain::ports::ResourceError;
    ///
    /// let err = ResourceError::from_status(409, None);
    /// assert!(err.to_string().contains("already exists"));
    /// ```
    pub fn from_status(status: u16, detail: Option<String>) -> Self {
        let detail = detail.filter(|text| !text.trim().is_empty());
        match status {
            404 => Self::not_found(detail.unwrap_or_else(|| NOT_FOUND_FALLBACK.to_owned())),
            409 => Self::conflict(detail.unwrap_or_else(|| CONFLICT_FALLBACK.to_owned())),
            500..=599 => Self::server(
                status,
                detail.unwrap_or_else(|| GENERIC_FAILURE.to_owned()),
            ),
            _ => Self::client(
                status,
                detail.unwrap_or_else(|| GENERIC_FAILURE.to_owned()),
            ),
        }
    }

    /// HTTP status carried by the error, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Conflict { .. } => Some(409),
            Self::Client { status, .. } | Self::Server { status, .. } => Some(*status),
            Self::Network { .. } | Self::Decode { .. } => None,
        }
    }

    /// Human-readable detail without the category prefix.
    pub fn detail(&self) -> &str {
        match self {
            Self::Network { message, .. }
            | Self::NotFound { message }
            | Self::Conflict { message }
            | Self::Client { message, .. }
            | Self::Server { message, .. }
            | Self::Decode { message } => message.as_str(),
        }
    }

    /// Whether the backend reported the record as absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
