//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod access_gateway;
mod prediction_source;
mod profile_gateway;
mod resource_error;
mod resource_gateway;

#[cfg(test)]
pub use access_gateway::MockAccessGateway;
pub use access_gateway::{AccessGateway, LoginGrant};
#[cfg(test)]
pub use prediction_source::MockPredictionSource;
pub use prediction_source::{PredictionOutcome, PredictionSource};
#[cfg(test)]
pub use profile_gateway::MockProfileGateway;
pub use profile_gateway::ProfileGateway;
pub use resource_error::{FetchError, GENERIC_FAILURE, ResourceError, SubmitError};
#[cfg(test)]
pub use resource_gateway::MockResourceGateway;
pub use resource_gateway::ResourceGateway;
