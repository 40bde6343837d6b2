//! Domain primitives, services, and ports.
//!
//! Purpose: keep the state-synchronisation rules of the admin client
//! independent of HTTP. Adapters in [`crate::outbound`] implement the ports in
//! [`ports`]; presenters drive [`SessionContext`] and
//! [`ListDetailViewModel`].
//!
//! Public surface:
//! - Role, Destination, AdminSection: routing and authorisation table.
//! - LoginCredentials, Identity, AuthError: authentication values.
//! - CompositePayload, CompositeEntity, PrimarySummary, EntityId: the two
//!   group record model.
//! - ResourceDescriptor, ResourceKind: per-resource paths and field groups.
//! - Registration and its parts: account sign-up forms.
//! - SessionContext, ListDetailViewModel: stateful services.

pub mod auth;
pub mod composite;
pub mod ports;
pub mod registration;
pub mod resource;
pub mod role;
pub mod session;
pub mod view_model;

pub use self::auth::{AuthError, Identity, LoginCredentials, LoginValidationError};
pub use self::composite::{CompositeEntity, CompositePayload, EntityId, FieldGroup, PrimarySummary};
pub use self::registration::{
    AccountFields, DriverProfile, MechanicProfile, Registration, RegistrationRequest,
    RegistrationValidationError, Sex,
};
pub use self::resource::{ResourceDescriptor, ResourceKind};
pub use self::role::{AdminSection, Destination, Role};
pub use self::session::{RegistrationError, SessionContext};
pub use self::view_model::{ListDetailViewModel, Operation, OperationError, ViewState};
