//! List/detail view model shared by every admin resource screen.
//!
//! The view model owns a snapshot of the resource collection, an optional
//! selected record, and the last operation error. The collection is only ever
//! replaced wholesale by a fresh `list()`: every successful mutation is
//! followed by a refetch, and a failed mutation leaves the snapshot alone.
//!
//! Operations take `&mut self`, so one instance never has two requests in
//! flight and responses cannot arrive out of order.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use super::composite::{CompositeEntity, CompositePayload, EntityId, PrimarySummary};
use super::ports::{ResourceError, ResourceGateway};

/// Lifecycle of a view model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The collection reflects the latest successful `list()`.
    Loaded,
    /// The last operation failed; see [`ListDetailViewModel::error`].
    Failed,
}

/// Operation an [`OperationError`] originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Collection fetch.
    List,
    /// Single record fetch.
    GetDetail,
    /// Record creation.
    Create,
    /// Record update.
    Update,
    /// Record removal.
    Remove,
}

impl Operation {
    const fn failure_label(self) -> &'static str {
        match self {
            Self::List => "could not load records",
            Self::GetDetail => "could not load the record",
            Self::Create => "could not add the record",
            Self::Update => "could not update the record",
            Self::Remove => "could not delete the record",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::List => "list",
            Self::GetDetail => "get_detail",
            Self::Create => "create",
            Self::Update => "update",
            Self::Remove => "remove",
        })
    }
}

/// Displayable failure of the last operation.
///
/// ## Invariants
/// - `message` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationError {
    message: String,
    source_operation: Operation,
}

impl OperationError {
    /// Describe a backend failure of `operation`.
    ///
    /// # Examples
    /// ```
    /// use fleet_client::domain::{Operation, OperationError};
    /// use fleet_client::domain::ports::ResourceError;
    ///
    /// let err = OperationError::from_resource_error(
    ///     Operation::Create,
    ///     &ResourceError::from_status(409, None),
    /// );
    /// assert!(err.message().contains("already exists"));
    /// ```
    pub fn from_resource_error(operation: Operation, error: &ResourceError) -> Self {
        Self {
            message: format!("{}: {error}", operation.failure_label()),
            source_operation: operation,
        }
    }

    /// Text for display.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Operation that failed.
    pub fn source_operation(&self) -> Operation {
        self.source_operation
    }
}

impl fmt::Display for OperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// State holder for one resource screen.
pub struct ListDetailViewModel<G> {
    gateway: Arc<G>,
    state: ViewState,
    collection: Vec<PrimarySummary>,
    selection: Option<CompositeEntity>,
    error: Option<OperationError>,
}

impl<G> ListDetailViewModel<G> {
    /// Create an idle view model with an empty collection.
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            state: ViewState::Idle,
            collection: Vec::new(),
            selection: None,
            error: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ViewState {
        self.state
    }

    /// Latest collection snapshot, possibly stale after a failure.
    pub fn collection(&self) -> &[PrimarySummary] {
        &self.collection
    }

    /// Selected record, if any.
    pub fn selection(&self) -> Option<&CompositeEntity> {
        self.selection.as_ref()
    }

    /// Error of the last operation, if it failed.
    pub fn error(&self) -> Option<&OperationError> {
        self.error.as_ref()
    }

    /// Whether a request is in flight; presenters disable actions meanwhile.
    pub fn is_busy(&self) -> bool {
        self.state == ViewState::Loading
    }

    fn fail(&mut self, operation: Operation, error: &ResourceError) -> ViewState {
        warn!(%operation, error = %error, "operation failed");
        self.error = Some(OperationError::from_resource_error(operation, error));
        self.state = ViewState::Failed;
        self.state
    }
}

impl<G> ListDetailViewModel<G>
where
    G: ResourceGateway,
{
    /// Replace the collection with a fresh server snapshot.
    ///
    /// Success clears the error and the selection. Failure keeps the previous
    /// collection visible.
    pub async fn refresh(&mut self) -> ViewState {
        self.state = ViewState::Loading;
        match self.gateway.list().await {
            Ok(items) => {
                debug!(count = items.len(), "collection refreshed");
                self.collection = items;
                self.selection = None;
                self.error = None;
                self.state = ViewState::Loaded;
                self.state
            }
            Err(error) => self.fail(Operation::List, &error),
        }
    }

    /// Load one record into the selection.
    ///
    /// Success leaves the collection, the error, and the state untouched.
    /// Failure clears the selection.
    pub async fn select(&mut self, id: EntityId) -> ViewState {
        match self.gateway.get_detail(&id).await {
            Ok(entity) => {
                self.selection = Some(entity);
                self.state
            }
            Err(error) => {
                self.selection = None;
                self.fail(Operation::GetDetail, &error)
            }
        }
    }

    /// Create a record, then refetch the collection.
    ///
    /// The payload is borrowed so the caller's form survives a failure.
    pub async fn create(&mut self, payload: &CompositePayload) -> ViewState {
        self.state = ViewState::Loading;
        let outcome = self.gateway.create(payload).await;
        self.settle(Operation::Create, outcome).await
    }

    /// Update a record, then refetch the collection.
    pub async fn update(&mut self, id: EntityId, payload: &CompositePayload) -> ViewState {
        self.state = ViewState::Loading;
        let outcome = self.gateway.update(&id, payload).await;
        self.settle(Operation::Update, outcome).await
    }

    /// Delete a record, then refetch the collection.
    ///
    /// A record that is already gone counts as removed.
    pub async fn remove(&mut self, id: EntityId) -> ViewState {
        self.state = ViewState::Loading;
        let outcome = match self.gateway.remove(&id).await {
            Err(error) if error.is_not_found() => {
                debug!(%id, "record already absent");
                Ok(())
            }
            other => other,
        };
        if outcome.is_ok() && self.selection.as_ref().is_some_and(|entity| entity.id() == id) {
            self.selection = None;
        }
        self.settle(Operation::Remove, outcome).await
    }

    async fn settle(
        &mut self,
        operation: Operation,
        outcome: Result<(), ResourceError>,
    ) -> ViewState {
        match outcome {
            Ok(()) => self.refresh().await,
            Err(error) => self.fail(operation, &error),
        }
    }
}
