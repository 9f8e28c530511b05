//! Session access seam
//!
//! The remote session/data-access layer is external to this workspace; the
//! core talks to it exclusively through [`SessionAccess`], injected into
//! every consumer's constructor. Reads are synchronous against the session's
//! local cache; writes and refreshes cross the network and are async.

use crate::error::SessionError;
use async_trait::async_trait;
use cdm_model::{AnyThing, ClassKind, DomainId, Iteration, IterationId};
use std::sync::Arc;
use uuid::Uuid;

/// Write-permission capability
///
/// Split from [`SessionAccess`] so components that only check permissions
/// (row tables refreshing access rights) do not depend on the full session.
pub trait PermissionPolicy: Send + Sync {
    /// Whether the current user may write things of `kind` inside `container`
    fn can_write(&self, kind: ClassKind, container: Option<Uuid>) -> bool;
}

/// A batch of create/update/delete operations submitted as one unit
#[derive(Debug, Clone, Default)]
pub struct Transaction {
    /// Things to create
    pub created: Vec<AnyThing>,
    /// Things to update
    pub updated: Vec<AnyThing>,
    /// Identifiers of things to delete
    pub deleted: Vec<Uuid>,
}

impl Transaction {
    /// Create an empty transaction
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a thing for creation
    #[must_use]
    pub fn create(mut self, thing: impl Into<AnyThing>) -> Self {
        self.created.push(thing.into());
        self
    }

    /// Queue a thing for update
    #[must_use]
    pub fn update(mut self, thing: impl Into<AnyThing>) -> Self {
        self.updated.push(thing.into());
        self
    }

    /// Queue a thing for deletion
    #[must_use]
    pub fn delete(mut self, iid: Uuid) -> Self {
        self.deleted.push(iid);
        self
    }

    /// Whether the transaction carries no operations
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.updated.is_empty() && self.deleted.is_empty()
    }
}

/// Access to the remote session
#[async_trait]
pub trait SessionAccess: PermissionPolicy {
    /// The currently open iterations, in opening order
    fn open_iterations(&self) -> Vec<Arc<Iteration>>;

    /// The active domain of expertise for an open iteration
    ///
    /// `None` when the iteration is not open or the user holds no domain in
    /// it; callers treat that as "nothing tracked", not as an error.
    fn domain_of_expertise(&self, iteration: IterationId) -> Option<DomainId>;

    /// Submit a transaction to the store
    ///
    /// # Errors
    /// Fails when the endpoint is unreachable, the transaction is empty, or
    /// a targeted thing is unknown; the store state is unchanged on failure.
    async fn submit(&self, transaction: Transaction) -> Result<(), SessionError>;

    /// Pull pending remote changes and re-publish them on the bus
    ///
    /// # Errors
    /// Fails when the endpoint is unreachable.
    async fn refresh(&self) -> Result<(), SessionError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdm_model::{DesignOption, MeasurementUnit, ReferenceLibrary};

    #[test]
    fn transaction_builder() {
        let library = ReferenceLibrary::new("Generic RDL", "RDL");
        let unit = MeasurementUnit::new("second", "s", library.iid);
        let option = DesignOption::new("Option A", IterationId::new());
        let gone = Uuid::new_v4();

        let transaction = Transaction::new()
            .create(option)
            .update(unit)
            .delete(gone);

        assert_eq!(transaction.created.len(), 1);
        assert_eq!(transaction.updated.len(), 1);
        assert_eq!(transaction.deleted, vec![gone]);
        assert!(!transaction.is_empty());
        assert!(Transaction::new().is_empty());
    }
}
