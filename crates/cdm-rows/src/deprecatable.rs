//! Row tables over deprecatable things
//!
//! Library items (units, scales, categories) are deprecated rather than
//! deleted once referenced. [`DeprecatableRowTable`] adds the deprecation
//! toggle on top of the plain reconciliation: the toggle is an async write
//! through the session, with a loading flag that is reset on every exit
//! path so the table never stays stuck after a failed write.

use crate::row::Row;
use crate::table::RowTable;
use cdm_session::{ObservableValue, PermissionPolicy, SessionAccess, SessionError, ThingChangeSet, Transaction};
use cdm_model::{AnyThing, Deprecatable};
use tokio::sync::watch;
use uuid::Uuid;

/// Row table for deprecatable things
#[derive(Debug)]
pub struct DeprecatableRowTable<R: Row> {
    table: RowTable<R>,
    is_loading: ObservableValue<bool>,
}

impl<R: Row> DeprecatableRowTable<R> {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: RowTable::new(),
            is_loading: ObservableValue::new(false),
        }
    }

    /// The underlying row table
    #[must_use]
    pub fn table(&self) -> &RowTable<R> {
        &self.table
    }

    /// The underlying row table, mutably
    pub fn table_mut(&mut self) -> &mut RowTable<R> {
        &mut self.table
    }

    /// Whether a deprecation write is in flight
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading.get()
    }

    /// Subscribe to loading-flag changes
    #[must_use]
    pub fn watch_is_loading(&self) -> watch::Receiver<bool> {
        self.is_loading.watch()
    }

    /// Apply one change batch to the underlying table
    pub fn apply_change_set(&mut self, changes: &ThingChangeSet<R::Item>, policy: &dyn PermissionPolicy) {
        self.table.apply_change_set(changes, policy);
    }
}

impl<R: Row> DeprecatableRowTable<R>
where
    R::Item: Deprecatable + Into<AnyThing>,
{
    /// Flip the deprecation state of a row's thing through the session
    ///
    /// The rows themselves are untouched here; the table catches up when the
    /// session re-publishes the update as a change batch. Calling this for
    /// an identity without a row is a sequencing bug in the caller and
    /// surfaces as [`SessionError::ThingNotFound`].
    ///
    /// # Errors
    /// Propagates the session failure after logging it; the loading flag is
    /// reset on every path.
    pub async fn toggle_deprecation(
        &self,
        session: &dyn SessionAccess,
        iid: Uuid,
    ) -> Result<(), SessionError> {
        let Some(row) = self.table.get(iid) else {
            return Err(SessionError::ThingNotFound(iid));
        };

        let mut updated = row.item().clone();
        let deprecate = !updated.is_deprecated();
        updated.set_deprecated(deprecate);
        let name = row.name().to_string();

        self.is_loading.set(true);
        let result = session.submit(Transaction::new().update(updated)).await;
        self.is_loading.set(false);

        match result {
            Ok(()) => {
                tracing::info!(%name, deprecate, "deprecation state submitted");
                Ok(())
            }
            Err(error) => {
                tracing::error!(%name, %error, "deprecation toggle failed");
                Err(error)
            }
        }
    }
}

impl<R: Row> Default for DeprecatableRowTable<R> {
    fn default() -> Self {
        Self::new()
    }
}
