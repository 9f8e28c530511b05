//! Events delivered over the session bus

use cdm_model::IterationId;

/// Session-level lifecycle events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The set of open iterations changed (one opened or closed)
    IterationsChanged,
    /// The domain of expertise of one iteration changed
    DomainChanged(IterationId),
    /// A session refresh batch finished applying
    RefreshEnded,
}

/// One batch of object changes for things of type `T`
///
/// Carried per subscribed type; consumers receive only the batches for the
/// type they subscribed to. An all-empty batch is legal and means "nothing
/// to apply".
#[derive(Debug, Clone)]
pub struct ThingChangeSet<T> {
    /// Things created since the last batch
    pub added: Vec<T>,
    /// Things modified since the last batch
    pub updated: Vec<T>,
    /// Things removed since the last batch
    pub deleted: Vec<T>,
}

impl<T> ThingChangeSet<T> {
    /// Create an empty batch
    #[must_use]
    pub fn new() -> Self {
        Self {
            added: Vec::new(),
            updated: Vec::new(),
            deleted: Vec::new(),
        }
    }

    /// Batch with added things
    #[must_use]
    pub fn with_added(mut self, added: Vec<T>) -> Self {
        self.added = added;
        self
    }

    /// Batch with updated things
    #[must_use]
    pub fn with_updated(mut self, updated: Vec<T>) -> Self {
        self.updated = updated;
        self
    }

    /// Batch with deleted things
    #[must_use]
    pub fn with_deleted(mut self, deleted: Vec<T>) -> Self {
        self.deleted = deleted;
        self
    }

    /// Whether all three change categories are empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.deleted.is_empty()
    }
}

impl<T> Default for ThingChangeSet<T> {
    fn default() -> Self {
        Self::new()
    }
}
