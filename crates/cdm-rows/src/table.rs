//! Row table reconciliation
//!
//! Keeps an ordered collection of rows (one per live thing) synchronized
//! with add/update/delete notifications, without full reloads. The initial
//! listing is sorted case-insensitively by name; incremental adds append
//! instead of re-sorting. That asymmetry mirrors the table behavior users
//! see: a full (re)load presents a sorted list, later arrivals show up at
//! the bottom.

use crate::row::Row;
use cdm_session::{PermissionPolicy, ThingChangeSet};
use cdm_model::Thing;
use indexmap::IndexMap;
use uuid::Uuid;

/// Ordered, identity-keyed collection of rows
#[derive(Debug)]
pub struct RowTable<R: Row> {
    rows: IndexMap<Uuid, R>,
}

impl<R: Row> RowTable<R> {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: IndexMap::new(),
        }
    }

    /// Rows in display order
    pub fn rows(&self) -> impl Iterator<Item = &R> + '_ {
        self.rows.values()
    }

    /// Row for a thing identity, if present
    #[must_use]
    pub fn get(&self, iid: Uuid) -> Option<&R> {
        self.rows.get(&iid)
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Replace all rows from a full listing
    ///
    /// Projects every item, sorts case-insensitively by name and refreshes
    /// the write-permission flags.
    pub fn initialize<I>(&mut self, items: I, policy: &dyn PermissionPolicy)
    where
        I: IntoIterator<Item = R::Item>,
    {
        self.rows.clear();
        for item in items {
            self.rows.insert(item.iid(), R::from_item(&item));
        }
        self.rows
            .sort_by(|_, a, _, b| a.name().to_lowercase().cmp(&b.name().to_lowercase()));
        self.refresh_access_rights(policy);
        tracing::debug!(rows = self.rows.len(), "row table initialized");
    }

    /// Append rows for added things
    ///
    /// Identities already present are skipped: one row per live thing, never
    /// duplicated.
    pub fn add_rows(&mut self, added: &[R::Item]) {
        for item in added {
            let iid = item.iid();
            if self.rows.contains_key(&iid) {
                tracing::debug!(%iid, "row already present, add skipped");
                continue;
            }
            self.rows.insert(iid, R::from_item(item));
        }
    }

    /// Replace rows for updated things, in place
    ///
    /// Each matched row is replaced by a fresh projection at its current
    /// position. Updates for identities without a row are no-ops.
    pub fn update_rows(&mut self, updated: &[R::Item]) {
        for item in updated {
            if let Some(row) = self.rows.get_mut(&item.iid()) {
                *row = R::from_item(item);
            }
        }
    }

    /// Remove rows for deleted things
    ///
    /// Identities without a row are ignored; remaining rows keep their
    /// order.
    pub fn remove_rows(&mut self, deleted: &[R::Item]) {
        for item in deleted {
            self.rows.shift_remove(&item.iid());
        }
    }

    /// Recompute every row's write-permission flag
    pub fn refresh_access_rights(&mut self, policy: &dyn PermissionPolicy) {
        for row in self.rows.values_mut() {
            let allowed = policy.can_write(row.item().class_kind(), row.item().container());
            row.set_allowed_to_write(allowed);
        }
    }

    /// Update the displayed container name on rows contained by `container`
    ///
    /// Used when a container is renamed without the contained things
    /// themselves changing.
    pub fn refresh_container_name(&mut self, container: Uuid, name: &str) {
        for row in self.rows.values_mut() {
            if row.item().container() == Some(container) {
                row.set_container_name(name);
            }
        }
    }

    /// Apply one change batch
    ///
    /// An all-empty batch is a no-op (no re-render). Otherwise the
    /// categories are applied in the canonical order update → add → remove,
    /// followed by an access-rights refresh.
    pub fn apply_change_set(&mut self, changes: &ThingChangeSet<R::Item>, policy: &dyn PermissionPolicy) {
        if changes.is_empty() {
            return;
        }
        self.update_rows(&changes.updated);
        self.add_rows(&changes.added);
        self.remove_rows(&changes.deleted);
        self.refresh_access_rights(policy);
        tracing::debug!(
            added = changes.added.len(),
            updated = changes.updated.len(),
            deleted = changes.deleted.len(),
            "change batch applied"
        );
    }
}

impl<R: Row> Default for RowTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::DataItemRow;
    use cdm_model::{ClassKind, DesignOption, IterationId};

    struct AllowAll;

    impl PermissionPolicy for AllowAll {
        fn can_write(&self, _kind: ClassKind, _container: Option<Uuid>) -> bool {
            true
        }
    }

    struct DenyAll;

    impl PermissionPolicy for DenyAll {
        fn can_write(&self, _kind: ClassKind, _container: Option<Uuid>) -> bool {
            false
        }
    }

    fn option(name: &str, container: IterationId) -> DesignOption {
        DesignOption::new(name, container)
    }

    fn names(table: &RowTable<DataItemRow<DesignOption>>) -> Vec<String> {
        table.rows().map(|r| r.name().to_string()).collect()
    }

    #[test]
    fn initialize_sorts_case_insensitively() {
        let iteration = IterationId::new();
        let mut table: RowTable<DataItemRow<DesignOption>> = RowTable::new();
        table.initialize(
            vec![
                option("beta", iteration),
                option("Alpha", iteration),
                option("gamma", iteration),
            ],
            &AllowAll,
        );

        assert_eq!(names(&table), vec!["Alpha", "beta", "gamma"]);
        assert!(table.rows().all(Row::is_allowed_to_write));
    }

    #[test]
    fn add_is_idempotent_per_identity() {
        let iteration = IterationId::new();
        let item = option("solo", iteration);
        let mut table: RowTable<DataItemRow<DesignOption>> = RowTable::new();

        table.add_rows(&[item.clone()]);
        table.add_rows(&[item.clone()]);

        assert_eq!(table.len(), 1);
    }

    #[test]
    fn incremental_add_appends_after_sorted_rows() {
        let iteration = IterationId::new();
        let mut table: RowTable<DataItemRow<DesignOption>> = RowTable::new();
        table.initialize(
            vec![option("b", iteration), option("a", iteration)],
            &AllowAll,
        );
        table.add_rows(&[option("0-first-by-name", iteration)]);

        assert_eq!(names(&table), vec!["a", "b", "0-first-by-name"]);
    }

    #[test]
    fn update_replaces_in_place_and_ignores_absent() {
        let iteration = IterationId::new();
        let mut first = option("first", iteration);
        let second = option("second", iteration);
        let mut table: RowTable<DataItemRow<DesignOption>> = RowTable::new();
        table.initialize(vec![first.clone(), second.clone()], &AllowAll);

        first.name = "renamed".to_string();
        table.update_rows(&[first.clone()]);
        assert_eq!(names(&table), vec!["renamed", "second"]);

        // absent identity: no row is created
        table.update_rows(&[option("ghost", iteration)]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn remove_ignores_absent_identity() {
        let iteration = IterationId::new();
        let kept = option("kept", iteration);
        let mut table: RowTable<DataItemRow<DesignOption>> = RowTable::new();
        table.initialize(vec![kept.clone()], &AllowAll);

        table.remove_rows(&[option("ghost", iteration)]);
        assert_eq!(table.len(), 1);

        table.remove_rows(&[kept]);
        assert!(table.is_empty());
    }

    #[test]
    fn empty_batch_is_a_noop() {
        let iteration = IterationId::new();
        let mut table: RowTable<DataItemRow<DesignOption>> = RowTable::new();
        table.initialize(vec![option("row", iteration)], &AllowAll);

        // an all-empty batch must not even refresh access rights
        table.apply_change_set(&ThingChangeSet::new(), &DenyAll);
        assert!(table.rows().all(Row::is_allowed_to_write));
    }

    #[test]
    fn batch_applies_update_add_remove_and_refreshes_access() {
        let iteration = IterationId::new();
        let mut renamed = option("old", iteration);
        let removed = option("removed", iteration);
        let added = option("added", iteration);
        let mut table: RowTable<DataItemRow<DesignOption>> = RowTable::new();
        table.initialize(vec![renamed.clone(), removed.clone()], &AllowAll);

        renamed.name = "new".to_string();
        let batch = ThingChangeSet::new()
            .with_added(vec![added])
            .with_updated(vec![renamed])
            .with_deleted(vec![removed]);
        table.apply_change_set(&batch, &DenyAll);

        assert_eq!(names(&table), vec!["new", "added"]);
        assert!(table.rows().all(|r| !r.is_allowed_to_write()));
    }

    #[test]
    fn container_rename_updates_contained_rows_only() {
        let inside = IterationId::new();
        let outside = IterationId::new();
        let mut table: RowTable<DataItemRow<DesignOption>> = RowTable::new();
        table.initialize(
            vec![option("in", inside), option("out", outside)],
            &AllowAll,
        );

        table.refresh_container_name(inside.as_uuid(), "Iteration 2");

        let by_name: Vec<(String, String)> = table
            .rows()
            .map(|r| (r.name().to_string(), r.container_name().to_string()))
            .collect();
        assert!(by_name.contains(&("in".to_string(), "Iteration 2".to_string())));
        assert!(by_name.contains(&("out".to_string(), String::new())));
    }
}
