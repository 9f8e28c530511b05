//! Revision snapshots of parameter subscriptions
//!
//! A [`TrackedParameterSubscription`] is a point-in-time record of the
//! revision counters of one subscription's value sets. Two snapshots of the
//! same subscription can be diffed to find which value sets changed in
//! between; the diff is a pure function with no side effects.

use cdm_model::{ParameterSubscription, ParameterSubscriptionValueSet, SubscriptionId, ValueSetId};
use std::collections::HashMap;

/// Last-known revision counters of one value set
///
/// Both counters matter: the subscription-side value set has its own
/// revision, and the subscribed source value set revs independently when the
/// watched value changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevisionSnapshot {
    /// Revision of the subscription-side value set
    pub revision_number: u32,
    /// Revision of the subscribed source value set
    pub subscribed_revision_number: u32,
}

impl RevisionSnapshot {
    /// Capture the counters of a value set
    #[must_use]
    pub fn of(value_set: &ParameterSubscriptionValueSet) -> Self {
        Self {
            revision_number: value_set.revision_number,
            subscribed_revision_number: value_set.subscribed.revision_number,
        }
    }
}

/// Point-in-time snapshot of one subscription's value-set revisions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedParameterSubscription {
    subscription_id: SubscriptionId,
    count_changes: HashMap<ValueSetId, RevisionSnapshot>,
}

impl TrackedParameterSubscription {
    /// Capture the current revisions of a live subscription
    #[must_use]
    pub fn capture(subscription: &ParameterSubscription) -> Self {
        Self {
            subscription_id: subscription.iid,
            count_changes: subscription
                .value_sets
                .iter()
                .map(|vs| (vs.iid, RevisionSnapshot::of(vs)))
                .collect(),
        }
    }

    /// The subscription this snapshot was captured from
    #[must_use]
    pub fn subscription_id(&self) -> SubscriptionId {
        self.subscription_id
    }

    /// Identifiers of all value sets in this snapshot, sorted
    #[must_use]
    pub fn value_set_ids(&self) -> Vec<ValueSetId> {
        let mut ids: Vec<ValueSetId> = self.count_changes.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Number of value sets in this snapshot
    #[must_use]
    pub fn len(&self) -> usize {
        self.count_changes.len()
    }

    /// Whether the snapshot holds no value sets
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count_changes.is_empty()
    }

    /// Value sets whose revisions differ between `self` and `newer`
    ///
    /// `self` is the older snapshot. A value set present in `newer` but not
    /// in `self` was added in between and is reported as changed. The result
    /// is sorted for deterministic consumption.
    #[must_use]
    pub fn changed_value_sets(&self, newer: &Self) -> Vec<ValueSetId> {
        let mut changed: Vec<ValueSetId> = newer
            .count_changes
            .iter()
            .filter(|&(id, revision)| self.count_changes.get(id) != Some(revision))
            .map(|(&id, _)| id)
            .collect();
        changed.sort_unstable();
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdm_model::{DomainId, ParameterValueSet, ValueArray};

    fn subscription_with_sets(count: usize) -> ParameterSubscription {
        let mut subscription = ParameterSubscription::new(DomainId::new());
        for _ in 0..count {
            subscription = subscription.with_value_set(ParameterSubscriptionValueSet::new(
                ParameterValueSet::new(ValueArray::new(["0"])),
            ));
        }
        subscription
    }

    #[test]
    fn capture_records_every_value_set() {
        let subscription = subscription_with_sets(3);
        let snapshot = TrackedParameterSubscription::capture(&subscription);

        assert_eq!(snapshot.subscription_id(), subscription.iid);
        assert_eq!(snapshot.len(), 3);
    }

    #[test]
    fn identical_snapshots_report_no_change() {
        let subscription = subscription_with_sets(2);
        let older = TrackedParameterSubscription::capture(&subscription);
        let newer = TrackedParameterSubscription::capture(&subscription);

        assert!(older.changed_value_sets(&newer).is_empty());
    }

    #[test]
    fn subscribed_revision_bump_is_reported() {
        let mut subscription = subscription_with_sets(2);
        let older = TrackedParameterSubscription::capture(&subscription);

        subscription.value_sets[1]
            .subscribed
            .publish(ValueArray::new(["1"]));
        let changed_id = subscription.value_sets[1].iid;
        let newer = TrackedParameterSubscription::capture(&subscription);

        assert_eq!(older.changed_value_sets(&newer), vec![changed_id]);
    }

    #[test]
    fn own_revision_bump_is_reported() {
        let mut subscription = subscription_with_sets(1);
        let older = TrackedParameterSubscription::capture(&subscription);

        subscription.value_sets[0].revision_number += 1;
        let newer = TrackedParameterSubscription::capture(&subscription);

        assert_eq!(
            older.changed_value_sets(&newer),
            vec![subscription.value_sets[0].iid]
        );
    }

    #[test]
    fn added_value_set_counts_as_changed() {
        let mut subscription = subscription_with_sets(1);
        let older = TrackedParameterSubscription::capture(&subscription);

        subscription = subscription.with_value_set(ParameterSubscriptionValueSet::new(
            ParameterValueSet::new(ValueArray::new(["0"])),
        ));
        let added_id = subscription.value_sets[1].iid;
        let newer = TrackedParameterSubscription::capture(&subscription);

        assert_eq!(older.changed_value_sets(&newer), vec![added_id]);
    }
}
