use cdm_model::{DomainId, ParameterSubscription, ParameterSubscriptionValueSet, ParameterValueSet, ValueArray};
use cdm_tracking::TrackedParameterSubscription;
use proptest::prelude::*;

fn subscription_with_sets(count: usize) -> ParameterSubscription {
    let mut subscription = ParameterSubscription::new(DomainId::new());
    for _ in 0..count {
        subscription = subscription.with_value_set(ParameterSubscriptionValueSet::new(
            ParameterValueSet::new(ValueArray::new(["0"])),
        ));
    }
    subscription
}

proptest! {
    // Bumping exactly one value set's revision makes the diff report that
    // value set and no other, regardless of which counter moved.
    #[test]
    fn prop_single_bump_reports_single_value_set(
        (count, index, bump_subscribed) in (1..8usize)
            .prop_flat_map(|count| (Just(count), 0..count, any::<bool>()))
    ) {
        let mut subscription = subscription_with_sets(count);
        let older = TrackedParameterSubscription::capture(&subscription);

        if bump_subscribed {
            subscription.value_sets[index]
                .subscribed
                .publish(ValueArray::new(["1"]));
        } else {
            subscription.value_sets[index].revision_number += 1;
        }
        let newer = TrackedParameterSubscription::capture(&subscription);

        let changed = older.changed_value_sets(&newer);
        prop_assert_eq!(changed, vec![subscription.value_sets[index].iid]);
    }

    // Without any mutation the diff is empty, for any snapshot size.
    #[test]
    fn prop_unchanged_snapshots_diff_empty(count in 0..8usize) {
        let subscription = subscription_with_sets(count);
        let older = TrackedParameterSubscription::capture(&subscription);
        let newer = TrackedParameterSubscription::capture(&subscription);

        prop_assert!(older.changed_value_sets(&newer).is_empty());
    }

    // Every value set added after the first capture is reported.
    #[test]
    fn prop_added_value_sets_all_reported(
        (initial, added) in (0..5usize, 1..5usize)
    ) {
        let mut subscription = subscription_with_sets(initial);
        let older = TrackedParameterSubscription::capture(&subscription);

        for _ in 0..added {
            subscription = subscription.with_value_set(ParameterSubscriptionValueSet::new(
                ParameterValueSet::new(ValueArray::new(["0"])),
            ));
        }
        let newer = TrackedParameterSubscription::capture(&subscription);

        let changed = older.changed_value_sets(&newer);
        prop_assert_eq!(changed.len(), added);
    }
}
