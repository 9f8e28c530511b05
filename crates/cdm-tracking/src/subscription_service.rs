//! Subscription update tracking
//!
//! [`SubscriptionService`] is the single per-session authority for "how many
//! subscribed-parameter value changes has the current user not yet seen",
//! across every open iteration. It keeps one snapshot list per iteration
//! (scoped to that iteration's current domain of expertise), recomputes the
//! delta whenever the session signals a refresh, and forwards the aggregate
//! count delta to the notification collaborator.

use crate::snapshot::TrackedParameterSubscription;
use cdm_session::{EventBus, Notifier, ObservableValue, SessionAccess, SessionEvent};
use cdm_model::{Iteration, IterationId, ValueSetId};
use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

/// Tracks subscription changes across all open iterations
pub struct SubscriptionService {
    session: Arc<dyn SessionAccess>,
    notifier: Arc<dyn Notifier>,
    tracked: DashMap<IterationId, Vec<TrackedParameterSubscription>>,
    updates: DashMap<IterationId, Vec<ValueSetId>>,
    update_count: ObservableValue<usize>,
}

impl SubscriptionService {
    /// Create a service over the given collaborators
    #[must_use]
    pub fn new(session: Arc<dyn SessionAccess>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            session,
            notifier,
            tracked: DashMap::new(),
            updates: DashMap::new(),
            update_count: ObservableValue::new(0),
        }
    }

    /// Total changed value sets found by the last recomputation
    #[must_use]
    pub fn subscription_update_count(&self) -> usize {
        self.update_count.get()
    }

    /// Subscribe to changes of the update count
    #[must_use]
    pub fn watch_update_count(&self) -> watch::Receiver<usize> {
        self.update_count.watch()
    }

    /// Snapshot list currently tracked for an iteration
    ///
    /// Empty when the iteration is not tracked.
    #[must_use]
    pub fn tracked_subscriptions(&self, iteration: IterationId) -> Vec<TrackedParameterSubscription> {
        self.tracked
            .get(&iteration)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Value sets reported as changed for an iteration by the last recomputation
    #[must_use]
    pub fn subscriptions_with_update(&self, iteration: IterationId) -> Vec<ValueSetId> {
        self.updates
            .get(&iteration)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Iterations with tracking bookkeeping
    #[must_use]
    pub fn tracked_iterations(&self) -> Vec<IterationId> {
        self.tracked.iter().map(|entry| *entry.key()).collect()
    }

    /// Re-capture tracked subscriptions for every open iteration
    ///
    /// Bookkeeping for iterations that are no longer open is dropped first.
    /// Existing snapshots are replaced, resetting the comparison baseline.
    pub fn update_tracked_subscriptions(&self) {
        let open = self.session.open_iterations();
        self.prune_closed(&open);
        for iteration in &open {
            self.tracked
                .insert(iteration.iid, self.capture_iteration(iteration));
        }
        tracing::debug!(iterations = open.len(), "tracked subscriptions recaptured");
    }

    /// Re-capture tracked subscriptions for a single iteration
    ///
    /// Used when the iteration's domain of expertise changes: subscriptions
    /// are domain-scoped, so the comparison baseline must reset. When the
    /// iteration is no longer open its bookkeeping is dropped instead.
    pub fn update_tracked_subscriptions_for(&self, iteration: IterationId) {
        let open = self.session.open_iterations();
        match open.iter().find(|it| it.iid == iteration) {
            Some(it) => {
                self.tracked.insert(iteration, self.capture_iteration(it));
                tracing::debug!(%iteration, "tracked subscriptions recaptured");
            }
            None => {
                self.tracked.remove(&iteration);
                self.updates.remove(&iteration);
                tracing::debug!(%iteration, "iteration not open, bookkeeping dropped");
            }
        }
    }

    /// Diff live subscriptions against the last snapshots
    ///
    /// For each open iteration the live subscriptions are compared with the
    /// last captured snapshot; the snapshot is then replaced. Iterations
    /// without a prior snapshot (newly opened) are initialized with zero
    /// reported changes. The notification collaborator receives exactly the
    /// difference between the new total and the previous one, and the
    /// observable count is set to the new total.
    pub fn compute_update_since_last_tracking(&self) {
        let open = self.session.open_iterations();
        self.prune_closed(&open);

        let mut total = 0usize;
        for iteration in &open {
            let fresh = self.capture_iteration(iteration);
            // clone out of the map so no shard lock is held across the inserts
            let previous = self
                .tracked
                .get(&iteration.iid)
                .map(|entry| entry.value().clone());
            let Some(previous) = previous else {
                self.tracked.insert(iteration.iid, fresh);
                self.updates.insert(iteration.iid, Vec::new());
                continue;
            };

            let mut changed: Vec<ValueSetId> = Vec::new();
            for snapshot in &fresh {
                match previous
                    .iter()
                    .find(|p| p.subscription_id() == snapshot.subscription_id())
                {
                    Some(older) => changed.extend(older.changed_value_sets(snapshot)),
                    // subscription itself is new: all its value sets changed
                    None => changed.extend(snapshot.value_set_ids()),
                }
            }

            total += changed.len();
            self.updates.insert(iteration.iid, changed);
            self.tracked.insert(iteration.iid, fresh);
        }

        let previous_total = self.update_count.get();
        if total > previous_total {
            self.notifier.add_notifications(total - previous_total);
        } else if total < previous_total {
            self.notifier.remove_notifications(previous_total - total);
        }
        self.update_count.set(total);
        tracing::debug!(total, previous = previous_total, "subscription updates recomputed");
    }

    /// Consume session events until the channel closes
    ///
    /// Dispatch: `IterationsChanged` re-captures everything,
    /// `DomainChanged` re-captures the named iteration, `RefreshEnded`
    /// recomputes the update delta.
    pub async fn run(&self, mut events: broadcast::Receiver<SessionEvent>) {
        loop {
            match events.recv().await {
                Ok(SessionEvent::IterationsChanged) => self.update_tracked_subscriptions(),
                Ok(SessionEvent::DomainChanged(iteration)) => {
                    self.update_tracked_subscriptions_for(iteration);
                }
                Ok(SessionEvent::RefreshEnded) => self.compute_update_since_last_tracking(),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "session events lagged, recomputing");
                    self.update_tracked_subscriptions();
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }

    /// Subscribe to the bus and drive [`Self::run`] on a background task
    #[must_use]
    pub fn spawn(self: Arc<Self>, bus: &EventBus) -> JoinHandle<()> {
        let events = bus.subscribe::<SessionEvent>();
        tokio::spawn(async move { self.run(events).await })
    }

    fn capture_iteration(&self, iteration: &Iteration) -> Vec<TrackedParameterSubscription> {
        let Some(domain) = self.session.domain_of_expertise(iteration.iid) else {
            // no domain of expertise: nothing is tracked for this iteration
            return Vec::new();
        };
        iteration
            .parameter_subscriptions()
            .filter(|subscription| subscription.owner == domain)
            .map(TrackedParameterSubscription::capture)
            .collect()
    }

    fn prune_closed(&self, open: &[Arc<Iteration>]) {
        let open_ids: HashSet<IterationId> = open.iter().map(|it| it.iid).collect();
        self.tracked.retain(|id, _| open_ids.contains(id));
        self.updates.retain(|id, _| open_ids.contains(id));
    }
}

impl std::fmt::Debug for SubscriptionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionService")
            .field("tracked_iterations", &self.tracked.len())
            .field("update_count", &self.update_count.get())
            .finish_non_exhaustive()
    }
}
