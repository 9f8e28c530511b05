//! In-memory session
//!
//! Reference implementation of [`SessionAccess`] holding everything in
//! process memory. It backs the integration tests of the tracking and
//! reconciliation crates and doubles as an executable description of the
//! collaborator contract: opening/closing iterations, domain switches,
//! transactions and refresh batches all publish the same events a remote
//! session would.

use crate::bus::{BusEvent, EventBus};
use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::events::{SessionEvent, ThingChangeSet};
use crate::session::{PermissionPolicy, SessionAccess, Transaction};
use async_trait::async_trait;
use cdm_model::{
    AnyThing, ClassKind, DesignOption, DomainId, DomainOfExpertise, ElementDefinition, Iteration,
    IterationId, MeasurementUnit, ParameterSubscription,
};
use parking_lot::{Mutex, RwLock};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

type StagedEvent = Box<dyn FnOnce(&EventBus) + Send>;

#[derive(Default)]
struct SessionState {
    iterations: Vec<Arc<Iteration>>,
    domains: HashMap<IterationId, DomainId>,
    cache: HashMap<Uuid, AnyThing>,
    staged_iterations: Vec<Arc<Iteration>>,
}

/// In-memory [`SessionAccess`] implementation
pub struct InMemorySession {
    bus: Arc<EventBus>,
    grants: RwLock<HashSet<ClassKind>>,
    state: RwLock<SessionState>,
    staged_events: Mutex<Vec<StagedEvent>>,
    offline: AtomicBool,
}

impl InMemorySession {
    /// Create a session from configuration
    #[must_use]
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            bus: Arc::new(EventBus::new(config.bus_capacity)),
            grants: RwLock::new(config.writable_kinds.iter().copied().collect()),
            state: RwLock::new(SessionState::default()),
            staged_events: Mutex::new(Vec::new()),
            offline: AtomicBool::new(false),
        }
    }

    /// The bus this session publishes on
    #[must_use]
    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    /// Open an iteration under the given domain of expertise
    pub fn open_iteration(&self, iteration: Arc<Iteration>, domain: DomainId) {
        {
            let mut state = self.state.write();
            state.domains.insert(iteration.iid, domain);
            state.iterations.retain(|it| it.iid != iteration.iid);
            state.iterations.push(iteration);
        }
        tracing::info!(%domain, "iteration opened");
        self.bus.publish(SessionEvent::IterationsChanged);
    }

    /// Close an open iteration
    pub fn close_iteration(&self, iteration: IterationId) {
        let removed = {
            let mut state = self.state.write();
            let before = state.iterations.len();
            state.iterations.retain(|it| it.iid != iteration);
            state.domains.remove(&iteration);
            before != state.iterations.len()
        };
        if removed {
            tracing::info!(%iteration, "iteration closed");
            self.bus.publish(SessionEvent::IterationsChanged);
        }
    }

    /// Switch the active domain of expertise of an open iteration
    pub fn switch_domain(&self, iteration: IterationId, domain: DomainId) {
        self.state.write().domains.insert(iteration, domain);
        tracing::info!(%iteration, %domain, "domain of expertise switched");
        self.bus.publish(SessionEvent::DomainChanged(iteration));
    }

    /// Grant write permission for a thing kind
    pub fn grant_write(&self, kind: ClassKind) {
        self.grants.write().insert(kind);
    }

    /// Revoke write permission for a thing kind
    pub fn revoke_write(&self, kind: ClassKind) {
        self.grants.write().remove(&kind);
    }

    /// Simulate losing/regaining the connection to the remote endpoint
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Seed the local cache with a thing, without publishing events
    pub fn seed_thing(&self, thing: impl Into<AnyThing>) {
        let thing = thing.into();
        self.state.write().cache.insert(thing.iid(), thing);
    }

    /// Look up a cached thing by iid
    #[must_use]
    pub fn thing(&self, iid: Uuid) -> Option<AnyThing> {
        self.state.read().cache.get(&iid).cloned()
    }

    /// All cached things convertible to `T`
    #[must_use]
    pub fn cached_of<T: TryFrom<AnyThing>>(&self) -> Vec<T> {
        self.state
            .read()
            .cache
            .values()
            .cloned()
            .filter_map(|thing| T::try_from(thing).ok())
            .collect()
    }

    /// Stage a newer version of an open iteration, applied on next refresh
    pub fn stage_iteration(&self, iteration: Arc<Iteration>) {
        self.state.write().staged_iterations.push(iteration);
    }

    /// Stage an event to publish at the end of the next refresh batch
    pub fn stage_event<E: BusEvent>(&self, event: E) {
        self.staged_events.lock().push(Box::new(move |bus| {
            bus.publish(event);
        }));
    }

    fn ensure_online(&self) -> Result<(), SessionError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(SessionError::ConnectionLost)
        } else {
            Ok(())
        }
    }
}

impl PermissionPolicy for InMemorySession {
    fn can_write(&self, kind: ClassKind, _container: Option<Uuid>) -> bool {
        self.grants.read().contains(&kind)
    }
}

#[async_trait]
impl SessionAccess for InMemorySession {
    fn open_iterations(&self) -> Vec<Arc<Iteration>> {
        self.state.read().iterations.clone()
    }

    fn domain_of_expertise(&self, iteration: IterationId) -> Option<DomainId> {
        self.state.read().domains.get(&iteration).copied()
    }

    async fn submit(&self, transaction: Transaction) -> Result<(), SessionError> {
        self.ensure_online()?;
        if transaction.is_empty() {
            return Err(SessionError::EmptyTransaction);
        }

        let (created, updated, deleted) = {
            let mut state = self.state.write();

            // Validate everything before touching the cache: a failed
            // transaction must leave prior state unchanged.
            for thing in &transaction.created {
                if state.cache.contains_key(&thing.iid()) {
                    return Err(SessionError::WriteRejected(format!(
                        "thing already exists: {}",
                        thing.iid()
                    )));
                }
            }
            for thing in &transaction.updated {
                if !state.cache.contains_key(&thing.iid()) {
                    return Err(SessionError::ThingNotFound(thing.iid()));
                }
            }
            for iid in &transaction.deleted {
                if !state.cache.contains_key(iid) {
                    return Err(SessionError::ThingNotFound(*iid));
                }
            }

            for thing in &transaction.created {
                state.cache.insert(thing.iid(), thing.clone());
            }
            for thing in &transaction.updated {
                state.cache.insert(thing.iid(), thing.clone());
            }
            let deleted: Vec<AnyThing> = transaction
                .deleted
                .iter()
                .filter_map(|iid| state.cache.remove(iid))
                .collect();

            (transaction.created, transaction.updated, deleted)
        };

        tracing::debug!(
            created = created.len(),
            updated = updated.len(),
            deleted = deleted.len(),
            "transaction applied"
        );
        publish_change_sets(&self.bus, &created, &updated, &deleted);
        Ok(())
    }

    async fn refresh(&self) -> Result<(), SessionError> {
        self.ensure_online()?;

        {
            let mut state = self.state.write();
            let staged = std::mem::take(&mut state.staged_iterations);
            for newer in staged {
                if let Some(slot) = state
                    .iterations
                    .iter_mut()
                    .find(|it| it.iid == newer.iid)
                {
                    *slot = newer;
                }
            }
        }

        let staged_events: Vec<StagedEvent> = std::mem::take(&mut *self.staged_events.lock());
        for publish in staged_events {
            publish(&self.bus);
        }

        tracing::debug!("session refresh batch finished");
        self.bus.publish(SessionEvent::RefreshEnded);
        Ok(())
    }
}

/// Re-publish a transaction as per-type change batches
fn publish_change_sets(
    bus: &EventBus,
    created: &[AnyThing],
    updated: &[AnyThing],
    deleted: &[AnyThing],
) {
    macro_rules! publish_kind {
        ($variant:ident => $ty:ty) => {{
            let pick = |things: &[AnyThing]| -> Vec<$ty> {
                things
                    .iter()
                    .filter_map(|thing| match thing {
                        AnyThing::$variant(inner) => Some(inner.clone()),
                        _ => None,
                    })
                    .collect()
            };
            let batch = ThingChangeSet::new()
                .with_added(pick(created))
                .with_updated(pick(updated))
                .with_deleted(pick(deleted));
            if !batch.is_empty() {
                bus.publish(batch);
            }
        }};
    }

    publish_kind!(DomainOfExpertise => DomainOfExpertise);
    publish_kind!(ElementDefinition => ElementDefinition);
    publish_kind!(ParameterSubscription => ParameterSubscription);
    publish_kind!(DesignOption => DesignOption);
    publish_kind!(MeasurementUnit => MeasurementUnit);
}
