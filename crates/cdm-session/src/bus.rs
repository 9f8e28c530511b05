//! Typed in-process message bus
//!
//! Pub/sub keyed by event type: a subscriber asks for events of type `E` and
//! receives exactly the events published as `E`. The bus is handed to every
//! component explicitly; there is no process-global instance.

use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use tokio::sync::broadcast;

/// Marker for types that can travel over the bus
pub trait BusEvent: Clone + Send + 'static {}

impl<T: Clone + Send + 'static> BusEvent for T {}

/// Type-keyed broadcast bus
///
/// Each event type gets its own broadcast channel, created lazily on first
/// subscription. Publishing to a type nobody subscribed to is a no-op.
#[derive(Debug)]
pub struct EventBus {
    capacity: usize,
    topics: RwLock<HashMap<TypeId, Box<dyn Any + Send + Sync>>>,
}

impl EventBus {
    /// Create a bus whose channels buffer up to `capacity` events
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            topics: RwLock::new(HashMap::new()),
        }
    }

    /// Subscribe to events of type `E`
    #[must_use]
    pub fn subscribe<E: BusEvent>(&self) -> broadcast::Receiver<E> {
        let key = TypeId::of::<E>();

        if let Some(topic) = self.topics.read().get(&key) {
            let sender = topic
                .downcast_ref::<broadcast::Sender<E>>()
                .expect("topic registered under its own TypeId");
            return sender.subscribe();
        }

        let mut topics = self.topics.write();
        let topic = topics.entry(key).or_insert_with(|| {
            let (tx, _rx) = broadcast::channel::<E>(self.capacity);
            Box::new(tx)
        });
        topic
            .downcast_ref::<broadcast::Sender<E>>()
            .expect("topic registered under its own TypeId")
            .subscribe()
    }

    /// Publish an event to every current subscriber of its type
    ///
    /// Returns the number of subscribers the event was delivered to; zero
    /// when nobody listens.
    pub fn publish<E: BusEvent>(&self, event: E) -> usize {
        let topics = self.topics.read();
        let Some(topic) = topics.get(&TypeId::of::<E>()) else {
            return 0;
        };
        let sender = topic
            .downcast_ref::<broadcast::Sender<E>>()
            .expect("topic registered under its own TypeId");
        sender.send(event).unwrap_or(0)
    }

    /// Number of current subscribers for events of type `E`
    #[must_use]
    pub fn subscriber_count<E: BusEvent>(&self) -> usize {
        self.topics
            .read()
            .get(&TypeId::of::<E>())
            .and_then(|topic| topic.downcast_ref::<broadcast::Sender<E>>())
            .map_or(0, broadcast::Sender::receiver_count)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
