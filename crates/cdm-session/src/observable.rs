//! Observable value store
//!
//! A small store abstraction for UI-facing state (counts, loading flags,
//! selections). The contract: every *effective* mutation emits exactly one
//! change notification; setting a value equal to the current one emits none.

use tokio::sync::watch;

/// A single observable value
///
/// Backed by a [`watch`] channel so any number of consumers can await
/// changes; the value itself is always readable synchronously.
#[derive(Debug)]
pub struct ObservableValue<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone + PartialEq + Send + Sync + 'static> ObservableValue<T> {
    /// Create an observable holding `initial`
    #[must_use]
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Current value
    #[must_use]
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Replace the value
    ///
    /// Returns `true` if the value actually changed (and one notification
    /// was emitted), `false` if the new value equals the current one.
    pub fn set(&self, value: T) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        })
    }

    /// Subscribe to change notifications
    ///
    /// The receiver observes the value as of subscription time and is
    /// notified on every subsequent effective mutation.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T: Clone + PartialEq + Send + Sync + Default + 'static> Default for ObservableValue<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_reports_effective_change() {
        let value = ObservableValue::new(3usize);
        assert!(value.set(4));
        assert!(!value.set(4));
        assert_eq!(value.get(), 4);
    }

    #[tokio::test]
    async fn one_notification_per_mutation() {
        let value = ObservableValue::new(0usize);
        let mut rx = value.watch();

        assert!(!rx.has_changed().unwrap());

        value.set(1);
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();
        assert!(!rx.has_changed().unwrap());

        // equal value: no notification
        value.set(1);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn watch_sees_value_at_subscription() {
        let value = ObservableValue::new("a".to_string());
        value.set("b".to_string());
        let rx = value.watch();
        assert_eq!(*rx.borrow(), "b");
    }
}
