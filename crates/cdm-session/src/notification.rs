//! Notification badge collaborator

use crate::observable::ObservableValue;
use tokio::sync::watch;

/// Sink for aggregate "unseen update" notifications
pub trait Notifier: Send + Sync {
    /// Add `count` unseen notifications to the badge
    fn add_notifications(&self, count: usize);

    /// Remove `count` notifications from the badge
    fn remove_notifications(&self, count: usize);
}

/// Observable notification counter
///
/// The count never goes below zero; removing more notifications than are
/// present clamps at zero.
#[derive(Debug, Default)]
pub struct NotificationHub {
    count: ObservableValue<usize>,
}

impl NotificationHub {
    /// Create a hub with a zero count
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current notification count
    #[must_use]
    pub fn count(&self) -> usize {
        self.count.get()
    }

    /// Subscribe to count changes
    #[must_use]
    pub fn watch_count(&self) -> watch::Receiver<usize> {
        self.count.watch()
    }
}

impl Notifier for NotificationHub {
    fn add_notifications(&self, count: usize) {
        if count == 0 {
            return;
        }
        self.count.set(self.count.get() + count);
    }

    fn remove_notifications(&self, count: usize) {
        if count == 0 {
            return;
        }
        self.count.set(self.count.get().saturating_sub(count));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_remove_track_count() {
        let hub = NotificationHub::new();
        hub.add_notifications(3);
        assert_eq!(hub.count(), 3);
        hub.remove_notifications(2);
        assert_eq!(hub.count(), 1);
    }

    #[test]
    fn remove_clamps_at_zero() {
        let hub = NotificationHub::new();
        hub.add_notifications(1);
        hub.remove_notifications(5);
        assert_eq!(hub.count(), 0);
    }

    #[test]
    fn zero_deltas_do_not_notify() {
        let hub = NotificationHub::new();
        let mut rx = hub.watch_count();
        hub.add_notifications(0);
        hub.remove_notifications(0);
        assert!(!rx.has_changed().unwrap());
    }
}
