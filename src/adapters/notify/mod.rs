//! Notifier adapters.
//!
//! - `TracingNotifier` writes notifications to the log (the binary's default)
//! - `RecordingNotifier` keeps them for assertions

use std::sync::{Mutex, MutexGuard};

use crate::ports::{Notification, NotificationLevel, Notifier};

/// Emits every notification as a tracing event at a matching level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl TracingNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for TracingNotifier {
    fn notify(&self, n: Notification) {
        match n.level {
            NotificationLevel::Error => {
                tracing::error!(title = %n.title, message = %n.message, "notification")
            }
            NotificationLevel::Warning => {
                tracing::warn!(title = %n.title, message = %n.message, "notification")
            }
            NotificationLevel::Info | NotificationLevel::Success => {
                tracing::info!(title = %n.title, message = %n.message, level = ?n.level, "notification")
            }
        }
    }
}

/// Captures notifications in order of arrival.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    received: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.received.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.guard().clone()
    }

    pub fn count(&self) -> usize {
        self.guard().len()
    }

    pub fn last(&self) -> Option<Notification> {
        self.guard().last().cloned()
    }

    pub fn of_level(&self, level: NotificationLevel) -> Vec<Notification> {
        self.guard()
            .iter()
            .filter(|n| n.level == level)
            .cloned()
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.guard().push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify(Notification::info("a", "first"));
        notifier.notify(Notification::warning("b", "second"));

        assert_eq!(notifier.count(), 2);
        assert_eq!(notifier.last().unwrap().title, "b");
        assert_eq!(notifier.of_level(NotificationLevel::Warning).len(), 1);
    }

    #[test]
    fn tracing_notifier_accepts_every_level() {
        let notifier = TracingNotifier::new();
        notifier.notify(Notification::error("x", "y"));
        notifier.notify(Notification::success("x", "y"));
    }
}
