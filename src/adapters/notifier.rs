use crate::core::{Notification, NotificationLevel, Notifier};
use std::sync::{Arc, Mutex};

/// Prints notifications for a terminal user and mirrors them into the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => {
                tracing::info!("{}", notification.message);
                println!("✅ {}", notification.message);
            }
            NotificationLevel::Warning => {
                tracing::warn!("{}", notification.message);
                eprintln!("⚠️  {}", notification.message);
            }
            NotificationLevel::Error => {
                tracing::error!("{}", notification.message);
                eprintln!("❌ {}", notification.message);
            }
        }
    }
}

/// Keeps every notification; clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    seen: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.seen.lock().map(|seen| seen.clone()).unwrap_or_default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.notifications().into_iter().map(|n| n.message).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(notification);
        }
    }
}
