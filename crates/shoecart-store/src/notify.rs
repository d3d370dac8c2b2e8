//! Notification capability.

use serde::Serialize;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notification as delivered to a [`Notifier`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

/// Fire-and-forget sink for user-facing messages.
///
/// The store never inspects what a notifier does with a message, so an
/// implementation must not block or fail loudly.
pub trait Notifier: Send + Sync {
    fn notify(&self, severity: Severity, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, severity: Severity, message: &str) {
        (**self).notify(severity, message)
    }
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&self, severity: Severity, message: &str) {
        (**self).notify(severity, message)
    }
}

/// Notifier that emits each message as a tracing event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Error => tracing::error!(%severity, "{}", message),
            Severity::Warning => tracing::warn!(%severity, "{}", message),
            Severity::Success | Severity::Info => tracing::info!(%severity, "{}", message),
        }
    }
}

/// Notifier that keeps every message in memory.
///
/// Clones share the same buffer, so a UI test can hand one clone to the
/// store and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotifier {
    sent: Arc<Mutex<Vec<Notification>>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications received so far, oldest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent notification.
    pub fn last(&self) -> Option<Notification> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Drain the buffer.
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.sent.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Notification::new(severity, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_notifier_shares_buffer() {
        let notifier = MemoryNotifier::new();
        let handle = notifier.clone();

        notifier.notify(Severity::Info, "hello");
        assert_eq!(handle.last(), Some(Notification::new(Severity::Info, "hello")));

        assert_eq!(handle.take().len(), 1);
        assert!(notifier.notifications().is_empty());
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        let json = serde_json::to_string(&Notification::new(Severity::Warning, "w")).unwrap();
        assert_eq!(json, r#"{"severity":"warning","message":"w"}"#);
    }

    #[test]
    fn test_arc_dyn_notifier() {
        let inner = MemoryNotifier::new();
        let shared: Arc<dyn Notifier> = Arc::new(inner.clone());
        shared.notify(Severity::Success, "ok");
        assert_eq!(inner.notifications().len(), 1);
    }
}
