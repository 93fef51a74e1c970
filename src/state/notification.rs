//! Transient toast notifications.

use std::time::{Duration, Instant};

/// Kind of notification, which decides its styling and lifetime.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A single toast.
///
#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    expires_at: Instant,
}

impl Notification {
    /// Whether the toast should still be shown at `now`.
    ///
    pub fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Queue of visible toasts, oldest first.
///
#[derive(Debug, Clone)]
pub struct Notifications {
    items: Vec<Notification>,
    success_ttl: Duration,
    error_ttl: Duration,
}

impl Default for Notifications {
    fn default() -> Self {
        Notifications::new(Duration::from_millis(2000), Duration::from_millis(4000))
    }
}

impl Notifications {
    /// Return a new empty queue with the given lifetimes.
    ///
    pub fn new(success_ttl: Duration, error_ttl: Duration) -> Self {
        Notifications {
            items: vec![],
            success_ttl,
            error_ttl,
        }
    }

    /// Show a success toast.
    ///
    pub fn success(&mut self, message: impl Into<String>) {
        self.push_at(NotificationKind::Success, message.into(), Instant::now());
    }

    /// Show an error toast.
    ///
    pub fn error(&mut self, message: impl Into<String>) {
        self.push_at(NotificationKind::Error, message.into(), Instant::now());
    }

    fn push_at(&mut self, kind: NotificationKind, message: String, now: Instant) {
        let ttl = match kind {
            NotificationKind::Success => self.success_ttl,
            NotificationKind::Error => self.error_ttl,
        };
        self.items.push(Notification {
            kind,
            message,
            expires_at: now + ttl,
        });
    }

    /// Drop every toast that has expired by `now`.
    ///
    pub fn prune(&mut self, now: Instant) {
        self.items.retain(|n| n.is_live(now));
    }

    /// Return the visible toasts, oldest first.
    ///
    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    /// Return the newest toast, if any.
    ///
    pub fn latest(&self) -> Option<&Notification> {
        self.items.last()
    }
}
