//! Notification channel.
//!
//! Producers post messages; the presentation layer shows them in posting
//! order and dismisses them by id. Identical messages are not merged.

use std::collections::VecDeque;

use chrono::Utc;
use tracing::debug;

use tanish_arts_core::{NotificationId, NotificationKind};

use crate::models::Notification;

/// Ordered, in-memory queue of notifications.
#[derive(Debug, Clone, Default)]
pub struct NotificationChannel {
    queue: VecDeque<Notification>,
}

impl NotificationChannel {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Append a notification and return its id.
    pub fn post(&mut self, message: impl Into<String>, kind: NotificationKind) -> NotificationId {
        let notification = Notification {
            id: NotificationId::generate(),
            message: message.into(),
            kind,
            created_at: Utc::now(),
        };
        debug!(
            id = %notification.id,
            %kind,
            message = %notification.message,
            "Notification posted"
        );
        let id = notification.id;
        self.queue.push_back(notification);
        id
    }

    pub fn info(&mut self, message: impl Into<String>) -> NotificationId {
        self.post(message, NotificationKind::Info)
    }

    pub fn success(&mut self, message: impl Into<String>) -> NotificationId {
        self.post(message, NotificationKind::Success)
    }

    pub fn warning(&mut self, message: impl Into<String>) -> NotificationId {
        self.post(message, NotificationKind::Warning)
    }

    pub fn error(&mut self, message: impl Into<String>) -> NotificationId {
        self.post(message, NotificationKind::Error)
    }

    /// Remove the notification with `id`. Returns `false` if it was not queued.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let before = self.queue.len();
        self.queue.retain(|n| n.id != id);
        self.queue.len() != before
    }

    #[must_use]
    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.queue.iter().find(|n| n.id == id)
    }

    /// Most recently posted notification.
    #[must_use]
    pub fn last(&self) -> Option<&Notification> {
        self.queue.back()
    }

    /// Notifications in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.queue.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_post_preserves_order() {
        let mut channel = NotificationChannel::new();
        channel.info("first");
        channel.success("second");
        channel.error("third");

        let messages: Vec<&str> = channel.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second", "third"]);
        assert_eq!(channel.last().unwrap().kind, NotificationKind::Error);
    }

    #[test]
    fn test_no_deduplication() {
        let mut channel = NotificationChannel::new();
        let a = channel.info("same");
        let b = channel.info("same");
        assert_ne!(a, b);
        assert_eq!(channel.len(), 2);
    }

    #[test]
    fn test_dismiss_by_id() {
        let mut channel = NotificationChannel::new();
        let a = channel.info("a");
        let b = channel.warning("b");

        assert!(channel.dismiss(a));
        assert!(channel.get(a).is_none());
        assert_eq!(channel.get(b).unwrap().message, "b");
    }

    #[test]
    fn test_dismiss_unknown_is_noop() {
        let mut channel = NotificationChannel::new();
        channel.info("a");
        assert!(!channel.dismiss(NotificationId::generate()));
        assert_eq!(channel.len(), 1);
    }
}
