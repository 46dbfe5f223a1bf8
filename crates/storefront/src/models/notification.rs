//! User-facing notification record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tanish_arts_core::{NotificationId, NotificationKind};

/// A transient message describing the outcome of a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub kind: NotificationKind,
    /// When the notification was posted, for presenters that expire them.
    pub created_at: DateTime<Utc>,
}
