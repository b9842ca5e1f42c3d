use std::time::Instant;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// A transient message surfaced to the admin. Not serialized; the UI shell
/// reads these through [`crate::services::notifications::NotificationCenter`].
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: Instant,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message,
            created_at: Instant::now(),
        }
    }
}
