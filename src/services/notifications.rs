use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::models::notification::{Notification, NotificationKind};

const DEFAULT_TTL: Duration = Duration::from_secs(5);
const MAX_PENDING: usize = 50;

/// Transient success/error/info messages for the UI shell. Entries expire
/// after a fixed TTL and the queue is bounded, oldest dropped first.
#[derive(Clone)]
pub struct NotificationCenter {
    inner: Arc<Mutex<VecDeque<Notification>>>,
    ttl: Duration,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(VecDeque::new())),
            ttl,
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(NotificationKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(NotificationKind::Error, message.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(NotificationKind::Info, message.into());
    }

    pub fn push(&self, kind: NotificationKind, message: String) {
        match kind {
            NotificationKind::Error => tracing::warn!("notification: {}", message),
            _ => tracing::info!("notification: {}", message),
        }
        let mut queue = self.inner.lock();
        queue.push_back(Notification::new(kind, message));
        while queue.len() > MAX_PENDING {
            queue.pop_front();
        }
    }

    pub fn dismiss(&self, id: Uuid) {
        self.inner.lock().retain(|n| n.id != id);
    }

    /// Drop entries older than the TTL. The shell calls this on its render
    /// tick; nothing expires implicitly.
    pub fn purge_expired(&self) {
        let ttl = self.ttl;
        self.inner
            .lock()
            .retain(|n| n.created_at.elapsed() < ttl);
    }

    pub fn snapshot(&self) -> Vec<Notification> {
        self.inner.lock().iter().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}
