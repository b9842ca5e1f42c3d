use parking_lot::RwLock;
use std::sync::Arc;

use crate::models::auth::LoginResponse;

/// Explicit auth context handed to every network-calling service. Holds the
/// bearer token and the signed-in admin; cloning is cheap and all clones see
/// the same credentials.
#[derive(Clone, Default)]
pub struct Session {
    inner: Arc<RwLock<Option<LoginResponse>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&self, login: LoginResponse) {
        *self.inner.write() = Some(login);
    }

    /// Idempotent; a cleared session stays cleared.
    pub fn clear(&self) {
        *self.inner.write() = None;
    }

    pub fn token(&self) -> Option<String> {
        self.inner.read().as_ref().map(|login| login.token.clone())
    }

    pub fn admin_email(&self) -> Option<String> {
        self.inner
            .read()
            .as_ref()
            .map(|login| login.user.email.value.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read().is_some()
    }
}
