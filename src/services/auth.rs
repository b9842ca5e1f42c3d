use crate::models::auth::{LoginRequest, LoginResponse};
use crate::services::backend::BackendClient;
use crate::services::notifications::NotificationCenter;
use crate::session::Session;

#[derive(Clone)]
pub struct AuthService {
    backend: BackendClient,
    session: Session,
    notifications: NotificationCenter,
}

impl AuthService {
    pub fn new(
        backend: BackendClient,
        session: Session,
        notifications: NotificationCenter,
    ) -> Self {
        Self {
            backend,
            session,
            notifications,
        }
    }

    /// Exchange credentials for a bearer token and install it in the shared
    /// session. Nothing is persisted beyond the process.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let result = match self.backend.post("/auth/login").json(&body).send().await {
            Ok(response) => self.backend.read_json::<LoginResponse>(response).await,
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(login) => {
                tracing::info!("Signed in as {}", login.user.email.value);
                self.session.install(login);
                Ok(())
            }
            Err(e) => {
                self.notifications.error(format!("Login failed: {}", e));
                Err(e)
            }
        }
    }

    pub fn logout(&self) {
        self.session.clear();
        tracing::info!("Signed out");
    }
}
