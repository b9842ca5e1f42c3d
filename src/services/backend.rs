use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::services::notifications::NotificationCenter;
use crate::session::Session;

/// HTTP gateway to the marketplace backend. Attaches the session's bearer
/// token to every request and terminates the session on the two token
/// rejection messages the backend emits.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    session: Session,
    notifications: NotificationCenter,
}

impl BackendClient {
    pub fn new(base_url: String, session: Session, notifications: NotificationCenter) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap(),
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            notifications,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.with_auth(self.client.get(format!("{}{}", self.base_url, path)))
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.with_auth(self.client.post(format!("{}{}", self.base_url, path)))
    }

    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.with_auth(self.client.delete(format!("{}{}", self.base_url, path)))
    }

    fn with_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Decode a success payload, or map the failure to the most specific
    /// message available: backend `message`/`error` field, then raw body,
    /// then the status code.
    pub async fn read_json<T: DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let message = extract_message(&body);

        if status == StatusCode::UNAUTHORIZED {
            if let Some(msg) = message.as_deref() {
                if msg == "Invalid token" || msg == "No token provided" {
                    tracing::warn!("Backend rejected the session token: {}", msg);
                    self.session.clear();
                    self.notifications
                        .error("Your session has expired, please sign in again");
                }
            }
        }

        match message {
            Some(msg) => Err(msg.into()),
            None if !body.is_empty() => Err(format!("Backend error {}: {}", status, body).into()),
            None => Err(format!("Backend error {}", status).into()),
        }
    }
}

fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .or_else(|| value.get("error"))
        .and_then(|m| m.as_str())
        .map(|s| s.to_string())
}
