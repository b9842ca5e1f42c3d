use parking_lot::Mutex;
use reqwest::Url;
use std::sync::Arc;
use std::time::Duration;

use crate::models::wallet::VerifyResponse;
use crate::services::backend::BackendClient;
use crate::services::notifications::NotificationCenter;
use crate::services::refresh::RefreshScheduler;
use crate::services::wallet::WalletService;

/// Query parameters the payment gateway appends to the dashboard URL when it
/// redirects the browser back. All three must be present for a return event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnParams {
    pub status: String,
    pub tx_ref: String,
    pub transaction_id: String,
}

impl ReturnParams {
    pub fn from_url(url: &Url) -> Option<Self> {
        let mut status = None;
        let mut tx_ref = None;
        let mut transaction_id = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "status" => status = Some(value.into_owned()),
                "tx_ref" => tx_ref = Some(value.into_owned()),
                "transaction_id" => transaction_id = Some(value.into_owned()),
                _ => {}
            }
        }
        Some(Self {
            status: status?,
            tx_ref: tx_ref?,
            transaction_id: transaction_id?,
        })
    }

    /// The gateway-side signal. Only a hint; the backend verdict decides
    /// whenever one is available.
    pub fn gateway_success(&self) -> bool {
        self.status == "successful"
    }

    pub fn event_key(&self) -> String {
        format!("{}:{}", self.tx_ref, self.transaction_id)
    }
}

/// Remove exactly the three gateway parameters, keeping the rest of the
/// query, so reload/back cannot re-trigger verification.
pub fn strip_return_params(url: &Url) -> Url {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| {
            key != "status" && key != "tx_ref" && key != "transaction_id"
        })
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut cleaned = url.clone();
    cleaned.set_query(None);
    if !kept.is_empty() {
        let mut pairs = cleaned.query_pairs_mut();
        for (key, value) in &kept {
            pairs.append_pair(key, value);
        }
    }
    cleaned
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyState {
    Idle,
    InFlight,
    Resolved { success: bool },
}

struct VerifierGuards {
    state: VerifyState,
    processed: Option<String>,
    progress_shown: bool,
    outcome_shown: bool,
}

impl VerifierGuards {
    fn new() -> Self {
        Self {
            state: VerifyState::Idle,
            processed: None,
            progress_shown: false,
            outcome_shown: false,
        }
    }

    fn reset(&mut self) {
        self.state = VerifyState::Idle;
        self.processed = None;
        self.progress_shown = false;
        self.outcome_shown = false;
    }
}

enum Outcome {
    Success,
    Failure { message: Option<String> },
}

/// Confirms a redirect-based payment with the backend. One verification per
/// return event: duplicate triggers (re-render, back navigation) are refused
/// until the cool-down resets the guards. Flags, not locks, are the only
/// mutual exclusion; everything runs on the cooperative runtime.
#[derive(Clone)]
pub struct PaymentReturnVerifier {
    backend: BackendClient,
    wallet: WalletService,
    notifications: NotificationCenter,
    guards: Arc<Mutex<VerifierGuards>>,
    scheduler: Arc<RefreshScheduler>,
    cooldown: Duration,
}

impl PaymentReturnVerifier {
    pub fn new(
        backend: BackendClient,
        wallet: WalletService,
        notifications: NotificationCenter,
        cooldown: Duration,
    ) -> Self {
        Self {
            backend,
            wallet,
            notifications,
            guards: Arc::new(Mutex::new(VerifierGuards::new())),
            scheduler: Arc::new(RefreshScheduler::new()),
            cooldown,
        }
    }

    pub fn state(&self) -> VerifyState {
        self.guards.lock().state
    }

    /// Consume a return navigation. Returns the location with the gateway
    /// parameters stripped whenever they were present (the shell applies it),
    /// or `None` when the URL carries no payment return.
    pub async fn handle_return(&self, location: &Url) -> Option<Url> {
        let params = ReturnParams::from_url(location)?;
        let cleaned = strip_return_params(location);
        let key = params.event_key();

        {
            let mut guards = self.guards.lock();
            if guards.state == VerifyState::InFlight {
                tracing::debug!("Verification already in flight, ignoring duplicate return");
                return Some(cleaned);
            }
            if guards.processed.as_deref() == Some(key.as_str()) {
                tracing::debug!("Payment return {} already processed", key);
                return Some(cleaned);
            }
            guards.state = VerifyState::InFlight;
            guards.processed = Some(key.clone());
            guards.progress_shown = false;
            guards.outcome_shown = false;
        }

        let progress_pending = {
            let mut guards = self.guards.lock();
            let pending = !guards.progress_shown;
            guards.progress_shown = true;
            pending
        };
        if progress_pending {
            self.notifications.info("Verifying your payment, please wait...");
        }

        tracing::info!("Verifying payment return {}", key);
        let outcome = self.verify(&params).await;

        let success = match &outcome {
            Outcome::Success => true,
            Outcome::Failure { .. } => false,
        };

        let outcome_pending = {
            let mut guards = self.guards.lock();
            let pending = !guards.outcome_shown;
            guards.outcome_shown = true;
            pending
        };
        if outcome_pending {
            match &outcome {
                Outcome::Success => {
                    self.notifications.success("Payment verified, wallet updated");
                }
                Outcome::Failure { message } => {
                    let message = message
                        .clone()
                        .unwrap_or_else(|| "Payment verification failed".to_string());
                    self.notifications.error(message);
                }
            }
        }

        if success {
            if let Err(e) = self.wallet.fetch(0, self.wallet.page_size()).await {
                tracing::warn!("Wallet refresh after verification failed: {}", e);
            }
        }

        self.guards.lock().state = VerifyState::Resolved { success };

        let guards = Arc::clone(&self.guards);
        self.scheduler.schedule(self.cooldown, async move {
            guards.lock().reset();
        });

        Some(cleaned)
    }

    async fn verify(&self, params: &ReturnParams) -> Outcome {
        match self.request(params).await {
            Ok(verdict) => {
                let confirmed =
                    verdict.success || verdict.status.as_deref() == Some("successful");
                if confirmed {
                    Outcome::Success
                } else {
                    // an explicit backend verdict outranks the gateway hint,
                    // whatever the redirect claimed
                    Outcome::Failure {
                        message: verdict.message,
                    }
                }
            }
            Err(e) => {
                if params.gateway_success() {
                    tracing::warn!(
                        "Verification call failed, trusting gateway success signal: {}",
                        e
                    );
                    Outcome::Success
                } else {
                    Outcome::Failure {
                        message: Some(e.to_string()),
                    }
                }
            }
        }
    }

    async fn request(
        &self,
        params: &ReturnParams,
    ) -> Result<VerifyResponse, Box<dyn std::error::Error + Send + Sync>> {
        let response = self
            .backend
            .get("/wallet/verify")
            .query(&[
                ("tx_ref", params.tx_ref.as_str()),
                ("status", params.status.as_str()),
                ("transaction_id", params.transaction_id.as_str()),
            ])
            .send()
            .await?;
        self.backend.read_json(response).await
    }
}
