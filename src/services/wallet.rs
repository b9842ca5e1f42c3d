use chrono::Utc;
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::wallet::{
    counterparty_unknown, Currency, DepositRequest, DepositResponse, PaginationInfo, Transaction,
    TransactionKind, TransactionOrigin, TransactionStatus, TransferRequest, WalletEnvelope,
};
use crate::services::backend::BackendClient;
use crate::services::notifications::NotificationCenter;
use crate::services::refresh::RefreshScheduler;
use crate::session::Session;

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Seam for "open the hosted payment page in a new browsing context". The
/// console default just logs the link for the admin to follow.
pub trait PaymentPageOpener: Send + Sync {
    fn open(&self, url: &str);
}

pub struct LogPaymentPageOpener;

impl PaymentPageOpener for LogPaymentPageOpener {
    fn open(&self, url: &str) {
        tracing::info!("Payment page ready, complete the deposit at {}", url);
    }
}

#[derive(Debug, Clone)]
pub struct WalletOptions {
    /// Where the payment gateway redirects after a hosted deposit.
    pub redirect_url: String,
    pub refresh_delay: Duration,
    pub page_size: u32,
}

/// Read-only view of the store for the UI shell.
#[derive(Debug, Clone)]
pub struct WalletSnapshot {
    pub balance: Decimal,
    pub transactions: Vec<Transaction>,
    pub pagination: Option<PaginationInfo>,
    pub loading: bool,
    pub last_error: Option<String>,
    pub synced: bool,
}

#[derive(Default)]
struct WalletData {
    balance: Decimal,
    transactions: Vec<Transaction>,
    pagination: Option<PaginationInfo>,
    loading: bool,
    last_error: Option<String>,
    // balance stays non-authoritative (zero) until the first successful fetch
    synced: bool,
}

/// Fetch-capable core shared with scheduled reconciliation tasks. Holds no
/// scheduler handle, so a pending timer never keeps the service alive.
#[derive(Clone)]
struct WalletCore {
    backend: BackendClient,
    session: Session,
    notifications: NotificationCenter,
    state: Arc<RwLock<WalletData>>,
}

impl WalletCore {
    async fn fetch(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if self.session.token().is_none() {
            tracing::debug!("Skipping wallet fetch, no session token");
            return Ok(());
        }

        self.state.write().await.loading = true;

        match self.request(page, limit).await {
            Ok(envelope) => {
                let mut state = self.state.write().await;
                state.balance = envelope.wallet.balance;
                state.transactions = envelope.wallet.history;
                state.pagination = envelope.pagination;
                state.synced = true;
                state.last_error = None;
                state.loading = false;
                tracing::info!(
                    "Wallet page {} loaded: {} transactions, balance {}",
                    page,
                    state.transactions.len(),
                    state.balance
                );
                Ok(())
            }
            Err(e) => {
                {
                    let mut state = self.state.write().await;
                    state.loading = false;
                    state.last_error = Some(e.to_string());
                }
                self.notifications
                    .error(format!("Failed to load wallet: {}", e));
                Err(e)
            }
        }
    }

    async fn request(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<WalletEnvelope, Box<dyn std::error::Error + Send + Sync>> {
        let response = self
            .backend
            .get("/wallet")
            .query(&[("page", page.to_string()), ("limit", limit.to_string())])
            .send()
            .await?;
        self.backend.read_json(response).await
    }
}

/// Single source of truth for the admin wallet: balance, one page of
/// transaction history, and the deposit/transfer entry points that mutate it
/// optimistically between fetches.
#[derive(Clone)]
pub struct WalletService {
    core: WalletCore,
    scheduler: Arc<RefreshScheduler>,
    opener: Arc<dyn PaymentPageOpener>,
    options: WalletOptions,
}

impl WalletService {
    pub fn new(
        backend: BackendClient,
        session: Session,
        notifications: NotificationCenter,
        options: WalletOptions,
    ) -> Self {
        Self {
            core: WalletCore {
                backend,
                session,
                notifications,
                state: Arc::new(RwLock::new(WalletData::default())),
            },
            scheduler: Arc::new(RefreshScheduler::new()),
            opener: Arc::new(LogPaymentPageOpener),
            options,
        }
    }

    pub fn with_opener(mut self, opener: Arc<dyn PaymentPageOpener>) -> Self {
        self.opener = opener;
        self
    }

    pub fn page_size(&self) -> u32 {
        self.options.page_size
    }

    /// Load one page of balance + history, replacing the store wholesale on
    /// success. Idempotent and safe to call repeatedly; overlapping calls are
    /// not coalesced, the last response wins.
    pub async fn fetch(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.core.fetch(page, limit).await
    }

    /// Request a hosted payment link and record the deposit as pending. The
    /// balance is untouched until the gateway confirms out-of-band.
    pub async fn deposit(
        &self,
        amount: Decimal,
        currency: Currency,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if amount <= Decimal::ZERO {
            tracing::debug!("Ignoring deposit of non-positive amount {}", amount);
            return Ok(());
        }

        let body = DepositRequest {
            amount,
            currency,
            redirect_url: self.options.redirect_url.clone(),
        };
        let result = match self.core.backend.post("/wallet/deposit").json(&body).send().await {
            Ok(response) => self.core.backend.read_json::<DepositResponse>(response).await,
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(link) => {
                self.opener.open(&link.payment_url);

                let tx = Transaction {
                    id: Uuid::new_v4().to_string(),
                    date: Utc::now(),
                    user_email: self
                        .core
                        .session
                        .admin_email()
                        .unwrap_or_else(counterparty_unknown),
                    amount,
                    note: format!("Wallet deposit ({})", currency),
                    kind: TransactionKind::Deposit,
                    status: TransactionStatus::Pending,
                    origin: TransactionOrigin::Local,
                };
                self.core.state.write().await.transactions.insert(0, tx);

                self.core.notifications.success(format!(
                    "Deposit of {} {} initiated, complete the payment in the opened page",
                    amount, currency
                ));
                self.schedule_reconciliation().await;
                Ok(())
            }
            Err(e) => {
                self.core
                    .notifications
                    .error(format!("Deposit failed: {}", e));
                Err(e)
            }
        }
    }

    /// Send funds to a user account. Validation failures and backend errors
    /// both come back as `Ok(false)`; `Ok(true)` means the backend accepted
    /// the transfer.
    pub async fn transfer(
        &self,
        recipient_email: &str,
        amount: Decimal,
        note: &str,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        if amount <= Decimal::ZERO {
            self.core
                .notifications
                .error("Amount must be greater than zero");
            return Ok(false);
        }

        // client-side check against the possibly-stale balance
        let balance = self.core.state.read().await.balance;
        if amount > balance {
            self.core
                .notifications
                .error("Insufficient funds in admin wallet");
            return Ok(false);
        }

        if !EMAIL_REGEX.is_match(recipient_email) {
            self.core.notifications.error("Invalid email format");
            return Ok(false);
        }

        let note = if note.trim().is_empty() {
            "Transfer to user".to_string()
        } else {
            note.to_string()
        };
        let body = TransferRequest {
            user_email: recipient_email.to_string(),
            amount,
            note: note.clone(),
        };
        let result = match self
            .core
            .backend
            .post("/wallet/transfer")
            .json(&body)
            .send()
            .await
        {
            Ok(response) => {
                self.core
                    .backend
                    .read_json::<serde_json::Value>(response)
                    .await
            }
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(_) => {
                let tx = Transaction {
                    id: Uuid::new_v4().to_string(),
                    date: Utc::now(),
                    user_email: recipient_email.to_string(),
                    amount,
                    note,
                    kind: TransactionKind::Transfer,
                    status: TransactionStatus::Completed,
                    origin: TransactionOrigin::Local,
                };
                {
                    let mut state = self.core.state.write().await;
                    state.balance -= amount;
                    state.transactions.insert(0, tx);
                }
                self.core.notifications.success(format!(
                    "Successfully transferred {} to {}",
                    amount, recipient_email
                ));
                self.schedule_reconciliation().await;
                Ok(true)
            }
            Err(e) => {
                self.core
                    .notifications
                    .error(format!("Transfer failed: {}", e));
                Ok(false)
            }
        }
    }

    /// Refetch the current page after the fixed reconciliation delay. The
    /// task is aborted if the service is torn down first.
    async fn schedule_reconciliation(&self) {
        let (page, limit) = {
            let state = self.core.state.read().await;
            match state.pagination {
                Some(p) => (p.page, p.items.max(1)),
                None => (0, self.options.page_size),
            }
        };

        let core = self.core.clone();
        self.scheduler
            .schedule(self.options.refresh_delay, async move {
                if let Err(e) = core.fetch(page, limit).await {
                    tracing::warn!("Reconciliation fetch failed: {}", e);
                }
            });
    }

    pub fn cancel_pending_refreshes(&self) {
        self.scheduler.cancel_all();
    }

    pub async fn snapshot(&self) -> WalletSnapshot {
        let state = self.core.state.read().await;
        WalletSnapshot {
            balance: state.balance,
            transactions: state.transactions.clone(),
            pagination: state.pagination,
            loading: state.loading,
            last_error: state.last_error.clone(),
            synced: state.synced,
        }
    }

    pub async fn balance(&self) -> Decimal {
        self.core.state.read().await.balance
    }

    pub async fn transactions(&self) -> Vec<Transaction> {
        self.core.state.read().await.transactions.clone()
    }

    pub async fn pagination(&self) -> Option<PaginationInfo> {
        self.core.state.read().await.pagination
    }

    pub async fn last_error(&self) -> Option<String> {
        self.core.state.read().await.last_error.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.core.state.read().await.loading
    }

    pub async fn has_synced(&self) -> bool {
        self.core.state.read().await.synced
    }
}

/// Export a transaction page the way the dashboard's download button does:
/// header row, quotes in notes doubled, `N/A` for missing counterparties.
pub fn history_to_csv(transactions: &[Transaction]) -> String {
    let mut out = String::from("Date,User Email,Amount,Note,Type,Status\n");
    for tx in transactions {
        out.push_str(&format!(
            "{},{},{},\"{}\",{},{}\n",
            tx.date.format("%Y-%m-%d %H:%M:%S"),
            tx.user_email,
            tx.amount,
            tx.note.replace('"', "\"\""),
            tx.kind,
            tx.status,
        ));
    }
    out
}
