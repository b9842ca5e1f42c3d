use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a wallet movement. Amounts are always positive, the kind
/// carries the sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Transfer,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Deposit => write!(f, "deposit"),
            TransactionKind::Transfer => write!(f, "transfer"),
        }
    }
}

/// Backend omits the status for settled records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    #[default]
    Completed,
    Failed,
    Cancelled,
}

impl TransactionStatus {
    /// Badge color keyed by status, one entry per variant.
    pub fn badge_color(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "yellow",
            TransactionStatus::Completed => "green",
            TransactionStatus::Failed => "red",
            TransactionStatus::Cancelled => "gray",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionStatus::Pending => write!(f, "pending"),
            TransactionStatus::Completed => write!(f, "completed"),
            TransactionStatus::Failed => write!(f, "failed"),
            TransactionStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Where a record came from. Optimistic inserts are tagged `Local` so the
/// next wholesale page replacement drops them instead of half-merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionOrigin {
    #[default]
    Server,
    Local,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub date: DateTime<Utc>,
    #[serde(default = "counterparty_unknown")]
    pub user_email: String,
    pub amount: Decimal,
    #[serde(default)]
    pub note: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default)]
    pub status: TransactionStatus,
    #[serde(skip)]
    pub origin: TransactionOrigin,
}

pub fn counterparty_unknown() -> String {
    "N/A".to_string()
}

/// Zero-based page index end to end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub page: u32,
    pub items: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

/// `GET /wallet` payload: `{ wallet: { balance, history }, pagination }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletEnvelope {
    pub wallet: WalletPayload,
    pub pagination: Option<PaginationInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletPayload {
    pub balance: Decimal,
    #[serde(default)]
    pub history: Vec<Transaction>,
}

/// Deposit currencies the payment gateway accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "RWF")]
    Rwf,
    #[serde(rename = "USD")]
    Usd,
}

impl Currency {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "RWF" => Some(Currency::Rwf),
            "USD" => Some(Currency::Usd),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::Rwf => write!(f, "RWF"),
            Currency::Usd => write!(f, "USD"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositRequest {
    pub amount: Decimal,
    pub currency: Currency,
    pub redirect_url: String,
}

/// Single documented schema for the hosted payment page link. Divergent
/// field names (`link`, `url`) are a backend contract bug, not decoded here.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositResponse {
    pub payment_url: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub user_email: String,
    pub amount: Decimal,
    pub note: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
