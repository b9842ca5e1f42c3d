#![allow(dead_code)]

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rentdesk_console::config::Config;
use rentdesk_console::services::wallet::PaymentPageOpener;
use rentdesk_console::Console;

pub const ADMIN_EMAIL: &str = "ada@rentdesk.example";
pub const ADMIN_PASSWORD: &str = "secret";

/// Scriptable stand-in for the marketplace backend. Each endpoint counts its
/// calls and serves a configurable status + body.
pub struct MockState {
    pub wallet_calls: AtomicUsize,
    pub deposit_calls: AtomicUsize,
    pub transfer_calls: AtomicUsize,
    pub verify_calls: AtomicUsize,
    pub vehicle_search_calls: AtomicUsize,
    pub plate_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    pub booking_calls: AtomicUsize,

    pub wallet_status: Mutex<u16>,
    pub wallet_body: Mutex<Value>,
    pub last_wallet_query: Mutex<Option<(u32, u32)>>,

    pub deposit_status: Mutex<u16>,
    pub deposit_body: Mutex<Value>,

    pub transfer_status: Mutex<u16>,
    pub transfer_body: Mutex<Value>,

    pub verify_status: Mutex<u16>,
    pub verify_body: Mutex<Value>,

    pub deleted_plates: Mutex<Vec<String>>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            wallet_calls: AtomicUsize::new(0),
            deposit_calls: AtomicUsize::new(0),
            transfer_calls: AtomicUsize::new(0),
            verify_calls: AtomicUsize::new(0),
            vehicle_search_calls: AtomicUsize::new(0),
            plate_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
            booking_calls: AtomicUsize::new(0),
            wallet_status: Mutex::new(200),
            wallet_body: Mutex::new(default_wallet_body()),
            last_wallet_query: Mutex::new(None),
            deposit_status: Mutex::new(200),
            deposit_body: Mutex::new(json!({"paymentUrl": "https://pay.example/session/1"})),
            transfer_status: Mutex::new(200),
            transfer_body: Mutex::new(json!({"message": "Transfer successful"})),
            verify_status: Mutex::new(200),
            verify_body: Mutex::new(json!({"success": true, "status": "successful"})),
            deleted_plates: Mutex::new(Vec::new()),
        }
    }
}

pub fn default_wallet_body() -> Value {
    json!({
        "wallet": {
            "balance": "100.00",
            "history": [{
                "id": "srv-1",
                "date": "2026-02-01T10:00:00Z",
                "userEmail": "renter@example.com",
                "amount": "25.00",
                "note": "weekly payout",
                "type": "transfer",
                "status": "completed"
            }]
        },
        "pagination": {"page": 0, "items": 10, "totalItems": 1, "totalPages": 1}
    })
}

pub struct MockBackend {
    pub state: Arc<MockState>,
    pub base_url: String,
}

impl MockBackend {
    pub fn wallet_calls(&self) -> usize {
        self.state.wallet_calls.load(Ordering::SeqCst)
    }

    pub fn verify_calls(&self) -> usize {
        self.state.verify_calls.load(Ordering::SeqCst)
    }

    pub fn transfer_calls(&self) -> usize {
        self.state.transfer_calls.load(Ordering::SeqCst)
    }

    pub fn deposit_calls(&self) -> usize {
        self.state.deposit_calls.load(Ordering::SeqCst)
    }
}

pub async fn spawn_backend() -> MockBackend {
    let state = Arc::new(MockState::default());

    let app = Router::new()
        .route("/auth/login", post(login))
        .route("/wallet", get(wallet))
        .route("/wallet/deposit", post(wallet_deposit))
        .route("/wallet/transfer", post(wallet_transfer))
        .route("/wallet/verify", get(wallet_verify))
        .route("/vehicle/search", post(vehicle_search))
        .route("/vehicle/{plate}", get(vehicle_by_plate))
        .route("/admin/vehicle/{plate}", delete(vehicle_delete))
        .route("/admin/bookings", post(bookings))
        .with_state(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockBackend {
        state,
        base_url: format!("http://{}", addr),
    }
}

pub fn test_config(base_url: &str) -> Config {
    Config {
        api_base_url: base_url.to_string(),
        admin_email: ADMIN_EMAIL.to_string(),
        admin_password: ADMIN_PASSWORD.to_string(),
        dashboard_url: "https://admin.rentdesk.example/dashboard".to_string(),
        page_size: 10,
        refresh_delay: Duration::from_millis(100),
        verify_cooldown: Duration::from_millis(200),
    }
}

#[derive(Default)]
pub struct RecordingOpener {
    pub opened: Mutex<Vec<String>>,
}

impl PaymentPageOpener for RecordingOpener {
    fn open(&self, url: &str) {
        self.opened.lock().push(url.to_string());
    }
}

/// A console signed in against the mock backend, with a recording payment
/// page opener.
pub async fn login_console(backend: &MockBackend) -> (Console, Arc<RecordingOpener>) {
    let opener = Arc::new(RecordingOpener::default());
    let config = test_config(&backend.base_url);
    let console = Console::with_opener(
        &config,
        Some(Arc::clone(&opener) as Arc<dyn PaymentPageOpener>),
    );
    console
        .auth
        .login(ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .expect("login against mock backend");
    (console, opener)
}

async fn login(State(_state): State<Arc<MockState>>) -> Json<Value> {
    Json(json!({
        "token": "test-token",
        "message": "Login successful",
        "user": {
            "id": "a-1",
            "userType": "admin",
            "status": "active",
            "firstName": "Ada",
            "lastName": "Admin",
            "email": {"value": ADMIN_EMAIL, "status": true},
            "phone": null
        }
    }))
}

async fn wallet(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    state.wallet_calls.fetch_add(1, Ordering::SeqCst);

    let page = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(0);
    let limit = params
        .get("limit")
        .and_then(|l| l.parse().ok())
        .unwrap_or(0);
    *state.last_wallet_query.lock() = Some((page, limit));

    respond(&state.wallet_status, &state.wallet_body)
}

async fn wallet_deposit(State(state): State<Arc<MockState>>) -> (StatusCode, Json<Value>) {
    state.deposit_calls.fetch_add(1, Ordering::SeqCst);
    respond(&state.deposit_status, &state.deposit_body)
}

async fn wallet_transfer(State(state): State<Arc<MockState>>) -> (StatusCode, Json<Value>) {
    state.transfer_calls.fetch_add(1, Ordering::SeqCst);
    respond(&state.transfer_status, &state.transfer_body)
}

async fn wallet_verify(State(state): State<Arc<MockState>>) -> (StatusCode, Json<Value>) {
    state.verify_calls.fetch_add(1, Ordering::SeqCst);
    respond(&state.verify_status, &state.verify_body)
}

async fn vehicle_search(State(state): State<Arc<MockState>>) -> Json<Value> {
    state.vehicle_search_calls.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "vehicles": [
            {"id": "v-1", "plateNumber": "RAD123A", "hostName": "Sarah Host", "hostPhone": "+250780000001"},
            {"id": "v-2", "plateNumber": "RAD456B", "hostName": "Mike Host", "hostPhone": "+250780000002"}
        ],
        "pagination": {"page": 0, "items": 10, "totalItems": 2, "totalPages": 1}
    }))
}

async fn vehicle_by_plate(
    State(state): State<Arc<MockState>>,
    Path(plate): Path<String>,
) -> (StatusCode, Json<Value>) {
    state.plate_calls.fetch_add(1, Ordering::SeqCst);

    if state.deleted_plates.lock().contains(&plate) {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"message": format!("Vehicle {} not found", plate)})),
        );
    }

    (
        StatusCode::OK,
        Json(json!({
            "id": "v-1",
            "plateNumber": plate,
            "hostName": "Sarah Host",
            "hostPhone": "+250780000001"
        })),
    )
}

async fn vehicle_delete(
    State(state): State<Arc<MockState>>,
    Path(plate): Path<String>,
) -> Json<Value> {
    state.delete_calls.fetch_add(1, Ordering::SeqCst);
    state.deleted_plates.lock().push(plate.clone());
    Json(json!({"message": format!("Vehicle {} deleted", plate)}))
}

async fn bookings(State(state): State<Arc<MockState>>) -> Json<Value> {
    state.booking_calls.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "bookings": [{
            "id": "b-1",
            "userId": "u-1",
            "userEmail": "renter@example.com",
            "userPhone": "+250780000003",
            "userName": "Renter One",
            "hostId": "h-1",
            "hostName": "Sarah Host",
            "hostPhone": "+250780000001",
            "startDate": "2026-02-20T00:00:00Z",
            "endDate": "2026-02-25T00:00:00Z",
            "pricePerDay": "50",
            "totalPrice": "250",
            "status": "active",
            "vehiclePlateNumber": "RAD123A"
        }]
    }))
}

fn respond(status: &Mutex<u16>, body: &Mutex<Value>) -> (StatusCode, Json<Value>) {
    let status = StatusCode::from_u16(*status.lock()).unwrap();
    (status, Json(body.lock().clone()))
}
