// src/lib.rs

use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::AuthService;
use crate::services::backend::BackendClient;
use crate::services::bookings::BookingService;
use crate::services::notifications::NotificationCenter;
use crate::services::payment_return::PaymentReturnVerifier;
use crate::services::vehicles::VehicleService;
use crate::services::wallet::{PaymentPageOpener, WalletOptions, WalletService};
use crate::session::Session;

/// All console services wired to one backend, one session, and one
/// notification sink.
#[derive(Clone)]
pub struct Console {
    pub session: Session,
    pub notifications: NotificationCenter,
    pub auth: AuthService,
    pub wallet: WalletService,
    pub verifier: PaymentReturnVerifier,
    pub vehicles: VehicleService,
    pub bookings: BookingService,
}

impl Console {
    pub fn new(config: &Config) -> Self {
        Self::with_opener(config, None)
    }

    pub fn with_opener(config: &Config, opener: Option<Arc<dyn PaymentPageOpener>>) -> Self {
        let session = Session::new();
        let notifications = NotificationCenter::new();
        let backend = BackendClient::new(
            config.api_base_url.clone(),
            session.clone(),
            notifications.clone(),
        );

        let mut wallet = WalletService::new(
            backend.clone(),
            session.clone(),
            notifications.clone(),
            WalletOptions {
                redirect_url: config.dashboard_url.clone(),
                refresh_delay: config.refresh_delay,
                page_size: config.page_size,
            },
        );
        if let Some(opener) = opener {
            wallet = wallet.with_opener(opener);
        }

        let verifier = PaymentReturnVerifier::new(
            backend.clone(),
            wallet.clone(),
            notifications.clone(),
            config.verify_cooldown,
        );

        Self {
            auth: AuthService::new(backend.clone(), session.clone(), notifications.clone()),
            vehicles: VehicleService::new(backend.clone(), notifications.clone()),
            bookings: BookingService::new(backend, notifications.clone()),
            session,
            notifications,
            wallet,
            verifier,
        }
    }
}

pub mod config;
pub mod session;

pub mod models {
    pub mod auth;
    pub mod booking;
    pub mod notification;
    pub mod vehicle;
    pub mod wallet;
}

pub mod services {
    pub mod auth;
    pub mod backend;
    pub mod bookings;
    pub mod notifications;
    pub mod payment_return;
    pub mod refresh;
    pub mod vehicles;
    pub mod wallet;
}
