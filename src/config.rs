use std::env;
use std::time::Duration;

/// Runtime configuration, read from the environment once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the marketplace backend, no trailing slash.
    pub api_base_url: String,
    pub admin_email: String,
    pub admin_password: String,
    /// Where the payment gateway sends the browser back to after a deposit.
    pub dashboard_url: String,
    pub page_size: u32,
    /// Delay before the reconciliation fetch after deposit/transfer.
    pub refresh_delay: Duration,
    /// How long payment-return guards stay armed before a new return event
    /// with the same reference can be processed again.
    pub verify_cooldown: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let api_base_url = env::var("RENTDESK_API_URL")
            .map_err(|_| "RENTDESK_API_URL must be set")?
            .trim_end_matches('/')
            .to_string();
        let admin_email =
            env::var("RENTDESK_ADMIN_EMAIL").map_err(|_| "RENTDESK_ADMIN_EMAIL must be set")?;
        let admin_password = env::var("RENTDESK_ADMIN_PASSWORD")
            .map_err(|_| "RENTDESK_ADMIN_PASSWORD must be set")?;
        let dashboard_url = env::var("RENTDESK_DASHBOARD_URL")
            .unwrap_or_else(|_| "https://admin.rentdesk.example/dashboard".to_string());

        let page_size = match env::var("RENTDESK_PAGE_SIZE") {
            Ok(raw) => raw
                .parse::<u32>()
                .map_err(|e| format!("RENTDESK_PAGE_SIZE: {}", e))?,
            Err(_) => 10,
        };

        let refresh_delay = Duration::from_millis(match env::var("RENTDESK_REFRESH_DELAY_MS") {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|e| format!("RENTDESK_REFRESH_DELAY_MS: {}", e))?,
            Err(_) => 2_000,
        });

        let verify_cooldown = Duration::from_millis(match env::var("RENTDESK_VERIFY_COOLDOWN_MS") {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|e| format!("RENTDESK_VERIFY_COOLDOWN_MS: {}", e))?,
            Err(_) => 10_000,
        });

        if page_size == 0 {
            return Err("RENTDESK_PAGE_SIZE must be at least 1".into());
        }

        Ok(Self {
            api_base_url,
            admin_email,
            admin_password,
            dashboard_url,
            page_size,
            refresh_delay,
            verify_cooldown,
        })
    }
}
