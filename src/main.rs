use rentdesk_console::config::Config;
use rentdesk_console::models::booking::TimeFilter;
use rentdesk_console::Console;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,rentdesk_console=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env().expect("Invalid configuration");
    tracing::info!("Connecting to backend at {}", config.api_base_url);

    let console = Console::new(&config);

    console
        .auth
        .login(&config.admin_email, &config.admin_password)
        .await
        .expect("Login failed");

    if let Err(e) = console.wallet.fetch(0, config.page_size).await {
        tracing::error!("Initial wallet fetch failed: {}", e);
    }

    let wallet = console.wallet.snapshot().await;
    tracing::info!("Wallet balance: {}", wallet.balance);
    for tx in wallet.transactions.iter().take(5) {
        tracing::info!(
            "  {} {} {} -> {} [{}]",
            tx.date.format("%Y-%m-%d %H:%M"),
            tx.kind,
            tx.amount,
            tx.user_email,
            tx.status
        );
    }

    match console.vehicles.list(0, config.page_size).await {
        Ok(listing) => {
            for vehicle in &listing.vehicles {
                tracing::info!(
                    "  vehicle {} hosted by {} ({})",
                    vehicle.plate_number,
                    vehicle.host_name,
                    vehicle.host_phone
                );
            }
        }
        Err(e) => tracing::error!("Vehicle listing failed: {}", e),
    }

    match console.bookings.list(TimeFilter::Today).await {
        Ok(bookings) => {
            tracing::info!("{} bookings today", bookings.len());
        }
        Err(e) => tracing::error!("Booking listing failed: {}", e),
    }
}
