//! pnl-server — employee profit/loss tracking portal
//!
//! Long-running service that:
//! - Authenticates users (JWT) against the identity directory
//! - Enforces the Admin / Manager / Employee permission hierarchy on every
//!   ledger and directory operation
//! - Stores profit/loss entries and employee records (SQLite)
//! - Exports selected user login lists via email (SES)

mod api;
mod auth;
mod config;
mod db;
mod email;
mod error;
mod state;
mod util;

use config::Config;
use state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pnl_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting pnl-server (env: {})", config.environment);

    // Initialize application state
    let state = AppState::new(&config).await?;

    if config.seed_default_users {
        db::seed::seed_default_users(&state.pool).await?;
    }

    // Periodic rate limiter cleanup (every 5 minutes)
    let rate_limiter = state.rate_limiter.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(300));
        loop {
            interval.tick().await;
            rate_limiter.cleanup().await;
        }
    });

    let app = api::create_router(state);

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("pnl-server listening on {addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await?;

    Ok(())
}
