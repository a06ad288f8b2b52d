//! Application state

use sqlx::SqlitePool;

use crate::auth::rate_limit::RateLimiter;
use crate::config::Config;
use crate::email::EmailService;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// JWT secret for user authentication
    pub jwt_secret: String,
    /// Email delivery (SES)
    pub email: EmailService,
    /// Rate limiter for login/registration routes
    pub rate_limiter: RateLimiter,
}

impl AppState {
    /// Create a new AppState
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = SqlitePool::connect(&config.database_url).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let ses = aws_sdk_sesv2::Client::new(&aws_config);

        Ok(Self {
            pool,
            jwt_secret: config.jwt_secret.clone(),
            email: EmailService::new(ses, config.ses_from_email.clone()),
            rate_limiter: RateLimiter::new(),
        })
    }
}
