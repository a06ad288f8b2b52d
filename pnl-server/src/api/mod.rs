//! API routes for the profit/loss portal

pub mod auth;
pub mod employees;
pub mod entries;
pub mod export;
pub mod health;

use axum::routing::{get, post, put};
use axum::{Router, middleware};
use shared::error::AppError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::jwt::auth_middleware;
use crate::auth::rate_limit::{login_rate_limit, register_rate_limit};
use crate::state::AppState;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // Public auth routes, each behind its own rate limit
    let login = Router::new()
        .route("/api/auth/login", post(auth::login))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            login_rate_limit,
        ));
    let register = Router::new()
        .route("/api/auth/register", post(auth::register))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            register_rate_limit,
        ));

    // Everything else requires a bearer token; per-operation authorization
    // happens inside the handlers.
    let protected = Router::new()
        .route("/api/employees", get(employees::list))
        .route("/api/employees/{id}", put(employees::update))
        .route("/api/profit-loss", post(entries::create))
        .route(
            "/api/profit-loss/{id}",
            get(entries::list_for_employee)
                .patch(entries::update)
                .delete(entries::remove),
        )
        .route("/api/export/user-logins", post(export::user_logins))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(login)
        .merge(register)
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Pull a required field out of a request payload, naming it in the
/// validation error when absent.
pub(crate) fn require<T>(value: Option<T>, field: &'static str) -> Result<T, AppError> {
    value.ok_or_else(|| {
        AppError::validation(format!("Missing required field: {field}")).with_detail("field", field)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;

    #[test]
    fn test_require_names_missing_field() {
        assert_eq!(require(Some(1), "amount").unwrap(), 1);

        let err = require::<i64>(None, "amount").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, "Missing required field: amount");
        assert_eq!(err.details.unwrap().get("field").unwrap(), "amount");
    }
}
