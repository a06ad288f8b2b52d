//! User login export
//!
//! Composes a plain-text list of the selected accounts and mails it to the
//! given recipient. Mounted behind the bearer-token middleware.

use axum::{Extension, Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};
use shared::error::{ApiResponse, AppError, ErrorCode};

use crate::auth::AuthUser;
use crate::db;
use crate::error::ServiceResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub email: Option<String>,
    pub user_ids: Option<Vec<i64>>,
    pub body: Option<String>,
}

pub async fn user_logins(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<ExportRequest>,
) -> ServiceResult<Json<ApiResponse<Value>>> {
    let email = super::require(req.email, "email")?;
    let user_ids = super::require(req.user_ids, "userIds")?;

    if !email.contains('@') {
        return Err(AppError::validation("Invalid email format")
            .with_detail("field", "email")
            .into());
    }
    if user_ids.is_empty() {
        return Err(AppError::validation("No users selected")
            .with_detail("field", "userIds")
            .into());
    }

    let logins = db::users::logins_by_ids(&state.pool, &user_ids).await?;
    if logins.is_empty() {
        return Err(AppError::with_message(ErrorCode::NotFound, "No users found").into());
    }

    let list = logins
        .iter()
        .map(|l| format!("{} {} ({})", l.first_name, l.last_name, l.email))
        .collect::<Vec<_>>()
        .join("\n");
    let body_text = format!(
        "{}\n\nSelected Users:\n{list}",
        req.body.unwrap_or_default()
    );

    state
        .email
        .send_user_logins(&email, &body_text)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, to = %email, "Login export email failed");
            AppError::new(ErrorCode::EmailSendFailed)
        })?;

    tracing::info!(
        to = %email,
        count = logins.len(),
        actor = user.id,
        "Login export sent"
    );

    Ok(Json(ApiResponse::success(json!({
        "message": "Email sent",
        "count": logins.len(),
    }))))
}
