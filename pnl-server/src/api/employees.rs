//! Employee directory endpoints

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::Deserialize;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::Role;

use crate::auth::AuthUser;
use crate::auth::policy::{self, Actor, Operation};
use crate::db;
use crate::db::users::Employee;
use crate::error::ServiceResult;
use crate::state::AppState;

/// List employees, scoped to what the caller may see: Admin gets the whole
/// directory, a Manager only their direct reports.
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ServiceResult<Json<ApiResponse<Vec<Employee>>>> {
    let rows = match user.role {
        Role::Admin => db::users::list_all(&state.pool).await?,
        Role::Manager => db::users::list_by_manager(&state.pool, user.id).await?,
        Role::Employee => {
            return Err(AppError::permission_denied("Not authorized").into());
        }
    };
    Ok(Json(ApiResponse::success(rows)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    pub manager_id: Option<i64>,
}

/// Replace an employee's profile. The target row is fetched first, so the
/// authorization check runs against the stored manager link, never a
/// client-supplied one. All four mutable fields are overwritten; omitting
/// `managerId` clears the link, which is how a promoted employee stops
/// reporting to anyone.
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateEmployeeRequest>,
) -> ServiceResult<Json<ApiResponse<Employee>>> {
    let existing = db::users::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::with_message(ErrorCode::EmployeeNotFound, "Employee not found"))?;

    let actor = Actor::new(user.id, user.role);
    policy::decide(&actor, Operation::Update, id, existing.manager_id).require()?;

    let first_name = super::require(req.first_name, "firstName")?;
    let last_name = super::require(req.last_name, "lastName")?;
    let role = Role::from_db(&super::require(req.role, "role")?)
        .ok_or_else(|| AppError::with_message(ErrorCode::InvalidRole, "Invalid role"))?;

    db::users::update_profile(
        &state.pool,
        id,
        &first_name,
        &last_name,
        role.as_str(),
        req.manager_id,
    )
    .await?;

    let updated = db::users::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::with_message(ErrorCode::EmployeeNotFound, "Employee not found"))?;

    tracing::info!(employee_id = id, actor = user.id, "Employee profile updated");

    Ok(Json(ApiResponse::success(updated)))
}
