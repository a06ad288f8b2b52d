//! Login and registration

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::Role;

use crate::auth::jwt;
use crate::db;
use crate::error::ServiceResult;
use crate::state::AppState;
use crate::util;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Account record as returned to clients, password hash omitted
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub manager_id: Option<i64>,
}

impl From<db::users::User> for UserResponse {
    fn from(u: db::users::User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            role: u.role,
            manager_id: u.manager_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ServiceResult<Json<ApiResponse<LoginResponse>>> {
    // Unknown email and wrong password are indistinguishable to the client
    let user = db::users::find_by_email(&state.pool, &req.email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    if !util::verify_password(&req.password, &user.password) {
        return Err(AppError::invalid_credentials().into());
    }

    let role = Role::from_db(&user.role)
        .ok_or_else(|| AppError::internal("Account has an unrecognized role"))?;

    let token = jwt::create_token(user.id, role, &state.jwt_secret)
        .map_err(|e| AppError::internal(format!("Token creation failed: {e}")))?;

    tracing::info!(user_id = user.id, role = %user.role, "User logged in");

    Ok(Json(ApiResponse::success(LoginResponse {
        token,
        user: user.into(),
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    pub manager_id: Option<i64>,
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ServiceResult<Json<ApiResponse<UserResponse>>> {
    let email = super::require(req.email, "email")?;
    let password = super::require(req.password, "password")?;
    let first_name = super::require(req.first_name, "firstName")?;
    let last_name = super::require(req.last_name, "lastName")?;
    let role_str = super::require(req.role, "role")?;

    if !email.contains('@') {
        return Err(AppError::validation("Invalid email format")
            .with_detail("field", "email")
            .into());
    }
    if password.len() < 8 {
        return Err(AppError::validation("Password must be at least 8 characters")
            .with_detail("field", "password")
            .into());
    }
    let role = Role::from_db(&role_str)
        .ok_or_else(|| AppError::with_message(ErrorCode::InvalidRole, "Invalid role"))?;

    let hash = util::hash_password(&password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

    let id = match db::users::create(
        &state.pool,
        &email,
        &hash,
        &first_name,
        &last_name,
        role.as_str(),
        req.manager_id,
    )
    .await
    {
        Ok(id) => id,
        Err(e) if e.as_database_error().is_some_and(|d| d.is_unique_violation()) => {
            return Err(AppError::new(ErrorCode::EmailExists).into());
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(user_id = id, role = role.as_str(), "User registered");

    Ok(Json(ApiResponse::success(UserResponse {
        id,
        email,
        first_name,
        last_name,
        role: role.as_str().to_owned(),
        manager_id: req.manager_id,
    })))
}
