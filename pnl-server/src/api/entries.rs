//! Profit/loss ledger endpoints
//!
//! Every handler authorizes through [`policy::check`]. The id-addressed
//! operations (update, delete) fetch the entry first: a missing id is
//! `EntryNotFound` for every role, and the check always runs against the
//! stored `employee_id`.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::Deserialize;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{EntryStatus, EntryType};

use crate::auth::AuthUser;
use crate::auth::policy::{self, Actor, Operation};
use crate::db;
use crate::db::entries::Entry;
use crate::error::ServiceResult;
use crate::state::AppState;

fn entry_not_found() -> AppError {
    AppError::with_message(ErrorCode::EntryNotFound, "Entry not found")
}

/// All entries of one employee, newest first.
pub async fn list_for_employee(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(employee_id): Path<i64>,
) -> ServiceResult<Json<ApiResponse<Vec<Entry>>>> {
    let actor = Actor::new(user.id, user.role);
    policy::check(&state.pool, &actor, Operation::Read, employee_id)
        .await?
        .require()?;

    let rows = db::entries::list_for_employee(&state.pool, employee_id).await?;
    Ok(Json(ApiResponse::success(rows)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
    pub employee_id: Option<i64>,
    pub date: Option<String>,
    pub hours: Option<f64>,
    pub rate: Option<f64>,
    pub amount: Option<f64>,
    pub other_amount: Option<f64>,
    pub total_amount: Option<f64>,
    #[serde(rename = "type")]
    pub entry_type: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateEntryRequest>,
) -> ServiceResult<Json<ApiResponse<Entry>>> {
    // Validation before authorization: a malformed payload is rejected the
    // same way no matter who sends it.
    let employee_id = super::require(req.employee_id, "employeeId")?;
    let date = super::require(req.date, "date")?;
    let amount = super::require(req.amount, "amount")?;
    let total_amount = super::require(req.total_amount, "totalAmount")?;
    let entry_type = super::require(req.entry_type, "type")?;
    let status = super::require(req.status, "status")?;

    let entry_type = EntryType::from_db(&entry_type)
        .ok_or_else(|| AppError::with_message(ErrorCode::InvalidEntryType, "Invalid entry type"))?;
    let status = EntryStatus::from_db(&status).ok_or_else(|| {
        AppError::with_message(ErrorCode::InvalidEntryStatus, "Invalid entry status")
    })?;

    let actor = Actor::new(user.id, user.role);
    policy::check(&state.pool, &actor, Operation::Create, employee_id)
        .await?
        .require()?;

    let id = db::entries::insert(
        &state.pool,
        &db::entries::NewEntry {
            employee_id,
            date,
            hours: req.hours,
            rate: req.rate,
            amount,
            other_amount: req.other_amount,
            total_amount,
            entry_type: entry_type.as_str().to_owned(),
            status: status.as_str().to_owned(),
            notes: req.notes,
        },
    )
    .await?;

    let stored = db::entries::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(entry_not_found)?;

    tracing::info!(entry_id = id, employee_id, actor = user.id, "Entry created");

    Ok(Json(ApiResponse::success(stored)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateEntryRequest {
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// Overwrite the status and notes of an entry. Idempotent: repeating the
/// same request leaves the row unchanged.
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateEntryRequest>,
) -> ServiceResult<Json<ApiResponse<Entry>>> {
    let status = super::require(req.status, "status")?;
    let status = EntryStatus::from_db(&status).ok_or_else(|| {
        AppError::with_message(ErrorCode::InvalidEntryStatus, "Invalid entry status")
    })?;

    let existing = db::entries::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(entry_not_found)?;

    let actor = Actor::new(user.id, user.role);
    policy::check(&state.pool, &actor, Operation::Update, existing.employee_id)
        .await?
        .require()?;

    db::entries::update_status_notes(&state.pool, id, status.as_str(), req.notes.as_deref())
        .await?;

    let updated = db::entries::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(entry_not_found)?;

    tracing::info!(entry_id = id, actor = user.id, "Entry updated");

    Ok(Json(ApiResponse::success(updated)))
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> ServiceResult<Json<ApiResponse<()>>> {
    let existing = db::entries::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(entry_not_found)?;

    let actor = Actor::new(user.id, user.role);
    policy::check(&state.pool, &actor, Operation::Delete, existing.employee_id)
        .await?
        .require()?;

    db::entries::delete(&state.pool, id).await?;

    tracing::info!(entry_id = id, actor = user.id, "Entry deleted");

    Ok(Json(ApiResponse::ok()))
}
