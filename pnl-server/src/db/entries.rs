//! Profit/loss ledger queries
//!
//! Amounts are stored exactly as submitted; the server never recomputes
//! `amount` or `total_amount` from hours and rate.

use serde::Serialize;
use sqlx::SqlitePool;

/// Ledger row as stored and as returned to clients
#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: i64,
    pub employee_id: i64,
    pub date: String,
    pub hours: Option<f64>,
    pub rate: Option<f64>,
    pub amount: f64,
    pub other_amount: Option<f64>,
    pub total_amount: f64,
    #[serde(rename = "type")]
    pub entry_type: String,
    pub status: String,
    pub notes: Option<String>,
}

/// Fields of a new ledger row, validated by the handler before insert
#[derive(Debug)]
pub struct NewEntry {
    pub employee_id: i64,
    pub date: String,
    pub hours: Option<f64>,
    pub rate: Option<f64>,
    pub amount: f64,
    pub other_amount: Option<f64>,
    pub total_amount: f64,
    pub entry_type: String,
    pub status: String,
    pub notes: Option<String>,
}

const ENTRY_COLUMNS: &str = "id, employee_id, date, hours, rate, amount, other_amount, \
                             total_amount, entry_type, status, notes";

/// All ledger rows of one employee, newest first.
pub async fn list_for_employee(
    pool: &SqlitePool,
    employee_id: i64,
) -> Result<Vec<Entry>, sqlx::Error> {
    sqlx::query_as::<_, Entry>(&format!(
        "SELECT {ENTRY_COLUMNS} FROM profit_loss_entries \
         WHERE employee_id = ? ORDER BY date DESC, id DESC"
    ))
    .bind(employee_id)
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Entry>, sqlx::Error> {
    sqlx::query_as::<_, Entry>(&format!(
        "SELECT {ENTRY_COLUMNS} FROM profit_loss_entries WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn insert(pool: &SqlitePool, entry: &NewEntry) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO profit_loss_entries \
         (employee_id, date, hours, rate, amount, other_amount, total_amount, \
          entry_type, status, notes) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(entry.employee_id)
    .bind(&entry.date)
    .bind(entry.hours)
    .bind(entry.rate)
    .bind(entry.amount)
    .bind(entry.other_amount)
    .bind(entry.total_amount)
    .bind(&entry.entry_type)
    .bind(&entry.status)
    .bind(&entry.notes)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Update the two mutable fields of a ledger row. Everything else,
/// amounts included, is immutable after insert.
pub async fn update_status_notes(
    pool: &SqlitePool,
    id: i64,
    status: &str,
    notes: Option<&str>,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE profit_loss_entries SET status = ?, notes = ? WHERE id = ?")
        .bind(status)
        .bind(notes)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Delete a ledger row; `true` if a row was removed.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM profit_loss_entries WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{insert_entry, insert_user, test_pool};
    use shared::models::Role;

    #[tokio::test]
    async fn test_list_orders_newest_first() {
        let pool = test_pool().await;
        let e = insert_user(&pool, "e@x.com", Role::Employee, None).await;
        let older = insert_entry(&pool, e, "2026-01-05").await;
        let newer = insert_entry(&pool, e, "2026-03-20").await;
        let middle = insert_entry(&pool, e, "2026-02-11").await;

        let rows = list_for_employee(&pool, e).await.unwrap();
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![newer, middle, older]);
    }

    #[tokio::test]
    async fn test_list_scopes_to_employee() {
        let pool = test_pool().await;
        let e1 = insert_user(&pool, "e1@x.com", Role::Employee, None).await;
        let e2 = insert_user(&pool, "e2@x.com", Role::Employee, None).await;
        insert_entry(&pool, e1, "2026-01-01").await;
        insert_entry(&pool, e2, "2026-01-02").await;

        let rows = list_for_employee(&pool, e1).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].employee_id, e1);
    }

    #[tokio::test]
    async fn test_update_touches_only_status_and_notes() {
        let pool = test_pool().await;
        let e = insert_user(&pool, "e@x.com", Role::Employee, None).await;
        let id = insert_entry(&pool, e, "2026-01-01").await;

        update_status_notes(&pool, id, "Received", Some("paid out"))
            .await
            .unwrap();

        let row = find_by_id(&pool, id).await.unwrap().unwrap();
        assert_eq!(row.status, "Received");
        assert_eq!(row.notes.as_deref(), Some("paid out"));
        // Amounts unchanged
        assert_eq!(row.amount, 400.0);
        assert_eq!(row.total_amount, 425.0);

        // Notes can be cleared
        update_status_notes(&pool, id, "Received", None).await.unwrap();
        let row = find_by_id(&pool, id).await.unwrap().unwrap();
        assert!(row.notes.is_none());
    }

    #[tokio::test]
    async fn test_update_with_identical_values_is_idempotent() {
        let pool = test_pool().await;
        let e = insert_user(&pool, "e@x.com", Role::Employee, None).await;
        let id = insert_entry(&pool, e, "2026-01-01").await;

        update_status_notes(&pool, id, "Paid", Some("settled"))
            .await
            .unwrap();
        let first = find_by_id(&pool, id).await.unwrap().unwrap();

        // Repeating the same update succeeds and changes nothing
        update_status_notes(&pool, id, "Paid", Some("settled"))
            .await
            .unwrap();
        let second = find_by_id(&pool, id).await.unwrap().unwrap();

        assert_eq!(second.status, first.status);
        assert_eq!(second.notes, first.notes);
        assert_eq!(second.amount, first.amount);
        assert_eq!(second.total_amount, first.total_amount);
        assert_eq!(second.date, first.date);
    }

    #[tokio::test]
    async fn test_delete_reports_whether_row_existed() {
        let pool = test_pool().await;
        let e = insert_user(&pool, "e@x.com", Role::Employee, None).await;
        let id = insert_entry(&pool, e, "2026-01-01").await;

        assert!(delete(&pool, id).await.unwrap());
        assert!(find_by_id(&pool, id).await.unwrap().is_none());
        // Second delete is a no-op
        assert!(!delete(&pool, id).await.unwrap());
    }

    #[tokio::test]
    async fn test_entry_serializes_with_client_field_names() {
        let pool = test_pool().await;
        let e = insert_user(&pool, "e@x.com", Role::Employee, None).await;
        let id = insert_entry(&pool, e, "2026-01-01").await;

        let row = find_by_id(&pool, id).await.unwrap().unwrap();
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["employeeId"], e);
        assert_eq!(json["type"], "Revenue");
        assert_eq!(json["totalAmount"], 425.0);
        assert!(json.get("entry_type").is_none());
    }
}
