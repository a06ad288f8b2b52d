//! Identity directory queries
//!
//! Two row shapes on purpose: [`User`] carries the password hash and only
//! ever feeds the login path, [`Employee`] is the directory row handed back
//! to clients and never selects the password column.

use serde::Serialize;
use sqlx::SqlitePool;

/// Full account row, including the password hash. Auth use only.
#[derive(Debug, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub manager_id: Option<i64>,
}

/// Directory row as exposed through the API
#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub manager_id: Option<i64>,
}

/// Name and email of an account, for the login export
#[derive(Debug, sqlx::FromRow)]
pub struct UserLogin {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, email, password, first_name, last_name, role, manager_id \
         FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>(
        "SELECT id, email, first_name, last_name, role, manager_id FROM users WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Manager link of an identity. `None` both when the row is missing and
/// when the account has no manager; callers must not distinguish the two.
pub async fn manager_of(pool: &SqlitePool, id: i64) -> Result<Option<i64>, sqlx::Error> {
    let row: Option<Option<i64>> = sqlx::query_scalar("SELECT manager_id FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.flatten())
}

pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>(
        "SELECT id, email, first_name, last_name, role, manager_id FROM users ORDER BY id",
    )
    .fetch_all(pool)
    .await
}

pub async fn list_by_manager(
    pool: &SqlitePool,
    manager_id: i64,
) -> Result<Vec<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>(
        "SELECT id, email, first_name, last_name, role, manager_id \
         FROM users WHERE manager_id = ? ORDER BY id",
    )
    .bind(manager_id)
    .fetch_all(pool)
    .await
}

/// Insert an account and return its id.
#[allow(clippy::too_many_arguments)]
pub async fn create(
    pool: &SqlitePool,
    email: &str,
    password_hash: &str,
    first_name: &str,
    last_name: &str,
    role: &str,
    manager_id: Option<i64>,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO users (email, password, first_name, last_name, role, manager_id) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(email)
    .bind(password_hash)
    .bind(first_name)
    .bind(last_name)
    .bind(role)
    .bind(manager_id)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Update the mutable profile fields. Email and password are immutable
/// through this path.
pub async fn update_profile(
    pool: &SqlitePool,
    id: i64,
    first_name: &str,
    last_name: &str,
    role: &str,
    manager_id: Option<i64>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE users SET first_name = ?, last_name = ?, role = ?, manager_id = ? WHERE id = ?",
    )
    .bind(first_name)
    .bind(last_name)
    .bind(role)
    .bind(manager_id)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Fetch the login details for a set of account ids. Unknown ids are
/// silently skipped.
pub async fn logins_by_ids(
    pool: &SqlitePool,
    ids: &[i64],
) -> Result<Vec<UserLogin>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!(
        "SELECT email, first_name, last_name FROM users WHERE id IN ({placeholders}) ORDER BY id"
    );

    let mut query = sqlx::query_as::<_, UserLogin>(&sql);
    for id in ids {
        query = query.bind(id);
    }
    query.fetch_all(pool).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{insert_user, test_pool};
    use shared::models::Role;

    #[tokio::test]
    async fn test_create_and_find_by_email() {
        let pool = test_pool().await;
        let id = insert_user(&pool, "a@x.com", Role::Admin, None).await;

        let user = find_by_email(&pool, "a@x.com").await.unwrap().unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.role, "ADMIN");
        assert!(user.manager_id.is_none());

        assert!(find_by_email(&pool, "nobody@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_unique_violation() {
        let pool = test_pool().await;
        insert_user(&pool, "a@x.com", Role::Employee, None).await;

        let err = create(&pool, "a@x.com", "h", "A", "B", "EMPLOYEE", None)
            .await
            .unwrap_err();
        assert!(
            err.as_database_error()
                .is_some_and(|d| d.is_unique_violation())
        );
    }

    #[tokio::test]
    async fn test_manager_of_flattens_missing_and_unmanaged() {
        let pool = test_pool().await;
        let manager_id = insert_user(&pool, "m@x.com", Role::Manager, None).await;
        let report_id = insert_user(&pool, "e@x.com", Role::Employee, Some(manager_id)).await;

        assert_eq!(manager_of(&pool, report_id).await.unwrap(), Some(manager_id));
        assert_eq!(manager_of(&pool, manager_id).await.unwrap(), None);
        assert_eq!(manager_of(&pool, 9999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_by_manager_scopes_to_reports() {
        let pool = test_pool().await;
        let m1 = insert_user(&pool, "m1@x.com", Role::Manager, None).await;
        let m2 = insert_user(&pool, "m2@x.com", Role::Manager, None).await;
        let e1 = insert_user(&pool, "e1@x.com", Role::Employee, Some(m1)).await;
        insert_user(&pool, "e2@x.com", Role::Employee, Some(m2)).await;

        let reports = list_by_manager(&pool, m1).await.unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].id, e1);

        assert_eq!(list_all(&pool).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_update_profile_reassigns_manager() {
        let pool = test_pool().await;
        let m1 = insert_user(&pool, "m1@x.com", Role::Manager, None).await;
        let m2 = insert_user(&pool, "m2@x.com", Role::Manager, None).await;
        let e = insert_user(&pool, "e@x.com", Role::Employee, Some(m1)).await;

        update_profile(&pool, e, "New", "Name", "EMPLOYEE", Some(m2))
            .await
            .unwrap();

        let row = find_by_id(&pool, e).await.unwrap().unwrap();
        assert_eq!(row.first_name, "New");
        assert_eq!(row.manager_id, Some(m2));
        // Email untouched
        assert_eq!(row.email, "e@x.com");
    }

    #[tokio::test]
    async fn test_update_profile_clears_manager_link() {
        // Promotion to MANAGER must be able to drop the stale link
        let pool = test_pool().await;
        let m = insert_user(&pool, "m@x.com", Role::Manager, None).await;
        let e = insert_user(&pool, "e@x.com", Role::Employee, Some(m)).await;

        update_profile(&pool, e, "Test", "User", "MANAGER", None)
            .await
            .unwrap();

        let row = find_by_id(&pool, e).await.unwrap().unwrap();
        assert_eq!(row.role, "MANAGER");
        assert_eq!(row.manager_id, None);
    }

    #[tokio::test]
    async fn test_logins_by_ids_skips_unknown() {
        let pool = test_pool().await;
        let a = insert_user(&pool, "a@x.com", Role::Admin, None).await;
        let b = insert_user(&pool, "b@x.com", Role::Employee, None).await;

        let logins = logins_by_ids(&pool, &[a, b, 9999]).await.unwrap();
        assert_eq!(logins.len(), 2);
        assert_eq!(logins[0].email, "a@x.com");

        assert!(logins_by_ids(&pool, &[]).await.unwrap().is_empty());
    }
}
