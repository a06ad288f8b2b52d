//! Demo account seeding
//!
//! Populates an empty directory with one account per role so a fresh
//! deployment can be exercised immediately. Controlled by the
//! `SEED_DEFAULT_USERS` env flag; a non-empty users table is left alone.

use sqlx::SqlitePool;

use super::users;
use crate::util;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub async fn seed_default_users(pool: &SqlitePool) -> Result<(), BoxError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        tracing::debug!("users table not empty, skipping seed");
        return Ok(());
    }

    users::create(
        pool,
        "admin@example.com",
        &util::hash_password("admin123")?,
        "Admin",
        "User",
        "ADMIN",
        None,
    )
    .await?;

    let manager_id = users::create(
        pool,
        "manager@example.com",
        &util::hash_password("manager123")?,
        "Manager",
        "User",
        "MANAGER",
        None,
    )
    .await?;

    users::create(
        pool,
        "employee@example.com",
        &util::hash_password("employee123")?,
        "Employee",
        "User",
        "EMPLOYEE",
        Some(manager_id),
    )
    .await?;

    tracing::info!("seeded default admin/manager/employee accounts");
    Ok(())
}
