use anyhow::{Context, Result};
use sqlx::PgConnection;
use tracing::{debug, error};

use super::models::*;

// User queries
pub async fn create_user(conn: &mut PgConnection, new_user: &NewUserRecord) -> Result<User> {
    debug!("Inserting user row for {}", new_user.email);

    let result = sqlx::query_as::<_, User>(
        "INSERT INTO users (name, email, password, created_at)
         VALUES ($1, $2, $3, $4)
         RETURNING id, name, email, password, created_at",
    )
    .bind(new_user.name.as_str())
    .bind(new_user.email.as_str())
    .bind(new_user.password.as_str())
    .bind(new_user.created_at)
    .fetch_one(conn)
    .await;

    if let Err(e) = &result {
        error!("❌ Database insert error: {}", e);
    }

    result.context("Failed to create user")
}

pub async fn ping(conn: &mut PgConnection) -> Result<()> {
    sqlx::query("SELECT 1")
        .execute(conn)
        .await
        .context("Database ping failed")?;

    Ok(())
}
