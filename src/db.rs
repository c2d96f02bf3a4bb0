use crate::config::settings::DatabaseSettings;
use anyhow::{Context, Result};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tracing::info;

pub async fn create_pool(settings: &DatabaseSettings) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.pool.max_connections)
        .min_connections(settings.pool.min_connections)
        .acquire_timeout(Duration::from_secs(settings.pool.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(settings.pool.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(settings.pool.max_lifetime_secs))
        .connect_with(settings.connect_options()?)
        .await
        .context("Failed to create database connection pool")?;

    // Try to acquire a connection to verify the pool is working
    pool.acquire()
        .await
        .context("Failed to acquire initial database connection")?;

    info!(
        "✅ Database pool established with {} max connections",
        settings.pool.max_connections
    );

    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run database migrations")?;

    info!("✅ Database migrations applied");
    Ok(())
}
