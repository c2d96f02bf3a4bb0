use super::UserStore;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::{queries, NewUserRecord, User};

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, user: NewUserRecord) -> Result<User> {
        // The connection goes back to the pool when `conn` drops, on every path
        let mut conn = self
            .pool
            .acquire()
            .await
            .context("Failed to acquire database connection")?;

        queries::create_user(&mut conn, &user).await
    }

    async fn health_check(&self) -> Result<()> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .context("Failed to acquire database connection")?;

        queries::ping(&mut conn).await
    }
}
