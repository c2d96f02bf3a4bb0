use anyhow::Result;
use async_trait::async_trait;

use crate::database::{NewUserRecord, User};

/// Persistence backend for user records
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Persist a new user and return the stored row, including its assigned id
    async fn insert(&self, user: NewUserRecord) -> Result<User>;

    /// Perform a health check on the backend
    async fn health_check(&self) -> Result<()>;
}

pub mod postgres;

pub use postgres::PgUserStore;
