use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::fmt;

use crate::models::user::NewUser;

// User row as stored in the `users` table. Deliberately not `Serialize`:
// the wire shape is `models::user::UserResponse`.
#[derive(Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

// Insert payload; `id` is assigned by the store
#[derive(Clone)]
pub struct NewUserRecord {
    pub name: String,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

impl NewUserRecord {
    pub fn new(user: NewUser, created_at: DateTime<Utc>) -> Self {
        Self {
            name: user.name,
            email: user.email,
            password: user.password,
            created_at,
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .finish()
    }
}

impl fmt::Debug for NewUserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUserRecord")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .finish()
    }
}
