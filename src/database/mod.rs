pub mod models;
pub mod queries;

pub use models::{NewUserRecord, User};
