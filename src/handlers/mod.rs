// Handlers module
pub mod health;
pub mod users;
