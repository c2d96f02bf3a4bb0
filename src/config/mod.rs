pub mod settings;

pub use settings::{DatabaseSettings, PoolSettings, ServerSettings, Settings};
