use anyhow::{bail, Context, Result};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use url::Url;
use validator::Validate;

pub const DEFAULT_LISTEN_ADDRESS: &str = "0.0.0.0:8000";
pub const DEFAULT_API_PREFIX: &str = "/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Validate)]
pub struct Settings {
    #[validate]
    pub server: ServerSettings,
    #[validate]
    pub database: DatabaseSettings,
}

#[derive(Debug, Clone, Validate)]
pub struct ServerSettings {
    pub bind_address: IpAddr,
    pub port: u16,
    #[validate(custom = "validate_api_prefix")]
    pub api_prefix: String,
    #[validate(range(min = 1, max = 3600))]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Validate)]
pub struct DatabaseSettings {
    /// Full connection URL, kept secret because it embeds the password
    pub url: Secret<String>,
    pub host: String,
    pub port: u16,
    #[validate(length(min = 1))]
    pub database_name: String,
    pub require_ssl: bool,
    #[validate]
    pub pool: PoolSettings,
}

/// Connection pool tuning, read from `DATABASE_*` variables
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_pool_bounds"))]
pub struct PoolSettings {
    #[serde(default = "default_max_connections")]
    #[validate(range(min = 1))]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_acquire_timeout_secs")]
    #[validate(range(min = 1))]
    pub acquire_timeout_secs: u64,
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime_secs")]
    pub max_lifetime_secs: u64,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_acquire_timeout_secs() -> u64 {
    30
}

fn default_idle_timeout_secs() -> u64 {
    600
}

fn default_max_lifetime_secs() -> u64 {
    1800
}

impl Settings {
    /// Load configuration from the environment (and `.env`, if present)
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let settings = Settings {
            server: ServerSettings::from_env()?,
            database: DatabaseSettings::from_env()?,
        };

        settings
            .validate()
            .context("Configuration validation failed")?;

        Ok(settings)
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8000,
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ServerSettings {
    fn from_env() -> Result<Self> {
        let listen_address =
            env::var("LISTEN_ADDRESS").unwrap_or_else(|_| DEFAULT_LISTEN_ADDRESS.to_string());

        let socket_addr: SocketAddr = listen_address
            .parse()
            .context("Invalid LISTEN_ADDRESS format. Expected format: 'host:port'")?;

        let request_timeout_secs = match env::var("REQUEST_TIMEOUT_SECS") {
            Ok(value) => value
                .parse()
                .context("REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(ServerSettings {
            bind_address: socket_addr.ip(),
            port: socket_addr.port(),
            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| DEFAULT_API_PREFIX.to_string()),
            request_timeout_secs,
        })
    }

    pub fn address(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl DatabaseSettings {
    fn from_env() -> Result<Self> {
        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL environment variable is required")?;

        let mut settings = Self::from_url(&database_url)?;
        settings.require_ssl = env::var("DATABASE_REQUIRE_SSL")
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        settings.pool = PoolSettings::from_vars(env::vars())?;

        Ok(settings)
    }

    /// Build settings from a `postgres://` URL with default pool tuning
    pub fn from_url(database_url: &str) -> Result<Self> {
        let url = Url::parse(database_url).context("Invalid DATABASE_URL format")?;

        if !matches!(url.scheme(), "postgres" | "postgresql") {
            bail!(
                "Unsupported DATABASE_URL scheme '{}', expected 'postgres'",
                url.scheme()
            );
        }

        let host = url
            .host_str()
            .context("No host found in DATABASE_URL")?
            .to_string();

        Ok(DatabaseSettings {
            url: Secret::new(database_url.to_string()),
            host,
            port: url.port().unwrap_or(5432),
            database_name: url.path().trim_start_matches('/').to_string(),
            require_ssl: false,
            pool: PoolSettings::default(),
        })
    }

    pub fn connect_options(&self) -> Result<PgConnectOptions> {
        let options = PgConnectOptions::from_str(self.url.expose_secret())
            .context("DATABASE_URL is not a valid PostgreSQL connection string")?;

        if self.require_ssl {
            Ok(options.ssl_mode(PgSslMode::Require))
        } else {
            Ok(options)
        }
    }
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
            idle_timeout_secs: default_idle_timeout_secs(),
            max_lifetime_secs: default_max_lifetime_secs(),
        }
    }
}

impl PoolSettings {
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed("DATABASE_")
            .from_iter(vars)
            .context("Invalid DATABASE_* pool settings")
    }
}

fn validate_api_prefix(prefix: &str) -> Result<(), validator::ValidationError> {
    // Nesting at the root or with a trailing slash is rejected by the router
    if prefix.len() > 1 && prefix.starts_with('/') && !prefix.ends_with('/') {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_api_prefix"))
    }
}

fn validate_pool_bounds(pool: &PoolSettings) -> Result<(), validator::ValidationError> {
    if pool.min_connections > pool.max_connections {
        return Err(validator::ValidationError::new("min_exceeds_max_connections"));
    }
    Ok(())
}
