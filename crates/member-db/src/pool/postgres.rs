//! PostgreSQL connection pool management

use member_common::{DatabaseSettings, DbCredentials};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::time::Duration;

/// Connection target and pool sizing
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Where and as whom to connect
    pub connect: PgConnectOptions,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Maximum time to wait for a connection
    pub acquire_timeout: Duration,
    /// Maximum idle time before a connection is closed
    pub idle_timeout: Duration,
    /// Maximum lifetime of a connection
    pub max_lifetime: Duration,
}

impl PoolConfig {
    /// Combine database settings with resolved credentials
    ///
    /// A configured connection URL takes precedence over the individual
    /// host/port/name fields and the credentials.
    pub fn from_settings(
        settings: &DatabaseSettings,
        credentials: &DbCredentials,
    ) -> Result<Self, sqlx::Error> {
        let connect = match &settings.url {
            Some(url) => url.parse::<PgConnectOptions>()?,
            None => PgConnectOptions::new()
                .host(&settings.host)
                .port(settings.port)
                .database(&settings.name)
                .username(&credentials.username)
                .password(&credentials.password),
        };

        Ok(Self {
            connect,
            max_connections: settings.max_connections,
            min_connections: settings.min_connections,
            acquire_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(300),
            max_lifetime: Duration::from_secs(1800),
        })
    }
}

/// Create a new PostgreSQL connection pool
///
/// Connections are checked before being handed out, so a pool that outlives
/// a database restart recovers on its own.
pub async fn create_pool(config: &PoolConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout)
        .max_lifetime(config.max_lifetime)
        .test_before_acquire(true)
        .connect_with(config.connect.clone())
        .await
}
