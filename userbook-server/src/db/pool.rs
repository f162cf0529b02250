//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. Connections are checked
//! out per query and returned on completion; a broken connection is dropped
//! and replaced lazily on the next checkout.

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use crate::config::DatabaseConfig;

/// Startup-time failure to reach storage.
///
/// Fatal: the server must not accept traffic after this.
#[derive(Debug, thiserror::Error)]
#[error("failed to connect to database '{database}' at {host}:{port}: {source}")]
pub struct ConnectionError {
    pub host: String,
    pub port: u16,
    pub database: String,
    #[source]
    pub source: sqlx::Error,
}

/// Build connect options from discrete settings.
///
/// Credentials are passed as fields, never spliced into a URL.
pub fn connect_options(config: &DatabaseConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.database)
}

/// Create a PostgreSQL connection pool and verify it answers.
///
/// # Errors
///
/// Returns [`ConnectionError`] if no connection can be established or the
/// ping fails.
///
/// # Example
///
/// ```ignore
/// let config = Config::from_env()?;
/// let pool = create_pool(&config.database).await?;
/// ```
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, ConnectionError> {
    let wrap = |source: sqlx::Error| ConnectionError {
        host: config.host.clone(),
        port: config.port,
        database: config.database.clone(),
        source,
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_with(connect_options(config))
        .await
        .map_err(wrap)?;

    ping(&pool).await.map_err(wrap)?;

    tracing::info!(
        host = %config.host,
        database = %config.database,
        max_connections = config.max_connections,
        "Database pool ready"
    );

    Ok(pool)
}

/// Round-trip a trivial query through the pool.
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_config() -> DatabaseConfig {
        DatabaseConfig {
            host: "127.0.0.1".into(),
            // Reserved port; nothing listens here.
            port: 1,
            user: "userbook".into(),
            password: "secret-pw".into(),
            database: "userbook_test".into(),
            max_connections: 2,
            acquire_timeout: Duration::from_millis(500),
        }
    }

    #[test]
    fn connect_options_carry_settings() {
        let opts = connect_options(&test_config());
        assert_eq!(opts.get_host(), "127.0.0.1");
        assert_eq!(opts.get_port(), 1);
        assert_eq!(opts.get_username(), "userbook");
        assert_eq!(opts.get_database(), Some("userbook_test"));
    }

    #[tokio::test]
    async fn unreachable_database_is_connection_error() {
        let err = create_pool(&test_config()).await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("userbook_test"));
        assert!(message.contains("127.0.0.1:1"));
        assert!(!message.contains("secret-pw"));
    }

    // Integration tests require a real database
    // Run with: DATABASE_URL=postgres://... cargo test -p userbook-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn concurrent_pool_access() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = PgPoolOptions::new()
            .max_connections(3)
            .connect(&url)
            .await
            .expect("pool creation failed");

        // More tasks than connections: they queue for checkout rather than fail
        let handles: Vec<_> = (0..10)
            .map(|i| {
                let pool = pool.clone();
                tokio::spawn(async move {
                    let result: (i32,) = sqlx::query_as("SELECT $1::int")
                        .bind(i)
                        .fetch_one(&pool)
                        .await
                        .expect("concurrent query failed");
                    result.0
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.await.expect("task panicked");
            assert_eq!(result, i as i32);
        }
    }
}
