//! Process configuration
//!
//! Everything the server needs is read once at startup into [`Config`] and
//! handed to components explicitly. Request handlers never look at the
//! process environment.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

/// Default Postgres port when `DB_PORT` is unset.
const DEFAULT_DB_PORT: u16 = 5432;

/// Default pool size. Kept low; every request holds a connection for a single statement.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default time a request waits for a free pooled connection.
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// Configuration error raised while assembling [`Config`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("required environment variable {var} is not set")]
    Missing { var: &'static str },

    #[error("environment variable {var} has invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Database connection settings
#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}

/// HTTP listener settings
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Address to bind to (`BIND_HOST`:`PORT`)
    pub bind_addr: SocketAddr,

    /// Allow permissive CORS (default: false = localhost only)
    pub cors_permissive: bool,
}

/// Complete service configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub http: HttpConfig,
}

impl Config {
    /// Assemble configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Assemble configuration from an arbitrary key lookup.
    ///
    /// Required: `DB_HOST`, `DB_USER`, `DB_PASSWORD`, `DB_NAME`, `PORT`.
    /// Optional: `DB_PORT`, `DB_MAX_CONNECTIONS`, `DB_ACQUIRE_TIMEOUT_SECS`,
    /// `BIND_HOST`, `CORS_PERMISSIVE`.
    ///
    /// Empty values count as missing, so a blank `DB_PASSWORD=` fails here
    /// instead of connecting with empty credentials.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let database = DatabaseConfig {
            host: env.required("DB_HOST")?,
            port: env.parsed_or("DB_PORT", DEFAULT_DB_PORT)?,
            user: env.required("DB_USER")?,
            password: env.required("DB_PASSWORD")?,
            database: env.required("DB_NAME")?,
            max_connections: env.parsed_or("DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            acquire_timeout: Duration::from_secs(
                env.parsed_or("DB_ACQUIRE_TIMEOUT_SECS", DEFAULT_ACQUIRE_TIMEOUT_SECS)?,
            ),
        };

        if database.max_connections == 0 {
            return Err(ConfigError::Invalid {
                var: "DB_MAX_CONNECTIONS",
                value: "0".to_string(),
                reason: "pool needs at least one connection".to_string(),
            });
        }

        let port: u16 = env.required_parsed("PORT")?;
        let host: IpAddr = env.parsed_or("BIND_HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED))?;
        let http = HttpConfig {
            bind_addr: SocketAddr::new(host, port),
            cors_permissive: env.flag("CORS_PERMISSIVE")?,
        };

        Ok(Self { database, http })
    }
}

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, var: &'static str) -> Option<String> {
        (self.0)(var).filter(|v| !v.is_empty())
    }

    fn required(&self, var: &'static str) -> Result<String, ConfigError> {
        self.get(var).ok_or(ConfigError::Missing { var })
    }

    fn required_parsed<T>(&self, var: &'static str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let value = self.required(var)?;
        parse(var, value)
    }

    fn parsed_or<T>(&self, var: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        match self.get(var) {
            Some(value) => parse(var, value),
            None => Ok(default),
        }
    }

    fn flag(&self, var: &'static str) -> Result<bool, ConfigError> {
        match self.get(var).as_deref() {
            None | Some("0") | Some("false") => Ok(false),
            Some("1") | Some("true") => Ok(true),
            Some(other) => Err(ConfigError::Invalid {
                var,
                value: other.to_string(),
                reason: "expected true/false or 1/0".to_string(),
            }),
        }
    }
}

fn parse<T>(var: &'static str, value: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match value.parse() {
        Ok(parsed) => Ok(parsed),
        Err(e) => Err(ConfigError::Invalid {
            var,
            reason: e.to_string(),
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn full_env() -> HashMap<&'static str, String> {
        [
            ("DB_HOST", "db.internal"),
            ("DB_USER", "userbook"),
            ("DB_PASSWORD", "hunter2"),
            ("DB_NAME", "userbook_app"),
            ("PORT", "3000"),
        ]
        .into_iter()
        .map(|(k, v)| (k, v.to_string()))
        .collect()
    }

    fn load(env: &HashMap<&'static str, String>) -> Result<Config, ConfigError> {
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_fill_optional_values() {
        let config = load(&full_env()).unwrap();
        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.database.acquire_timeout, Duration::from_secs(5));
        assert_eq!(config.http.bind_addr, "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
        assert!(!config.http.cors_permissive);
    }

    #[test]
    fn each_required_variable_fails_fast() {
        for var in ["DB_HOST", "DB_USER", "DB_PASSWORD", "DB_NAME", "PORT"] {
            let mut env = full_env();
            env.remove(var);
            let err = load(&env).unwrap_err();
            assert!(
                matches!(err, ConfigError::Missing { var: v } if v == var),
                "expected Missing({var}), got {err:?}"
            );
        }
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let mut env = full_env();
        env.insert("DB_PASSWORD", String::new());
        let err = load(&env).unwrap_err();
        assert_eq!(
            err.to_string(),
            "required environment variable DB_PASSWORD is not set"
        );
    }

    #[test]
    fn rejects_unparsable_port() {
        let mut env = full_env();
        env.insert("PORT", "eighty".to_string());
        let err = load(&env).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "PORT", .. }));
    }

    #[test]
    fn rejects_zero_pool_size() {
        let mut env = full_env();
        env.insert("DB_MAX_CONNECTIONS", "0".to_string());
        let err = load(&env).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                var: "DB_MAX_CONNECTIONS",
                ..
            }
        ));
    }

    #[test]
    fn optional_overrides() {
        let mut env = full_env();
        env.insert("DB_PORT", "6543".to_string());
        env.insert("BIND_HOST", "127.0.0.1".to_string());
        env.insert("CORS_PERMISSIVE", "true".to_string());
        let config = load(&env).unwrap();
        assert_eq!(config.database.port, 6543);
        assert_eq!(config.http.bind_addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert!(config.http.cors_permissive);
    }

    #[test]
    fn debug_redacts_password() {
        let config = load(&full_env()).unwrap();
        let rendered = format!("{:?}", config.database);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
