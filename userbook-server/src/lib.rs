//! userbook-server: user record submission and listing over HTTP
//!
//! Accepts `(name, email)` records from a small web form or API client,
//! persists them to a single Postgres table and lists them back.
//!
//! Layers, leaf-first:
//! - [`config`] - explicit configuration assembled once at startup
//! - [`db`] - connection pool and the user repository
//! - [`models`] - validated domain types
//! - [`http`] - axum router, handlers and error mapping

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{Config, ConfigError, DatabaseConfig, HttpConfig};
pub use db::{create_pool, ConnectionError, DbError, MemoryUserStore, PgUserRepo, UserStore};
pub use http::{build_router, run_server, ApiError, AppState, ServerError};
pub use models::{NewUser, User, ValidationError};
