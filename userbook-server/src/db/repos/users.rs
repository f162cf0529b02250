//! User repository
//!
//! Two statements, both parameterized:
//! - list: plain SELECT, storage-native order
//! - create: INSERT ... RETURNING id

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{NewUser, User};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Storage for user records.
///
/// Implementations must be safe to share across request tasks.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All stored users. Order is whatever the store yields and is not stable.
    async fn list(&self) -> Result<Vec<User>, DbError>;

    /// Insert a validated user, returning the id assigned by the store.
    async fn create(&self, user: NewUser) -> Result<i64, DbError>;
}

/// Postgres-backed user repository
#[derive(Debug, Clone)]
pub struct PgUserRepo {
    pool: PgPool,
}

impl PgUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserRepo {
    async fn list(&self) -> Result<Vec<User>, DbError> {
        let users = sqlx::query_as::<_, User>("SELECT id, name, email FROM users")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn create(&self, user: NewUser) -> Result<i64, DbError> {
        let (id,): (i64,) =
            sqlx::query_as("INSERT INTO users (name, email) VALUES ($1, $2) RETURNING id")
                .bind(user.name())
                .bind(user.email())
                .fetch_one(&self.pool)
                .await?;
        Ok(id)
    }
}
