//! Repository implementations for database access
//!
//! Handlers talk to storage through the [`UserStore`] trait:
//! - [`PgUserRepo`] - Postgres, used by the running server
//! - [`MemoryUserStore`] - in-process, used by tests

pub mod memory;
pub mod users;

pub use memory::MemoryUserStore;
pub use users::{DbError, PgUserRepo, UserStore};
