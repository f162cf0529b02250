//! Database layer - connection pool and repositories
//!
//! # Design Principles
//!
//! - Bounded connection pool - no shared single connection
//! - Parameterized statements only - request input never lands in query text
//! - One statement per operation, no transactions needed

pub mod pool;
pub mod repos;

pub use pool::{create_pool, ping, ConnectionError};
pub use repos::*;
