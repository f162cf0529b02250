//! In-process user store
//!
//! Mirrors the Postgres repository's contract (ids assigned once, starting
//! at 1, never reused) and records how often each operation ran.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::users::{DbError, UserStore};
use crate::models::{NewUser, User};

#[derive(Debug, Default)]
struct Rows {
    next_id: i64,
    users: Vec<User>,
}

/// Mutex-guarded vector of users
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    rows: Mutex<Rows>,
    failing: AtomicBool,
    list_calls: AtomicUsize,
    create_calls: AtomicUsize,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of `list` calls so far, including failed ones.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Number of `create` calls so far, including failed ones.
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Snapshot of the stored rows.
    pub fn users(&self) -> Vec<User> {
        self.lock().users.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Rows> {
        // A panic while holding the lock leaves the rows intact.
        self.rows.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_available(&self) -> Result<(), DbError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DbError::Unavailable("memory store set to fail".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list(&self) -> Result<Vec<User>, DbError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self.users())
    }

    async fn create(&self, user: NewUser) -> Result<i64, DbError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let mut rows = self.lock();
        rows.next_id += 1;
        let id = rows.next_id;
        rows.users.push(user.into_user(id));
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn assigns_increasing_ids() {
        let store = MemoryUserStore::new();
        let a = store
            .create(NewUser::new("A", "a@example.com").unwrap())
            .await
            .unwrap();
        let b = store
            .create(NewUser::new("B", "b@example.com").unwrap())
            .await
            .unwrap();
        assert_eq!((a, b), (1, 2));
        assert_eq!(store.list().await.unwrap().len(), 2);
        assert_eq!(store.create_calls(), 2);
        assert_eq!(store.list_calls(), 1);
    }

    #[tokio::test]
    async fn failing_store_keeps_rows() {
        let store = MemoryUserStore::new();
        store
            .create(NewUser::new("A", "a@example.com").unwrap())
            .await
            .unwrap();

        store.set_failing(true);
        assert!(matches!(store.list().await, Err(DbError::Unavailable(_))));
        assert!(store
            .create(NewUser::new("B", "b@example.com").unwrap())
            .await
            .is_err());

        store.set_failing(false);
        assert_eq!(store.users().len(), 1);
    }
}
