//! Per-user serialization of intake turns.
//!
//! Each user id maps to an async mutex. A turn holds the guard for its whole
//! load-modify-store cycle, so two messages for the same user never
//! interleave within one process. Entries are removed once nobody holds or
//! waits on them.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::OwnedMutexGuard;

use crate::domain::foundation::UserId;

type LockMap = HashMap<UserId, Arc<tokio::sync::Mutex<()>>>;

/// Registry of per-user locks.
#[derive(Debug, Clone, Default)]
pub struct UserLocks {
    locks: Arc<Mutex<LockMap>>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other turn for `user_id` is in flight.
    pub async fn acquire(&self, user_id: &UserId) -> UserLockGuard {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|p| p.into_inner());
            locks
                .entry(user_id.clone())
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
                .clone()
        };

        let guard = lock.lock_owned().await;
        UserLockGuard {
            user_id: user_id.clone(),
            locks: Arc::clone(&self.locks),
            guard: Some(guard),
        }
    }

    /// Number of users with a live lock entry.
    pub fn active(&self) -> usize {
        self.locks.lock().unwrap_or_else(|p| p.into_inner()).len()
    }
}

/// Held for the duration of one turn.
#[derive(Debug)]
pub struct UserLockGuard {
    user_id: UserId,
    locks: Arc<Mutex<LockMap>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for UserLockGuard {
    fn drop(&mut self) {
        // Release first so a waiter can proceed.
        drop(self.guard.take());

        let mut locks = self.locks.lock().unwrap_or_else(|p| p.into_inner());
        let idle = locks
            .get(&self.user_id)
            .map(|lock| Arc::strong_count(lock) == 1)
            .unwrap_or(false);
        if idle {
            locks.remove(&self.user_id);
        }
    }
}
