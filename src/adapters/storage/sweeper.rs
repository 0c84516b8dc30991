//! Background expiry sweeper for session stores.
//!
//! Periodically calls [`SessionStore::purge_expired`] until shutdown is
//! signalled. Stores that expire on their own (Redis) report zero and the
//! sweep is a no-op.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time;

use crate::ports::{SessionStore, SessionStoreError};

/// Background service that purges expired sessions.
pub struct SessionSweeper {
    store: Arc<dyn SessionStore>,
    interval: Duration,
}

impl SessionSweeper {
    pub fn new(store: Arc<dyn SessionStore>, interval: Duration) -> Self {
        Self { store, interval }
    }

    /// Run the sweep loop until `shutdown` flips to true.
    ///
    /// Sweep failures are logged and retried on the next tick.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.interval);
        interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::debug!("session sweeper stopping");
                        return;
                    }
                }
                _ = interval.tick() => {
                    if let Err(e) = self.sweep_once().await {
                        tracing::warn!(error = %e, "session sweep failed");
                    }
                }
            }
        }
    }

    /// Run exactly one sweep.
    pub async fn sweep_once(&self) -> Result<u64, SessionStoreError> {
        let purged = self.store.purge_expired().await?;
        if purged > 0 {
            tracing::info!(purged, "purged expired sessions");
        }
        Ok(purged)
    }
}

/// Spawn a [`SessionSweeper`] on the current runtime.
pub fn spawn_expiry_sweeper(
    store: Arc<dyn SessionStore>,
    interval: Duration,
    shutdown: watch::Receiver<bool>,
) -> tokio::task::JoinHandle<()> {
    let sweeper = SessionSweeper::new(store, interval);
    tokio::spawn(async move { sweeper.run(shutdown).await })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::foundation::UserId;
    use crate::domain::intake::{IntakeSession, Step};

    #[tokio::test]
    async fn sweep_once_purges_expired_sessions() {
        let store = Arc::new(InMemorySessionStore::with_ttl(Duration::ZERO));
        let user = UserId::new("u1").unwrap();
        store
            .put(&user, &IntakeSession::new(Step::CategorySelection))
            .await
            .unwrap();

        let sweeper = SessionSweeper::new(store.clone(), Duration::from_secs(60));
        assert_eq!(sweeper.sweep_once().await.unwrap(), 1);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn run_stops_on_shutdown_signal() {
        let store = Arc::new(InMemorySessionStore::new());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = spawn_expiry_sweeper(store, Duration::from_millis(10), shutdown_rx);

        tokio::time::sleep(Duration::from_millis(30)).await;
        shutdown_tx.send(true).unwrap();

        let result = tokio::time::timeout(Duration::from_secs(1), handle).await;
        assert!(result.is_ok());
    }
}
