//! ResetIntakeSessionHandler - Command handler that discards a conversation.

use std::sync::Arc;

use crate::application::UserLocks;
use crate::domain::foundation::UserId;
use crate::ports::SessionStore;

use super::IntakeError;

/// Command to delete a user's session.
#[derive(Debug, Clone)]
pub struct ResetIntakeSessionCommand {
    pub user_id: UserId,
}

/// Handler for deleting sessions. Waits for any in-flight turn to finish.
pub struct ResetIntakeSessionHandler {
    store: Arc<dyn SessionStore>,
    locks: UserLocks,
}

impl ResetIntakeSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>, locks: UserLocks) -> Self {
        Self { store, locks }
    }

    pub async fn handle(&self, cmd: ResetIntakeSessionCommand) -> Result<(), IntakeError> {
        let _guard = self.locks.acquire(&cmd.user_id).await;

        if !self.store.remove(&cmd.user_id).await? {
            return Err(IntakeError::not_found(cmd.user_id));
        }

        tracing::info!(user_id = %cmd.user_id, "intake session reset");
        Ok(())
    }
}
