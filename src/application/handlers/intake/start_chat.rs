//! StartChatHandler - Command handler that opens a conversation for a new user.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::intake::{render_prompt, IntakeRules, IntakeSession, Step};
use crate::ports::SessionStore;

use super::IntakeError;

/// Result of opening a new conversation.
#[derive(Debug, Clone)]
pub struct StartChatResult {
    pub user_id: UserId,
    pub message: String,
    pub current_step: Step,
}

/// Handler that mints a user id and stores an empty session at the entry step.
pub struct StartChatHandler {
    store: Arc<dyn SessionStore>,
    rules: IntakeRules,
}

impl StartChatHandler {
    pub fn new(store: Arc<dyn SessionStore>, rules: IntakeRules) -> Self {
        Self { store, rules }
    }

    pub async fn handle(&self) -> Result<StartChatResult, IntakeError> {
        let user_id = UserId::generate();
        let session = IntakeSession::new(self.rules.entry_step());

        self.store.put(&user_id, &session).await?;
        tracing::info!(%user_id, step = %session.current_step(), "intake session started");

        Ok(StartChatResult {
            message: render_prompt(session.current_step(), session.collected_data()),
            current_step: session.current_step(),
            user_id,
        })
    }
}
