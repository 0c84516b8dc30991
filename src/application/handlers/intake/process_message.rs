//! ProcessMessageHandler - Command handler for one inbound chat message.

use std::sync::Arc;

use crate::application::UserLocks;
use crate::domain::foundation::UserId;
use crate::domain::intake::{take_turn, CollectedData, IntakeRules, Step, TurnOutcome};
use crate::ports::SessionStore;

use super::IntakeError;

/// Command to process one message from a user.
#[derive(Debug, Clone)]
pub struct ProcessMessageCommand {
    pub user_id: UserId,
    pub message: String,
}

impl ProcessMessageCommand {
    /// Builds a command, rejecting an empty user id.
    pub fn new(user_id: impl Into<String>, message: impl Into<String>) -> Result<Self, IntakeError> {
        Ok(Self {
            user_id: UserId::new(user_id)?,
            message: message.into(),
        })
    }
}

/// Reply produced for one message.
#[derive(Debug, Clone)]
pub struct ProcessMessageResult {
    pub message: String,
    pub current_step: Step,
    pub collected_data: CollectedData,
    pub outcome: TurnOutcome,
}

/// Handler that runs one conversational turn against the session store.
pub struct ProcessMessageHandler {
    store: Arc<dyn SessionStore>,
    locks: UserLocks,
    rules: IntakeRules,
}

impl ProcessMessageHandler {
    pub fn new(store: Arc<dyn SessionStore>, locks: UserLocks, rules: IntakeRules) -> Self {
        Self { store, locks, rules }
    }

    pub async fn handle(&self, cmd: ProcessMessageCommand) -> Result<ProcessMessageResult, IntakeError> {
        let _guard = self.locks.acquire(&cmd.user_id).await;

        let existing = self.store.get(&cmd.user_id).await.map_err(|e| {
            tracing::error!(user_id = %cmd.user_id, error = %e, "failed to load intake session");
            e
        })?;

        let turn = take_turn(existing, &cmd.message, &self.rules);

        if turn.fresh_session {
            tracing::info!(
                user_id = %cmd.user_id,
                step = %turn.session.current_step(),
                "intake session started"
            );
        }
        match turn.outcome {
            TurnOutcome::Advanced { from, to } => {
                tracing::debug!(user_id = %cmd.user_id, %from, %to, "intake step advanced");
            }
            TurnOutcome::Rejected { step } => {
                tracing::debug!(user_id = %cmd.user_id, %step, "intake answer rejected");
            }
            TurnOutcome::Closed => {
                tracing::debug!(user_id = %cmd.user_id, "message after completion ignored");
            }
            TurnOutcome::Opened => {}
        }

        if turn.needs_persist() {
            self.store
                .put(&cmd.user_id, &turn.session)
                .await
                .map_err(|e| {
                    tracing::error!(user_id = %cmd.user_id, error = %e, "failed to save intake session");
                    e
                })?;
        }

        Ok(ProcessMessageResult {
            message: turn.reply,
            current_step: turn.session.current_step(),
            collected_data: turn.session.collected_data().clone(),
            outcome: turn.outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::intake::{Category, CompletionPolicy, IntakeSession};
    use crate::ports::SessionStoreError;
    use async_trait::async_trait;

    struct FailingStore;

    #[async_trait]
    impl SessionStore for FailingStore {
        async fn get(&self, _user_id: &UserId) -> Result<Option<IntakeSession>, SessionStoreError> {
            Err(SessionStoreError::Unavailable("connection refused".to_string()))
        }

        async fn put(&self, _user_id: &UserId, _session: &IntakeSession) -> Result<(), SessionStoreError> {
            Err(SessionStoreError::Unavailable("connection refused".to_string()))
        }

        async fn remove(&self, _user_id: &UserId) -> Result<bool, SessionStoreError> {
            Ok(false)
        }
    }

    fn handler_with(store: Arc<dyn SessionStore>, rules: IntakeRules) -> ProcessMessageHandler {
        ProcessMessageHandler::new(store, UserLocks::new(), rules)
    }

    fn command(user: &str, message: &str) -> ProcessMessageCommand {
        ProcessMessageCommand::new(user, message).unwrap()
    }

    #[test]
    fn command_rejects_empty_user_id() {
        let result = ProcessMessageCommand::new("", "hi");
        assert!(matches!(result, Err(IntakeError::InvalidUserId(_))));
    }

    #[tokio::test]
    async fn first_message_creates_and_saves_session() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = handler_with(store.clone(), IntakeRules::default());

        let result = handler.handle(command("u1", "Air Travel")).await.unwrap();

        assert_eq!(result.current_step, Step::Name);
        assert_eq!(result.collected_data.category(), Some(Category::AirTravel));

        let user = UserId::new("u1").unwrap();
        let saved = store.get(&user).await.unwrap().unwrap();
        assert_eq!(saved.current_step(), Step::Name);
    }

    #[tokio::test]
    async fn consecutive_messages_continue_the_conversation() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = handler_with(store, IntakeRules::default());

        handler.handle(command("u1", "Complaint")).await.unwrap();
        handler.handle(command("u1", "Jane Roe")).await.unwrap();
        let result = handler.handle(command("u1", "jane@example.com")).await.unwrap();

        assert_eq!(result.current_step, Step::Completed);
        assert_eq!(
            result.message,
            "We've received your complaint and will contact you soon to resolve the issue."
        );
    }

    #[tokio::test]
    async fn closed_session_is_not_rewritten() {
        let store = Arc::new(InMemorySessionStore::new());
        let rules = IntakeRules {
            after_completion: CompletionPolicy::Reject,
            ..Default::default()
        };
        let handler = handler_with(store.clone(), rules);

        handler.handle(command("u1", "Promotions")).await.unwrap();
        handler.handle(command("u1", "x@y.com")).await.unwrap();
        let result = handler.handle(command("u1", "Air Travel")).await.unwrap();

        assert_eq!(result.outcome, TurnOutcome::Closed);
        assert_eq!(result.current_step, Step::Completed);
        assert_eq!(result.collected_data.category(), Some(Category::Promotions));
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_error() {
        let handler = handler_with(Arc::new(FailingStore), IntakeRules::default());

        let result = handler.handle(command("u1", "Air Travel")).await;

        assert!(matches!(
            result,
            Err(IntakeError::Store(SessionStoreError::Unavailable(_)))
        ));
    }

    #[tokio::test]
    async fn concurrent_messages_for_one_user_are_serialized() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = Arc::new(handler_with(store.clone(), IntakeRules::default()));

        handler.handle(command("u1", "Air Travel")).await.unwrap();

        let a = {
            let handler = handler.clone();
            tokio::spawn(async move { handler.handle(command("u1", "John Doe")).await })
        };
        let b = {
            let handler = handler.clone();
            tokio::spawn(async move { handler.handle(command("u1", "john@example.com")).await })
        };
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        let saved = store.get(&UserId::new("u1").unwrap()).await.unwrap().unwrap();
        // An email at the name step is rejected, so the order decides how far
        // the session got. Neither answer may be lost to an overwrite.
        assert!(matches!(saved.current_step(), Step::Email | Step::Destination));
        assert_eq!(saved.collected_data().name(), Some("John Doe"));
    }
}
