//! GetIntakeSessionHandler - Query handler for the stored conversation state.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::intake::IntakeSession;
use crate::ports::SessionStore;

use super::IntakeError;

/// Query for one user's session.
#[derive(Debug, Clone)]
pub struct GetIntakeSessionQuery {
    pub user_id: UserId,
}

/// Handler for reading a session without changing it.
pub struct GetIntakeSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl GetIntakeSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetIntakeSessionQuery) -> Result<IntakeSession, IntakeError> {
        self.store
            .get(&query.user_id)
            .await?
            .ok_or_else(|| IntakeError::not_found(query.user_id))
    }
}
