//! Per-user conversation state.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::{CollectedData, ExtractedField, Step};

/// One user's intake conversation: where it is and what has been answered.
///
/// The session does not know its own user id; stores key it externally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeSession {
    current_step: Step,
    #[serde(default)]
    collected_data: CollectedData,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl IntakeSession {
    /// Creates an empty session positioned at `entry`.
    pub fn new(entry: Step) -> Self {
        let now = Timestamp::now();
        Self {
            current_step: entry,
            collected_data: CollectedData::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuilds a session from stored parts.
    pub fn reconstitute(
        current_step: Step,
        collected_data: CollectedData,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            current_step,
            collected_data,
            created_at,
            updated_at,
        }
    }

    pub fn current_step(&self) -> Step {
        self.current_step
    }

    pub fn collected_data(&self) -> &CollectedData {
        &self.collected_data
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn is_completed(&self) -> bool {
        self.current_step.is_terminal()
    }

    /// Merges an accepted answer. Returns false if the answer was ignored.
    pub fn record(&mut self, field: ExtractedField) -> bool {
        let merged = self.collected_data.merge(field);
        if merged {
            self.touch();
        }
        merged
    }

    /// Moves to `step`.
    pub fn advance_to(&mut self, step: Step) {
        self.current_step = step;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
