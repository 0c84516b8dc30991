//! Conversation configuration

use serde::Deserialize;

use crate::domain::intake::{CompletionPolicy, FirstMessagePolicy, IntakeRules};

/// Selects between the supported conversation variants
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationConfig {
    /// Open every conversation with a greeting step before the category menu
    #[serde(default)]
    pub greeting_step: bool,

    /// Refuse names that look like email addresses
    #[serde(default = "default_true")]
    pub reject_email_like_names: bool,

    /// `answer` treats the first message as an answer, `prompt` only opens the session
    #[serde(default)]
    pub first_message: FirstMessagePolicy,

    /// `restart` starts over after completion, `reject` keeps the finished session
    #[serde(default)]
    pub after_completion: CompletionPolicy,
}

impl ConversationConfig {
    /// Rules handed to the intake engine
    pub fn rules(&self) -> IntakeRules {
        IntakeRules {
            greeting_step: self.greeting_step,
            reject_email_like_names: self.reject_email_like_names,
            first_message: self.first_message,
            after_completion: self.after_completion,
        }
    }
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            greeting_step: false,
            reject_email_like_names: default_true(),
            first_message: FirstMessagePolicy::default(),
            after_completion: CompletionPolicy::default(),
        }
    }
}

fn default_true() -> bool {
    true
}
