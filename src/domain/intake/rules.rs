//! Knobs that select between the supported conversation variants.

use serde::Deserialize;

use super::{Category, Flow, Step};

/// What happens to the very first message from an unknown user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirstMessagePolicy {
    /// The first message is the answer to the entry step.
    #[default]
    Answer,
    /// The first message only opens the session; the entry prompt is returned.
    Prompt,
}

/// What happens to a message that arrives after the conversation completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionPolicy {
    /// Discard the finished session and start over with this message.
    #[default]
    Restart,
    /// Keep the finished session and tell the user it is closed.
    Reject,
}

/// Conversation rules shared by the flow table, validation and orchestration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntakeRules {
    /// Prefix every flow with a [`Step::Greeting`] pre-step.
    pub greeting_step: bool,
    /// Refuse names containing `@`, `.com`, `.net` or `.org`.
    pub reject_email_like_names: bool,
    pub first_message: FirstMessagePolicy,
    pub after_completion: CompletionPolicy,
}

impl Default for IntakeRules {
    fn default() -> Self {
        Self {
            greeting_step: false,
            reject_email_like_names: true,
            first_message: FirstMessagePolicy::default(),
            after_completion: CompletionPolicy::default(),
        }
    }
}

impl IntakeRules {
    /// The step every new conversation starts at.
    pub fn entry_step(&self) -> Step {
        if self.greeting_step {
            Step::Greeting
        } else {
            Step::CategorySelection
        }
    }

    /// The flow for `category` under these rules.
    pub fn flow_for(&self, category: Category) -> Flow {
        Flow::for_category(category, self.greeting_step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_api_variant() {
        let rules = IntakeRules::default();
        assert!(!rules.greeting_step);
        assert!(rules.reject_email_like_names);
        assert_eq!(rules.first_message, FirstMessagePolicy::Answer);
        assert_eq!(rules.after_completion, CompletionPolicy::Restart);
    }

    #[test]
    fn entry_step_follows_greeting_flag() {
        let rules = IntakeRules::default();
        assert_eq!(rules.entry_step(), Step::CategorySelection);

        let rules = IntakeRules {
            greeting_step: true,
            ..Default::default()
        };
        assert_eq!(rules.entry_step(), Step::Greeting);
    }

    #[test]
    fn policies_deserialize_from_lowercase() {
        let policy: FirstMessagePolicy = serde_json::from_str("\"prompt\"").unwrap();
        assert_eq!(policy, FirstMessagePolicy::Prompt);

        let policy: CompletionPolicy = serde_json::from_str("\"reject\"").unwrap();
        assert_eq!(policy, CompletionPolicy::Reject);
    }
}
