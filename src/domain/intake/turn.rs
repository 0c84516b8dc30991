//! One conversational turn: message in, updated session and reply out.
//!
//! This is the whole intake state machine as a pure function. Loading,
//! locking and persisting the session are the caller's job.

use super::{
    next_step, render_prompt, validate, CompletionPolicy, FirstMessagePolicy, InputVerdict,
    IntakeRules, IntakeSession, Step,
};
use super::prompts::{rejection_prompt, CONVERSATION_CLOSED_MESSAGE};

/// What a turn did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// A new session was opened and the message was not consumed.
    Opened,
    /// The answer was accepted and the session moved on.
    Advanced { from: Step, to: Step },
    /// The answer was rejected; the step did not change.
    Rejected { step: Step },
    /// The session is complete and restarts are disabled.
    Closed,
}

/// Result of [`take_turn`].
#[derive(Debug, Clone)]
pub struct Turn {
    pub session: IntakeSession,
    pub reply: String,
    pub outcome: TurnOutcome,
    /// True if `session` was created by this turn.
    pub fresh_session: bool,
}

impl Turn {
    /// Returns true if the session must be written back.
    pub fn needs_persist(&self) -> bool {
        !matches!(self.outcome, TurnOutcome::Closed)
    }
}

/// Applies `message` to `existing` (or a new session) under `rules`.
pub fn take_turn(existing: Option<IntakeSession>, message: &str, rules: &IntakeRules) -> Turn {
    let (mut session, fresh_session) = match existing {
        Some(session) if session.is_completed() => match rules.after_completion {
            CompletionPolicy::Reject => {
                return Turn {
                    session,
                    reply: CONVERSATION_CLOSED_MESSAGE.to_string(),
                    outcome: TurnOutcome::Closed,
                    fresh_session: false,
                };
            }
            CompletionPolicy::Restart => (IntakeSession::new(rules.entry_step()), true),
        },
        Some(session) => (session, false),
        None => (IntakeSession::new(rules.entry_step()), true),
    };

    if fresh_session && rules.first_message == FirstMessagePolicy::Prompt {
        let reply = render_prompt(session.current_step(), session.collected_data());
        return Turn {
            session,
            reply,
            outcome: TurnOutcome::Opened,
            fresh_session,
        };
    }

    let from = session.current_step();
    match validate(from, message, rules) {
        InputVerdict::Rejected => {
            let reply = rejection_prompt(from, session.collected_data());
            Turn {
                session,
                reply,
                outcome: TurnOutcome::Rejected { step: from },
                fresh_session,
            }
        }
        InputVerdict::Accepted(field) => {
            if let Some(field) = field {
                session.record(field);
            }
            let to = match from {
                // No category exists yet, so there is no flow to consult.
                Step::Greeting => Step::CategorySelection,
                _ => next_step(rules, session.collected_data().category(), from),
            };
            session.advance_to(to);
            let reply = render_prompt(to, session.collected_data());
            Turn {
                session,
                reply,
                outcome: TurnOutcome::Advanced { from, to },
                fresh_session,
            }
        }
    }
}
