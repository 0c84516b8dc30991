//! Intake conversation - categories, flows, validation and prompts.
//!
//! Everything here is synchronous and free of I/O. A conversation is driven
//! one message at a time through [`take_turn`], which validates the message
//! for the current [`Step`], merges the answer into [`CollectedData`],
//! picks the next step from the category's [`Flow`] and renders the reply.

mod category;
mod collected;
mod flow;
mod navigation;
pub mod prompts;
mod rules;
mod session;
mod step;
mod turn;
mod validation;

pub use category::{Category, UnknownCategory};
pub use collected::{CollectedData, ExtractedField};
pub use flow::{flow_for, Flow};
pub use navigation::next_step;
pub use prompts::{rejection_prompt, render_prompt};
pub use rules::{CompletionPolicy, FirstMessagePolicy, IntakeRules};
pub use session::IntakeSession;
pub use step::Step;
pub use turn::{take_turn, Turn, TurnOutcome};
pub use validation::{validate, InputVerdict};
