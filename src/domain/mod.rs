//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `intake` - Intake conversation state machine
//!   (categories, flows, validation, prompts)

pub mod foundation;
pub mod intake;
