//! Conversation steps.
//!
//! A step is one question in the intake conversation. Steps have no global
//! order; their sequence is defined per category by [`Flow`](super::Flow).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// The question the desk is currently waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    /// Optional pre-step that says hello before offering categories.
    #[serde(rename = "greeting")]
    Greeting,

    /// Waiting for one of the six category names.
    #[serde(rename = "get_category")]
    CategorySelection,

    #[serde(rename = "get_name")]
    Name,

    #[serde(rename = "get_email")]
    Email,

    #[serde(rename = "get_destination")]
    Destination,

    #[serde(rename = "get_dates")]
    Dates,

    #[serde(rename = "get_tickets_count")]
    TicketCount,

    /// Showing the booking summary and waiting for yes/no.
    #[serde(rename = "confirm_booking")]
    Confirmation,

    /// Terminal step; nothing further is asked.
    #[serde(rename = "completed")]
    Completed,
}

impl Step {
    /// Every step, in the order they can appear in the longest flow.
    pub const ALL: [Step; 9] = [
        Step::Greeting,
        Step::CategorySelection,
        Step::Name,
        Step::Email,
        Step::Destination,
        Step::Dates,
        Step::TicketCount,
        Step::Confirmation,
        Step::Completed,
    ];

    /// Wire name used in API payloads and storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Greeting => "greeting",
            Step::CategorySelection => "get_category",
            Step::Name => "get_name",
            Step::Email => "get_email",
            Step::Destination => "get_destination",
            Step::Dates => "get_dates",
            Step::TicketCount => "get_tickets_count",
            Step::Confirmation => "confirm_booking",
            Step::Completed => "completed",
        }
    }

    /// Returns true for the step that ends a conversation.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Step::Completed)
    }

    /// Returns true if an incoming message at this step is checked against
    /// the per-step validation rules.
    pub fn validates_input(&self) -> bool {
        !matches!(self, Step::Greeting | Step::Completed)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Step {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|step| step.as_str() == s)
            .ok_or_else(|| ValidationError::invalid_format("step", format!("unknown step '{}'", s)))
    }
}
