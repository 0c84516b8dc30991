//! Per-step input validation and extraction.
//!
//! Every rule is a plain string check on the raw message. Nothing is trimmed
//! or normalised except where a rule says so (confirmation is lowercased).

use super::{Category, ExtractedField, IntakeRules, Step};

/// Substrings that mark a "name" as a pasted email address.
const EMAIL_MARKERS: [&str; 4] = ["@", ".com", ".net", ".org"];

const AFFIRMATIVE: [&str; 4] = ["yes", "confirm", "ok", "sure"];
const NEGATIVE: [&str; 2] = ["no", "cancel"];

/// Outcome of checking one message against the current step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputVerdict {
    /// The message answers the step. Steps that collect nothing (greeting,
    /// completed) accept with `None`.
    Accepted(Option<ExtractedField>),
    /// Ask the same question again.
    Rejected,
}

#[cfg(test)]
impl InputVerdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, InputVerdict::Accepted(_))
    }

    /// The extracted field, if the message was accepted and collected one.
    pub fn into_field(self) -> Option<ExtractedField> {
        match self {
            InputVerdict::Accepted(field) => field,
            InputVerdict::Rejected => None,
        }
    }
}

/// Checks `raw` against the rule for `step` and extracts its answer.
pub fn validate(step: Step, raw: &str, rules: &IntakeRules) -> InputVerdict {
    match step {
        Step::CategorySelection => match Category::from_display_name(raw) {
            Some(category) => accept(ExtractedField::Category(category)),
            None => InputVerdict::Rejected,
        },
        Step::Name => {
            let looks_like_email =
                rules.reject_email_like_names && EMAIL_MARKERS.iter().any(|m| raw.contains(m));
            if longer_than_one_char(raw) && !looks_like_email {
                accept(ExtractedField::Name(raw.to_string()))
            } else {
                InputVerdict::Rejected
            }
        }
        Step::Email => {
            if raw.contains('@') && raw.contains('.') {
                accept(ExtractedField::Email(raw.to_string()))
            } else {
                InputVerdict::Rejected
            }
        }
        Step::Destination => {
            if longer_than_one_char(raw) {
                accept(ExtractedField::Destination(raw.to_string()))
            } else {
                InputVerdict::Rejected
            }
        }
        Step::Dates => accept(ExtractedField::TravelDates(raw.to_string())),
        Step::TicketCount => match raw.parse::<i64>() {
            Ok(count) => accept(ExtractedField::TicketsCount(count)),
            Err(_) => InputVerdict::Rejected,
        },
        Step::Confirmation => {
            let answer = raw.to_lowercase();
            if AFFIRMATIVE.contains(&answer.as_str()) {
                accept(ExtractedField::Confirmed(true))
            } else if NEGATIVE.contains(&answer.as_str()) {
                accept(ExtractedField::Confirmed(false))
            } else {
                InputVerdict::Rejected
            }
        }
        Step::Greeting | Step::Completed => InputVerdict::Accepted(None),
    }
}

fn accept(field: ExtractedField) -> InputVerdict {
    InputVerdict::Accepted(Some(field))
}

fn longer_than_one_char(raw: &str) -> bool {
    raw.chars().nth(1).is_some()
}
