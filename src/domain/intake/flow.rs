//! Flow table - the ordered steps each category's conversation passes through.
//!
//! # Flows (without the greeting pre-step)
//!
//! | Category        | Steps                                                        |
//! |-----------------|--------------------------------------------------------------|
//! | Booking Changes | category, name, email, destination, dates, confirm, done     |
//! | Air Travel      | category, name, email, destination, dates, tickets, confirm, done |
//! | Packages        | same as Air Travel                                           |
//! | Student Inquiry | category, name, email, destination, done                     |
//! | Promotions      | category, email, done                                        |
//! | Complaint       | category, name, email, done                                  |
//!
//! With the greeting pre-step enabled every flow starts with `Greeting`.

use super::{Category, Step};

const BOOKING_CHANGES: &[Step] = &[
    Step::CategorySelection,
    Step::Name,
    Step::Email,
    Step::Destination,
    Step::Dates,
    Step::Confirmation,
    Step::Completed,
];

const TICKETED_TRAVEL: &[Step] = &[
    Step::CategorySelection,
    Step::Name,
    Step::Email,
    Step::Destination,
    Step::Dates,
    Step::TicketCount,
    Step::Confirmation,
    Step::Completed,
];

const STUDENT_INQUIRY: &[Step] = &[
    Step::CategorySelection,
    Step::Name,
    Step::Email,
    Step::Destination,
    Step::Completed,
];

const PROMOTIONS: &[Step] = &[Step::CategorySelection, Step::Email, Step::Completed];

const COMPLAINT: &[Step] = &[
    Step::CategorySelection,
    Step::Name,
    Step::Email,
    Step::Completed,
];

/// Ordered steps for one category.
///
/// Backed by constant tables; the optional greeting is prepended virtually
/// so both variants share one definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flow {
    greeting: bool,
    body: &'static [Step],
}

impl Flow {
    /// Returns the flow for `category`, optionally prefixed with a greeting.
    pub fn for_category(category: Category, greeting: bool) -> Self {
        let body = match category {
            Category::BookingChanges => BOOKING_CHANGES,
            Category::AirTravel | Category::Packages => TICKETED_TRAVEL,
            Category::StudentInquiry => STUDENT_INQUIRY,
            Category::Promotions => PROMOTIONS,
            Category::Complaint => COMPLAINT,
        };
        Self { greeting, body }
    }

    /// Step at position `index`, if any.
    pub fn get(&self, index: usize) -> Option<Step> {
        if self.greeting {
            match index {
                0 => Some(Step::Greeting),
                i => self.body.get(i - 1).copied(),
            }
        } else {
            self.body.get(index).copied()
        }
    }

    /// The entry step.
    pub fn first(&self) -> Step {
        if self.greeting {
            Step::Greeting
        } else {
            self.body[0]
        }
    }

    /// 0-based position of `step` in this flow.
    pub fn position(&self, step: Step) -> Option<usize> {
        self.steps().position(|s| s == step)
    }

    /// Iterates the steps in order.
    pub fn steps(&self) -> impl Iterator<Item = Step> + '_ {
        self.greeting
            .then_some(Step::Greeting)
            .into_iter()
            .chain(self.body.iter().copied())
    }
}

#[cfg(test)]
impl Flow {
    /// Number of steps, including the entry step and `Completed`.
    pub fn len(&self) -> usize {
        self.body.len() + usize::from(self.greeting)
    }

    /// The final step (always `Completed`).
    pub fn last(&self) -> Step {
        self.body[self.body.len() - 1]
    }

    pub fn contains(&self, step: Step) -> bool {
        self.position(step).is_some()
    }

    pub fn to_vec(&self) -> Vec<Step> {
        self.steps().collect()
    }
}

/// Returns the flow for `category` under the default (no greeting) variant.
pub fn flow_for(category: Category) -> Flow {
    Flow::for_category(category, false)
}
