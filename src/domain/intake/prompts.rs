//! Reply text for each step.

use super::{Category, CollectedData, Step};

/// Prefix added to the current prompt when an answer is rejected.
pub const APOLOGY_PREFIX: &str = "Sorry, that doesn't seem right. ";

/// Reply to an unrecognised category.
pub const INVALID_CATEGORY_MESSAGE: &str = "Please select a valid category: Booking Changes, \
     Air Travel, Packages, Student Inquiry, Promotions, or Complaint.";

/// Reply to a message sent after completion when restarts are disabled.
pub const CONVERSATION_CLOSED_MESSAGE: &str =
    "This conversation is complete. Please start a new chat if you need anything else.";

/// Stand-in for an unanswered question in the booking summary.
const NOT_PROVIDED: &str = "not provided";

/// Renders the question (or closing text) for `step`.
///
/// Output depends only on the arguments.
pub fn render_prompt(step: Step, collected: &CollectedData) -> String {
    match step {
        // The greeting opens with the menu; the category is asked for next.
        Step::Greeting | Step::CategorySelection => format!(
            "Welcome! How can I help you today? Choose from: {}.",
            Category::menu()
        ),
        Step::Name => "Could you please provide your full name?".to_string(),
        Step::Email => match collected.name() {
            Some(name) => format!(
                "Thank you, {}. Could you provide your email address for contact purposes?",
                name
            ),
            None => "Could you provide your email address for contact purposes?".to_string(),
        },
        Step::Destination => "Great! What is your destination?".to_string(),
        Step::Dates => "When are you planning to travel?".to_string(),
        Step::TicketCount => "How many tickets would you like to book?".to_string(),
        Step::Confirmation => booking_summary(collected),
        Step::Completed => closing(collected),
    }
}

/// Renders the reply for a rejected answer at `step`.
pub fn rejection_prompt(step: Step, collected: &CollectedData) -> String {
    match step {
        Step::CategorySelection => INVALID_CATEGORY_MESSAGE.to_string(),
        _ => format!("{}{}", APOLOGY_PREFIX, render_prompt(step, collected)),
    }
}

fn booking_summary(collected: &CollectedData) -> String {
    let tickets = collected
        .tickets_count()
        .map(|count| count.to_string())
        .unwrap_or_else(|| NOT_PROVIDED.to_string());

    format!(
        "Confirm your booking details: \nName: {}\nEmail: {}\nDestination: {}\nDates: {}\nTickets: {}\n\n\
         Type 'yes' to confirm or 'no' to cancel.",
        collected.name().unwrap_or(NOT_PROVIDED),
        collected.email().unwrap_or(NOT_PROVIDED),
        collected.destination().unwrap_or(NOT_PROVIDED),
        collected.travel_dates().unwrap_or(NOT_PROVIDED),
        tickets,
    )
}

fn closing(collected: &CollectedData) -> String {
    match collected.category() {
        Some(Category::Promotions) => {
            "Thank you! We'll send our latest promotions to your email address.".to_string()
        }
        Some(Category::StudentInquiry) => format!(
            "Thank you for your student inquiry about {}. \
             We'll send information about student packages to your email.",
            collected.destination().unwrap_or(NOT_PROVIDED)
        ),
        Some(Category::Complaint) => {
            "We've received your complaint and will contact you soon to resolve the issue."
                .to_string()
        }
        _ => match collected.confirmed() {
            Some(true) => "Thank you for your booking! Your request has been processed \
                 successfully. You will receive a confirmation email shortly."
                .to_string(),
            Some(false) => "Your booking has been cancelled. Please start a new chat if \
                 you'd like to make different arrangements."
                .to_string(),
            None => "Thank you for using our service! Is there anything else we can help you with?"
                .to_string(),
        },
    }
}
