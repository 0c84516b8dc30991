//! Answers accumulated over one conversation.

use serde::{Deserialize, Serialize};

use super::Category;

/// A single validated answer produced by one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedField {
    Category(Category),
    Name(String),
    Email(String),
    Destination(String),
    TravelDates(String),
    TicketsCount(i64),
    Confirmed(bool),
}

/// Validated answers for one conversation.
///
/// Serializes as a flat JSON object holding only the fields collected so far.
/// Fields are never removed, and `category` is never replaced once set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    travel_dates: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tickets_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    confirmed: Option<bool>,
}

impl CollectedData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges one answer. Returns false when the field was ignored, which only
    /// happens for a second category.
    pub fn merge(&mut self, field: ExtractedField) -> bool {
        match field {
            ExtractedField::Category(category) => {
                if self.category.is_some() {
                    return false;
                }
                self.category = Some(category);
            }
            ExtractedField::Name(name) => self.name = Some(name),
            ExtractedField::Email(email) => self.email = Some(email),
            ExtractedField::Destination(destination) => self.destination = Some(destination),
            ExtractedField::TravelDates(dates) => self.travel_dates = Some(dates),
            ExtractedField::TicketsCount(count) => self.tickets_count = Some(count),
            ExtractedField::Confirmed(confirmed) => self.confirmed = Some(confirmed),
        }
        true
    }

    /// Merges every answer in order.
    #[cfg(test)]
    pub fn merge_all(&mut self, fields: impl IntoIterator<Item = ExtractedField>) {
        for field in fields {
            self.merge(field);
        }
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }

    pub fn travel_dates(&self) -> Option<&str> {
        self.travel_dates.as_deref()
    }

    pub fn tickets_count(&self) -> Option<i64> {
        self.tickets_count
    }

    pub fn confirmed(&self) -> Option<bool> {
        self.confirmed
    }

    /// Returns true if nothing has been collected yet.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
