//! Category enum representing the six reasons a traveller contacts the desk.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Top-level reason for contact, chosen once at the start of a conversation.
///
/// Serialized with its display string (`"Air Travel"`), which is also the
/// only text accepted when the user picks a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Booking Changes")]
    BookingChanges,
    #[serde(rename = "Air Travel")]
    AirTravel,
    #[serde(rename = "Packages")]
    Packages,
    #[serde(rename = "Student Inquiry")]
    StudentInquiry,
    #[serde(rename = "Promotions")]
    Promotions,
    #[serde(rename = "Complaint")]
    Complaint,
}

/// Raised when text does not name one of the six categories exactly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown category: '{0}'")]
pub struct UnknownCategory(pub String);

impl Category {
    /// All categories in the order they are offered to the user.
    pub const ALL: [Category; 6] = [
        Category::BookingChanges,
        Category::AirTravel,
        Category::Packages,
        Category::StudentInquiry,
        Category::Promotions,
        Category::Complaint,
    ];

    /// Returns all categories in menu order.
    pub fn all() -> &'static [Category] {
        &Self::ALL
    }

    /// Returns the display name, which doubles as the accepted input text.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::BookingChanges => "Booking Changes",
            Category::AirTravel => "Air Travel",
            Category::Packages => "Packages",
            Category::StudentInquiry => "Student Inquiry",
            Category::Promotions => "Promotions",
            Category::Complaint => "Complaint",
        }
    }

    /// Looks up a category by exact display name.
    ///
    /// Matching is case-sensitive and does not trim whitespace.
    pub fn from_display_name(text: &str) -> Option<Category> {
        Self::ALL.iter().copied().find(|c| c.display_name() == text)
    }

    /// Human-readable menu, e.g. `"Booking Changes, Air Travel, ..., or Complaint"`.
    pub fn menu() -> String {
        let names: Vec<&str> = Self::ALL.iter().map(Category::display_name).collect();
        match names.split_last() {
            Some((last, rest)) if !rest.is_empty() => format!("{}, or {}", rest.join(", "), last),
            Some((last, _)) => (*last).to_string(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_display_name(s).ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_returns_six_categories() {
        assert_eq!(Category::all().len(), 6);
    }

    #[test]
    fn display_names_round_trip_through_from_str() {
        for category in Category::all() {
            let parsed: Category = category.display_name().parse().unwrap();
            assert_eq!(parsed, *category);
        }
    }

    #[test]
    fn parsing_is_exact() {
        assert_eq!("Air Travel".parse::<Category>(), Ok(Category::AirTravel));
        assert!("air travel".parse::<Category>().is_err());
        assert!(" Air Travel".parse::<Category>().is_err());
        assert!("Air Travel ".parse::<Category>().is_err());
        assert!("AIR_TRAVEL".parse::<Category>().is_err());
        assert!("bogus".parse::<Category>().is_err());
    }

    #[test]
    fn unknown_category_carries_input() {
        let err = "Cruises".parse::<Category>().unwrap_err();
        assert_eq!(err, UnknownCategory("Cruises".to_string()));
        assert!(err.to_string().contains("Cruises"));
    }

    #[test]
    fn menu_lists_every_category_with_oxford_or() {
        assert_eq!(
            Category::menu(),
            "Booking Changes, Air Travel, Packages, Student Inquiry, Promotions, or Complaint"
        );
    }

    #[test]
    fn serializes_to_display_name() {
        let json = serde_json::to_string(&Category::StudentInquiry).unwrap();
        assert_eq!(json, "\"Student Inquiry\"");
    }

    #[test]
    fn deserializes_from_display_name() {
        let category: Category = serde_json::from_str("\"Booking Changes\"").unwrap();
        assert_eq!(category, Category::BookingChanges);
    }
}
