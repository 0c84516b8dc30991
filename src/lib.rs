//! Travel Desk - Conversational intake for a travel-agency support desk
//!
//! A user is walked through a category-specific sequence of questions
//! (category, name, email, trip details, confirmation) one message at a time.
//! Conversation state is keyed by user and kept in a pluggable session store.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
