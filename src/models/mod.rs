//! Data models for exported conversations.
//!
//! - [`ConversationRecord`] - one schema-free conversation object
//! - [`RecordStore`] - the ordered record sequence parsed from `conversations.json`
//!
//! Records are read-only after parsing. Their canonical serialized form is the
//! surface that matching and facet detection operate on.

pub mod record;

pub use record::{ConversationRecord, RecordStore};
