//! Scribe Domain Layer
//!
//! This crate contains the core data model for Scribe and the trait
//! interface to the text-generation capability. It carries no
//! infrastructure: only `uuid` (record identifiers) and `serde` (records
//! are stored and reloaded as JSON between invocations).
//!
//! ## Key Concepts
//!
//! - **Section contract**: the fixed 11-heading Markdown structure every
//!   summary is asked to follow ([`SectionKind`])
//! - **SummaryDocument**: the structured record recovered from that
//!   Markdown, with the Markdown itself kept as the source of truth
//! - **SectionField**: tagged variant for fields whose shape depends on
//!   where the record came from
//! - **GenerationProvider**: the opaque `generate(prompt, system, max_tokens)`
//!   capability
//!
//! ## Architecture
//!
//! - Pure data and trait definitions only
//! - Infrastructure implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod field;
pub mod id;
pub mod metadata;
pub mod section;
pub mod summary;
pub mod traits;

// Re-exports for convenience
pub use field::SectionField;
pub use id::SummaryId;
pub use metadata::MeetingMetadata;
pub use section::SectionKind;
pub use summary::{
    ActionItem, Decision, KeyQuote, OpenQuestion, Participant, Risk, Scene, SummaryDocument, Term,
};
pub use traits::{GenerationProvider, GenerationRequest};
