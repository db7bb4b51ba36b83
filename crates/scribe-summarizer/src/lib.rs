//! Scribe Summarizer
//!
//! Turns meeting transcripts into 11-section Markdown summaries using an LLM.
//!
//! # Architecture
//!
//! ```text
//! Transcript → Summarizer → LLM → Markdown → clean → parse → SummaryRecord
//!                  │
//!                  └─ large input: chunk → N partial analyses → consolidate
//! ```
//!
//! # Key Features
//!
//! - **Single pass** for transcripts up to the large-input threshold
//! - **Chunk and consolidate** for anything longer, tolerating failed chunks
//! - **Fallback document** when consolidation fails, so callers always get
//!   contract-shaped Markdown on the chunked path
//! - **Section parsing** into the typed fields of `SummaryDocument`
//!
//! # Example Usage
//!
//! ```no_run
//! use scribe_summarizer::{Summarizer, SummarizerConfig, SummaryRequest};
//! use scribe_domain::MeetingMetadata;
//! use scribe_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new("## 1. Executive Summary\nThe team agreed on a plan.");
//! let summarizer = Summarizer::new(llm, SummarizerConfig::default())?;
//!
//! let request = SummaryRequest::new(std::fs::read_to_string("standup.txt")?)
//!     .with_metadata(MeetingMetadata::new("Weekly Standup").with_date("2024-05-01"));
//!
//! let record = summarizer.generate(&request).await?;
//! println!("{}", record.document.executive_summary);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod record;
mod summarizer;

pub mod chunking;
pub mod fallback;
pub mod parser;
pub mod prompt;
pub mod quotes;
pub mod sanitizer;
pub mod sections;


pub use chunking::TextChunker;
pub use config::SummarizerConfig;
pub use error::SummarizerError;
pub use fallback::fallback_summary;
pub use parser::parse;
pub use prompt::{PromptInput, PromptMode, PromptPair, SectionFormatter};
pub use record::SummaryRecord;
pub use sanitizer::clean;
pub use summarizer::{Summarizer, SummaryRequest};
