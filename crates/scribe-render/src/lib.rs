//! Scribe Render
//!
//! Turns a summary into a formatted document.
//!
//! ```text
//! SummaryDocument → Assembler → Document → { render_html, DocxWriter }
//! ```
//!
//! The [`Assembler`] decides what goes on the page; the renderers only
//! decide how it looks.
//!
//! # Example
//!
//! ```no_run
//! use scribe_domain::{MeetingMetadata, SummaryDocument};
//! use scribe_render::{export_file_name, Assembler, DocxWriter};
//!
//! # fn example(summary: SummaryDocument) -> Result<(), scribe_render::RenderError> {
//! let metadata = MeetingMetadata::new("Weekly Sync").with_date("2024-05-01");
//! let document = Assembler::new(metadata).assemble(&summary);
//!
//! DocxWriter::new().write_to_path(&document, export_file_name("Weekly Sync"))?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;

pub mod assembler;
pub mod document;
pub mod docx;
pub mod html;

pub use assembler::Assembler;
pub use document::{Block, Document, Header, Table};
pub use docx::{export_file_name, DocxWriter};
pub use error::RenderError;
pub use html::render_html;
