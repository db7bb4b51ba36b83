//! Error types for document rendering

use thiserror::Error;

/// Errors that can occur while writing a rendered document
#[derive(Error, Debug)]
pub enum RenderError {
    /// Filesystem or writer failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// DOCX package could not be written
    #[error("DOCX package error: {0}")]
    Zip(#[from] zip::result::ZipError),
}
