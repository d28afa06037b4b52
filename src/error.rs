//! Error types for EPS to PDF conversion.
//!
//! Every failure a conversion can hit is a variant of [`Error`]. Each variant
//! maps to a distinct process status code through [`Error::status_code`], which
//! is what the command-line front end and
//! [`convert_with_status`](crate::converter::convert_with_status) report.

use std::path::PathBuf;

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting an EPS file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An explicitly supplied interpreter path does not exist
    #[error("Invalid interpreter path: {} does not exist", .0.display())]
    InvalidInterpreterPath(PathBuf),

    /// Source file missing or unreadable
    #[error("Failed to read {}: {source}", path.display())]
    FileRead {
        /// Path that could not be read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// A required DSC directive is absent
    #[error("Directive not found: {0}")]
    DirectiveNotFound(String),

    /// The BoundingBox directive does not hold exactly four numbers
    #[error("Malformed %%BoundingBox: expected four numbers, found '{0}'")]
    BoundingBoxParse(String),

    /// The temporary copy could not be written
    #[error("Failed to write temporary file {}: {source}", path.display())]
    TempFileWrite {
        /// Temporary file path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The interpreter could not be launched or exited unsuccessfully
    #[error("Interpreter invocation failed: {0}")]
    InterpreterInvocation(String),

    /// A header edit overlapped another edit or fell outside the buffer
    #[error("Invalid edit: {0}")]
    InvalidEdit(String),
}

impl Error {
    /// Process status code for this error. Success is always `0`.
    pub fn status_code(&self) -> i32 {
        match self {
            Error::InvalidInterpreterPath(_) => 2,
            Error::FileRead { .. } => 3,
            Error::DirectiveNotFound(_) => 4,
            Error::BoundingBoxParse(_) => 5,
            Error::TempFileWrite { .. } => 6,
            Error::InterpreterInvocation(_) => 7,
            Error::InvalidEdit(_) => 8,
        }
    }
}
