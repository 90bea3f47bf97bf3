//! Error types for point-cloud I/O.

use std::path::PathBuf;
use thiserror::Error;

/// Stable error code carried by every [`Error`], for callers that dispatch
/// on failure class rather than on the message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// File/stream open, read or write failure
    Io,
    /// Malformed line, wrong token count, bad stream framing
    Parse,
    /// Structurally inconsistent data (count mismatch, missing attribute)
    Consistency,
    /// Unknown file extension or codec not linked in
    UnrecognizedFormat,
}

/// Main error type for point-cloud operations.
#[derive(Error, Debug)]
pub enum Error {
    /// File does not exist or cannot be accessed
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed line in a text format
    #[error("Invalid line {line}: {reason}")]
    ParseLine { line: usize, reason: String },

    /// Line has extra tokens after x y z that do not form a color triple
    #[error("Invalid color data on line {line}")]
    MalformedColor { line: usize },

    /// Bad magic, version or framing in an encoded stream
    #[error("Invalid stream: {0}")]
    InvalidStream(String),

    /// Some lines carry a color triple and some do not
    #[error("Color count {actual} does not match point count {expected}")]
    ColorCountMismatch { expected: usize, actual: usize },

    /// A required attribute is absent
    #[error("Point cloud has no {0} attribute")]
    MissingAttribute(String),

    /// Attribute descriptor fails validation
    #[error("Invalid attribute descriptor: {0}")]
    InvalidDescriptor(String),

    /// Structurally inconsistent point cloud
    #[error("Inconsistent point cloud: {0}")]
    Inconsistent(String),

    /// File extension is not in the format table
    #[error("Unknown file format: {0}")]
    UnrecognizedFormat(PathBuf),

    /// Format is known but its decoder is an external collaborator
    #[error("No decoder is linked for {0} files")]
    DecoderUnavailable(&'static str),

    /// Format is known but its encoder is an external collaborator
    #[error("No encoder is linked for {0} files")]
    EncoderUnavailable(&'static str),
}

impl Error {
    /// Create a parse error for a given 1-based line number.
    pub fn parse(line: usize, reason: impl Into<String>) -> Self {
        Self::ParseLine { line, reason: reason.into() }
    }

    /// The stable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::FileNotFound(_) | Self::Io(_) => ErrorCode::Io,
            Self::ParseLine { .. } | Self::MalformedColor { .. } | Self::InvalidStream(_) => {
                ErrorCode::Parse
            }
            Self::ColorCountMismatch { .. }
            | Self::MissingAttribute(_)
            | Self::InvalidDescriptor(_)
            | Self::Inconsistent(_) => ErrorCode::Consistency,
            Self::UnrecognizedFormat(_)
            | Self::DecoderUnavailable(_)
            | Self::EncoderUnavailable(_) => ErrorCode::UnrecognizedFormat,
        }
    }
}

/// Result type alias for point-cloud operations.
pub type Result<T> = std::result::Result<T, Error>;
