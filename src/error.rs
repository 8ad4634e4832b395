//! Error types for navquill.

use crate::workspace::DocHandle;
use thiserror::Error;

/// Errors raised by the fallible parts of the navigation API.
///
/// History bookkeeping itself never fails: unresolvable anchors are dropped
/// and an out-of-range cursor is reset. These variants cover caller mistakes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    /// The handle does not refer to an open document
    #[error("Document {0} is not open")]
    InvalidDocument(DocHandle),

    /// Line numbers are counted from 1
    #[error("Invalid line number {0}, lines start at 1")]
    InvalidLine(usize),

    /// An edit addressed text past the end of the document
    #[error("Offset {offset} is out of range for a document of length {len}")]
    OffsetOutOfRange { offset: usize, len: usize },

    /// No open document is backed by this path
    #[error("No open document for {0}")]
    UnknownFile(String),

    /// A navigation command needed a focused document
    #[error("No document is open")]
    NothingOpen,

    /// A session script line could not be parsed
    #[error("Script line {line}: {message}")]
    Script { line: usize, message: String },
}

/// Result type for navquill operations
pub type NavResult<T> = Result<T, NavError>;
