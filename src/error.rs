//! Session Errors
//!
//! Typed failures for the document session. Engine-level errors (malformed
//! files, unwritable paths) are carried through untouched in the `Engine`
//! variant rather than reinterpreted here.

use thiserror::Error;
use umya_spreadsheet::XlsxError;

/// Errors raised by [`crate::session::DocumentSession`] operations
#[derive(Debug, Error)]
pub enum SessionError {
    /// A document with this identifier is already registered
    #[error("document with id `{id}` is already open")]
    DuplicateIdentifier { id: String },

    /// No document with this identifier is registered
    #[error("document with id `{id}` is not open")]
    UnknownIdentifier { id: String },

    /// A document-scoped operation was attempted with nothing open
    #[error("no open documents in the session")]
    NoOpenDocument,

    /// The named sheet does not exist in the current document
    #[error("sheet `{name}` does not exist in the current document")]
    UnknownSheet { name: String },

    /// Failure inside the spreadsheet engine (parse, read, write)
    #[error("spreadsheet engine error: {0}")]
    Engine(#[from] XlsxError),
}
