//! Excel Keywords
//!
//! A test-automation helper for spreadsheet documents: an in-memory session
//! of open workbooks plus keyword-style read/write operations, all file
//! format work delegated to the `umya-spreadsheet` engine.
//!
//! This library provides:
//! - Document session management (create/open/switch/close/save)
//! - Cell, row, column, and whole-sheet accessors (1-based indices)
//! - A stringly-typed keyword dispatch layer for automation hosts
//! - A TOML step-script schema for the `excel-kw` runner

pub mod config;
pub mod error;
pub mod keyword;
pub mod script;
pub mod session;
pub mod value;

// Re-exports for clean public API
pub use error::SessionError;
pub use keyword::run_keyword;
pub use script::{Script, Step};
pub use session::DocumentSession;
pub use value::Scalar;
