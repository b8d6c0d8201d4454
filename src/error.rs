//! Unified error type for the translation core.
//!
//! Every parse and resolution operation is all-or-nothing: the first
//! violation encountered aborts the call, and no partial result is
//! produced. When a traversal could surface several violations only the
//! first one is reported.

use thiserror::Error;

/// Result type for translation operations.
pub type Result<T> = std::result::Result<T, TranslateError>;

/// Errors produced while parsing statement text or resolving names
/// against the catalog.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranslateError {
    /// Malformed or unsupported SQL, MAQL, DDL, or datatype text.
    #[error("syntax error: {0}")]
    Syntax(String),

    /// A title resolved to zero catalog entries.
    #[error("column '{0}' doesn't exist")]
    NotFound(String),

    /// A title resolved to two or more catalog entries.
    #[error("column '{0}' can't be uniquely resolved: multiple objects share this title")]
    Duplicate(String),

    /// The filter operator is not valid for the resolved object's kind.
    #[error("unsupported filter operator: {0}")]
    UnsupportedOperator(String),

    /// An unrecognized datatype name.
    #[error("datatype '{0}' is not supported")]
    UnsupportedType(String),
}
