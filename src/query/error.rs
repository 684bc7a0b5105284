//! Query error types
//!
//! Defines the conditions under which an explore query cannot be built.

use thiserror::Error;

/// Errors that can occur while building explore queries
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// TAG_VALUES was requested without the tag key to enumerate
    #[error("Missing tag key: TAG_VALUES queries require a non-empty tag key")]
    MissingTagKey,

    /// Query kind name is not one of the supported explore kinds
    #[error("Unknown query kind: {0}")]
    UnknownKind(String),

    /// Tag filter could not be parsed
    #[error("Invalid tag: {0}")]
    InvalidTag(String),
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;
