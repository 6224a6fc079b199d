//! Error types for board domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain board values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// A required field was absent from a backend record.
    #[error("{record} record is missing required field '{field}'")]
    MissingField {
        /// Kind of record being decoded.
        record: &'static str,
        /// Name of the absent field.
        field: &'static str,
    },

    /// The status value is not one of the board columns.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),

    /// The priority value is unknown.
    #[error(transparent)]
    InvalidPriority(#[from] ParseTaskPriorityError),
}

/// Error returned while parsing task statuses from the wire.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from the wire.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
