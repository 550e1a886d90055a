//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`ShopListError`] via `From`, so callers only ever match on three kinds:
//! not found, validation, and connection.

use crate::time::Timestamp;

/// Top-level error surfaced by every shopping-list operation.
#[derive(Debug, thiserror::Error)]
pub enum ShopListError {
    /// Input failed a domain invariant.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The requested row does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The store was unreachable or rejected the query.
    #[error("connection error")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field was not supplied.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// A text field was supplied but empty or whitespace only.
    #[error("field `{0}` must not be empty")]
    EmptyField(&'static str),

    /// The price could not be read as a non-negative two-place decimal.
    #[error("invalid price `{0}`")]
    InvalidPrice(String),

    /// Timestamps must render as four-digit-year RFC 3339 text.
    #[error("date `{0}` is outside years 0000 to 9999")]
    DateOutOfRange(Timestamp),

    /// Page number and page size both start at 1.
    #[error("invalid page: number {number}, size {size}")]
    InvalidPage { number: u32, size: u32 },
}

/// Lookup by id matched no row.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}
