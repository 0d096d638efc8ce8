//! Domain-level error types.
//!
//! There is no separate business-rule taxonomy: the only failures this
//! domain produces come from persistence, and input validation lives at
//! the HTTP boundary.

use thiserror::Error;

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
