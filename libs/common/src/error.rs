//! Error types for the store layer
//!
//! Every failure surfaced by a store adapter, whatever the backend, is
//! expressed as a [`DatabaseError`].

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// The pool could not reach the database
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// A statement failed or its rows could not be decoded
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Bootstrap migrations could not be applied
    #[error("Database migration error: {0}")]
    Migration(String),

    /// The connection settings are unusable
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;
