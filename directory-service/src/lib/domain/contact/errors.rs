use thiserror::Error;

use crate::user::errors::EmailError;

/// Error for PhoneNumber validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PhoneError {
    #[error("Phone number must be exactly 10 digits, got {0:?}")]
    InvalidFormat(String),
}

/// Error for shared-cache operations
#[derive(Debug, Clone, Error)]
pub enum CacheError {
    #[error("Cache backend error: {0}")]
    Backend(String),

    #[error("Failed to serialize cache entry: {0}")]
    Serialization(String),
}

/// Top-level error for all contact-related operations
#[derive(Debug, Clone, Error)]
pub enum ContactError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid phone number: {0}")]
    InvalidPhone(#[from] PhoneError),

    // Domain-level errors
    #[error("Contact not found: {0}")]
    NotFound(i64),

    #[error("Not allowed to access this contact")]
    Forbidden,

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for ContactError {
    fn from(err: anyhow::Error) -> Self {
        ContactError::Unknown(err.to_string())
    }
}
