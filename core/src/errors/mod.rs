//! Domain-specific error types and error handling.

mod types;

// Re-export all error types and utilities
pub use types::{
    extract_english_message, extract_spanish_message, AuthError, AuthOperation, CodeEntryError,
    GatewayError, VerificationError,
};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    CodeEntry(#[from] CodeEntryError),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

pub type DomainResult<T> = Result<T, DomainError>;
