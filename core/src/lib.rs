//! # DocShare Core
//!
//! Core domain layer for the DocShare auth client.
//! This crate contains the two-factor verification flow with its resend
//! limiter, the auxiliary authentication flows, the session context
//! abstraction, and the error types shared by the client layers.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
