//! Shared utilities and common types for the DocShare auth client
//!
//! This crate provides common functionality used across all client modules:
//! - Configuration types (API client, resend limits, logging)
//! - Error body shapes returned by the backend
//! - Utility functions (password strength, form validation)
//! - Language selection for user-visible messages

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    ApiClientConfig, AppConfig, Environment, LogFormat, LoggingConfig, ResendLimitsConfig,
};
pub use errors::{error_codes, ApiErrorBody};
pub use types::Language;
pub use utils::{password, validation};
