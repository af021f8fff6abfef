//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the DocShare auth
//! client. It provides the concrete pieces behind the core abstractions.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **HTTP**: reqwest implementation of the verification and account gateways
//! - **Configuration**: layered loading of `AppConfig` from files and environment
//! - **Telemetry**: tracing subscriber setup from `LoggingConfig`

// Re-export core types for convenience
pub use ds_core::errors::*;

/// HTTP module - Backend API gateway
pub mod http;

/// Configuration module - Layered `AppConfig` loading
pub mod config;

/// Telemetry module - Tracing subscriber initialization
pub mod telemetry;

pub use config::{load_config, load_config_from};
pub use http::HttpAuthGateway;
pub use telemetry::init_tracing;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP client construction error
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    /// Tracing subscriber error
    #[error("Telemetry error: {0}")]
    Telemetry(String),
}
