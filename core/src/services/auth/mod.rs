//! Auxiliary authentication flows
//!
//! This module provides the steps around two-factor verification:
//! - Login, which hands the username over to the verification flow
//! - Registration with local form validation
//! - Password reset request and password reset by emailed token

mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::AuthFlowConfig;
pub use service::AuthFlowService;
pub use traits::AccountGatewayTrait;
pub use types::{RegistrationForm, RegistrationRequest, ServerAck};
