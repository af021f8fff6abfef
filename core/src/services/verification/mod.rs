//! Two-factor verification flow
//!
//! This module provides the client side of the verification step:
//! - 6-digit code entry and submission
//! - Resend requests gated by a cooldown and a bounded attempt window
//! - A countdown ticker driving both timers once per second
//! - Gateway trait for the backend verification endpoints

mod config;
mod controller;
mod ticker;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::VerificationFlowConfig;
pub use controller::VerificationFlowController;
pub use ticker::CountdownTicker;
pub use traits::VerificationGatewayTrait;
pub use types::ResendAck;
