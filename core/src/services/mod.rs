//! Client flows built on the gateway and session abstractions.

pub mod auth;
pub mod verification;

// Re-export commonly used types
pub use auth::{
    AccountGatewayTrait, AuthFlowConfig, AuthFlowService, RegistrationForm, RegistrationRequest,
    ServerAck,
};
pub use verification::{
    CountdownTicker, ResendAck, VerificationFlowConfig, VerificationFlowController,
    VerificationGatewayTrait,
};
