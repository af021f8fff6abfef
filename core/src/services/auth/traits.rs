//! Trait for the backend account endpoints

use async_trait::async_trait;

use crate::errors::GatewayError;

use super::types::{RegistrationRequest, ServerAck};

/// Backend endpoints for login, registration and password reset
#[async_trait]
pub trait AccountGatewayTrait: Send + Sync {
    /// Check credentials; a successful login is followed by the verification step
    async fn login(&self, username: &str, password: &str) -> Result<ServerAck, GatewayError>;
    async fn register(&self, request: &RegistrationRequest) -> Result<ServerAck, GatewayError>;
    /// Ask the backend to email a reset link to `email`
    async fn request_password_reset(&self, email: &str) -> Result<ServerAck, GatewayError>;
    async fn reset_password(&self, token: &str, password: &str) -> Result<ServerAck, GatewayError>;
}
