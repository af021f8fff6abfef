//! Trait for the backend verification endpoints

use async_trait::async_trait;

use crate::domain::entities::credentials::Credentials;
use crate::errors::GatewayError;

use super::types::ResendAck;

/// Backend endpoints used by the verification flow
#[async_trait]
pub trait VerificationGatewayTrait: Send + Sync {
    /// Submit a code for `username`; the backend issues credentials on success
    async fn verify_code(&self, username: &str, code: &str) -> Result<Credentials, GatewayError>;
    /// Ask the backend to email a new code to `username`
    async fn resend_code(&self, username: &str) -> Result<ResendAck, GatewayError>;
}
