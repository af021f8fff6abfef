//! reqwest-based gateway for the auth endpoints

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};

use ds_core::domain::entities::credentials::Credentials;
use ds_core::errors::GatewayError;
use ds_core::repositories::session::SessionContext;
use ds_core::services::auth::{AccountGatewayTrait, RegistrationRequest, ServerAck};
use ds_core::services::verification::{ResendAck, VerificationGatewayTrait};
use ds_shared::{ApiClientConfig, ApiErrorBody};

use crate::InfrastructureError;

/// Endpoint paths relative to the API base URL
pub mod paths {
    pub const VERIFY_CODE: &str = "/api/auth/verify-code";
    pub const RESEND_CODE: &str = "/api/auth/verifyCode/resend";
    pub const LOGIN: &str = "/api/auth/login";
    pub const REGISTER: &str = "/api/auth/register";
    pub const REQUEST_RESET: &str = "/api/auth/request-reset";
    pub const RESET_PASSWORD: &str = "/api/auth/reset-password";
}

/// Gateway for the backend auth API
///
/// Attaches the session's bearer token to every request when one is stored.
#[derive(Clone)]
pub struct HttpAuthGateway {
    /// HTTP client (reusable connection pool)
    http_client: reqwest::Client,
    config: ApiClientConfig,
    session_context: Option<Arc<dyn SessionContext>>,
}

impl HttpAuthGateway {
    /// Create a gateway with the timeouts and user agent from `config`
    pub fn new(config: ApiClientConfig) -> Result<Self, InfrastructureError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        debug!(
            base_url = %config.base_url,
            event = "gateway_initialized",
            "HTTP auth gateway initialized"
        );

        Ok(Self {
            http_client,
            config,
            session_context: None,
        })
    }

    /// Read the bearer token from `session_context` on every request
    pub fn with_session_context(mut self, session_context: Arc<dyn SessionContext>) -> Self {
        self.session_context = Some(session_context);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// POST `body` as JSON and return the raw success body
    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<String, GatewayError> {
        let url = self.config.endpoint(path);
        let mut request = self.http_client.post(&url).json(body);
        if let Some(token) = self.session_context.as_ref().and_then(|c| c.auth_token()) {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            warn!(path = path, error = %e, event = "http_unreachable", "Backend request failed");
            if e.is_timeout() {
                GatewayError::Unreachable(format!("request timed out: {e}"))
            } else if e.is_connect() {
                GatewayError::Unreachable(format!("connection failed: {e}"))
            } else {
                GatewayError::Unreachable(e.to_string())
            }
        })?;

        let status = response.status();
        let raw = response
            .text()
            .await
            .map_err(|e| GatewayError::InvalidResponse(format!("failed to read response body: {e}")))?;

        debug!(
            path = path,
            status = status.as_u16(),
            event = "http_response",
            "Backend responded"
        );

        if !status.is_success() {
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message: ApiErrorBody::parse(&raw).text().map(str::to_string),
            });
        }
        Ok(raw)
    }

    /// POST and decode a required JSON response
    async fn post_for<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, GatewayError> {
        let raw = self.post(path, body).await?;
        serde_json::from_str(&raw)
            .map_err(|e| GatewayError::InvalidResponse(format!("failed to parse {path} response: {e}")))
    }

    /// POST and decode an acknowledgement; empty or unexpected bodies yield the default
    async fn post_for_ack<B: Serialize + ?Sized, R: DeserializeOwned + Default>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, GatewayError> {
        let raw = self.post(path, body).await?;
        Ok(serde_json::from_str(&raw).unwrap_or_default())
    }
}

#[async_trait]
impl VerificationGatewayTrait for HttpAuthGateway {
    async fn verify_code(&self, username: &str, code: &str) -> Result<Credentials, GatewayError> {
        self.post_for(paths::VERIFY_CODE, &json!({ "username": username, "code": code }))
            .await
    }

    async fn resend_code(&self, username: &str) -> Result<ResendAck, GatewayError> {
        self.post_for_ack(paths::RESEND_CODE, &json!({ "username": username }))
            .await
    }
}

#[async_trait]
impl AccountGatewayTrait for HttpAuthGateway {
    async fn login(&self, username: &str, password: &str) -> Result<ServerAck, GatewayError> {
        self.post_for_ack(paths::LOGIN, &json!({ "username": username, "password": password }))
            .await
    }

    async fn register(&self, request: &RegistrationRequest) -> Result<ServerAck, GatewayError> {
        self.post_for_ack(paths::REGISTER, request).await
    }

    async fn request_password_reset(&self, email: &str) -> Result<ServerAck, GatewayError> {
        self.post_for_ack(paths::REQUEST_RESET, &json!({ "email": email }))
            .await
    }

    async fn reset_password(&self, token: &str, password: &str) -> Result<ServerAck, GatewayError> {
        self.post_for_ack(paths::RESET_PASSWORD, &json!({ "token": token, "password": password }))
            .await
    }
}
