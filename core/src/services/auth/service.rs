//! Authentication flow service implementation

use std::sync::Arc;

use tracing::{info, warn};
use validator::{validate_email, Validate};

use ds_shared::password::is_strong_password;
use ds_shared::validation::{validators, ValidationErrors};
use ds_shared::Language;

use crate::errors::{AuthError, AuthOperation, GatewayError};
use crate::repositories::session::SessionContext;

use super::config::AuthFlowConfig;
use super::traits::AccountGatewayTrait;
use super::types::{RegistrationForm, ServerAck};

/// Service for login, registration and password reset
pub struct AuthFlowService<G: AccountGatewayTrait, S: SessionContext> {
    /// Backend account endpoints
    gateway: Arc<G>,
    /// Session storage receiving the pending username after login
    session_context: Arc<S>,
    /// Service configuration
    config: AuthFlowConfig,
}

impl<G: AccountGatewayTrait, S: SessionContext> AuthFlowService<G, S> {
    /// Create a new authentication flow service
    ///
    /// # Arguments
    ///
    /// * `gateway` - Backend account endpoints
    /// * `session_context` - Session storage shared with the verification flow
    /// * `config` - Service configuration
    pub fn new(gateway: Arc<G>, session_context: Arc<S>, config: AuthFlowConfig) -> Self {
        Self {
            gateway,
            session_context,
            config,
        }
    }

    fn language(&self) -> Language {
        self.config.language
    }

    /// Log in with username and password
    ///
    /// On success the username becomes the pending username of the session,
    /// which starts the two-factor verification step.
    ///
    /// # Returns
    ///
    /// * `Ok(ServerAck)` - Backend acknowledgement
    /// * `Err(AuthError::Validation)` - A field is empty
    /// * `Err(AuthError::RequestFailed)` - Backend rejected the login or is unreachable
    pub async fn login(&self, username: &str, password: &str) -> Result<ServerAck, AuthError> {
        let username = username.trim();
        let lang = self.language();

        let mut errors = ValidationErrors::new();
        if !validators::not_empty(username) {
            errors.add_error(
                "username",
                lang.pick("Enter your username", "Ingresa tu usuario"),
                "required",
            );
        }
        if password.is_empty() {
            errors.add_error(
                "password",
                lang.pick("Enter your password", "Ingresa tu contraseña"),
                "required",
            );
        }
        errors.into_result().map_err(AuthError::Validation)?;

        let ack = self
            .gateway
            .login(username, password)
            .await
            .map_err(|e| request_failed(AuthOperation::Login, e))?;

        self.session_context.set_pending_username(username);
        info!(
            username = username,
            event = "login_accepted",
            "Login accepted, awaiting verification code"
        );
        Ok(ack)
    }

    /// Register a new account
    ///
    /// The form is checked locally in this order: email format and
    /// username, password strength, then password confirmation.
    pub async fn register(&self, form: &RegistrationForm) -> Result<ServerAck, AuthError> {
        if let Err(errors) = form.validate() {
            return Err(AuthError::Validation(self.form_errors(&errors)));
        }
        if !is_strong_password(&form.password) {
            return Err(AuthError::WeakPassword);
        }
        if form.password != form.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        let request = form.to_request();
        let ack = self
            .gateway
            .register(&request)
            .await
            .map_err(|e| request_failed(AuthOperation::Register, e))?;

        info!(
            username = %request.username,
            event = "account_registered",
            "Account registered"
        );
        Ok(ack)
    }

    /// Ask for a password reset email
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Message to show; the backend's when it sent one
    pub async fn request_password_reset(&self, email: &str) -> Result<String, AuthError> {
        let email = email.trim();
        let lang = self.language();

        if !validate_email(email) {
            let mut errors = ValidationErrors::new();
            errors.add_error(
                "email",
                lang.pick("Enter a valid email address", "Ingresa un correo válido"),
                "email",
            );
            return Err(AuthError::Validation(errors));
        }

        let ack = self
            .gateway
            .request_password_reset(email)
            .await
            .map_err(|e| request_failed(AuthOperation::RequestPasswordReset, e))?;

        info!(event = "password_reset_requested", "Password reset email requested");
        Ok(ack.text().map(str::to_string).unwrap_or_else(|| {
            lang.pick(
                "Email sent with instructions.",
                "Correo enviado con instrucciones.",
            )
            .to_string()
        }))
    }

    /// Set a new password using the token from the reset email
    ///
    /// Checked locally in this order: token present, confirmation matches,
    /// password strong.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Message to show; the backend's when it sent one
    pub async fn reset_password(
        &self,
        token: Option<&str>,
        password: &str,
        confirm_password: &str,
    ) -> Result<String, AuthError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingResetToken)?;
        if password != confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        if !is_strong_password(password) {
            return Err(AuthError::WeakPassword);
        }

        let ack = self
            .gateway
            .reset_password(token, password)
            .await
            .map_err(|e| request_failed(AuthOperation::ResetPassword, e))?;

        info!(event = "password_reset", "Password updated with reset token");
        Ok(ack.text().map(str::to_string).unwrap_or_else(|| {
            self.language()
                .pick(
                    "Done! Your password was updated.",
                    "¡Listo! Tu contraseña fue actualizada.",
                )
                .to_string()
        }))
    }

    /// Convert derive-based form errors into field errors with localized
    /// messages, ordered by field name
    fn form_errors(&self, errors: &validator::ValidationErrors) -> ValidationErrors {
        let lang = self.language();
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| *field);

        let mut converted = ValidationErrors::new();
        for (field, field_errors) in fields {
            for error in field_errors {
                let message = match field {
                    "email" => lang.pick("Enter a valid email address", "Ingresa un correo válido"),
                    "username" => lang.pick("Enter a username", "Ingresa un nombre de usuario"),
                    _ => lang.pick("Invalid value", "Valor inválido"),
                };
                converted.add_error(field, message, error.code.to_string());
            }
        }
        converted
    }
}

fn request_failed(operation: AuthOperation, error: GatewayError) -> AuthError {
    warn!(
        operation = ?operation,
        error = %error,
        event = "auth_request_failed",
        "Authentication request failed"
    );
    AuthError::RequestFailed {
        operation,
        server_message: error.server_message().map(str::to_string),
    }
}
