//! Error types for the verification flow and the auxiliary auth flows
//!
//! User-facing variants carry bilingual display strings (English and Spanish)
//! separated by " | "; `message(Language)` picks the half to show.

use thiserror::Error;

use ds_shared::error_codes;
use ds_shared::validation::ValidationErrors;
use ds_shared::Language;

use crate::domain::entities::resend_state::ResendBlock;

/// Errors of the two-factor verification flow
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("User not identified. Please sign in again | Usuario no identificado. Inicia sesión de nuevo")]
    MissingIdentity,

    #[error("Invalid or expired code | Código incorrecto o expirado")]
    InvalidOrExpiredCode {
        /// Message from the backend's error body, shown instead of the default when present
        server_message: Option<String>,
    },

    #[error("Resend not allowed right now | Reenvío no permitido por ahora")]
    ResendNotAllowed { reason: ResendBlock },

    #[error("Could not resend the code. Try again later | No se pudo reenviar el código. Intenta más tarde")]
    ResendDispatchFailed { cause: String },
}

impl VerificationError {
    /// Text to show the user
    pub fn message(&self, language: Language) -> String {
        match self {
            VerificationError::InvalidOrExpiredCode {
                server_message: Some(message),
            } => message.clone(),
            VerificationError::ResendNotAllowed {
                reason: ResendBlock::CoolingDown { seconds_remaining },
            } => match language {
                Language::English => format!("Please wait {}s before resending", seconds_remaining),
                Language::Spanish => format!("Espera {}s para reenviar", seconds_remaining),
            },
            VerificationError::ResendNotAllowed {
                reason: ResendBlock::LimitReached { .. },
            } => language
                .pick(
                    "Resend limit reached. Wait before trying again.",
                    "Límite de reenvíos alcanzado. Espera para volver a intentar.",
                )
                .to_string(),
            VerificationError::ResendNotAllowed {
                reason: ResendBlock::InFlight,
            } => language
                .pick(
                    "A new code is already on its way.",
                    "Ya estamos enviando un nuevo código.",
                )
                .to_string(),
            _ => localized(&self.to_string(), language),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            VerificationError::MissingIdentity => error_codes::MISSING_IDENTITY,
            VerificationError::InvalidOrExpiredCode { .. } => error_codes::INVALID_OR_EXPIRED_CODE,
            VerificationError::ResendNotAllowed { .. } => error_codes::RESEND_NOT_ALLOWED,
            VerificationError::ResendDispatchFailed { .. } => error_codes::RESEND_DISPATCH_FAILED,
        }
    }

    /// Whether the user can retry on this page; a missing identity means
    /// restarting from login
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, VerificationError::MissingIdentity)
    }
}

/// Auxiliary authentication operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOperation {
    Login,
    Register,
    RequestPasswordReset,
    ResetPassword,
}

impl AuthOperation {
    fn fallback_message(&self, language: Language) -> &'static str {
        match self {
            AuthOperation::Login => language.pick(
                "Incorrect username or password.",
                "Usuario o contraseña incorrectos.",
            ),
            AuthOperation::Register => language.pick(
                "Could not create the account.",
                "No se pudo crear la cuenta.",
            ),
            AuthOperation::RequestPasswordReset => language.pick(
                "Could not send the email. Try again.",
                "No se pudo enviar el correo. Intenta de nuevo.",
            ),
            AuthOperation::ResetPassword => language.pick(
                "Could not update the password. Try again.",
                "No se pudo actualizar. Intenta nuevamente.",
            ),
        }
    }
}

/// Errors of login, registration and password reset
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid form data: {0} | Datos del formulario inválidos: {0}")]
    Validation(ValidationErrors),

    #[error("Invalid or missing token. Open the link from your email | Token inválido. Abre el enlace desde tu correo")]
    MissingResetToken,

    #[error("Passwords do not match | Las contraseñas no coinciden")]
    PasswordMismatch,

    #[error("Weak password. Use 12+ characters with upper and lower case, a number and a symbol | Contraseña débil. Usa ≥12 caracteres, mayúscula, minúscula, número y símbolo")]
    WeakPassword,

    #[error("Request failed: {operation:?} | Solicitud fallida: {operation:?}")]
    RequestFailed {
        operation: AuthOperation,
        server_message: Option<String>,
    },
}

impl AuthError {
    /// Text to show the user
    pub fn message(&self, language: Language) -> String {
        match self {
            AuthError::Validation(errors) => errors
                .first_message()
                .map(str::to_string)
                .unwrap_or_else(|| localized(&self.to_string(), language)),
            AuthError::RequestFailed {
                server_message: Some(message),
                ..
            } => message.clone(),
            AuthError::RequestFailed {
                operation,
                server_message: None,
            } => operation.fallback_message(language).to_string(),
            _ => localized(&self.to_string(), language),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AuthError::RequestFailed { .. } => error_codes::REQUEST_FAILED,
            _ => error_codes::VALIDATION_ERROR,
        }
    }
}

/// Failures reported by a backend gateway
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Request rejected with status {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },

    #[error("Backend unreachable: {0}")]
    Unreachable(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl GatewayError {
    /// Message from the backend's error body, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            GatewayError::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Invalid input into a code slot
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodeEntryError {
    #[error("Code slot {index} does not exist")]
    SlotOutOfRange { index: usize },

    #[error("Code slots accept a single numeral, got {input:?}")]
    NotADigit { input: String },
}

fn localized(bilingual: &str, language: Language) -> String {
    match language {
        Language::English => extract_english_message(bilingual),
        Language::Spanish => extract_spanish_message(bilingual),
    }
}

/// Extract English message from bilingual error string
pub fn extract_english_message(error_msg: &str) -> String {
    if let Some(pipe_index) = error_msg.find(" | ") {
        error_msg[..pipe_index].to_string()
    } else {
        error_msg.to_string()
    }
}

/// Extract Spanish message from bilingual error string
pub fn extract_spanish_message(error_msg: &str) -> String {
    if let Some(pipe_index) = error_msg.find(" | ") {
        error_msg[pipe_index + 3..].to_string()
    } else {
        error_msg.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_messages() {
        let err = VerificationError::InvalidOrExpiredCode { server_message: None };
        assert_eq!(err.message(Language::English), "Invalid or expired code");
        assert_eq!(err.message(Language::Spanish), "Código incorrecto o expirado");

        let err = VerificationError::InvalidOrExpiredCode {
            server_message: Some("Código vencido".to_string()),
        };
        assert_eq!(err.message(Language::English), "Código vencido");

        let err = VerificationError::MissingIdentity;
        assert_eq!(
            err.message(Language::Spanish),
            "Usuario no identificado. Inicia sesión de nuevo"
        );
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_resend_not_allowed_messages() {
        let err = VerificationError::ResendNotAllowed {
            reason: ResendBlock::CoolingDown { seconds_remaining: 17 },
        };
        assert_eq!(err.message(Language::English), "Please wait 17s before resending");
        assert_eq!(err.code(), error_codes::RESEND_NOT_ALLOWED);
        assert!(err.is_recoverable());

        let err = VerificationError::ResendNotAllowed {
            reason: ResendBlock::LimitReached { window_seconds_remaining: 0 },
        };
        assert!(err.message(Language::Spanish).starts_with("Límite de reenvíos"));

        let err = VerificationError::ResendNotAllowed {
            reason: ResendBlock::InFlight,
        };
        assert_eq!(err.message(Language::English), "A new code is already on its way.");
        assert_eq!(err.message(Language::Spanish), "Ya estamos enviando un nuevo código.");
    }

    #[test]
    fn test_auth_error_messages() {
        let err = AuthError::RequestFailed {
            operation: AuthOperation::ResetPassword,
            server_message: None,
        };
        assert_eq!(
            err.message(Language::Spanish),
            "No se pudo actualizar. Intenta nuevamente."
        );

        let err = AuthError::PasswordMismatch;
        assert_eq!(err.message(Language::English), "Passwords do not match");
        assert_eq!(err.code(), error_codes::VALIDATION_ERROR);
    }

    #[test]
    fn test_extract_messages() {
        assert_eq!(extract_english_message("Hello | Hola"), "Hello");
        assert_eq!(extract_spanish_message("Hello | Hola"), "Hola");
        assert_eq!(extract_spanish_message("Only one"), "Only one");
    }
}
