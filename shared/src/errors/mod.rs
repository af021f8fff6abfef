//! Error body shapes returned by the backend

use serde::{Deserialize, Serialize};

/// Error body the backend sends alongside a non-2xx status.
///
/// Endpoints are inconsistent about the key: most use `message`, the
/// password-reset endpoints use `msg`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable error message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Alternate message key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,

    /// Machine-readable error code, when provided
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiErrorBody {
    /// First non-empty message the body carries
    pub fn text(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.msg.as_deref())
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }

    /// Parse a raw response body, tolerating non-JSON payloads
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }
}

/// Error codes the client reports for local failures
pub mod error_codes {
    pub const MISSING_IDENTITY: &str = "MISSING_IDENTITY";
    pub const INVALID_OR_EXPIRED_CODE: &str = "INVALID_OR_EXPIRED_CODE";
    pub const RESEND_NOT_ALLOWED: &str = "RESEND_NOT_ALLOWED";
    pub const RESEND_DISPATCH_FAILED: &str = "RESEND_DISPATCH_FAILED";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const REQUEST_FAILED: &str = "REQUEST_FAILED";
}
