//! Client-side resend limits for the two-factor verification flow

use serde::{Deserialize, Serialize};

/// Resend limits applied locally before any resend request leaves the client.
///
/// The backend may enforce its own limits independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResendLimitsConfig {
    /// Max accepted resends per attempt window
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Wait between consecutive resends in seconds
    #[serde(default = "default_cooldown")]
    pub cooldown_seconds: u32,

    /// Lock period started once the attempt cap is reached, in seconds
    #[serde(default = "default_window")]
    pub window_seconds: u32,
}

impl Default for ResendLimitsConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            cooldown_seconds: default_cooldown(),
            window_seconds: default_window(),
        }
    }
}

impl ResendLimitsConfig {
    /// Read overrides from `DOCSHARE_RESEND_*` variables, falling back to defaults
    pub fn from_env() -> Self {
        let read = |name: &str, fallback: u32| {
            std::env::var(name)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(fallback)
        };

        Self {
            max_attempts: read("DOCSHARE_RESEND_MAX_ATTEMPTS", default_max_attempts()),
            cooldown_seconds: read("DOCSHARE_RESEND_COOLDOWN_SECONDS", default_cooldown()),
            window_seconds: read("DOCSHARE_RESEND_WINDOW_SECONDS", default_window()),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_cooldown() -> u32 {
    60 // 1 minute
}

fn default_window() -> u32 {
    600 // 10 minutes
}
