//! Presentation-facing summary of the resend limiter.

use ds_shared::Language;

use crate::domain::entities::resend_state::{ResendPolicy, ResendState};

/// What the resend button should show.
///
/// A blocked resend is communicated through this status rather than as an
/// error: the button is disabled and labelled with the remaining seconds or
/// with "limit reached".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResendStatus {
    Available,
    CoolingDown { seconds: u32 },
    LimitReached { window_seconds_remaining: u32 },
}

impl ResendStatus {
    pub fn from_state(state: &ResendState, policy: &ResendPolicy) -> Self {
        if state.cooldown_seconds_remaining > 0 {
            ResendStatus::CoolingDown {
                seconds: state.cooldown_seconds_remaining,
            }
        } else if state.attempts_used >= policy.max_attempts {
            ResendStatus::LimitReached {
                window_seconds_remaining: state.window_seconds_remaining,
            }
        } else {
            ResendStatus::Available
        }
    }

    /// Whether the resend button is enabled
    pub fn is_enabled(&self) -> bool {
        matches!(self, ResendStatus::Available)
    }

    /// Resend button label
    pub fn label(&self, language: Language) -> String {
        match (self, language) {
            (ResendStatus::CoolingDown { seconds }, Language::English) => {
                format!("Resend in {}s", seconds)
            }
            (ResendStatus::CoolingDown { seconds }, Language::Spanish) => {
                format!("Reenviar en {}s", seconds)
            }
            (ResendStatus::LimitReached { .. }, lang) => {
                lang.pick("Limit reached", "Límite alcanzado").to_string()
            }
            (ResendStatus::Available, lang) => {
                lang.pick("Resend code", "Reenviar código").to_string()
            }
        }
    }

    /// Attempts line shown under the button, with the remaining lock time
    /// while the attempt window runs
    pub fn attempts_line(state: &ResendState, policy: &ResendPolicy, language: Language) -> String {
        let mut line = match language {
            Language::English => format!("Attempts: {}/{}", state.attempts_used, policy.max_attempts),
            Language::Spanish => format!("Intentos: {}/{}", state.attempts_used, policy.max_attempts),
        };

        if state.attempts_used >= policy.max_attempts && state.window_seconds_remaining > 0 {
            let minutes = state.window_seconds_remaining / 60;
            let seconds = state.window_seconds_remaining % 60;
            let wait = match language {
                Language::English => format!(" - wait {}m {}s to try again", minutes, seconds),
                Language::Spanish => {
                    format!(" - espera {}m {}s para volver a intentar", minutes, seconds)
                }
            };
            line.push_str(&wait);
        }
        line
    }
}
