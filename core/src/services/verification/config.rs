//! Configuration for the verification flow

use std::time::Duration;

use ds_shared::config::ResendLimitsConfig;

use crate::domain::entities::resend_state::ResendPolicy;

/// Configuration for the verification flow controller
#[derive(Debug, Clone)]
pub struct VerificationFlowConfig {
    /// Resend limits
    pub policy: ResendPolicy,
    /// Period of the countdown ticker; one tick removes one second from each countdown
    pub tick_interval: Duration,
}

impl Default for VerificationFlowConfig {
    fn default() -> Self {
        Self {
            policy: ResendPolicy::default(),
            tick_interval: Duration::from_secs(1),
        }
    }
}

impl From<ResendLimitsConfig> for VerificationFlowConfig {
    fn from(limits: ResendLimitsConfig) -> Self {
        Self {
            policy: limits.into(),
            ..Default::default()
        }
    }
}
