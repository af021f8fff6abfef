//! Resend limiter state for the verification flow.
//!
//! A resend is allowed only when no cooldown is running and fewer than
//! `max_attempts` resends were accepted. Reaching the cap starts the attempt
//! window. Once the window runs out the attempt count is left at the cap,
//! so resending stays blocked for the rest of the session.

use serde::{Deserialize, Serialize};

use ds_shared::config::ResendLimitsConfig;

/// Maximum number of accepted resends per attempt window
pub const MAX_ATTEMPTS: u32 = 3;

/// Seconds to wait between consecutive resends
pub const COOLDOWN_SECONDS: u32 = 60;

/// Seconds the attempt window stays locked once the cap is reached
pub const WINDOW_SECONDS: u32 = 600;

/// Limits applied by the resend limiter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResendPolicy {
    pub max_attempts: u32,
    pub cooldown_seconds: u32,
    pub window_seconds: u32,
}

impl Default for ResendPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            cooldown_seconds: COOLDOWN_SECONDS,
            window_seconds: WINDOW_SECONDS,
        }
    }
}

impl From<ResendLimitsConfig> for ResendPolicy {
    fn from(config: ResendLimitsConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            cooldown_seconds: config.cooldown_seconds,
            window_seconds: config.window_seconds,
        }
    }
}

/// Why a resend was refused locally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResendBlock {
    /// The cooldown after the previous resend is still running
    CoolingDown { seconds_remaining: u32 },
    /// The attempt cap is reached
    LimitReached { window_seconds_remaining: u32 },
    /// Another resend request has not completed yet
    InFlight,
}

/// Phase of the resend sub-flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResendPhase {
    /// No cooldown, attempts below the cap
    Idle,
    /// Cooldown running
    CoolingDown,
    /// Cap reached and the attempt window is running
    WindowLocked,
    /// Cap reached and the window ran out; attempts are never reset
    Exhausted,
}

/// Counters of the resend limiter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResendState {
    pub cooldown_seconds_remaining: u32,
    pub attempts_used: u32,
    pub window_seconds_remaining: u32,
}

impl ResendState {
    /// Initial state: idle with no attempts used
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance both countdowns by one second, each floored at zero
    pub fn tick(self) -> Self {
        Self {
            cooldown_seconds_remaining: self.cooldown_seconds_remaining.saturating_sub(1),
            attempts_used: self.attempts_used,
            window_seconds_remaining: self.window_seconds_remaining.saturating_sub(1),
        }
    }

    /// Whether either countdown still needs ticking
    pub fn is_counting_down(&self) -> bool {
        self.cooldown_seconds_remaining > 0 || self.window_seconds_remaining > 0
    }

    /// Check the resend preconditions.
    ///
    /// The attempt cap is reported ahead of the cooldown.
    pub fn check_resend(&self, policy: &ResendPolicy) -> Result<(), ResendBlock> {
        if self.attempts_used >= policy.max_attempts {
            return Err(ResendBlock::LimitReached {
                window_seconds_remaining: self.window_seconds_remaining,
            });
        }
        if self.cooldown_seconds_remaining > 0 {
            return Err(ResendBlock::CoolingDown {
                seconds_remaining: self.cooldown_seconds_remaining,
            });
        }
        Ok(())
    }

    pub fn can_resend(&self, policy: &ResendPolicy) -> bool {
        self.check_resend(policy).is_ok()
    }

    /// State after the backend accepted a resend
    pub fn after_accepted_resend(self, policy: &ResendPolicy) -> Self {
        let attempts_used = (self.attempts_used + 1).min(policy.max_attempts);
        let window_seconds_remaining = if attempts_used == policy.max_attempts {
            policy.window_seconds
        } else {
            self.window_seconds_remaining
        };

        Self {
            cooldown_seconds_remaining: policy.cooldown_seconds,
            attempts_used,
            window_seconds_remaining,
        }
    }

    pub fn phase(&self, policy: &ResendPolicy) -> ResendPhase {
        if self.cooldown_seconds_remaining > 0 {
            ResendPhase::CoolingDown
        } else if self.attempts_used >= policy.max_attempts {
            if self.window_seconds_remaining > 0 {
                ResendPhase::WindowLocked
            } else {
                ResendPhase::Exhausted
            }
        } else {
            ResendPhase::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(cooldown: u32, attempts: u32, window: u32) -> ResendState {
        ResendState {
            cooldown_seconds_remaining: cooldown,
            attempts_used: attempts,
            window_seconds_remaining: window,
        }
    }

    #[test]
    fn test_first_resend_starts_cooldown_only() {
        let policy = ResendPolicy::default();
        let next = ResendState::new().after_accepted_resend(&policy);
        assert_eq!(next, state(60, 1, 0));
        assert_eq!(next.phase(&policy), ResendPhase::CoolingDown);
    }

    #[test]
    fn test_reaching_cap_starts_window() {
        let policy = ResendPolicy::default();
        let next = state(0, 2, 0).after_accepted_resend(&policy);
        assert_eq!(next, state(60, 3, 600));
    }

    #[test]
    fn test_cap_blocks_while_window_runs() {
        let policy = ResendPolicy::default();
        let current = state(0, 3, 600);
        assert_eq!(
            current.check_resend(&policy),
            Err(ResendBlock::LimitReached { window_seconds_remaining: 600 })
        );
        assert_eq!(current.phase(&policy), ResendPhase::WindowLocked);
    }

    #[test]
    fn test_cooldown_blocks_resend() {
        let policy = ResendPolicy::default();
        assert_eq!(
            state(5, 1, 0).check_resend(&policy),
            Err(ResendBlock::CoolingDown { seconds_remaining: 5 })
        );
    }

    #[test]
    fn test_tick_floors_at_zero() {
        let mut current = state(2, 1, 1);
        for _ in 0..5 {
            current = current.tick();
        }
        assert_eq!(current, state(0, 1, 0));
        assert!(!current.is_counting_down());
        assert_eq!(ResendState::new().tick(), ResendState::new());
    }

    #[test]
    fn test_five_ticks_end_cooldown() {
        let policy = ResendPolicy::default();
        let mut current = state(5, 1, 0);
        for _ in 0..5 {
            current = current.tick();
        }
        assert_eq!(current.cooldown_seconds_remaining, 0);
        assert!(current.can_resend(&policy));
        assert_eq!(current.phase(&policy), ResendPhase::Idle);
    }

    #[test]
    fn test_expired_window_keeps_attempts_at_cap() {
        let policy = ResendPolicy::default();
        let mut current = state(60, 3, 600);
        for _ in 0..600 {
            current = current.tick();
        }
        assert_eq!(current, state(0, 3, 0));
        assert_eq!(current.phase(&policy), ResendPhase::Exhausted);
        assert_eq!(
            current.check_resend(&policy),
            Err(ResendBlock::LimitReached { window_seconds_remaining: 0 })
        );
    }

    #[test]
    fn test_resends_spaced_by_cooldown_until_cap() {
        let policy = ResendPolicy::default();
        let mut current = ResendState::new();

        for attempt in 1..=MAX_ATTEMPTS {
            assert!(current.can_resend(&policy), "resend {} should be allowed", attempt);
            current = current.after_accepted_resend(&policy);
            assert_eq!(current.attempts_used, attempt);
            for _ in 0..COOLDOWN_SECONDS {
                current = current.tick();
            }
        }

        assert!(current.window_seconds_remaining > 0);
        assert!(matches!(
            current.check_resend(&policy),
            Err(ResendBlock::LimitReached { .. })
        ));
    }

    #[test]
    fn test_attempts_never_exceed_cap() {
        let policy = ResendPolicy::default();
        let next = state(0, 3, 0).after_accepted_resend(&policy);
        assert_eq!(next.attempts_used, 3);
    }

    #[test]
    fn test_policy_from_config() {
        let config = ResendLimitsConfig {
            max_attempts: 5,
            cooldown_seconds: 30,
            window_seconds: 120,
        };
        let policy = ResendPolicy::from(config);
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.cooldown_seconds, 30);
        assert_eq!(policy.window_seconds, 120);
    }
}
