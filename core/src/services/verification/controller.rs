//! Verification flow controller
//!
//! Owns the code entry of one verification session, submits it, and decides
//! whether a resend may be requested. Resend eligibility combines a cooldown
//! after every accepted resend with a cap on accepted resends; reaching the
//! cap starts a lock window. Counters are local to the controller and are
//! discarded with it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::domain::entities::credentials::Credentials;
use crate::domain::entities::resend_state::{ResendBlock, ResendPhase, ResendPolicy, ResendState};
use crate::domain::entities::verification_session::VerificationSession;
use crate::domain::value_objects::resend_status::ResendStatus;
use crate::errors::{CodeEntryError, VerificationError};
use crate::repositories::session::SessionContext;

use super::config::VerificationFlowConfig;
use super::ticker::CountdownTicker;
use super::traits::VerificationGatewayTrait;

/// Raised while an operation is pending, lowered on every exit path
struct FlagGuard<'a>(&'a AtomicBool);

impl<'a> FlagGuard<'a> {
    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::Release);
        Self(flag)
    }

    /// Raise the flag only if it is currently lowered
    fn try_raise(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for FlagGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Controller for the two-factor verification step
pub struct VerificationFlowController<G: VerificationGatewayTrait, S: SessionContext> {
    /// Backend verification endpoints
    gateway: Arc<G>,
    /// Session-scoped storage for the pending username and issued credentials
    session_context: Arc<S>,
    /// Flow configuration
    config: VerificationFlowConfig,
    /// Code entry state
    session: VerificationSession,
    /// Resend counters, published to subscribers on every change
    resend: Arc<watch::Sender<ResendState>>,
    /// Countdown task driving the resend counters
    ticker: Mutex<CountdownTicker>,
    /// Set while a code submission is pending
    loading: AtomicBool,
    /// Set while a resend request is pending
    resending: AtomicBool,
}

impl<G: VerificationGatewayTrait, S: SessionContext> VerificationFlowController<G, S> {
    /// Start a verification flow for the username pending in `session_context`
    ///
    /// # Arguments
    ///
    /// * `gateway` - Backend verification endpoints
    /// * `session_context` - Session storage holding the pending username
    /// * `config` - Flow configuration
    pub fn new(gateway: Arc<G>, session_context: Arc<S>, config: VerificationFlowConfig) -> Self {
        let session = VerificationSession::new(session_context.pending_username());
        let (resend, _) = watch::channel(ResendState::new());

        info!(
            session_id = %session.id(),
            has_identity = session.username().is_some(),
            event = "verification_flow_started",
            "Verification flow started"
        );

        Self {
            gateway,
            session_context,
            config,
            session,
            resend: Arc::new(resend),
            ticker: Mutex::new(CountdownTicker::new()),
            loading: AtomicBool::new(false),
            resending: AtomicBool::new(false),
        }
    }

    /// Resume from previously observed resend counters.
    ///
    /// Starts the countdown if either counter is still running, so it must be
    /// called from within a tokio runtime.
    pub fn with_resend_state(self, state: ResendState) -> Self {
        self.resend.send_replace(state);
        self.start_countdown();
        self
    }

    pub fn session(&self) -> &VerificationSession {
        &self.session
    }

    pub fn policy(&self) -> &ResendPolicy {
        &self.config.policy
    }

    pub fn set_digit(&mut self, index: usize, input: &str) -> Result<(), CodeEntryError> {
        self.session.set_digit(index, input)
    }

    pub fn clear_digit(&mut self, index: usize) -> Result<(), CodeEntryError> {
        self.session.clear_digit(index)
    }

    pub fn paste_code(&mut self, start: usize, text: &str) -> Result<usize, CodeEntryError> {
        self.session.paste_code(start, text)
    }

    pub fn clear_code(&mut self) {
        self.session.clear_code();
    }

    /// Submit the entered code
    ///
    /// The code is the concatenation of the filled slots; an incomplete code
    /// is sent as-is and left for the backend to reject. On success the
    /// issued credentials are written to the session context before being
    /// returned. Resend counters are never touched.
    ///
    /// # Returns
    ///
    /// * `Ok(Credentials)` - Token and user record issued by the backend
    /// * `Err(VerificationError::MissingIdentity)` - No pending username
    /// * `Err(VerificationError::InvalidOrExpiredCode)` - Backend rejected the code or failed
    pub async fn submit_code(&self) -> Result<Credentials, VerificationError> {
        let username = self.session.username().ok_or_else(|| {
            warn!(
                session_id = %self.session.id(),
                event = "missing_identity",
                "Verification attempted without a pending username"
            );
            VerificationError::MissingIdentity
        })?;
        let code = self.session.code();

        let _loading = FlagGuard::raise(&self.loading);
        info!(
            session_id = %self.session.id(),
            username = username,
            code_length = code.len(),
            event = "verification_code_submitted",
            "Submitting verification code"
        );

        match self.gateway.verify_code(username, &code).await {
            Ok(credentials) => {
                self.session_context.store_credentials(&credentials);
                let elapsed = Utc::now() - self.session.started_at();
                info!(
                    session_id = %self.session.id(),
                    username = username,
                    elapsed_secs = elapsed.num_seconds(),
                    event = "verification_succeeded",
                    "Verification code accepted"
                );
                Ok(credentials)
            }
            Err(e) => {
                warn!(
                    session_id = %self.session.id(),
                    username = username,
                    error = %e,
                    event = "verification_failed",
                    "Verification code rejected"
                );
                Err(VerificationError::InvalidOrExpiredCode {
                    server_message: e.server_message().map(str::to_string),
                })
            }
        }
    }

    /// Request a new code
    ///
    /// Refused locally, without contacting the backend, while the cooldown
    /// runs, once the attempt cap is reached, or while another resend is
    /// still pending. An accepted resend bumps the attempt count, restarts
    /// the cooldown, starts the lock window when the cap is reached, and
    /// restarts the countdown task.
    ///
    /// # Returns
    ///
    /// * `Ok(ResendState)` - Counters after the accepted resend
    /// * `Err(VerificationError::MissingIdentity)` - No pending username
    /// * `Err(VerificationError::ResendNotAllowed)` - Local precondition failed
    /// * `Err(VerificationError::ResendDispatchFailed)` - Backend unreachable or refused
    pub async fn resend_code(&self) -> Result<ResendState, VerificationError> {
        let username = self
            .session
            .username()
            .ok_or(VerificationError::MissingIdentity)?;

        let Some(_resending) = FlagGuard::try_raise(&self.resending) else {
            debug!(
                session_id = %self.session.id(),
                event = "resend_in_flight",
                "Resend already pending"
            );
            return Err(VerificationError::ResendNotAllowed {
                reason: ResendBlock::InFlight,
            });
        };

        let current = self.resend_state();
        if let Err(reason) = current.check_resend(&self.config.policy) {
            warn!(
                session_id = %self.session.id(),
                username = username,
                reason = ?reason,
                attempts_used = current.attempts_used,
                event = "resend_blocked",
                "Resend request blocked by local limits"
            );
            return Err(VerificationError::ResendNotAllowed { reason });
        }

        if let Err(e) = self.gateway.resend_code(username).await {
            warn!(
                session_id = %self.session.id(),
                username = username,
                error = %e,
                event = "resend_dispatch_failed",
                "Failed to request a new verification code"
            );
            return Err(VerificationError::ResendDispatchFailed {
                cause: e.to_string(),
            });
        }

        let policy = self.config.policy;
        let mut updated = current;
        self.resend.send_modify(|state| {
            *state = state.after_accepted_resend(&policy);
            updated = *state;
        });
        self.lock_ticker()
            .restart(self.resend.clone(), self.config.tick_interval);

        info!(
            session_id = %self.session.id(),
            username = username,
            attempts_used = updated.attempts_used,
            max_attempts = policy.max_attempts,
            window_started = updated.window_seconds_remaining == policy.window_seconds,
            event = "verification_code_resent",
            "Verification code resent"
        );
        Ok(updated)
    }

    /// Advance both countdowns by one second outside the ticker
    pub fn tick(&self) -> ResendState {
        let mut updated = ResendState::default();
        self.resend.send_modify(|state| {
            *state = state.tick();
            updated = *state;
        });
        updated
    }

    pub fn resend_state(&self) -> ResendState {
        *self.resend.borrow()
    }

    /// Receiver notified on every change of the resend counters
    pub fn subscribe(&self) -> watch::Receiver<ResendState> {
        self.resend.subscribe()
    }

    pub fn phase(&self) -> ResendPhase {
        self.resend_state().phase(&self.config.policy)
    }

    pub fn status(&self) -> ResendStatus {
        ResendStatus::from_state(&self.resend_state(), &self.config.policy)
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    pub fn is_resending(&self) -> bool {
        self.resending.load(Ordering::Acquire)
    }

    /// Whether the countdown task is alive
    pub fn is_ticking(&self) -> bool {
        self.lock_ticker().is_running()
    }

    /// Stop the countdown; the counters keep their current values
    pub fn dispose(&self) {
        self.lock_ticker().cancel();
        debug!(
            session_id = %self.session.id(),
            event = "verification_flow_disposed",
            "Verification flow disposed"
        );
    }

    fn start_countdown(&self) {
        self.lock_ticker()
            .ensure_running(self.resend.clone(), self.config.tick_interval);
    }

    fn lock_ticker(&self) -> MutexGuard<'_, CountdownTicker> {
        // The ticker handle stays consistent even if a holder panicked
        self.ticker.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
