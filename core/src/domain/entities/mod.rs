//! Domain entities for the verification flow.

pub mod credentials;
pub mod resend_state;
pub mod verification_session;

// Re-export commonly used types
pub use credentials::{Credentials, UserRecord};
pub use resend_state::{
    ResendBlock, ResendPhase, ResendPolicy, ResendState, COOLDOWN_SECONDS, MAX_ATTEMPTS,
    WINDOW_SECONDS,
};
pub use verification_session::{VerificationSession, CODE_LENGTH};
