//! Value objects representing immutable domain concepts.

pub mod resend_status;

// Re-export commonly used types
pub use resend_status::ResendStatus;
