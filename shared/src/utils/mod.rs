//! Common utility functions

pub mod password;
pub mod validation;

// Re-export commonly used utilities
pub use password::*;
pub use validation::*;
