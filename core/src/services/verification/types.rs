//! Types for verification gateway results

use serde::{Deserialize, Serialize};

/// Acknowledgement of a resend request; the body is backend-defined
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResendAck {
    /// Message from the backend, when it sends one
    #[serde(default)]
    pub message: Option<String>,
}
