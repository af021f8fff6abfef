//! Configuration for the authentication flows

use ds_shared::Language;

/// Configuration for the authentication flow service
#[derive(Debug, Clone, Default)]
pub struct AuthFlowConfig {
    /// Language of locally produced messages
    pub language: Language,
}

impl AuthFlowConfig {
    pub fn with_language(language: Language) -> Self {
        Self { language }
    }
}
