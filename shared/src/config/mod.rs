//! Configuration module with business-specific sub-modules
//!
//! - `api` - Backend base URL and HTTP client timeouts
//! - `environment` - Environment detection
//! - `logging` - Tracing subscriber settings
//! - `rate_limit` - Client-side resend limits for the verification flow

pub mod api;
pub mod environment;
pub mod logging;
pub mod rate_limit;

use serde::{Deserialize, Serialize};

use crate::types::Language;

// Re-export commonly used types
pub use api::ApiClientConfig;
pub use environment::Environment;
pub use logging::{LogFormat, LoggingConfig};
pub use rate_limit::ResendLimitsConfig;

/// Complete client configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Backend API configuration
    #[serde(default)]
    pub api: ApiClientConfig,

    /// Resend limits for the verification flow
    #[serde(default)]
    pub resend: ResendLimitsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Language used for user-visible messages
    #[serde(default)]
    pub language: Language,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            api: ApiClientConfig::default(),
            resend: ResendLimitsConfig::default(),
            logging: LoggingConfig::for_environment(env),
            language: Language::default(),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiClientConfig::new("http://localhost:3000"),
            resend: ResendLimitsConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Development),
            language: Language::default(),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiClientConfig::new("https://api.docshare.app").with_timeout_secs(15),
            resend: ResendLimitsConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Production),
            language: Language::default(),
        }
    }

    /// Load configuration from environment
    pub fn from_env() -> Self {
        let env = Environment::from_env();
        let mut config = match env {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
            Environment::Staging => {
                let mut config = Self::development();
                config.environment = Environment::Staging;
                config.logging = LoggingConfig::for_environment(Environment::Staging);
                config
            }
        };

        if let Ok(base_url) = std::env::var("DOCSHARE_API_URL") {
            config.api.base_url = base_url;
        }
        if let Some(language) = std::env::var("DOCSHARE_LANGUAGE")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.language = language;
        }
        config.resend = ResendLimitsConfig::from_env();
        config
    }
}
