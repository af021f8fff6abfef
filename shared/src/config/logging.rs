//! Logging configuration

use serde::{Deserialize, Serialize};

use super::environment::Environment;

/// Output format of log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
    Compact,
}

/// How the tracing subscriber is set up
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `ds_core=debug,ds_infra=info`
    pub level: String,
    pub format: LogFormat,
    /// ANSI colors; off for JSON output collected by log shippers
    pub colored: bool,
    /// Include file and line of each event
    pub source_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            colored: true,
            source_location: false,
        }
    }
}

impl LoggingConfig {
    /// Verbose pretty logs in development, JSON elsewhere
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self {
                level: "debug".to_string(),
                source_location: true,
                ..Self::default()
            },
            Environment::Staging => Self {
                format: LogFormat::Json,
                colored: false,
                ..Self::default()
            },
            Environment::Production => Self {
                level: "warn".to_string(),
                format: LogFormat::Json,
                colored: false,
                ..Self::default()
            },
        }
    }
}
