//! Deployment environment detection

use serde::{Deserialize, Serialize};

/// Environment variables consulted, in order, to pick the environment
const ENV_VARS: [&str; 3] = ["DOCSHARE_ENV", "ENVIRONMENT", "RUST_ENV"];

/// Where the client runs; selects defaults and config files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }

    /// First recognised value among `DOCSHARE_ENV`, `ENVIRONMENT` and
    /// `RUST_ENV`; development when none is set
    pub fn from_env() -> Self {
        ENV_VARS
            .iter()
            .find_map(|name| std::env::var(name).ok())
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    /// TOML file layered over the defaults, e.g. `config.staging.toml`
    pub fn config_file(&self) -> String {
        format!("config.{}.toml", self.as_str())
    }

    /// Dotenv file loaded before the plain `.env`, e.g. `.env.staging`
    pub fn env_file(&self) -> String {
        format!(".env.{}", self.as_str())
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        [Environment::Development, Environment::Staging, Environment::Production]
            .into_iter()
            .find(|env| {
                env.as_str() == normalized
                    || (normalized.len() >= 3 && env.as_str().starts_with(&normalized))
            })
            .ok_or_else(|| format!("Unknown environment: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_and_short_names() {
        assert_eq!("Production".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!("dev".parse::<Environment>(), Ok(Environment::Development));
        assert_eq!("stag".parse::<Environment>(), Ok(Environment::Staging));
        assert!("pr".parse::<Environment>().is_err());
        assert!("qa".parse::<Environment>().is_err());
    }

    #[test]
    fn test_file_names() {
        assert_eq!(Environment::Development.config_file(), "config.development.toml");
        assert_eq!(Environment::Production.env_file(), ".env.production");
        assert_eq!(Environment::Staging.to_string(), "staging");
    }
}
