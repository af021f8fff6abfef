//! Configuration loading for the auth client
//!
//! Sources, later ones overriding earlier ones:
//! 1. Environment defaults from `AppConfig::from_env` (after loading `.env` files)
//! 2. The TOML file for the current environment, e.g. `config.development.toml`
//! 3. `DOCSHARE__<SECTION>__<KEY>` environment variables, e.g. `DOCSHARE__API__BASE_URL`

use std::path::{Path, PathBuf};

use ::config::{Config, Environment as EnvSource, File};
use tracing::debug;

use ds_shared::{AppConfig, Environment};

use crate::InfrastructureError;

/// Prefix of the layered environment overrides
pub const ENV_PREFIX: &str = "DOCSHARE";

/// Load configuration using the config file of the detected environment
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    load_config_from(None)
}

/// Load configuration, reading `path` instead of the environment's config
/// file when given. An explicit path must exist; the default file is optional.
pub fn load_config_from(path: Option<&Path>) -> Result<AppConfig, InfrastructureError> {
    let environment = Environment::from_env();
    dotenvy::from_filename(environment.env_file()).ok();
    dotenvy::dotenv().ok();

    // Re-read after the .env files may have changed the environment
    let defaults = AppConfig::from_env();
    let file = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(defaults.environment.config_file()));

    let settings = Config::builder()
        .add_source(Config::try_from(&defaults)?)
        .add_source(File::from(file.clone()).required(path.is_some()))
        .add_source(
            EnvSource::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;
    debug!(
        environment = %config.environment,
        config_file = %file.display(),
        base_url = %config.api.base_url,
        event = "config_loaded",
        "Configuration loaded"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}.toml", name, std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = write_temp_config(
            "docshare-config-file",
            r#"
language = "es"

[api]
base_url = "http://backend.test:8080"

[resend]
cooldown_seconds = 30
"#,
        );

        let config = load_config_from(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.api.base_url, "http://backend.test:8080");
        assert_eq!(config.resend.cooldown_seconds, 30);
        assert_eq!(config.resend.max_attempts, 3);
        assert_eq!(config.language, ds_shared::Language::Spanish);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let path = std::env::temp_dir().join("docshare-does-not-exist.toml");
        assert!(matches!(
            load_config_from(Some(&path)),
            Err(InfrastructureError::Config(_))
        ));
    }
}
