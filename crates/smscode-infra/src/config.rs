//! Configuration loader for smscode.
//!
//! Reads the configuration file named on the command line and deserializes
//! it into [`AppConfig`]. Unlike most settings files, every failure here is
//! fatal: a server with no users would reject every request.

use std::path::{Path, PathBuf};

use smscode_types::config::AppConfig;
use smscode_types::error::ConfigError;

use crate::sqlite::store::default_store_path;

/// Load and validate the configuration at `path`.
///
/// Files ending in `.toml` are parsed as TOML, everything else as JSON.
pub async fn load_app_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|err| ConfigError::Unreadable {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;

    let config = parse_app_config(path, &content)?;
    validate(&config)?;

    tracing::debug!(
        path = %path.display(),
        users = config.users.len(),
        debug = config.debug,
        "Loaded configuration"
    );

    Ok(config)
}

fn parse_app_config(path: &Path, content: &str) -> Result<AppConfig, ConfigError> {
    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let parsed = if is_toml {
        toml::from_str::<AppConfig>(content).map_err(|err| err.to_string())
    } else {
        serde_json::from_str::<AppConfig>(content).map_err(|err| err.to_string())
    };

    parsed.map_err(|reason| ConfigError::Unparseable {
        path: path.to_path_buf(),
        reason,
    })
}

fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    if config.users.is_empty() {
        return Err(ConfigError::NoUsers);
    }
    for (name, user) in &config.users {
        if user.password.is_empty() {
            tracing::warn!(user = %name, "User has an empty password and can never log in");
        }
    }
    Ok(())
}

/// The message database to read: the configured path, or the current
/// user's Messages database.
pub fn resolve_store_path(config: &AppConfig) -> Result<PathBuf, ConfigError> {
    match &config.database_path {
        Some(path) => Ok(path.clone()),
        None => default_store_path(),
    }
}
