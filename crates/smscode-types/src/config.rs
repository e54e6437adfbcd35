//! Configuration file shape for smscode.
//!
//! The file is JSON by default (TOML when the path ends in `.toml`):
//!
//! ```json
//! {
//!   "port": 7000,
//!   "debug": false,
//!   "app_title": "SMS Codes",
//!   "users": {
//!     "alice": { "app_title": "Alice's codes", "password": "s3cret" }
//!   }
//! }
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

use crate::user::User;

/// Port used when the configuration leaves `port` unset or zero.
pub const DEFAULT_PORT: u16 = 7000;

/// Top-level configuration, loaded once at startup and never mutated.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP port. `0` selects [`DEFAULT_PORT`].
    #[serde(default)]
    pub port: u16,

    /// Log every stored code message at startup.
    #[serde(default)]
    pub debug: bool,

    /// Process-wide page title.
    #[serde(default = "default_app_title")]
    pub app_title: String,

    /// Users keyed by login name.
    #[serde(default)]
    pub users: HashMap<String, UserConfig>,

    /// Location of the message store. Defaults to the Messages database in
    /// the current user's home directory.
    #[serde(default)]
    pub database_path: Option<PathBuf>,
}

fn default_app_title() -> String {
    "SMS Codes".to_string()
}

impl AppConfig {
    /// The port to listen on, substituting [`DEFAULT_PORT`] for zero.
    pub fn effective_port(&self) -> u16 {
        if self.port == 0 { DEFAULT_PORT } else { self.port }
    }

    /// Build the immutable username -> [`User`] table.
    pub fn user_table(&self) -> HashMap<String, User> {
        self.users
            .iter()
            .map(|(name, cfg)| (name.clone(), cfg.to_user()))
            .collect()
    }
}

/// A user entry as written in the configuration file.
#[derive(Clone, Deserialize)]
pub struct UserConfig {
    /// Optional per-user page title; empty means "use the default".
    #[serde(default)]
    pub app_title: String,

    #[serde(default)]
    pub password: String,
}

impl UserConfig {
    pub fn to_user(&self) -> User {
        User::new(Some(self.app_title.clone()), self.password.clone())
    }
}

impl fmt::Debug for UserConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserConfig")
            .field("app_title", &self.app_title)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
