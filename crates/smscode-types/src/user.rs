//! Configured users allowed to view codes.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

/// A configured user. The password is held as a secret and never printed.
pub struct User {
    /// Page title shown to this user instead of the process-wide default.
    pub app_title: Option<String>,
    password: SecretString,
}

impl User {
    pub fn new(app_title: Option<String>, password: impl Into<String>) -> Self {
        let app_title = app_title.filter(|t| !t.is_empty());
        Self {
            app_title,
            password: SecretString::from(password.into()),
        }
    }

    /// The stored password bytes, for constant-time comparison only.
    pub fn password_bytes(&self) -> &[u8] {
        self.password.expose_secret().as_bytes()
    }

    /// A user with an empty password can never authenticate.
    pub fn has_password(&self) -> bool {
        !self.password.expose_secret().is_empty()
    }

    /// Resolve the page title: the user's override if set, else `default`.
    pub fn title_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.app_title.as_deref().unwrap_or(default)
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("app_title", &self.app_title)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
