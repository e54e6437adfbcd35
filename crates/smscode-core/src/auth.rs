//! Credential verification against the configured user table.

use std::collections::HashMap;

use smscode_types::user::User;
use subtle::ConstantTimeEq;

/// Username/password pair taken from an HTTP Basic `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Immutable user table, built once at startup.
#[derive(Debug)]
pub struct Authenticator {
    users: HashMap<String, User>,
}

impl Authenticator {
    pub fn new(users: HashMap<String, User>) -> Self {
        Self { users }
    }

    /// Return the user matching `credentials`, or `None`.
    ///
    /// Missing credentials, unknown users, users without a password and
    /// wrong passwords all produce the same `None`. The password comparison
    /// runs in constant time with respect to the position of the first
    /// differing byte.
    pub fn authenticate(&self, credentials: Option<&Credentials>) -> Option<&User> {
        let credentials = credentials?;
        let user = self.users.get(&credentials.username)?;
        if !user.has_password() {
            return None;
        }
        let matches: bool = credentials
            .password
            .as_bytes()
            .ct_eq(user.password_bytes())
            .into();
        matches.then_some(user)
    }
}
