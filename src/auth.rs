//! Fever API authentication.
//!
//! The Fever API authenticates every request with a single `api_key` form
//! field: the lowercase hex md5 digest of `"{username}:{password}"`. The key
//! is derived once from [`Credentials`] and attached to each call by
//! [`FeverClient`](crate::fever::FeverClient).

use std::fmt;

/// Username/password pair for the Fever API.
///
/// `Debug` output never includes the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Creates credentials from a username and password.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns true when either half of the pair is blank.
    #[must_use]
    pub fn is_incomplete(&self) -> bool {
        self.username.trim().is_empty() || self.password.is_empty()
    }

    /// Derives the Fever API key for these credentials.
    #[must_use]
    pub fn api_key(&self) -> ApiKey {
        ApiKey::derive(&self.username, &self.password)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A derived Fever API key.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Derives the key as `md5("{username}:{password}")` in lowercase hex.
    #[must_use]
    pub fn derive(username: &str, password: &str) -> Self {
        let digest = md5::compute(format!("{username}:{password}"));
        Self(format!("{digest:x}"))
    }

    /// Returns the hex key for the request body.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}
