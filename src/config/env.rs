//! Process environment snapshot and credentials.
//!
//! The environment is read exactly once at startup. Everything downstream
//! receives an [`Environment`] or [`Credentials`] value instead of calling
//! `std::env` itself.

use std::collections::BTreeMap;

/// Environment variable holding the signer's private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "PRIVATE_KEY";

/// Environment variable holding the GitHub token used for gist uploads.
pub const GITHUB_API_TOKEN_ENV_VAR: &str = "GITHUB_API_TOKEN";

/// Immutable snapshot of environment variables.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: BTreeMap<String, String>,
}

impl Environment {
    /// Capture the process environment, loading `.env` first if present.
    pub fn capture() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env file");
        }
        std::env::vars().collect()
    }

    /// Get a variable. Empty values are treated as unset.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Credentials derived from this snapshot.
    pub fn credentials(&self) -> Credentials {
        Credentials {
            private_key: self.get(PRIVATE_KEY_ENV_VAR).map(str::to_string),
            github_api_token: self.get(GITHUB_API_TOKEN_ENV_VAR).map(str::to_string),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Secrets the client needs from its operator.
#[derive(Clone, Default)]
pub struct Credentials {
    pub private_key: Option<String>,
    pub github_api_token: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("github_api_token", &self.github_api_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
