//! Token resolution for Vault sessions.
//!
//! The dump tool never logs in by itself; it picks up the token of an
//! already-authenticated session, the same way the `vault` CLI does:
//! - `VAULT_TOKEN` environment variable
//! - token helper file `~/.vault-token`
//!
//! # Example
//!
//! ```rust,no_run
//! use vault_client::auth::resolve_ambient_token;
//!
//! let token = resolve_ambient_token()?;
//! # Ok::<(), vault_client::VaultError>(())
//! ```

use crate::error::{Result, VaultError};
use std::path::PathBuf;

/// Sources a Vault token can be resolved from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    /// Direct token value.
    Token {
        /// The token string.
        token: String,
    },

    /// Token read from a file.
    TokenFile {
        /// Path to the file containing the token.
        path: PathBuf,
    },

    /// Token from an environment variable.
    TokenEnv {
        /// Name of the environment variable.
        var_name: String,
    },
}

impl TokenSource {
    /// Creates a `Token` source with the given value.
    #[must_use]
    pub fn token(token: impl Into<String>) -> Self {
        Self::Token {
            token: token.into(),
        }
    }

    /// Creates a `TokenFile` source with the given path.
    #[must_use]
    pub fn token_file(path: impl Into<PathBuf>) -> Self {
        Self::TokenFile { path: path.into() }
    }

    /// Creates a `TokenEnv` source with the given variable name.
    #[must_use]
    pub fn token_env(var_name: impl Into<String>) -> Self {
        Self::TokenEnv {
            var_name: var_name.into(),
        }
    }
}

impl Default for TokenSource {
    /// Default to reading from the `VAULT_TOKEN` environment variable.
    fn default() -> Self {
        Self::TokenEnv {
            var_name: "VAULT_TOKEN".to_string(),
        }
    }
}

/// Validates that a token value is usable.
///
/// Vault token formats vary (`hvs.`, `s.`, legacy UUIDs, arbitrary root
/// tokens), so this only rejects values that can never work: empty after
/// trimming, or containing whitespace or control characters.
///
/// # Errors
///
/// Returns `VaultError::AuthFailed` if the token is unusable.
pub fn validate_token_format(token: &str) -> Result<()> {
    let token = token.trim();

    if token.is_empty() {
        return Err(VaultError::auth_failed("token is empty"));
    }

    if token.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(VaultError::auth_failed(
            "token contains whitespace or control characters",
        ));
    }

    Ok(())
}

/// Resolves a token from the given source.
///
/// # Errors
///
/// - `VaultError::TokenNotFound` if the source does not exist
/// - `VaultError::AuthFailed` if the token value is unusable
pub fn resolve_token(source: &TokenSource) -> Result<String> {
    match source {
        TokenSource::Token { token } => {
            validate_token_format(token)?;
            Ok(token.trim().to_string())
        }

        TokenSource::TokenFile { path } => {
            if !path.exists() {
                return Err(VaultError::token_not_found(format!(
                    "file not found: {}",
                    path.display()
                )));
            }

            let content = std::fs::read_to_string(path).map_err(|e| {
                VaultError::token_not_found(format!(
                    "failed to read file {}: {}",
                    path.display(),
                    e
                ))
            })?;

            let token = content.trim().to_string();
            validate_token_format(&token)?;
            Ok(token)
        }

        TokenSource::TokenEnv { var_name } => {
            let token = std::env::var(var_name).map_err(|_| {
                VaultError::token_not_found(format!(
                    "environment variable '{var_name}' not set"
                ))
            })?;

            let token = token.trim().to_string();
            validate_token_format(&token)?;
            Ok(token)
        }
    }
}

/// Resolves a token from the ambient session: `VAULT_TOKEN` first, then
/// the token helper file `~/.vault-token`.
///
/// An empty or whitespace-only environment value is treated as unset, the
/// way the `vault` CLI treats it.
///
/// # Errors
///
/// Returns `VaultError::TokenNotFound` if neither source yields a token,
/// or `VaultError::AuthFailed` if a source yields an unusable value.
pub fn resolve_ambient_token() -> Result<String> {
    if let Ok(value) = std::env::var(default_token_env_var()) {
        if !value.trim().is_empty() {
            validate_token_format(&value)?;
            return Ok(value.trim().to_string());
        }
    }

    if let Some(path) = default_token_file_path() {
        if path.exists() {
            return resolve_token(&TokenSource::token_file(path));
        }
    }

    Err(VaultError::token_not_found(format!(
        "{} environment variable or ~/.vault-token",
        default_token_env_var()
    )))
}

/// Returns the token helper file path, `~/.vault-token`.
///
/// `None` if the home directory cannot be determined.
#[must_use]
pub fn default_token_file_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".vault-token"))
}

/// Returns the environment variable name the `vault` CLI uses for tokens.
#[must_use]
pub fn default_token_env_var() -> &'static str {
    "VAULT_TOKEN"
}
