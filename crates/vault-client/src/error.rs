//! Error types for Vault operations.
//!
//! This module defines all error types that can occur when talking to a
//! Vault server, including token resolution, authentication checks, and
//! KV listing and read calls.

use thiserror::Error;

/// Result type alias for Vault operations.
pub type Result<T> = std::result::Result<T, VaultError>;

/// Errors that can occur during Vault operations.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Connection to the Vault server failed (DNS, TCP, TLS, timeout).
    #[error("connection failed: {message}")]
    Connection {
        /// Description of the transport failure.
        message: String,
    },

    /// The server rejected the token (expired, revoked, insufficient policy).
    #[error("authentication failed: {reason}")]
    AuthFailed {
        /// Reason for the authentication failure.
        reason: String,
    },

    /// No token could be resolved (env var not set, helper file missing).
    #[error("vault token not found: {location}")]
    TokenNotFound {
        /// Where the token was expected.
        location: String,
    },

    /// The requested secret does not exist or is soft-deleted.
    #[error("secret not found: {path}")]
    NotFound {
        /// Path of the missing secret.
        path: String,
    },

    /// The server answered with an unexpected HTTP status.
    #[error("vault api error: status {status}: {message}")]
    ApiError {
        /// HTTP status code returned by the server.
        status: u16,
        /// Error detail reported by the server, if any.
        message: String,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("invalid response: {message}")]
    InvalidResponse {
        /// Description of the decode failure.
        message: String,
    },

    /// The configured server address is not a valid URL.
    #[error("invalid vault address: {message}")]
    InvalidAddress {
        /// Description of the address problem.
        message: String,
    },

    /// IO error (token file access).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl VaultError {
    /// Creates a `Connection` error with a message.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates an `AuthFailed` error with a reason.
    #[must_use]
    pub fn auth_failed(reason: impl Into<String>) -> Self {
        Self::AuthFailed {
            reason: reason.into(),
        }
    }

    /// Creates a `TokenNotFound` error with the location.
    #[must_use]
    pub fn token_not_found(location: impl Into<String>) -> Self {
        Self::TokenNotFound {
            location: location.into(),
        }
    }

    /// Creates a `NotFound` error with the secret path.
    #[must_use]
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Creates an `ApiError` with the HTTP status and server detail.
    #[must_use]
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Creates an `InvalidResponse` error with a message.
    #[must_use]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Creates an `InvalidAddress` error with a message.
    #[must_use]
    pub fn invalid_address(message: impl Into<String>) -> Self {
        Self::InvalidAddress {
            message: message.into(),
        }
    }

    /// Returns `true` if this error may be downgraded to a warning by a
    /// caller iterating over leaves. Only the per-secret not-found
    /// condition qualifies; everything else aborts a dump.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if this error indicates an authentication problem.
    #[must_use]
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::AuthFailed { .. } | Self::TokenNotFound { .. })
    }

    /// Returns `true` if this error indicates a configuration problem.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidAddress { .. } | Self::TokenNotFound { .. }
        )
    }
}

impl From<reqwest::Error> for VaultError {
    fn from(err: reqwest::Error) -> Self {
        Self::Connection {
            message: err.to_string(),
        }
    }
}
