//! Error types for the dump binary.

use thiserror::Error;
use vault_client::VaultError;

/// Result type alias for dump operations.
pub type Result<T> = std::result::Result<T, DumpError>;

/// Errors that can occur while producing a dump.
#[derive(Debug, Error)]
pub enum DumpError {
    /// Vault API, token, or session failure.
    #[error("vault error: {0}")]
    Vault(#[from] VaultError),

    /// Failure writing the dump to the output stream.
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vault_error_display() {
        let err: DumpError = VaultError::auth_failed("permission denied").into();
        assert_eq!(
            err.to_string(),
            "vault error: authentication failed: permission denied"
        );
    }

    #[test]
    fn test_output_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "broken pipe");
        let err: DumpError = io_err.into();
        assert!(err.to_string().starts_with("output error:"));
        assert!(err.to_string().contains("broken pipe"));
    }

    #[test]
    fn test_vault_error_from_conversion() {
        let err: DumpError = VaultError::not_found("/a/b").into();
        assert!(matches!(err, DumpError::Vault(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DumpError>();
    }
}
