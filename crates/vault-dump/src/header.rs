//! Provenance header for dump output.
//!
//! The header is a comment block recording who made the dump, when, and
//! with which effective configuration, plus the disclaimer that the
//! snapshot is not consistent under concurrent writes.

use std::io::{self, Write};

use chrono::{DateTime, Utc};

/// Contents of the provenance header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Login name of the operator producing the dump.
    pub operator: String,
    /// Time the dump started.
    pub timestamp: DateTime<Utc>,
    /// Vault server address.
    pub address: String,
    /// Mount being dumped.
    pub mount: String,
    /// Starting path prefix.
    pub prefix: String,
}

impl HeaderInfo {
    /// Captures a header for the given effective configuration, taking
    /// the operator from the environment and the timestamp from the
    /// clock.
    #[must_use]
    pub fn capture(
        address: impl Into<String>,
        mount: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            operator: operator(),
            timestamp: Utc::now(),
            address: address.into(),
            mount: mount.into(),
            prefix: prefix.into(),
        }
    }
}

/// Writes the provenance comment block.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_header<W: Write>(out: &mut W, info: &HeaderInfo) -> io::Result<()> {
    writeln!(out, "#")?;
    writeln!(out, "# vault-dump backup")?;
    writeln!(out, "# dump made by {}", info.operator)?;
    writeln!(
        out,
        "# backup date: {} UTC",
        info.timestamp.format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(out, "# VAULT_ADDR env variable: {}", info.address)?;
    writeln!(out, "# VAULT_MOUNT env variable: {}", info.mount)?;
    writeln!(out, "# TOP_VAULT_PREFIX env variable: {}", info.prefix)?;
    writeln!(out, "#")?;
    writeln!(out, "# WARNING: not guaranteed to be consistent!")?;
    writeln!(out, "#")?;
    Ok(())
}

/// Login name of the current user, `unknown` when the environment does
/// not say.
fn operator() -> String {
    std::env::var("USER")
        .ok()
        .filter(|name| !name.is_empty())
        .or_else(|| std::env::var("LOGNAME").ok().filter(|name| !name.is_empty()))
        .unwrap_or_else(|| "unknown".to_string())
}
