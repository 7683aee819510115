//! Command-line argument parsing with clap.

use clap::Parser;

/// Dump a Vault KV v2 tree as replayable `vault` CLI commands.
///
/// Requires an already-authenticated session: the token is taken from
/// `VAULT_TOKEN` or the `~/.vault-token` helper file.
#[derive(Parser, Debug, Clone)]
#[command(name = "vault-dump")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Vault server address.
    #[arg(short, long, env = "VAULT_ADDR", default_value = "http://localhost:8200")]
    pub address: String,

    /// KV v2 mount to dump.
    #[arg(short, long, env = "VAULT_MOUNT", default_value = "secret")]
    pub mount: String,

    /// Starting path inside the mount, for partial dumps.
    #[arg(short, long, env = "TOP_VAULT_PREFIX", default_value = "/")]
    pub prefix: String,

    /// Skip TLS certificate verification.
    #[arg(long, env = "VAULT_SKIP_VERIFY")]
    pub tls_skip_verify: bool,
}
