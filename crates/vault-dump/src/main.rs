//! vault-dump binary entrypoint.
//!
//! Emits a replayable shell dump of a Vault KV v2 tree on stdout.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use vault_client::{auth, VaultClient};
use vault_dump::cli::Cli;
use vault_dump::header::HeaderInfo;
use vault_dump::{dump, DumpError};

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), DumpError> {
    let token = auth::resolve_ambient_token()?;

    let client = if cli.tls_skip_verify {
        VaultClient::with_tls_skip_verify(&cli.address, &token)?
    } else {
        VaultClient::new(&cli.address, &token)?
    };

    let identity = client.lookup_self()?;
    tracing::info!(
        display_name = %identity.display_name,
        policies = ?identity.policies,
        "authenticated to vault"
    );

    let info = HeaderInfo::capture(&cli.address, &cli.mount, &cli.prefix);
    let mut stdout = io::stdout().lock();
    dump::run_dump(&client, &cli.mount, &cli.prefix, &info, &mut stdout)?;
    stdout.flush()?;

    Ok(())
}
