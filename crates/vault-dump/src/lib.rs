//! # vault-dump
//!
//! Dump a Vault KV v2 secret tree as replayable shell commands.
//!
//! The walk reads every leaf under a starting prefix and emits:
//! - `vault kv put` lines for data leaves, keys sorted
//! - `vault policy write` pipelines for policy leaves
//! - warning comments for leaves deleted mid-walk
//!
//! # Architecture
//!
//! The binary authenticates against a running Vault, then hands a
//! [`vault_client::SecretSource`] to the walker. All command lines go
//! to stdout; diagnostics go to stderr.
//!
//! ```text
//! ┌────────────┐   SecretSource    ┌────────────────┐
//! │ vault-dump │◄─────────────────►│  vault-client  │
//! └─────┬──────┘   (list / read)   └────────────────┘
//!       │
//!       ▼ stdout
//!   # header, vault kv put ..., echo ... | vault policy write ...
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod dump;
pub mod error;
pub mod header;
pub mod output;

pub use cli::Cli;
pub use dump::{canonical_prefix, run_dump, walk};
pub use error::{DumpError, Result};
pub use header::{write_header, HeaderInfo};
