//! Read-only HashiCorp Vault client.
//!
//! This crate provides the pieces a dump tool needs to walk a KV v2
//! secret tree: ambient token resolution, a blocking HTTP client, and a
//! `SecretSource` trait so traversal code can be tested against a fake
//! store.
//!
//! # Features
//!
//! - Token resolution matching the `vault` CLI (`VAULT_TOKEN`, then
//!   `~/.vault-token`)
//! - KV v2 listing and leaf reads, policy documents included
//! - Session verification via `auth/token/lookup-self`
//! - `FakeVault` for deterministic tests without a live server
//!
//! # Example
//!
//! ```rust,no_run
//! use vault_client::{SecretSource, VaultClient};
//! use vault_client::auth::resolve_ambient_token;
//!
//! # fn example() -> vault_client::Result<()> {
//! let token = resolve_ambient_token()?;
//! let client = VaultClient::new("http://localhost:8200", token)?;
//! client.lookup_self()?;
//!
//! let children = client.list("secret", "/")?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
// Tests need unsafe for env var manipulation in Rust 2024
#![cfg_attr(test, allow(unsafe_code))]
#![warn(missing_docs)]

pub mod auth;
pub mod client;
pub mod error;

pub use auth::TokenSource;
pub use client::{FakeVault, Leaf, SecretSource, TokenInfo, VaultClient};
pub use error::{Result, VaultError};
