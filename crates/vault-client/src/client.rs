//! Vault HTTP client and the listing/read capability trait.
//!
//! This module provides read-only access to a Vault server's KV v2 API:
//! listing container paths and reading leaf secrets. The capability is
//! expressed as a trait so traversal code can run against a fake store
//! in tests instead of a live server.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{Map, Value};
use url::Url;

use crate::error::{Result, VaultError};

/// Request timeout for individual API calls, in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// A leaf secret read from the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Leaf {
    /// Key-value secret data.
    Data(Map<String, Value>),

    /// Policy document.
    Policy {
        /// Raw policy rules body.
        rules: String,
    },
}

/// Identity details of the current token, from `auth/token/lookup-self`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenInfo {
    /// Human-readable display name of the token.
    #[serde(default)]
    pub display_name: String,
    /// Policies attached to the token.
    #[serde(default)]
    pub policies: Vec<String>,
}

/// Trait for read-only access to a secret tree.
///
/// The two methods mirror the service API: containers are listed, leaves
/// are read. Implementations never mutate the remote tree. A fake
/// implementation backs deterministic tests.
pub trait SecretSource: Send + Sync {
    /// Lists the child segments of a container path. Segments ending in
    /// `/` denote nested containers.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::NotFound` if nothing exists under the path,
    /// or another variant for transport, auth, and protocol failures.
    fn list(&self, mount: &str, path: &str) -> Result<Vec<String>>;

    /// Reads the leaf secret at a path.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::NotFound` if the leaf does not exist or is
    /// soft-deleted, or another variant for transport, auth, and
    /// protocol failures.
    fn read(&self, mount: &str, path: &str) -> Result<Leaf>;
}

/// Envelope of a KV v2 listing response.
#[derive(Debug, Deserialize)]
struct ListResponse {
    data: ListData,
}

#[derive(Debug, Deserialize)]
struct ListData {
    keys: Vec<String>,
}

/// Envelope of a `lookup-self` response.
#[derive(Debug, Deserialize)]
struct LookupSelfResponse {
    data: TokenInfo,
}

/// Error body returned by the Vault API.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    errors: Vec<String>,
}

/// Blocking HTTP client for a Vault server.
///
/// Holds the session token and issues KV v2 listing and read calls. The
/// client is constructed explicitly and passed down to the traversal;
/// there is no global session state.
#[derive(Debug)]
pub struct VaultClient {
    http: reqwest::blocking::Client,
    address: String,
    token: String,
}

impl VaultClient {
    /// Creates a client for the given server address and session token.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::InvalidAddress` if the address is not a
    /// valid `http`/`https` URL, or `VaultError::Connection` if the
    /// HTTP client cannot be constructed.
    pub fn new(address: &str, token: impl Into<String>) -> Result<Self> {
        Self::build(address, token.into(), false)
    }

    /// Creates a client that skips TLS certificate verification.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`VaultClient::new`].
    pub fn with_tls_skip_verify(address: &str, token: impl Into<String>) -> Result<Self> {
        Self::build(address, token.into(), true)
    }

    fn build(address: &str, token: String, tls_skip_verify: bool) -> Result<Self> {
        let parsed = Url::parse(address)
            .map_err(|e| VaultError::invalid_address(format!("{address}: {e}")))?;

        match parsed.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(VaultError::invalid_address(format!(
                    "unsupported scheme '{scheme}' in {address}"
                )));
            }
        }

        let mut builder = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS));

        if tls_skip_verify {
            tracing::warn!("TLS certificate verification disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder.build()?;

        Ok(Self {
            http,
            address: parsed.as_str().trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Returns the normalized server address the client talks to.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Verifies the session by looking up the current token.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::AuthFailed` if the server rejects the token,
    /// or a transport/protocol variant for other failures.
    pub fn lookup_self(&self) -> Result<TokenInfo> {
        let url = format!("{}/v1/auth/token/lookup-self", self.address);
        let (status, body) = self.get(&url)?;

        match status {
            200 => {
                let response: LookupSelfResponse = serde_json::from_str(&body).map_err(|e| {
                    VaultError::invalid_response(format!("lookup-self returned invalid json: {e}"))
                })?;
                tracing::debug!(
                    display_name = %response.data.display_name,
                    "token lookup succeeded"
                );
                Ok(response.data)
            }
            401 | 403 => Err(VaultError::auth_failed(api_message(&body))),
            status => Err(VaultError::api_error(status, api_message(&body))),
        }
    }

    /// Parses a KV v2 listing response body into child segments.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::InvalidResponse` if the body is not a valid
    /// listing envelope.
    pub fn parse_listing(body: &str) -> Result<Vec<String>> {
        let response: ListResponse = serde_json::from_str(body).map_err(|e| {
            VaultError::invalid_response(format!("listing returned invalid json: {e}"))
        })?;
        Ok(response.data.keys)
    }

    /// Parses a KV v2 read response body into a leaf.
    ///
    /// Secret payloads arrive wrapped as `data.data`; policy documents
    /// carry a `rules` body instead. A payload with neither, or with a
    /// null inner value, is the soft-delete case.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::NotFound` for soft-deleted payloads and
    /// `VaultError::InvalidResponse` for undecodable bodies.
    pub fn parse_leaf(body: &str, path: &str) -> Result<Leaf> {
        let root: Value = serde_json::from_str(body).map_err(|e| {
            VaultError::invalid_response(format!("leaf read returned invalid json: {e}"))
        })?;

        if let Some(inner) = root.pointer("/data/data") {
            return match inner {
                Value::Object(map) => Ok(Leaf::Data(map.clone())),
                Value::Null => Err(VaultError::not_found(path)),
                _ => Err(VaultError::invalid_response(format!(
                    "secret data at {path} is not a map"
                ))),
            };
        }

        let rules = root
            .pointer("/data/rules")
            .and_then(Value::as_str)
            .or_else(|| root.get("rules").and_then(Value::as_str));
        if let Some(rules) = rules {
            return Ok(Leaf::Policy {
                rules: rules.to_string(),
            });
        }

        Err(VaultError::not_found(path))
    }

    fn list_url(&self, mount: &str, path: &str) -> String {
        format!("{}/v1/{}/metadata{}?list=true", self.address, mount, path)
    }

    fn read_url(&self, mount: &str, path: &str) -> String {
        format!("{}/v1/{}/data{}", self.address, mount, path)
    }

    fn get(&self, url: &str) -> Result<(u16, String)> {
        let response = self
            .http
            .get(url)
            .header("X-Vault-Token", &self.token)
            .send()?;

        let status = response.status().as_u16();
        let body = response.text()?;
        Ok((status, body))
    }
}

impl SecretSource for VaultClient {
    fn list(&self, mount: &str, path: &str) -> Result<Vec<String>> {
        tracing::debug!(mount, path, "listing container");
        let url = self.list_url(mount, path);
        let (status, body) = self.get(&url)?;

        match status {
            200 => Self::parse_listing(&body),
            401 | 403 => Err(VaultError::auth_failed(api_message(&body))),
            404 => Err(VaultError::not_found(path)),
            status => Err(VaultError::api_error(status, api_message(&body))),
        }
    }

    fn read(&self, mount: &str, path: &str) -> Result<Leaf> {
        tracing::debug!(mount, path, "reading leaf");
        let url = self.read_url(mount, path);
        let (status, body) = self.get(&url)?;

        match status {
            200 => Self::parse_leaf(&body, path),
            401 | 403 => Err(VaultError::auth_failed(api_message(&body))),
            404 => Err(VaultError::not_found(path)),
            status => Err(VaultError::api_error(status, api_message(&body))),
        }
    }
}

/// Extracts the error detail from a Vault API response body.
fn api_message(body: &str) -> String {
    if let Ok(response) = serde_json::from_str::<ErrorResponse>(body) {
        if !response.errors.is_empty() {
            return response.errors.join("; ");
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "no error detail".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Entry stored in the fake: either a readable leaf or a tombstone that
/// still shows up in listings.
#[derive(Debug, Clone)]
enum FakeEntry {
    Data(Value),
    Policy(String),
    Tombstone,
}

/// A fake secret store for testing.
///
/// Leaves are registered at absolute paths; listings are derived from
/// the registered paths, in insertion order. The mount argument is
/// ignored, the fake answers for every mount.
#[derive(Debug, Default)]
pub struct FakeVault {
    entries: Vec<(String, FakeEntry)>,
}

impl FakeVault {
    /// Create a new fake store with no entries.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key-value leaf. `data` must be a JSON object; anything else
    /// surfaces as an invalid-response error on read, like a malformed
    /// server payload would.
    #[must_use]
    pub fn with_secret(mut self, path: impl Into<String>, data: Value) -> Self {
        self.entries.push((path.into(), FakeEntry::Data(data)));
        self
    }

    /// Add a policy leaf with the given rules body.
    #[must_use]
    pub fn with_policy(mut self, path: impl Into<String>, rules: impl Into<String>) -> Self {
        self.entries
            .push((path.into(), FakeEntry::Policy(rules.into())));
        self
    }

    /// Add a tombstoned leaf: listed, but not-found on read.
    #[must_use]
    pub fn with_tombstone(mut self, path: impl Into<String>) -> Self {
        self.entries.push((path.into(), FakeEntry::Tombstone));
        self
    }
}

impl SecretSource for FakeVault {
    fn list(&self, _mount: &str, path: &str) -> Result<Vec<String>> {
        let mut children = Vec::new();

        for (entry_path, _) in &self.entries {
            let Some(remainder) = entry_path.strip_prefix(path) else {
                continue;
            };
            if remainder.is_empty() {
                continue;
            }

            let child = match remainder.split_once('/') {
                Some((segment, _)) => format!("{segment}/"),
                None => remainder.to_string(),
            };
            if !children.contains(&child) {
                children.push(child);
            }
        }

        if children.is_empty() {
            return Err(VaultError::not_found(path));
        }
        Ok(children)
    }

    fn read(&self, _mount: &str, path: &str) -> Result<Leaf> {
        let entry = self
            .entries
            .iter()
            .find(|(entry_path, _)| entry_path == path)
            .map(|(_, entry)| entry);

        match entry {
            Some(FakeEntry::Data(Value::Object(map))) => Ok(Leaf::Data(map.clone())),
            Some(FakeEntry::Data(_)) => Err(VaultError::invalid_response(format!(
                "secret data at {path} is not a map"
            ))),
            Some(FakeEntry::Policy(rules)) => Ok(Leaf::Policy {
                rules: rules.clone(),
            }),
            Some(FakeEntry::Tombstone) | None => Err(VaultError::not_found(path)),
        }
    }
}
