//! Depth-first traversal of the secret tree.
//!
//! The walk lists a container, then handles each child in listing
//! order: containers are entered recursively, leaves are read and
//! rendered as one output line each. Only a per-leaf not-found is
//! tolerated; any other failure aborts the dump so a truncated backup
//! never looks complete.

use std::io::Write;

use vault_client::{Leaf, SecretSource};

use crate::error::Result;
use crate::header::{self, HeaderInfo};
use crate::output;

/// Canonicalizes a starting prefix to begin and end with `/`.
///
/// Empty and root inputs both map to `/`; redundant separators are
/// collapsed at the ends.
#[must_use]
pub fn canonical_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}/")
    }
}

/// Walks the tree under `path`, emitting one line per leaf.
///
/// `path` must be a canonical container path (see [`canonical_prefix`]).
///
/// # Errors
///
/// Propagates every failure except a not-found on an individual leaf
/// read, which becomes a warning comment in the output.
pub fn walk<S: SecretSource, W: Write>(
    source: &S,
    mount: &str,
    path: &str,
    out: &mut W,
) -> Result<()> {
    let children = source.list(mount, path)?;

    for child in children {
        let next = format!("{path}{child}");
        if child.ends_with('/') {
            walk(source, mount, &next, out)?;
        } else {
            match source.read(mount, &next) {
                Ok(Leaf::Data(data)) => {
                    writeln!(out, "{}", output::put_line(mount, &next, &data))?;
                }
                Ok(Leaf::Policy { rules }) => {
                    writeln!(out, "{}", output::policy_line(&next, &rules))?;
                }
                Err(err) if err.is_recoverable() => {
                    tracing::warn!(path = %next, "leaf is deleted, emitting warning");
                    writeln!(out, "{}", output::warning_line(&next))?;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    Ok(())
}

/// Produces a complete dump: provenance header, then the walk from the
/// canonical prefix.
///
/// # Errors
///
/// Same failure modes as [`walk`], plus writer errors from the header.
pub fn run_dump<S: SecretSource, W: Write>(
    source: &S,
    mount: &str,
    prefix: &str,
    info: &HeaderInfo,
    out: &mut W,
) -> Result<()> {
    header::write_header(out, info)?;
    walk(source, mount, &canonical_prefix(prefix), out)
}
