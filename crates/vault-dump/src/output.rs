//! Rendering of dump output lines.
//!
//! Every leaf becomes exactly one line: a `vault kv put` command for
//! key-value data, a pipe into `vault policy write` for policy
//! documents, or a warning comment for tombstones. Rendering is
//! deterministic so dumps of identical data are byte-identical and
//! diff-friendly.

use serde_json::{Map, Value};

/// Renders a value in its canonical literal form.
///
/// The encoding is stable across runs: `None`/`True`/`False` for null
/// and booleans, plain decimals for numbers, single-quoted strings with
/// escaped quotes and backslashes, and nested lists and maps with map
/// keys in sorted order.
#[must_use]
pub fn literal(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        Value::Array(items) => {
            let rendered: Vec<String> = items.iter().map(literal).collect();
            format!("[{}]", rendered.join(", "))
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let rendered: Vec<String> = entries
                .iter()
                .map(|(key, value)| format!("{}: {}", quote(key), literal(value)))
                .collect();
            format!("{{{}}}", rendered.join(", "))
        }
    }
}

/// Renders the replay command for a key-value leaf.
///
/// Pairs appear sorted by key, each as `key=literal(value)`.
#[must_use]
pub fn put_line(mount: &str, path: &str, data: &Map<String, Value>) -> String {
    let mut entries: Vec<(&String, &Value)> = data.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let mut line = format!("vault kv put {mount}{path}");
    for (key, value) in entries {
        line.push(' ');
        line.push_str(key);
        line.push('=');
        line.push_str(&literal(value));
    }
    line
}

/// Renders the replay command for a policy leaf. The policy name is the
/// final segment of the leaf path.
#[must_use]
pub fn policy_line(path: &str, rules: &str) -> String {
    format!(
        "echo {} | vault policy write {} -",
        quote(rules),
        policy_name(path)
    )
}

/// Renders the warning comment for a tombstoned leaf.
#[must_use]
pub fn warning_line(path: &str) -> String {
    format!("# WARNING: {} is deleted", quote(path))
}

fn policy_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}
