//! Integration tests for the full dump pipeline against a fake store.

use chrono::TimeZone;
use serde_json::json;
use vault_client::FakeVault;
use vault_dump::header::HeaderInfo;
use vault_dump::{canonical_prefix, run_dump, walk};

fn test_header() -> HeaderInfo {
    HeaderInfo {
        operator: "alice".to_string(),
        timestamp: chrono::Utc.with_ymd_and_hms(2024, 1, 15, 12, 30, 0).unwrap(),
        address: "http://localhost:8200".to_string(),
        mount: "secret".to_string(),
        prefix: "/".to_string(),
    }
}

fn test_store() -> FakeVault {
    FakeVault::new()
        .with_secret("/a/b", json!({"x": 1, "y": "s"}))
        .with_secret("/a/c/d", json!({"z": true}))
        .with_tombstone("/a/e")
        .with_policy("/admins", "path \"secret/*\" {...}")
}

#[test]
fn test_full_dump_golden_output() {
    let fake = test_store();
    let mut out = Vec::new();

    run_dump(&fake, "secret", "/", &test_header(), &mut out).expect("dump should succeed");

    let text = String::from_utf8(out).expect("output should be utf8");
    let expected = "\
#
# vault-dump backup
# dump made by alice
# backup date: 2024-01-15 12:30:00 UTC
# VAULT_ADDR env variable: http://localhost:8200
# VAULT_MOUNT env variable: secret
# TOP_VAULT_PREFIX env variable: /
#
# WARNING: not guaranteed to be consistent!
#
vault kv put secret/a/b x=1 y='s'
vault kv put secret/a/c/d z=True
# WARNING: '/a/e' is deleted
echo 'path \"secret/*\" {...}' | vault policy write admins -
";
    assert_eq!(text, expected);
}

#[test]
fn test_every_line_is_command_or_comment() {
    let fake = test_store();
    let mut out = Vec::new();

    run_dump(&fake, "secret", "/", &test_header(), &mut out).expect("dump should succeed");

    let text = String::from_utf8(out).expect("output should be utf8");
    for line in text.lines() {
        let replayable = line.starts_with('#')
            || line.starts_with("vault kv put ")
            || line.starts_with("echo ");
        assert!(replayable, "unexpected line shape: {line}");
    }
}

#[test]
fn test_dump_scoped_to_prefix() {
    let fake = FakeVault::new()
        .with_secret("/team-a/app/creds", json!({"user": "svc", "port": 5432}))
        .with_secret("/team-b/other", json!({"k": 1}));

    let mut header = test_header();
    header.prefix = "/team-a/".to_string();
    let mut out = Vec::new();

    run_dump(&fake, "secret", "/team-a/", &header, &mut out).expect("dump should succeed");

    let text = String::from_utf8(out).expect("output should be utf8");
    assert!(text.contains("vault kv put secret/team-a/app/creds port=5432 user='svc'"));
    assert!(!text.contains("team-b"));
}

#[test]
fn test_dump_aborts_on_malformed_leaf() {
    let fake = FakeVault::new()
        .with_secret("/a/good", json!({"k": 1}))
        .with_secret("/a/odd", json!([1, 2, 3]));

    let mut out = Vec::new();
    let result = run_dump(&fake, "secret", "/", &test_header(), &mut out);

    assert!(result.is_err());
}

#[test]
fn test_walk_accepts_uncanonical_prefix() {
    let fake = FakeVault::new().with_secret("/a/b", json!({"x": 1}));
    let mut out = Vec::new();

    walk(&fake, "secret", &canonical_prefix("a"), &mut out).expect("walk should succeed");

    let text = String::from_utf8(out).expect("output should be utf8");
    assert_eq!(text, "vault kv put secret/a/b x=1\n");
}

#[test]
fn test_rerunning_dump_is_deterministic() {
    let fake = test_store();
    let header = test_header();

    let mut first = Vec::new();
    run_dump(&fake, "secret", "/", &header, &mut first).expect("dump should succeed");
    let mut second = Vec::new();
    run_dump(&fake, "secret", "/", &header, &mut second).expect("dump should succeed");

    assert_eq!(first, second);
}
