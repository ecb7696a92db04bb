//! End-to-end tests for the `apply` and `list` commands.

use assert_json_diff::assert_json_eq;
use reshape::cli::{run, Cli, Command};
use serde_json::json;
use std::fs;
use std::path::Path;

const CONFIG: &str = r#"
on-failure: fall-back
transformers:
  - kind: greeting
  - kind: self-named
  - kind: suffix
    name: audit-trail
    suffix: " [audited]"
    apply-globally: true
"#;

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_apply_runs_referenced_and_global_transformers() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(dir.path(), "reshape.yaml", CONFIG);
    let response = write(
        dir.path(),
        "response.json",
        r#"{"status": 201, "headers": [["Content-Type", "text/plain"]], "body": "stub"}"#,
    );
    let event = write(
        dir.path(),
        "event.json",
        r#"{
            "request": {"method": "POST", "url": "/orders"},
            "stub": {"name": "orders", "transformers": ["MyResponseTransformerExtensionJava"]}
        }"#,
    );

    let out = run(Cli {
        command: Command::Apply {
            config,
            response,
            event,
        },
    })
    .unwrap();

    let actual: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_json_eq!(
        actual,
        json!({
            "status": 201,
            "headers": [["content-type", "text/plain"]],
            "body": "Hey from MyResponseTransformerExtensionJava [audited]"
        })
    );
}

#[test]
fn test_apply_with_missing_config() {
    let dir = tempfile::tempdir().unwrap();
    let response = write(dir.path(), "response.json", "{}");
    let event = write(
        dir.path(),
        "event.json",
        r#"{"request": {"method": "GET", "url": "/"}}"#,
    );

    let err = run(Cli {
        command: Command::Apply {
            config: dir.path().join("absent.yaml"),
            response,
            event,
        },
    })
    .unwrap_err();

    assert!(err.to_string().starts_with("Configuration file not found"));
}

#[test]
fn test_list_prints_every_registration() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(dir.path(), "reshape.yaml", CONFIG);

    let out = run(Cli {
        command: Command::List { config },
    })
    .unwrap();

    assert_eq!(
        out,
        "MyResponseTransformerExtensionJava\topt-in\nSelfNamedTransformer\topt-in\naudit-trail\tglobal\n"
    );
}
