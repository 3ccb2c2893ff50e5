//
//  livechat-api
//  tests/cli.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use std::path::Path;

use assert_cmd::Command;
use mockito::Matcher;
use predicates::prelude::*;

fn lcapi(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("lcapi").unwrap();
    cmd.env_remove("LCAPI_TOKEN")
        .env_remove("LCAPI_TOKEN_TYPE")
        .env_remove("LCAPI_HOST")
        .env_remove("LCAPI_SERVICE")
        .env_remove("LCAPI_CLIENT_ID")
        .env_remove("LCAPI_REGION")
        .arg("--config")
        .arg(config);
    cmd
}

fn empty_config(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "").unwrap();
    path
}

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("lcapi")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("call").and(predicate::str::contains("upload")));
}

#[test]
fn test_version_command() {
    Command::cargo_bin("lcapi")
        .unwrap()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_call_without_token_is_auth_error() {
    let dir = tempfile::tempdir().unwrap();
    lcapi(&empty_config(&dir))
        .args(["call", "list_bots"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("couldn't get token"));
}

#[test]
fn test_call_with_unsupported_scheme_is_auth_error() {
    let dir = tempfile::tempdir().unwrap();
    lcapi(&empty_config(&dir))
        .args(["--token", "abc", "--token-type", "Digest", "call", "list_bots"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("unsupported token type: Digest"));
}

#[test]
fn test_call_prints_response() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v3.3/configuration/action/list_bots")
        .match_header("authorization", "Bearer abc")
        .match_header("x-region", "dal")
        .match_header("x-debug-id", "trace-42")
        .match_body(Matcher::Json(serde_json::json!({"all": true})))
        .with_status(200)
        .with_body(r#"[{"id":"b1"}]"#)
        .create();

    let dir = tempfile::tempdir().unwrap();
    lcapi(&empty_config(&dir))
        .args(["--host", &server.url(), "--token", "abc", "--region", "dal"])
        .args(["-H", "X-Debug-Id: trace-42", "call", "list_bots", "-F", "all=true", "--compact"])
        .assert()
        .success()
        .stdout(predicate::str::diff("[{\"id\":\"b1\"}]\n"));

    mock.assert();
}

#[test]
fn test_call_api_error_exit_code() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/v3.3/configuration/action/create_bot")
        .with_status(400)
        .with_body(r#"{"error":{"code":"validation","message":"name is required"}}"#)
        .create();

    let dir = tempfile::tempdir().unwrap();
    lcapi(&empty_config(&dir))
        .args(["--host", &server.url(), "--token", "abc", "call", "create_bot"])
        .assert()
        .code(8)
        .stderr(predicate::str::contains("API error: validation - name is required"));
}

#[test]
fn test_upload_prints_url() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v3.3/agent/action/upload_file")
        .match_header("authorization", "Bearer abc")
        .match_body(Matcher::Regex(r#"filename="notes.txt""#.to_string()))
        .with_status(200)
        .with_body(r#"{"url":"https://cdn.example/x"}"#)
        .create();

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("notes.txt");
    std::fs::write(&file, "hello").unwrap();

    lcapi(&empty_config(&dir))
        .args(["--host", &server.url(), "--token", "abc", "-s", "agent", "upload"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::diff("https://cdn.example/x\n"));

    mock.assert();
}
