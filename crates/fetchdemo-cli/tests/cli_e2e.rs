//! End-to-end CLI tests using `assert_cmd`
#![cfg_attr(
    test,
    allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        clippy::tests_outside_test_module,
        reason = "Test allows"
    )
)]

use assert_cmd::Command;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Helper to get the demo binary with a clean `FETCHDEMO_*` environment
fn cargo_bin() -> Command {
    let mut command =
        Command::cargo_bin("fetchdemo").unwrap_or_else(|err| panic!("Binary not found: {err}"));
    command
        .env_remove("FETCHDEMO_BASE_URL")
        .env_remove("FETCHDEMO_LENIENT")
        .env_remove("FETCHDEMO_DELAY_MS");
    command
}

/// Helper to create temp dir or fail test
fn temp_dir() -> TempDir {
    TempDir::new().unwrap_or_else(|err| panic!("Failed to create temp dir: {err}"))
}

async fn list_users() -> Json<Value> {
    Json(json!([
        {
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "phone": "1-770-736-8031 x56442"
        },
        {
            "id": 2,
            "name": "Ervin Howell",
            "username": "Antonette",
            "email": "Shanna@melissa.tv"
        }
    ]))
}

async fn echo_created(Json(mut body): Json<Value>) -> (StatusCode, Json<Value>) {
    body["id"] = json!(101);
    (StatusCode::CREATED, Json(body))
}

/// Helper to serve `/users` and `/posts` on an ephemeral local port
async fn spawn_fixture() -> String {
    let router = Router::new()
        .route("/users", get(list_users).post(echo_created))
        .route("/posts", post(echo_created));
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap_or_else(|err| panic!("Failed to bind fixture listener: {err}"));
    let addr = listener
        .local_addr()
        .unwrap_or_else(|err| panic!("Failed to read fixture address: {err}"));
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .unwrap_or_else(|err| panic!("Fixture server failed: {err}"));
    });
    format!("http://{addr}")
}

#[test]
fn test_cli_help_lists_commands() {
    cargo_bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("http"))
        .stdout(predicate::str::contains("callbacks"));
}

#[test]
fn test_cli_invalid_command() {
    cargo_bin().arg("invalid-command-xyz").assert().failure();
}

#[test]
fn test_config_shows_defaults() {
    cargo_bin()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("https://jsonplaceholder.typicode.com"))
        .stdout(predicate::str::contains("stage_delay_ms = 1000"));
}

#[test]
fn test_config_file_and_env_are_applied() {
    let temp = temp_dir();
    let path = temp.path().join("fetchdemo.toml");
    fs::write(&path, "[api]\nbase_url = \"http://localhost:3000\"\n\n[chain]\nstage_delay_ms = 5\n")
        .unwrap();

    cargo_bin()
        .args(["config", "--full", "--config"])
        .arg(&path)
        .env("FETCHDEMO_LENIENT", "true")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Loaded from:"))
        .stdout(predicate::str::contains("http://localhost:3000"))
        .stdout(predicate::str::contains("lenient = true"))
        .stdout(predicate::str::contains("stage_delay_ms = 5"));
}

#[test]
fn test_invalid_env_override_fails() {
    cargo_bin()
        .arg("config")
        .env("FETCHDEMO_DELAY_MS", "soon")
        .assert()
        .failure()
        .stderr(predicate::str::contains("FETCHDEMO_DELAY_MS"));
}

#[test]
fn test_missing_config_file_fails() {
    let temp = temp_dir();

    cargo_bin()
        .args(["config", "--config"])
        .arg(temp.path().join("absent.toml"))
        .assert()
        .failure();
}

#[test]
fn test_callbacks_print_steps_and_login_summary() {
    cargo_bin()
        .args(["callbacks", "--delay-ms", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Step 1 complete"))
        .stdout(predicate::str::contains("All steps complete"))
        .stdout(predicate::str::contains("User logged in"))
        .stdout(predicate::str::contains(r#"age: 30, city: "New York""#))
        .stdout(predicate::str::contains(r#"Posts: ["Post 1", "Post 2", "Post 3"]"#));
}

#[test]
fn test_linear_callbacks_print_same_summary() {
    cargo_bin()
        .args(["callbacks", "--delay-ms", "0", "--linear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All steps complete"))
        .stdout(predicate::str::contains(r#"Posts: ["Post 1", "Post 2", "Post 3"]"#));
}

#[test]
fn test_http_rejects_invalid_base_url() {
    cargo_bin()
        .args(["http", "--base-url", "ftp://example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("base_url"));
}

#[test]
fn test_http_against_unreachable_server_fails() {
    cargo_bin()
        .args(["http", "--base-url", "http://127.0.0.1:1"])
        .env("NO_PROXY", "127.0.0.1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("HTTP demo against http://127.0.0.1:1 failed"));
}

// The binary blocks the test thread, so the fixture needs its own workers.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_http_prints_page_post_and_user() {
    let base_url = spawn_fixture().await;

    cargo_bin()
        .args(["http", "--base-url"])
        .arg(&base_url)
        .env("NO_PROXY", "127.0.0.1")
        .assert()
        .success()
        .stdout(predicate::str::contains("<h1>Fetch API demo</h1>"))
        .stdout(predicate::str::contains("<ul id=\"userList\">"))
        .stdout(predicate::str::contains("<li>Leanne Graham - Sincere@april.biz</li>"))
        .stdout(predicate::str::contains("<li>Ervin Howell - Shanna@melissa.tv</li>"))
        .stdout(predicate::str::contains("\"title\": \"foo\""))
        .stdout(predicate::str::contains("\"userId\": 1"))
        .stdout(predicate::str::contains("\"username\": \"Bret\""));
}
