//! Integration tests for the `wattly` CLI binary.
//!
//! Argument parsing and error handling without a device, plus
//! end-to-end runs against a wiremock switch.
#![allow(clippy::unwrap_used)]

use predicates::prelude::*;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `wattly` binary with env isolation.
///
/// Clears the config-override variables (including the ambient `USER`
/// login name, which would override the file value) so tests never
/// depend on the caller's environment.
fn wattly_cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("wattly").unwrap();
    cmd.env_remove("URL")
        .env_remove("USER")
        .env_remove("PASS")
        .env_remove("WATTLY_CONFIG_DIR")
        .env_remove("WATTLY_TIMEOUT")
        .env_remove("WATTLY_INSECURE")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

const LOGIN_PAGE: &str = concat!(
    r#"<html><body><form name="login" action="login.tgi" method="post">"#,
    r#"<input type="hidden" name="Challenge" value="a1b2c3d4">"#,
    r#"</form></body></html>"#
);

/// Mount login-page + login mocks issuing the given session token.
async fn mount_login(server: &MockServer, token: &str) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LOGIN_PAGE))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/login.tgi"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Set-Cookie", format!(r#"DLILPC="{token}"; Path=/"#).as_str()),
        )
        .mount(server)
        .await;
}

/// Write a config.yaml pointing at the mock device.
fn write_config(dir: &std::path::Path, url: &str) {
    std::fs::write(
        dir.join("config.yaml"),
        format!("URL: {url}\nUSER: admin\nPASS: secret\n"),
    )
    .unwrap();
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    wattly_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("--outlet")
            .and(predicate::str::contains("--action"))
            .and(predicate::str::contains("power switch")),
    );
}

#[test]
fn test_version_flag() {
    wattly_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wattly"));
}

// ── Usage errors ────────────────────────────────────────────────────

#[test]
fn test_missing_outlet_is_usage_error() {
    let output = wattly_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(
        text.contains("--outlet"),
        "Expected '--outlet' in output:\n{text}"
    );
}

#[test]
fn test_unsupported_action_is_rejected() {
    let output = wattly_cmd()
        .args(["--outlet", "1", "--action", "pause"])
        .output()
        .unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for unsupported action"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("pause"),
        "Expected error naming the unsupported action:\n{text}"
    );
}

#[test]
fn test_negative_outlet_is_rejected() {
    let output = wattly_cmd()
        .args(["--outlet", "-1"])
        .output()
        .unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for negative outlet"
    );
}

// ── Configuration errors ────────────────────────────────────────────

#[test]
fn test_missing_config_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    wattly_cmd()
        .args(["--outlet", "1"])
        .args(["--config-dir", dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config"));
}

// ── End-to-end against a mock device ────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_cycle_all_outlets_end_to_end() {
    let server = MockServer::start().await;
    mount_login(&server, "tok123").await;

    Mock::given(method("GET"))
        .and(path("/outlet"))
        .and(query_param("a", "CCL"))
        .and(header("Cookie", "DLILPC=tok123"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &server.uri());

    wattly_cmd()
        .args(["--outlet", "0", "--action", "cycle"])
        .args(["--config-dir", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK"))
        .stderr(predicate::str::contains("Cycling ALL outlets"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_single_outlet_on_end_to_end() {
    let server = MockServer::start().await;
    mount_login(&server, "tok456").await;

    Mock::given(method("GET"))
        .and(path("/outlet"))
        .and(query_param("3", "ON"))
        .and(header("Cookie", "DLILPC=tok456"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &server.uri());

    wattly_cmd()
        .args(["--outlet", "3"])
        .args(["--config-dir", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_toggle_surfaces_status_and_fails() {
    let server = MockServer::start().await;
    mount_login(&server, "tok789").await;

    Mock::given(method("GET"))
        .and(path("/outlet"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &server.uri());

    let output = wattly_cmd()
        .args(["--outlet", "2", "--action", "off"])
        .args(["--config-dir", dir.path().to_str().unwrap()])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1), "Expected exit code 1");
    let text = combined_output(&output);
    assert!(text.contains("403"), "Expected status in output:\n{text}");
    assert!(
        !String::from_utf8_lossy(&output.stdout).contains("OK"),
        "Must not report success"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_without_cookie_never_reaches_toggle() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LOGIN_PAGE))
        .mount(&server)
        .await;

    // Login response without Set-Cookie: auth must fail.
    Mock::given(method("POST"))
        .and(path("/login.tgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string("denied"))
        .mount(&server)
        .await;

    // The toggle endpoint must never be hit.
    Mock::given(method("GET"))
        .and(path("/outlet"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &server.uri());

    let output = wattly_cmd()
        .args(["--outlet", "1"])
        .args(["--config-dir", dir.path().to_str().unwrap()])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(3), "Expected auth exit code");
}
