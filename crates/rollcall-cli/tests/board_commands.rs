//! Board commands against a mock sign-up server.

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::{TempDir, tempdir};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Raw text so the server's key order reaches the client unchanged.
const ROSTER: &str = r#"{
    "Chess Club": {
        "description": "Learn strategies and compete in chess tournaments",
        "schedule": "Fridays, 3:30 PM - 5:00 PM",
        "max_participants": 12,
        "participants": ["michael@mergington.edu", "daniel@mergington.edu"]
    },
    "Art Studio": {
        "description": "Painting and drawing",
        "schedule": "Mondays, 4:00 PM - 5:30 PM",
        "max_participants": 8,
        "participants": []
    }
}"#;

async fn mount_roster(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/activities"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(ROSTER, "application/json"))
        .mount(server)
        .await;
}

async fn mount_verify_ok(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/auth/verify"))
        .and(header("authorization", "Bearer stored-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": "teacher",
            "teacher_name": "Ms. Lee"
        })))
        .mount(server)
        .await;
}

fn home_with_token(token: &str) -> TempDir {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("session.json"),
        json!({ "authToken": token }).to_string(),
    )
    .unwrap();
    dir
}

fn session_token(dir: &TempDir) -> Option<String> {
    let contents = fs::read_to_string(dir.path().join("session.json")).ok()?;
    let value: serde_json::Value = serde_json::from_str(&contents).ok()?;
    value["authToken"].as_str().map(str::to_string)
}

#[tokio::test]
async fn test_activities_prints_roster_in_server_order() {
    let server = MockServer::start().await;
    mount_roster(&server).await;
    let home = tempdir().unwrap();

    let output = cargo_bin_cmd!("rollcall")
        .env("ROLLCALL_HOME", home.path())
        .args(["--base-url", &server.uri(), "activities"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let chess = stdout.find("Chess Club").unwrap();
    let art = stdout.find("Art Studio").unwrap();
    assert!(chess < art);
    assert!(stdout.contains("Availability: 10 spots left"));
    assert!(stdout.contains("- michael@mergington.edu"));
    assert!(stdout.contains("No participants yet"));
    assert!(!stdout.contains("[removable]"));
}

#[tokio::test]
async fn test_activities_with_verified_token_shows_removal_markers() {
    let server = MockServer::start().await;
    mount_roster(&server).await;
    mount_verify_ok(&server).await;
    let home = home_with_token("stored-token");

    cargo_bin_cmd!("rollcall")
        .env("ROLLCALL_HOME", home.path())
        .args(["--base-url", &server.uri(), "activities"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome, Ms. Lee"))
        .stdout(predicate::str::contains(
            "- michael@mergington.edu  [removable]",
        ));
}

#[tokio::test]
async fn test_activities_failure_exits_nonzero() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/activities"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let home = tempdir().unwrap();

    cargo_bin_cmd!("rollcall")
        .env("ROLLCALL_HOME", home.path())
        .args(["--base-url", &server.uri(), "activities"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Failed to load activities. Please try again later.",
        ));
}

#[tokio::test]
async fn test_base_url_env_is_used_without_flag() {
    let server = MockServer::start().await;
    mount_roster(&server).await;
    let home = tempdir().unwrap();

    cargo_bin_cmd!("rollcall")
        .env("ROLLCALL_HOME", home.path())
        .env("ROLLCALL_BASE_URL", server.uri())
        .arg("activities")
        .assert()
        .success()
        .stdout(predicate::str::contains("Chess Club"));
}

#[tokio::test]
async fn test_login_persists_token_and_logout_clears_it() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/activities"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(ROSTER, "application/json"))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "fresh-token",
            "token_type": "bearer",
            "teacher_name": "Ms. Lee"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let home = tempdir().unwrap();

    cargo_bin_cmd!("rollcall")
        .env("ROLLCALL_HOME", home.path())
        .env_remove("ROLLCALL_PASSWORD")
        .args(["--base-url", &server.uri(), "login", "--username", "teacher"])
        .write_stdin("secret\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully logged in!"))
        .stdout(predicate::str::contains("Welcome, Ms. Lee"));

    assert_eq!(session_token(&home).as_deref(), Some("fresh-token"));

    cargo_bin_cmd!("rollcall")
        .env("ROLLCALL_HOME", home.path())
        .args(["--base-url", &server.uri(), "logout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully logged out"));

    assert_eq!(session_token(&home), None);
}

#[tokio::test]
async fn test_login_rejected_prints_server_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid credentials"})),
        )
        .mount(&server)
        .await;
    let home = tempdir().unwrap();

    cargo_bin_cmd!("rollcall")
        .env("ROLLCALL_HOME", home.path())
        .args([
            "--base-url",
            &server.uri(),
            "login",
            "--username",
            "teacher",
            "--password",
            "wrong",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid credentials"));

    assert!(!home.path().join("session.json").exists());
}

#[tokio::test]
async fn test_ephemeral_login_writes_nothing() {
    let server = MockServer::start().await;
    mount_roster(&server).await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "fresh-token",
            "token_type": "bearer",
            "teacher_name": "Ms. Lee"
        })))
        .mount(&server)
        .await;
    let home = tempdir().unwrap();

    cargo_bin_cmd!("rollcall")
        .env("ROLLCALL_HOME", home.path())
        .args([
            "--base-url",
            &server.uri(),
            "--ephemeral",
            "login",
            "--username",
            "teacher",
            "--password",
            "secret",
        ])
        .assert()
        .success();

    assert!(!home.path().join("session.json").exists());
}

#[tokio::test]
async fn test_status_clears_rejected_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/verify"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "expired"})))
        .mount(&server)
        .await;
    let home = home_with_token("stale-token");

    cargo_bin_cmd!("rollcall")
        .env("ROLLCALL_HOME", home.path())
        .args(["--base-url", &server.uri(), "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));

    assert_eq!(session_token(&home), None);
}

#[tokio::test]
async fn test_status_reports_teacher_name() {
    let server = MockServer::start().await;
    mount_verify_ok(&server).await;
    let home = home_with_token("stored-token");

    cargo_bin_cmd!("rollcall")
        .env("ROLLCALL_HOME", home.path())
        .args(["--base-url", &server.uri(), "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as Ms. Lee"));
}

#[tokio::test]
async fn test_signup_sends_bearer_request_and_prints_message() {
    let server = MockServer::start().await;
    mount_roster(&server).await;
    mount_verify_ok(&server).await;
    Mock::given(method("POST"))
        .and(path("/activities/Chess%20Club/signup"))
        .and(query_param("email", "a@b.com"))
        .and(header("authorization", "Bearer stored-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": "Signed up a@b.com for Chess Club"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    let home = home_with_token("stored-token");

    cargo_bin_cmd!("rollcall")
        .env("ROLLCALL_HOME", home.path())
        .args([
            "--base-url",
            &server.uri(),
            "signup",
            "--activity",
            "Chess Club",
            "--email",
            "a@b.com",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed up a@b.com for Chess Club"));
}

#[tokio::test]
async fn test_signup_without_session_sends_no_mutation() {
    let server = MockServer::start().await;
    mount_roster(&server).await;
    let home = tempdir().unwrap();

    cargo_bin_cmd!("rollcall")
        .env("ROLLCALL_HOME", home.path())
        .args([
            "--base-url",
            &server.uri(),
            "signup",
            "--activity",
            "Chess Club",
            "--email",
            "a@b.com",
        ])
        .assert()
        .failure();

    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.method.as_str() == "GET"));
}

#[test]
fn test_signup_rejects_invalid_email_before_any_request() {
    let home = tempdir().unwrap();

    cargo_bin_cmd!("rollcall")
        .env("ROLLCALL_HOME", home.path())
        .args([
            "--base-url",
            "http://127.0.0.1:1",
            "signup",
            "--activity",
            "Chess Club",
            "--email",
            "not-an-email",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter a valid email address."));
}

#[tokio::test]
async fn test_unregister_error_detail_exits_nonzero() {
    let server = MockServer::start().await;
    mount_roster(&server).await;
    mount_verify_ok(&server).await;
    Mock::given(method("DELETE"))
        .and(path("/activities/Chess%20Club/unregister"))
        .and(query_param("email", "ghost@b.com"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"detail": "Student is not signed up for this activity"})),
        )
        .mount(&server)
        .await;
    let home = home_with_token("stored-token");

    cargo_bin_cmd!("rollcall")
        .env("ROLLCALL_HOME", home.path())
        .args([
            "--base-url",
            &server.uri(),
            "unregister",
            "--activity",
            "Chess Club",
            "--email",
            "ghost@b.com",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Student is not signed up for this activity",
        ));
}
