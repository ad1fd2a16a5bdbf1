//! End-to-end board flows against a mock sign-up server.

use std::time::Duration;

use rollcall_core::api::HttpBoardApi;
use rollcall_core::board::Board;
use rollcall_core::gate::{AuthPhase, LOGIN_TRANSPORT_FAILURE, LoginOutcome};
use rollcall_core::notify::Notice;
use rollcall_core::roster::{LOAD_FAILURE, RosterView};
use rollcall_core::session::{FileTokenStore, MemoryTokenStore, SessionStore, TokenStore};
use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn roster_body() -> serde_json::Value {
    json!({
        "Chess Club": {
            "description": "Learn strategies and compete in chess tournaments",
            "schedule": "Fridays, 3:30 PM - 5:00 PM",
            "max_participants": 12,
            "participants": ["michael@mergington.edu", "daniel@mergington.edu"]
        },
        "Programming Class": {
            "description": "Learn programming fundamentals",
            "schedule": "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
            "max_participants": 20,
            "participants": ["emma@mergington.edu"]
        }
    })
}

async fn mount_roster(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/activities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(roster_body()))
        .mount(server)
        .await;
}

async fn mount_login_ok(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("username=teacher"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "fresh-token",
            "token_type": "bearer",
            "teacher_name": "Ms. Lee"
        })))
        .mount(server)
        .await;
}

async fn activity_fetches(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == "/activities")
        .count()
}

fn board_for<S: TokenStore>(server: &MockServer, store: S) -> Board<HttpBoardApi, S> {
    let api = HttpBoardApi::new(&server.uri(), None).unwrap();
    Board::new(api, SessionStore::new(store), Duration::from_secs(5))
}

#[tokio::test]
async fn test_no_token_starts_unauthenticated_without_removal_controls() {
    let server = MockServer::start().await;
    mount_roster(&server).await;

    let mut board = board_for(&server, MemoryTokenStore::default());
    assert_eq!(board.start().await, AuthPhase::Unauthenticated);

    let roster = board.roster();
    assert_eq!(roster.options(), ["Chess Club", "Programming Class"]);
    assert_eq!(roster.removal_controls(), 0);
    assert!(board.affordances().teacher_notice_visible);

    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.url.path() != "/auth/verify"));
}

#[tokio::test]
async fn test_valid_stored_token_enables_removal_controls() {
    let server = MockServer::start().await;
    mount_roster(&server).await;
    Mock::given(method("GET"))
        .and(path("/auth/verify"))
        .and(header("authorization", "Bearer stored-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": "lee",
            "teacher_name": "Ms. Lee"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut board = board_for(&server, MemoryTokenStore::with_token("stored-token"));
    assert_eq!(board.start().await, AuthPhase::Authenticated);
    assert_eq!(board.roster().removal_controls(), 3);
    assert_eq!(
        board.affordances().greeting.as_deref(),
        Some("Welcome, Ms. Lee")
    );
}

#[tokio::test]
async fn test_rejected_stored_token_is_cleared_from_disk() {
    let server = MockServer::start().await;
    mount_roster(&server).await;
    Mock::given(method("GET"))
        .and(path("/auth/verify"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid or expired token"})),
        )
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let slot = FileTokenStore::new(dir.path().join("session.json"));
    slot.save("expired-token").unwrap();

    let mut board = board_for(&server, slot.clone());
    assert_eq!(board.start().await, AuthPhase::Unauthenticated);
    assert!(!board.is_authenticated());
    assert_eq!(slot.load().unwrap(), None);
}

#[tokio::test]
async fn test_wrong_credentials_show_inline_detail_and_store_nothing() {
    let server = MockServer::start().await;
    mount_roster(&server).await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let slot = FileTokenStore::new(dir.path().join("session.json"));
    let mut board = board_for(&server, slot.clone());
    board.start().await;

    let outcome = board.login("teacher", "wrong").await;
    assert_eq!(
        outcome,
        LoginOutcome::Failed {
            inline_error: "Invalid credentials".to_string()
        }
    );
    assert!(!board.is_authenticated());
    assert_eq!(slot.load().unwrap(), None);
}

#[tokio::test]
async fn test_authenticated_signup_refreshes_roster_once() {
    let server = MockServer::start().await;
    mount_roster(&server).await;
    mount_login_ok(&server).await;
    Mock::given(method("POST"))
        .and(path("/activities/Chess%20Club/signup"))
        .and(query_param("email", "a@b.com"))
        .and(header("authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Signed up"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut board = board_for(&server, MemoryTokenStore::default());
    board.start().await;
    assert!(matches!(
        board.login("teacher", "secret").await,
        LoginOutcome::LoggedIn { .. }
    ));
    let before = activity_fetches(&server).await;

    let outcome = board.register("Chess Club", "a@b.com").await;
    assert_eq!(outcome.notice, Notice::success("Signed up"));
    assert!(outcome.clear_input);
    assert_eq!(activity_fetches(&server).await, before + 1);
    assert_eq!(board.notice(), Some(&Notice::success("Signed up")));
}

#[tokio::test]
async fn test_failed_unregister_shows_detail_without_refresh() {
    let server = MockServer::start().await;
    mount_roster(&server).await;
    mount_login_ok(&server).await;
    Mock::given(method("DELETE"))
        .and(path("/activities/Chess%20Club/unregister"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found"})))
        .mount(&server)
        .await;

    let mut board = board_for(&server, MemoryTokenStore::default());
    board.start().await;
    board.login("teacher", "secret").await;
    let before = activity_fetches(&server).await;

    let outcome = board.remove("Chess Club", "nobody@mergington.edu").await;
    assert_eq!(outcome.notice, Notice::error("Not found"));
    assert!(!outcome.refresh);
    assert_eq!(activity_fetches(&server).await, before);
}

#[tokio::test]
async fn test_unauthenticated_commands_send_nothing() {
    let server = MockServer::start().await;
    mount_roster(&server).await;

    let mut board = board_for(&server, MemoryTokenStore::default());
    board.start().await;

    let outcome = board.register("Chess Club", "a@b.com").await;
    assert_eq!(
        outcome.notice,
        Notice::error("Only teachers can register students")
    );
    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.method.as_str() == "GET"));
}

#[tokio::test]
async fn test_roster_failure_replaces_view_with_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/activities"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let mut board = board_for(&server, MemoryTokenStore::default());
    board.start().await;
    assert_eq!(
        board.roster(),
        &RosterView::Failed {
            message: LOAD_FAILURE.to_string()
        }
    );
}

#[tokio::test]
async fn test_unreachable_server_fails_the_initial_render() {
    let api = HttpBoardApi::new("http://127.0.0.1:1", Some(Duration::from_secs(2))).unwrap();
    let mut board = Board::new(
        api,
        SessionStore::new(MemoryTokenStore::default()),
        Duration::from_secs(5),
    );

    assert_eq!(board.start().await, AuthPhase::Unauthenticated);
    assert_eq!(
        board.roster(),
        &RosterView::Failed {
            message: LOAD_FAILURE.to_string()
        }
    );
}

#[tokio::test]
async fn test_unreachable_verification_clears_stored_token() {
    let dir = tempdir().unwrap();
    let slot = FileTokenStore::new(dir.path().join("session.json"));
    slot.save("stored-token").unwrap();

    let api = HttpBoardApi::new("http://127.0.0.1:1", Some(Duration::from_secs(2))).unwrap();
    let mut board = Board::new(api, SessionStore::new(slot.clone()), Duration::from_secs(5));

    assert_eq!(board.start().await, AuthPhase::Unauthenticated);
    assert!(!board.is_authenticated());
    assert_eq!(slot.load().unwrap(), None);
}

#[tokio::test]
async fn test_unreachable_login_shows_retry_message() {
    let api = HttpBoardApi::new("http://127.0.0.1:1", Some(Duration::from_secs(2))).unwrap();
    let mut board = Board::new(
        api,
        SessionStore::new(MemoryTokenStore::default()),
        Duration::from_secs(5),
    );
    board.start().await;

    assert_eq!(
        board.login("teacher", "secret").await,
        LoginOutcome::Failed {
            inline_error: LOGIN_TRANSPORT_FAILURE.to_string()
        }
    );
    assert!(!board.is_authenticated());
}

#[tokio::test]
async fn test_undecodable_signup_response_shows_retry_message() {
    let server = MockServer::start().await;
    mount_roster(&server).await;
    mount_login_ok(&server).await;
    Mock::given(method("POST"))
        .and(path("/activities/Chess%20Club/signup"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let mut board = board_for(&server, MemoryTokenStore::default());
    board.start().await;
    board.login("teacher", "secret").await;
    let before = activity_fetches(&server).await;

    let outcome = board.register("Chess Club", "a@b.com").await;
    assert_eq!(
        outcome.notice,
        Notice::error("Failed to sign up. Please try again.")
    );
    assert!(!outcome.refresh);
    assert!(!outcome.clear_input);
    assert_eq!(activity_fetches(&server).await, before);
}

#[tokio::test]
async fn test_html_error_page_on_unregister_shows_retry_message() {
    let server = MockServer::start().await;
    mount_roster(&server).await;
    mount_login_ok(&server).await;
    Mock::given(method("DELETE"))
        .and(path("/activities/Chess%20Club/unregister"))
        .respond_with(
            ResponseTemplate::new(502).set_body_raw("<html>Bad Gateway</html>", "text/html"),
        )
        .mount(&server)
        .await;

    let mut board = board_for(&server, MemoryTokenStore::default());
    board.start().await;
    board.login("teacher", "secret").await;

    let outcome = board.remove("Chess Club", "michael@mergington.edu").await;
    assert_eq!(
        outcome.notice,
        Notice::error("Failed to unregister. Please try again.")
    );
    assert!(!outcome.refresh);
}

#[tokio::test]
async fn test_json_error_without_detail_uses_generic_fallback() {
    let server = MockServer::start().await;
    mount_roster(&server).await;
    mount_login_ok(&server).await;
    Mock::given(method("DELETE"))
        .and(path("/activities/Chess%20Club/unregister"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "bad"})))
        .mount(&server)
        .await;

    let mut board = board_for(&server, MemoryTokenStore::default());
    board.start().await;
    board.login("teacher", "secret").await;

    let outcome = board.remove("Chess Club", "michael@mergington.edu").await;
    assert_eq!(outcome.notice, Notice::error("An error occurred"));
}
