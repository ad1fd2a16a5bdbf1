//! Sequential board controller.
//!
//! [`Board`] wires the gate, roster, commands, and notifier together for
//! drivers that await each action before issuing the next (the CLI and the
//! integration tests). The TUI runs the same pieces on its own task runtime.

use std::time::{Duration, Instant};

use crate::api::BoardApi;
use crate::commands::{self, CommandOutcome, PendingMutation};
use crate::gate::{Affordances, AuthGate, AuthPhase, LoginOutcome};
use crate::notify::{Notice, Notifier};
use crate::roster::{self, RosterView};
use crate::session::{SessionStore, TokenStore};

pub struct Board<A, S> {
    api: A,
    gate: AuthGate<S>,
    roster: RosterView,
    notifier: Notifier,
}

impl<A: BoardApi, S: TokenStore> Board<A, S> {
    pub fn new(api: A, session: SessionStore<S>, notice_duration: Duration) -> Self {
        Self {
            api,
            gate: AuthGate::new(session),
            roster: RosterView::default(),
            notifier: Notifier::new(notice_duration),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn gate(&self) -> &AuthGate<S> {
        &self.gate
    }

    pub fn phase(&self) -> AuthPhase {
        self.gate.phase()
    }

    pub fn is_authenticated(&self) -> bool {
        self.gate.is_authenticated()
    }

    pub fn affordances(&self) -> Affordances {
        self.gate.affordances()
    }

    pub fn roster(&self) -> &RosterView {
        &self.roster
    }

    /// The visible notice, if it has not expired.
    pub fn notice(&mut self) -> Option<&Notice> {
        self.notifier.expire(Instant::now());
        self.notifier.current()
    }

    /// Reconciles the stored session, then performs the initial render.
    pub async fn start(&mut self) -> AuthPhase {
        let phase = self.gate.startup(&self.api).await;
        self.refresh().await;
        phase
    }

    /// Fetches and re-renders the roster.
    pub async fn refresh(&mut self) -> &RosterView {
        self.roster = roster::refresh(&self.api, self.gate.session()).await;
        &self.roster
    }

    /// Logs in; on success the roster is re-rendered with removal controls.
    pub async fn login(&mut self, username: &str, password: &str) -> LoginOutcome {
        let outcome = self.gate.login(&self.api, username, password).await;
        if let LoginOutcome::LoggedIn { notice } = &outcome {
            self.notifier.show(notice.clone(), Instant::now());
            self.refresh().await;
        }
        outcome
    }

    /// Logs out locally and re-renders the roster without removal controls.
    pub async fn logout(&mut self) -> Notice {
        let notice = self.gate.logout();
        self.notifier.show(notice.clone(), Instant::now());
        self.refresh().await;
        notice
    }

    pub async fn register(&mut self, activity: &str, email: &str) -> CommandOutcome {
        self.mutate(PendingMutation::register(activity, email)).await
    }

    pub async fn remove(&mut self, activity: &str, email: &str) -> CommandOutcome {
        self.mutate(PendingMutation::remove(activity, email)).await
    }

    async fn mutate(&mut self, intent: PendingMutation) -> CommandOutcome {
        let outcome = commands::run(&self.api, self.gate.session(), intent).await;
        self.notifier.show(outcome.notice.clone(), Instant::now());
        if outcome.refresh {
            self.refresh().await;
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MessageResponse;
    use crate::api::fake::{FakeApi, activities_json, rejected};
    use crate::api::{LoginResponse, VerifyResponse};
    use crate::notify::NoticeKind;
    use crate::session::MemoryTokenStore;

    const ONE_CLUB: &str = r#"{"Chess Club": {"description": "Strategy", "schedule": "Fridays",
        "max_participants": 12, "participants": ["michael@mergington.edu"]}}"#;

    fn board(token: Option<&str>) -> Board<FakeApi, MemoryTokenStore> {
        let slot = token.map_or_else(MemoryTokenStore::default, MemoryTokenStore::with_token);
        Board::new(
            FakeApi::default(),
            SessionStore::new(slot),
            Duration::from_secs(5),
        )
    }

    fn queue_roster(board: &Board<FakeApi, MemoryTokenStore>, times: usize) {
        let mut queue = board.api().activities.lock().unwrap();
        for _ in 0..times {
            queue.push_back(Ok(activities_json(ONE_CLUB)));
        }
    }

    #[tokio::test]
    async fn test_start_without_token_renders_without_controls() {
        let mut board = board(None);
        queue_roster(&board, 1);

        assert_eq!(board.start().await, AuthPhase::Unauthenticated);
        assert_eq!(board.roster().cards().len(), 1);
        assert_eq!(board.roster().removal_controls(), 0);
        assert_eq!(board.api().calls(), ["activities"]);
    }

    #[tokio::test]
    async fn test_start_with_verified_token_renders_controls() {
        let mut board = board(Some("stored"));
        board.api().verify.lock().unwrap().push_back(Ok(VerifyResponse {
            teacher_name: "Ms. Lee".to_string(),
        }));
        queue_roster(&board, 1);

        assert_eq!(board.start().await, AuthPhase::Authenticated);
        assert_eq!(board.roster().removal_controls(), 1);
        assert_eq!(board.api().calls(), ["verify stored", "activities"]);
    }

    #[tokio::test]
    async fn test_successful_mutation_refreshes_exactly_once() {
        let mut board = board(None);
        board.api().login.lock().unwrap().push_back(Ok(LoginResponse {
            access_token: "tok".to_string(),
            teacher_name: "Ms. Lee".to_string(),
        }));
        board
            .api()
            .mutations
            .lock()
            .unwrap()
            .push_back(Ok(MessageResponse {
                message: "Signed up".to_string(),
            }));
        queue_roster(&board, 3);

        board.start().await;
        board.login("teacher", "secret").await;
        let before = board.api().count("activities");

        let outcome = board.register("Chess Club", "a@b.com").await;
        assert_eq!(outcome.notice, Notice::success("Signed up"));
        assert_eq!(board.api().count("activities"), before + 1);
        assert_eq!(board.notice().map(|n| n.kind), Some(NoticeKind::Success));
    }

    #[tokio::test]
    async fn test_failed_mutation_does_not_refresh() {
        let mut board = board(None);
        board.api().login.lock().unwrap().push_back(Ok(LoginResponse {
            access_token: "tok".to_string(),
            teacher_name: "Ms. Lee".to_string(),
        }));
        board
            .api()
            .mutations
            .lock()
            .unwrap()
            .push_back(Err(rejected(404, "Not found")));
        queue_roster(&board, 2);

        board.start().await;
        board.login("teacher", "secret").await;
        let before = board.api().count("activities");

        let outcome = board.remove("Chess Club", "michael@mergington.edu").await;
        assert_eq!(outcome.notice, Notice::error("Not found"));
        assert_eq!(board.api().count("activities"), before);
    }

    #[tokio::test]
    async fn test_logout_removes_controls_on_next_render() {
        let mut board = board(None);
        board.api().login.lock().unwrap().push_back(Ok(LoginResponse {
            access_token: "tok".to_string(),
            teacher_name: "Ms. Lee".to_string(),
        }));
        queue_roster(&board, 3);

        board.start().await;
        board.login("teacher", "secret").await;
        assert_eq!(board.roster().removal_controls(), 1);

        let notice = board.logout().await;
        assert_eq!(notice.kind, NoticeKind::Info);
        assert_eq!(board.roster().removal_controls(), 0);
        assert!(!board.is_authenticated());
    }
}
