//! Auth Gate: reconciles the Session Store with server-side token validity.
//!
//! The gate is a small state machine over [`AuthPhase`]:
//!
//! ```text
//! Unverified --startup, no token------------> Unauthenticated
//! Unverified --startup, verify OK-----------> Authenticated
//! Unverified --startup, verify failed-------> Unauthenticated (token cleared)
//! any        --login OK---------------------> Authenticated (token stored)
//! any        --login failed-----------------> unchanged (inline error)
//! any        --logout-----------------------> Unauthenticated (token cleared)
//! ```
//!
//! Each transition is a plain method returning an outcome, so drivers that
//! run requests on their own (the TUI runtime) can feed results back in.
//! [`AuthGate::startup`] and [`AuthGate::login`] chain request and transition
//! for sequential drivers.

use crate::api::{ApiError, BoardApi, LoginResponse, VerifyResponse};
use crate::notify::Notice;
use crate::session::{SessionStore, TokenStore};

pub const LOGIN_SUCCESS: &str = "Successfully logged in!";
pub const LOGOUT_SUCCESS: &str = "Successfully logged out";
pub const LOGIN_REJECTED_FALLBACK: &str = "Login failed";
pub const LOGIN_TRANSPORT_FAILURE: &str = "Login failed. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    Unverified,
    Authenticated,
    Unauthenticated,
}

/// UI affordances that depend on authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Affordances {
    pub signup_form_enabled: bool,
    pub submit_enabled: bool,
    pub teacher_notice_visible: bool,
    pub login_visible: bool,
    pub status_visible: bool,
    /// `Welcome, {name}` while authenticated.
    pub greeting: Option<String>,
}

impl Affordances {
    fn enabled(display_name: &str) -> Self {
        Self {
            signup_form_enabled: true,
            submit_enabled: true,
            teacher_notice_visible: false,
            login_visible: false,
            status_visible: true,
            greeting: Some(format!("Welcome, {display_name}")),
        }
    }

    fn disabled() -> Self {
        Self {
            signup_form_enabled: false,
            submit_enabled: false,
            teacher_notice_visible: true,
            login_visible: true,
            status_visible: false,
            greeting: None,
        }
    }
}

/// What the driver must do after [`AuthGate::begin_startup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupStep {
    /// No token: the gate is already Unauthenticated.
    Settled,
    /// Verify this token and pass the result to [`AuthGate::on_verified`].
    Verify { token: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    LoggedIn { notice: Notice },
    /// Shown inline in the login surface; the phase is unchanged.
    Failed { inline_error: String },
}

#[derive(Debug)]
pub struct AuthGate<S> {
    session: SessionStore<S>,
    phase: AuthPhase,
}

impl<S: TokenStore> AuthGate<S> {
    pub fn new(session: SessionStore<S>) -> Self {
        Self {
            session,
            phase: AuthPhase::Unverified,
        }
    }

    pub fn phase(&self) -> AuthPhase {
        self.phase
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Read-only view of the session.
    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    pub fn affordances(&self) -> Affordances {
        match (self.phase, self.session.display_name()) {
            (AuthPhase::Authenticated, Some(name)) => Affordances::enabled(name),
            (AuthPhase::Authenticated, None) => Affordances::enabled(""),
            (AuthPhase::Unverified | AuthPhase::Unauthenticated, _) => Affordances::disabled(),
        }
    }

    /// Loads the persisted token and decides whether verification is needed.
    pub fn begin_startup(&mut self) -> StartupStep {
        self.session.initialize();
        match self.session.token() {
            Some(token) => StartupStep::Verify {
                token: token.to_string(),
            },
            None => {
                self.phase = AuthPhase::Unauthenticated;
                tracing::info!("no stored token; unauthenticated");
                StartupStep::Settled
            }
        }
    }

    /// Applies the verification result.
    ///
    /// Only meaningful while Unverified: a login or logout that completed
    /// first has already decided the phase, and a late result is dropped.
    pub fn on_verified(&mut self, result: Result<VerifyResponse, ApiError>) -> AuthPhase {
        if self.phase != AuthPhase::Unverified {
            tracing::debug!(phase = ?self.phase, "dropping late verification result");
            return self.phase;
        }

        match result {
            Ok(response) => {
                tracing::info!("stored token verified");
                self.session.confirm(response.teacher_name);
                self.phase = AuthPhase::Authenticated;
            }
            Err(e) => {
                tracing::info!(error = %e, "stored token rejected; clearing session");
                self.session.invalidate();
                self.phase = AuthPhase::Unauthenticated;
            }
        }
        self.phase
    }

    /// Applies a login response.
    pub fn on_login(&mut self, result: Result<LoginResponse, ApiError>) -> LoginOutcome {
        match result {
            Ok(response) => {
                tracing::info!("login succeeded");
                self.session
                    .login(response.access_token, response.teacher_name);
                self.phase = AuthPhase::Authenticated;
                LoginOutcome::LoggedIn {
                    notice: Notice::success(LOGIN_SUCCESS),
                }
            }
            Err(e) => {
                tracing::info!(error = %e, "login failed");
                let inline_error = match &e {
                    ApiError::Rejected { detail, .. } => detail
                        .clone()
                        .unwrap_or_else(|| LOGIN_REJECTED_FALLBACK.to_string()),
                    ApiError::Transport(_) | ApiError::Url(_) => {
                        LOGIN_TRANSPORT_FAILURE.to_string()
                    }
                };
                LoginOutcome::Failed { inline_error }
            }
        }
    }

    /// Ends the session locally. Always succeeds; no network call.
    pub fn logout(&mut self) -> Notice {
        self.session.logout();
        self.phase = AuthPhase::Unauthenticated;
        tracing::info!("logged out");
        Notice::info(LOGOUT_SUCCESS)
    }

    /// Runs the full startup reconciliation against `api`.
    pub async fn startup<A: BoardApi>(&mut self, api: &A) -> AuthPhase {
        match self.begin_startup() {
            StartupStep::Settled => self.phase,
            StartupStep::Verify { token } => {
                let result = api.verify(&token).await;
                self.on_verified(result)
            }
        }
    }

    /// Submits credentials and applies the response.
    pub async fn login<A: BoardApi>(
        &mut self,
        api: &A,
        username: &str,
        password: &str,
    ) -> LoginOutcome {
        let result = api.login(username, password).await;
        self.on_login(result)
    }
}
