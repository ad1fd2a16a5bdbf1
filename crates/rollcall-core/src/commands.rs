//! Mutation Commands: register and remove a participant.
//!
//! Both commands are guarded by the session: without an authenticated
//! teacher they return an error notice and never reach the network. On
//! success the caller refreshes the whole roster; the local view is never
//! patched.

use crate::api::{ApiError, BoardApi, MessageResponse};
use crate::notify::Notice;
use crate::session::{SessionStore, TokenStore};

pub const REJECTED_FALLBACK: &str = "An error occurred";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Register,
    Remove,
}

impl MutationKind {
    fn unauthorized_message(self) -> &'static str {
        match self {
            MutationKind::Register => "Only teachers can register students",
            MutationKind::Remove => "Only teachers can unregister students",
        }
    }

    fn transport_message(self) -> &'static str {
        match self {
            MutationKind::Register => "Failed to sign up. Please try again.",
            MutationKind::Remove => "Failed to unregister. Please try again.",
        }
    }
}

/// A user's request to change a roster, not yet sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMutation {
    pub activity: String,
    pub email: String,
    pub kind: MutationKind,
}

impl PendingMutation {
    pub fn register(activity: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            activity: activity.into(),
            email: email.into(),
            kind: MutationKind::Register,
        }
    }

    pub fn remove(activity: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            activity: activity.into(),
            email: email.into(),
            kind: MutationKind::Remove,
        }
    }
}

/// A mutation that passed the session guard, carrying the bearer token.
#[derive(Debug, Clone)]
pub struct AuthorizedMutation {
    pub token: String,
    pub intent: PendingMutation,
}

/// What the driver should do after a command completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub notice: Notice,
    /// Fetch and re-render the roster.
    pub refresh: bool,
    /// Reset the signup input.
    pub clear_input: bool,
}

/// Applies the session guard.
///
/// # Errors
/// Returns the notice to show when no teacher is authenticated.
pub fn authorize<S: TokenStore>(
    session: &SessionStore<S>,
    intent: PendingMutation,
) -> Result<AuthorizedMutation, Notice> {
    match session.token() {
        Some(token) if session.is_authenticated() => Ok(AuthorizedMutation {
            token: token.to_string(),
            intent,
        }),
        _ => {
            tracing::info!(kind = ?intent.kind, "mutation blocked: not authenticated");
            Err(Notice::error(intent.kind.unauthorized_message()))
        }
    }
}

/// Sends an authorized mutation.
///
/// # Errors
/// Returns the API failure unchanged.
pub async fn execute<A: BoardApi>(
    api: &A,
    mutation: &AuthorizedMutation,
) -> Result<MessageResponse, ApiError> {
    let PendingMutation {
        activity,
        email,
        kind,
    } = &mutation.intent;
    match kind {
        MutationKind::Register => api.signup(&mutation.token, activity, email).await,
        MutationKind::Remove => api.unregister(&mutation.token, activity, email).await,
    }
}

/// Maps a mutation response to the notice and follow-up actions.
pub fn settle(kind: MutationKind, result: Result<MessageResponse, ApiError>) -> CommandOutcome {
    match result {
        Ok(response) => CommandOutcome {
            notice: Notice::success(response.message),
            refresh: true,
            clear_input: kind == MutationKind::Register,
        },
        Err(e) => {
            tracing::info!(kind = ?kind, error = %e, "mutation failed");
            let text = match e {
                ApiError::Rejected { detail, .. } => {
                    detail.unwrap_or_else(|| REJECTED_FALLBACK.to_string())
                }
                ApiError::Transport(_) | ApiError::Url(_) => kind.transport_message().to_string(),
            };
            CommandOutcome {
                notice: Notice::error(text),
                refresh: false,
                clear_input: false,
            }
        }
    }
}

/// Guard, send, and settle in one step.
pub async fn run<A: BoardApi, S: TokenStore>(
    api: &A,
    session: &SessionStore<S>,
    intent: PendingMutation,
) -> CommandOutcome {
    let kind = intent.kind;
    match authorize(session, intent) {
        Ok(mutation) => settle(kind, execute(api, &mutation).await),
        Err(notice) => CommandOutcome {
            notice,
            refresh: false,
            clear_input: false,
        },
    }
}

pub async fn register<A: BoardApi, S: TokenStore>(
    api: &A,
    session: &SessionStore<S>,
    activity: &str,
    email: &str,
) -> CommandOutcome {
    run(api, session, PendingMutation::register(activity, email)).await
}

pub async fn remove<A: BoardApi, S: TokenStore>(
    api: &A,
    session: &SessionStore<S>,
    activity: &str,
    email: &str,
) -> CommandOutcome {
    run(api, session, PendingMutation::remove(activity, email)).await
}

/// Required-field and email-shape checks of the signup form.
///
/// Mirrors native form validation only: a selected activity and an address
/// with a non-empty local part and domain.
///
/// # Errors
/// Returns the message to show next to the form.
pub fn validate_signup_form(activity: Option<&str>, email: &str) -> Result<(), &'static str> {
    if activity.is_none_or(|a| a.trim().is_empty()) {
        return Err("Please select an activity.");
    }
    let email = email.trim();
    if email.is_empty() {
        return Err("Please enter an email address.");
    }
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.contains(char::is_whitespace) =>
        {
            Ok(())
        }
        _ => Err("Please enter a valid email address."),
    }
}
