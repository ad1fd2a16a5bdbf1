//! Effect handlers for the TUI runtime.
//!
//! Handlers are pure async functions that perform one request and return the
//! `UiEvent` carrying its result. The runtime spawns them and forwards the
//! event to the inbox. They never touch `AppState`.

use rollcall_core::api::BoardApi;
use rollcall_core::commands::{self, AuthorizedMutation};

use crate::common::TaskId;
use crate::events::UiEvent;

pub async fn verify_session<A: BoardApi>(api: A, id: TaskId, token: String) -> UiEvent {
    let result = api.verify(&token).await;
    UiEvent::VerifyCompleted { id, result }
}

pub async fn submit_login<A: BoardApi>(
    api: A,
    id: TaskId,
    username: String,
    password: String,
) -> UiEvent {
    let result = api.login(&username, &password).await;
    UiEvent::LoginCompleted { id, result }
}

pub async fn fetch_roster<A: BoardApi>(api: A, id: TaskId) -> UiEvent {
    let result = api.list_activities().await;
    UiEvent::RosterLoaded { id, result }
}

pub async fn send_mutation<A: BoardApi>(
    api: A,
    id: TaskId,
    mutation: AuthorizedMutation,
) -> UiEvent {
    let kind = mutation.intent.kind;
    let result = commands::execute(&api, &mutation).await;
    UiEvent::MutationCompleted { id, kind, result }
}
