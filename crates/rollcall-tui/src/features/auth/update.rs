use rollcall_core::api::{ApiError, LoginResponse, VerifyResponse};
use rollcall_core::gate::LoginOutcome;
use rollcall_core::notify::Notice;

use super::Credentials;
use crate::common::TaskId;
use crate::effects::UiEffect;
use crate::overlays::Overlay;
use crate::state::{AppState, TuiState};
use crate::update::{dispatch_login, drain_queues, start_refresh};

/// Applies the startup verification result, then performs the first render.
pub fn handle_verified(
    tui: &mut TuiState,
    id: TaskId,
    result: Result<VerifyResponse, ApiError>,
) -> Vec<UiEffect> {
    if !tui.tasks.verify.finish_if_active(id) {
        return vec![];
    }
    let phase = tui.gate.on_verified(result);
    tracing::debug!(?phase, "auth gate settled");
    let (_, effect) = start_refresh(tui);
    vec![effect]
}

/// Queues credentials behind a running login, or sends them now.
pub fn submit_login(tui: &mut TuiState, credentials: Credentials) -> Vec<UiEffect> {
    if tui.tasks.login.is_busy() {
        tui.tasks.login.enqueue(credentials);
        return vec![];
    }
    vec![dispatch_login(tui, credentials)]
}

pub fn handle_login_result(
    app: &mut AppState,
    id: TaskId,
    result: Result<LoginResponse, ApiError>,
) -> Vec<UiEffect> {
    let tui = &mut app.tui;
    if !tui.tasks.login.task.finish_if_active(id) {
        return vec![];
    }

    let mut effects = Vec::new();
    match tui.gate.on_login(result) {
        LoginOutcome::LoggedIn { notice } => {
            tui.notify(notice);
            if matches!(app.overlay, Some(Overlay::Login(_))) {
                app.overlay = None;
            }
            let (refresh, effect) = start_refresh(tui);
            tui.tasks.login.await_refresh(refresh);
            effects.push(effect);
        }
        LoginOutcome::Failed { inline_error } => match &mut app.overlay {
            Some(Overlay::Login(login)) => login.fail(inline_error),
            _ => tui.notify(Notice::error(inline_error)),
        },
    }

    effects.extend(drain_queues(tui));
    effects
}

/// Ends the session and re-renders so removal controls disappear.
pub fn logout(tui: &mut TuiState) -> Vec<UiEffect> {
    let notice = tui.gate.logout();
    tui.notify(notice);
    let (_, effect) = start_refresh(tui);
    vec![effect]
}
