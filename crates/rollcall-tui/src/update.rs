//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.
//!
//! Ordering rules:
//! - login, signup, and remove each own a [`ControlSlot`](crate::common::ControlSlot).
//!   A second action from a busy control waits its turn, and a slot stays
//!   busy until the roster refresh its action triggered has been applied.
//! - roster fetches are latest-wins: only the most recently issued fetch is
//!   rendered, older results are dropped on arrival.

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rollcall_core::activity::Activities;
use rollcall_core::api::{ApiError, MessageResponse};
use rollcall_core::commands::{self, MutationKind, PendingMutation};
use rollcall_core::gate::StartupStep;
use rollcall_core::roster;

use crate::auth::{self, Credentials};
use crate::common::TaskId;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::overlays::{LoginState, Overlay, OverlayTransition};
use crate::state::{AppState, Focus, TuiState};
use crate::{roster as roster_view, signup};

/// Effects to run once at startup: verify a stored token, or go straight to
/// the first roster render when there is none.
pub fn init(app: &mut AppState) -> Vec<UiEffect> {
    let tui = &mut app.tui;
    match tui.gate.begin_startup() {
        StartupStep::Settled => {
            let (_, effect) = start_refresh(tui);
            vec![effect]
        }
        StartupStep::Verify { token } => {
            let task = tui.task_seq.next_id();
            tui.tasks.verify.start(task);
            vec![UiEffect::VerifySession { task, token }]
        }
    }
}

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.tui.notifier.expire(Instant::now());
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::VerifyCompleted { id, result } => auth::handle_verified(&mut app.tui, id, result),
        UiEvent::LoginCompleted { id, result } => auth::handle_login_result(app, id, result),
        UiEvent::RosterLoaded { id, result } => handle_roster_loaded(&mut app.tui, id, result),
        UiEvent::MutationCompleted { id, kind, result } => {
            handle_mutation_completed(&mut app.tui, id, kind, result)
        }
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Paste(text) => {
            if let Some(overlay) = app.overlay.as_mut() {
                overlay.handle_paste(&text);
            } else if app.tui.focus == Focus::Signup {
                signup::handle_paste(&mut app.tui, &text);
            }
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![UiEffect::Quit];
    }

    if let Some(overlay) = app.overlay.as_mut() {
        let update = overlay.handle_key(&mut app.tui, key);
        if matches!(update.transition, OverlayTransition::Close) {
            app.overlay = None;
        }
        return update.effects;
    }

    let tui = &mut app.tui;
    if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
        tui.focus = tui.focus.toggle();
        return vec![];
    }

    match tui.focus {
        Focus::Signup => {
            if key.code == KeyCode::Esc {
                tui.focus = Focus::Roster;
                return vec![];
            }
            signup::handle_key(tui, key)
        }
        Focus::Roster => match key.code {
            KeyCode::Char('q') => vec![UiEffect::Quit],
            KeyCode::Char('l') => {
                if tui.affordances().login_visible {
                    app.overlay = Some(Overlay::Login(LoginState::open()));
                }
                vec![]
            }
            KeyCode::Char('o') => {
                if tui.affordances().status_visible {
                    auth::logout(tui)
                } else {
                    vec![]
                }
            }
            KeyCode::Char('r') => {
                let (_, effect) = start_refresh(tui);
                vec![effect]
            }
            _ => roster_view::handle_key(tui, key),
        },
    }
}

/// Issues a roster fetch, superseding any fetch still in flight.
pub(crate) fn start_refresh(tui: &mut TuiState) -> (TaskId, UiEffect) {
    let task = tui.task_seq.next_id();
    tui.tasks.roster.start(task);
    (task, UiEffect::FetchRoster { task })
}

fn handle_roster_loaded(
    tui: &mut TuiState,
    id: TaskId,
    result: Result<Activities, ApiError>,
) -> Vec<UiEffect> {
    if !tui.tasks.roster.finish_if_active(id) {
        tracing::debug!(task = id.0, "dropping superseded roster result");
        return vec![];
    }

    let view = roster::settle(result, tui.gate.is_authenticated());
    tui.signup.sync_options(view.options());
    tui.roster.apply(view);

    tui.tasks.login.on_refresh_applied(id);
    tui.tasks.signup.on_refresh_applied(id);
    tui.tasks.remove.on_refresh_applied(id);
    drain_queues(tui)
}

/// Queues a mutation behind its control's running task, or sends it now.
pub(crate) fn submit_mutation(tui: &mut TuiState, intent: PendingMutation) -> Vec<UiEffect> {
    let slot = tui.tasks.mutation_slot(intent.kind);
    if slot.is_busy() {
        slot.enqueue(intent);
        return vec![];
    }
    dispatch_mutation(tui, intent).into_iter().collect()
}

/// Applies the session guard and starts the request.
///
/// Returns `None` when the guard refused; its notice is shown instead.
fn dispatch_mutation(tui: &mut TuiState, intent: PendingMutation) -> Option<UiEffect> {
    let kind = intent.kind;
    match commands::authorize(tui.gate.session(), intent) {
        Ok(mutation) => {
            let task = tui.task_seq.next_id();
            tui.tasks.mutation_slot(kind).task.start(task);
            Some(UiEffect::SendMutation { task, mutation })
        }
        Err(notice) => {
            tui.notify(notice);
            None
        }
    }
}

pub(crate) fn dispatch_login(tui: &mut TuiState, credentials: Credentials) -> UiEffect {
    let task = tui.task_seq.next_id();
    tui.tasks.login.task.start(task);
    UiEffect::SubmitLogin {
        task,
        username: credentials.username,
        password: credentials.password,
    }
}

fn handle_mutation_completed(
    tui: &mut TuiState,
    id: TaskId,
    kind: MutationKind,
    result: Result<MessageResponse, ApiError>,
) -> Vec<UiEffect> {
    if !tui.tasks.mutation_slot(kind).task.finish_if_active(id) {
        return vec![];
    }

    let outcome = commands::settle(kind, result);
    tui.notify(outcome.notice);
    if outcome.clear_input {
        tui.signup.reset_input();
    }

    let mut effects = Vec::new();
    if outcome.refresh {
        let (refresh, effect) = start_refresh(tui);
        tui.tasks.mutation_slot(kind).await_refresh(refresh);
        effects.push(effect);
    }
    effects.extend(drain_queues(tui));
    effects
}

/// Starts the next queued action of every idle control.
pub(crate) fn drain_queues(tui: &mut TuiState) -> Vec<UiEffect> {
    let mut effects = Vec::new();

    if let Some(credentials) = tui.tasks.login.next_ready() {
        effects.push(dispatch_login(tui, credentials));
    }

    for kind in [MutationKind::Register, MutationKind::Remove] {
        while let Some(intent) = tui.tasks.mutation_slot(kind).next_ready() {
            if let Some(effect) = dispatch_mutation(tui, intent) {
                effects.push(effect);
                break;
            }
        }
    }

    effects
}
