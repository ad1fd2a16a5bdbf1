//! Application state composition.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── gate: AuthGate        (session + auth phase)
//! │   ├── roster: RosterState   (latest rendered view, cursor)
//! │   ├── signup: SignupForm    (activity choice, email input)
//! │   ├── notifier: Notifier    (transient status message)
//! │   ├── task_seq: TaskSeq     (async task id generator)
//! │   └── tasks: Tasks          (per-control task slots)
//! └── overlay: Option<Overlay>  (modal overlays)
//! ```
//!
//! Overlays live beside `TuiState` so an overlay key handler can borrow
//! itself and the rest of the UI state mutably at the same time.

use std::time::{Duration, Instant};

use rollcall_core::commands::{MutationKind, PendingMutation};
use rollcall_core::gate::{Affordances, AuthGate};
use rollcall_core::notify::{Notice, Notifier};
use rollcall_core::session::{SessionStore, TokenStore};

use crate::auth::Credentials;
use crate::common::{ControlSlot, TaskSeq, TaskState};
use crate::overlays::Overlay;
use crate::roster::RosterState;
use crate::signup::SignupForm;

/// Token slot type erased so the runtime can pick file or memory storage.
pub type SessionSlot = Box<dyn TokenStore + Send>;

pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    pub fn new(session: SessionStore<SessionSlot>, notice_duration: Duration) -> Self {
        Self {
            tui: TuiState::new(session, notice_duration),
            overlay: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Roster,
    Signup,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Focus::Roster => Focus::Signup,
            Focus::Signup => Focus::Roster,
        }
    }
}

/// Task slots, one per control.
///
/// The roster slot is latest-wins: a new refresh supersedes the one in
/// flight. The other controls queue actions behind their running task.
#[derive(Debug, Default)]
pub struct Tasks {
    pub verify: TaskState,
    pub roster: TaskState,
    pub login: ControlSlot<Credentials>,
    pub signup: ControlSlot<PendingMutation>,
    pub remove: ControlSlot<PendingMutation>,
}

impl Tasks {
    pub fn mutation_slot(&mut self, kind: MutationKind) -> &mut ControlSlot<PendingMutation> {
        match kind {
            MutationKind::Register => &mut self.signup,
            MutationKind::Remove => &mut self.remove,
        }
    }

    pub fn is_any_running(&self) -> bool {
        self.verify.is_running()
            || self.roster.is_running()
            || self.login.is_busy()
            || self.signup.is_busy()
            || self.remove.is_busy()
    }
}

pub struct TuiState {
    pub should_quit: bool,
    pub focus: Focus,
    pub gate: AuthGate<SessionSlot>,
    pub roster: RosterState,
    pub signup: SignupForm,
    pub notifier: Notifier,
    pub task_seq: TaskSeq,
    pub tasks: Tasks,
}

impl TuiState {
    pub fn new(session: SessionStore<SessionSlot>, notice_duration: Duration) -> Self {
        Self {
            should_quit: false,
            focus: Focus::default(),
            gate: AuthGate::new(session),
            roster: RosterState::default(),
            signup: SignupForm::default(),
            notifier: Notifier::new(notice_duration),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
        }
    }

    pub fn affordances(&self) -> Affordances {
        self.gate.affordances()
    }

    pub fn notify(&mut self, notice: Notice) {
        self.notifier.show(notice, Instant::now());
    }
}
