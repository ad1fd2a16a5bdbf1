//! Events consumed by the reducer.
//!
//! Terminal input and timer ticks come from the runtime loop; every other
//! variant is the result of a spawned request, delivered through the inbox.

use crossterm::event::Event;
use rollcall_core::activity::Activities;
use rollcall_core::api::{ApiError, LoginResponse, MessageResponse, VerifyResponse};
use rollcall_core::commands::MutationKind;

use crate::common::TaskId;

#[derive(Debug)]
pub enum UiEvent {
    Tick,
    Terminal(Event),
    VerifyCompleted {
        id: TaskId,
        result: Result<VerifyResponse, ApiError>,
    },
    LoginCompleted {
        id: TaskId,
        result: Result<LoginResponse, ApiError>,
    },
    RosterLoaded {
        id: TaskId,
        result: Result<Activities, ApiError>,
    },
    MutationCompleted {
        id: TaskId,
        kind: MutationKind,
        result: Result<MessageResponse, ApiError>,
    },
}
