//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent network requests and process control only; the reducer
//! never spawns anything itself.

use rollcall_core::commands::AuthorizedMutation;

use crate::common::TaskId;

#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Check the stored token against `/auth/verify`.
    VerifySession { task: TaskId, token: String },

    /// Submit credentials to `/auth/login`.
    SubmitLogin {
        task: TaskId,
        username: String,
        password: String,
    },

    /// Fetch the whole activity collection.
    FetchRoster { task: TaskId },

    /// Send a signup or unregister request that passed the session guard.
    SendMutation {
        task: TaskId,
        mutation: AuthorizedMutation,
    },
}
