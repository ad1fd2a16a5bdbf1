//! Auth feature slice: startup verification, login, logout, header status.

mod render;
mod update;

use std::fmt;

pub use render::{render_header, render_login_overlay};
pub use update::{handle_login_result, handle_verified, logout, submit_login};

/// Credentials waiting in the login slot.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
