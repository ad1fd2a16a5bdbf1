//! Full-screen TUI for the rollcall sign-up board.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr, stdout};

use anyhow::Result;
pub use features::{auth, roster, signup};
use rollcall_core::api::HttpBoardApi;
use rollcall_core::config::Config;
use rollcall_core::session::SessionStore;
pub use runtime::TuiRuntime;
pub use state::SessionSlot;

/// Runs the interactive board until the user quits.
///
/// # Errors
/// Returns an error if no terminal is attached or terminal I/O fails.
pub async fn run_board(config: &Config, api: HttpBoardApi, slot: SessionSlot) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!(
            "The board requires a terminal.\n\
             Use `rollcall activities` for non-interactive output."
        );
    }

    tracing::info!(base_url = %api.base_url(), "starting board TUI");
    let mut runtime = TuiRuntime::new(api, SessionStore::new(slot), config.notice_duration())?;
    runtime.run()?;
    drop(runtime);

    writeln!(stderr(), "Goodbye!")?;
    Ok(())
}
