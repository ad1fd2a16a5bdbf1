//! Interactive board command.

use anyhow::{Context, Result};

use super::Client;

pub async fn run(client: Client) -> Result<()> {
    rollcall_tui::run_board(&client.config, client.api, client.slot)
        .await
        .context("interactive board failed")
}
