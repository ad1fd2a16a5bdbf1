//! CLI command handlers.

pub mod auth;
pub mod board;
pub mod config;
pub mod tui;

use anyhow::{Context, Result};
use rollcall_core::api::HttpBoardApi;
use rollcall_core::board::Board;
use rollcall_core::config::Config;
use rollcall_core::logging::{self, WorkerGuard};
use rollcall_core::session::{FileTokenStore, MemoryTokenStore, SessionStore};
use rollcall_tui::SessionSlot;

/// Everything a board command needs: loaded config, API client, token slot.
pub struct Client {
    pub config: Config,
    pub api: HttpBoardApi,
    pub slot: SessionSlot,
    log_guard: WorkerGuard,
}

impl Client {
    /// Loads config, installs logging, and resolves the API base URL.
    ///
    /// # Errors
    /// Returns an error if the config cannot be loaded or the base URL is invalid.
    pub fn build(base_url_override: Option<&str>, ephemeral: bool) -> Result<Self> {
        let config = Config::load().context("load config")?;
        let log_guard = logging::init(&config).context("init logging")?;

        let base_url = config
            .effective_base_url(base_url_override)
            .context("resolve base URL")?;
        let api = HttpBoardApi::new(&base_url, config.request_timeout())
            .with_context(|| format!("build API client for {base_url}"))?;

        let slot: SessionSlot = if ephemeral {
            Box::new(MemoryTokenStore::default())
        } else {
            Box::new(FileTokenStore::at_default_path())
        };
        tracing::debug!(%base_url, ephemeral, "client ready");

        Ok(Self {
            config,
            api,
            slot,
            log_guard,
        })
    }

    /// Consumes the client into a sequential board controller.
    ///
    /// The returned guard flushes buffered log lines; hold it until the
    /// command finishes.
    pub fn into_board(self) -> (Board<HttpBoardApi, SessionSlot>, WorkerGuard) {
        let board = Board::new(
            self.api,
            SessionStore::new(self.slot),
            self.config.notice_duration(),
        );
        (board, self.log_guard)
    }
}
