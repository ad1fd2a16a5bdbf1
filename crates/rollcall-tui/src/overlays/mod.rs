//! Overlay modules for the TUI.
//!
//! Overlays are modal UI components that temporarily take over keyboard input.
//! Each overlay owns its state, key handler, and render function.
//!
//! - `login.rs`: teacher login form
//! - `render_utils.rs`: shared rendering utilities for overlays

pub mod login;
pub mod render_utils;

use crossterm::event::KeyEvent;
pub use login::LoginState;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::auth::render_login_overlay;
use crate::effects::UiEffect;
use crate::state::TuiState;

/// Transition returned by overlay key handlers.
#[derive(Debug)]
pub enum OverlayTransition {
    Stay,
    Close,
}

/// Update returned by overlay key handlers.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub effects: Vec<UiEffect>,
}

impl OverlayUpdate {
    fn new(transition: OverlayTransition) -> Self {
        Self {
            transition,
            effects: Vec::new(),
        }
    }

    pub fn stay() -> Self {
        Self::new(OverlayTransition::Stay)
    }

    pub fn close() -> Self {
        Self::new(OverlayTransition::Close)
    }

    #[must_use]
    pub fn with_ui_effects(mut self, effects: Vec<UiEffect>) -> Self {
        self.effects = effects;
        self
    }
}

#[derive(Debug)]
pub enum Overlay {
    Login(LoginState),
}

impl Overlay {
    pub fn handle_key(&mut self, tui: &mut TuiState, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::Login(state) => state.handle_key(tui, key),
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        match self {
            Overlay::Login(state) => state.handle_paste(text),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        match self {
            Overlay::Login(state) => render_login_overlay(state, frame, area),
        }
    }
}
