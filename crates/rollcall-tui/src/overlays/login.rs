use crossterm::event::{KeyCode, KeyEvent};

use super::OverlayUpdate;
use crate::auth::{Credentials, submit_login};
use crate::common::TextField;
use crate::state::TuiState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

/// Teacher login form.
#[derive(Debug, Default)]
pub struct LoginState {
    pub username: TextField,
    pub password: TextField,
    pub field: LoginField,
    /// Inline error from the last failed attempt.
    pub error: Option<String>,
    pub submitting: bool,
}

impl LoginState {
    pub fn open() -> Self {
        Self::default()
    }

    /// Shows a failed attempt inline and lets the user edit again.
    pub fn fail(&mut self, error: String) {
        self.submitting = false;
        self.error = Some(error);
        self.password.clear();
        self.field = LoginField::Password;
    }

    fn active_field(&mut self) -> &mut TextField {
        match self.field {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        self.active_field().insert_str(text);
    }

    pub fn handle_key(&mut self, tui: &mut TuiState, key: KeyEvent) -> OverlayUpdate {
        match key.code {
            KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.field = match self.field {
                    LoginField::Username => LoginField::Password,
                    LoginField::Password => LoginField::Username,
                };
                OverlayUpdate::stay()
            }
            KeyCode::Backspace => {
                self.active_field().backspace();
                OverlayUpdate::stay()
            }
            KeyCode::Char(c) => {
                self.active_field().insert_char(c);
                OverlayUpdate::stay()
            }
            KeyCode::Enter => self.submit(tui),
            _ => OverlayUpdate::stay(),
        }
    }

    fn submit(&mut self, tui: &mut TuiState) -> OverlayUpdate {
        if self.username.value().trim().is_empty() {
            self.field = LoginField::Username;
            return OverlayUpdate::stay();
        }
        if self.password.is_empty() {
            self.field = LoginField::Password;
            return OverlayUpdate::stay();
        }

        self.submitting = true;
        self.error = None;
        let credentials = Credentials {
            username: self.username.value().trim().to_string(),
            password: self.password.value().to_string(),
        };
        OverlayUpdate::stay().with_ui_effects(submit_login(tui, credentials))
    }
}
