use crossterm::event::{KeyCode, KeyEvent};
use rollcall_core::commands::{self, PendingMutation};

use crate::effects::UiEffect;
use crate::state::TuiState;
use crate::update::submit_mutation;

/// Keys handled while the signup form has focus.
///
/// A disabled form is inert: nothing is edited and Enter submits nothing.
pub fn handle_key(tui: &mut TuiState, key: KeyEvent) -> Vec<UiEffect> {
    if !tui.affordances().signup_form_enabled {
        return vec![];
    }

    match key.code {
        KeyCode::Left | KeyCode::Right => {
            let options = tui.roster.view().options().to_vec();
            tui.signup.cycle(&options, key.code == KeyCode::Right);
            vec![]
        }
        KeyCode::Backspace => {
            tui.signup.email.backspace();
            vec![]
        }
        KeyCode::Char(c) => {
            tui.signup.email.insert_char(c);
            vec![]
        }
        KeyCode::Enter => submit(tui),
        _ => vec![],
    }
}

pub fn handle_paste(tui: &mut TuiState, text: &str) {
    if tui.affordances().signup_form_enabled {
        tui.signup.email.insert_str(text);
    }
}

fn submit(tui: &mut TuiState) -> Vec<UiEffect> {
    let email = tui.signup.email.value().trim().to_string();
    if let Err(message) = commands::validate_signup_form(tui.signup.selected(), &email) {
        tui.signup.error = Some(message.to_string());
        return vec![];
    }
    tui.signup.error = None;

    let Some(activity) = tui.signup.selected().map(str::to_string) else {
        return vec![];
    };
    submit_mutation(tui, PendingMutation::register(activity, email))
}
