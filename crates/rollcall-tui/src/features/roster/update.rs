use crossterm::event::{KeyCode, KeyEvent};
use rollcall_core::commands::PendingMutation;

use crate::effects::UiEffect;
use crate::state::TuiState;
use crate::update::submit_mutation;

/// Keys handled while the roster has focus (after the global keys).
pub fn handle_key(tui: &mut TuiState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            tui.roster.cursor_up();
            vec![]
        }
        KeyCode::Down | KeyCode::Char('j') => {
            tui.roster.cursor_down();
            vec![]
        }
        KeyCode::Char('d') | KeyCode::Delete => remove_selected(tui),
        _ => vec![],
    }
}

/// Fires the removal control of the selected row, if that row has one.
fn remove_selected(tui: &mut TuiState) -> Vec<UiEffect> {
    let intent = match tui.roster.selected() {
        Some((card, row)) if row.removable => PendingMutation::remove(&card.name, &row.email),
        _ => return vec![],
    };
    submit_mutation(tui, intent)
}
