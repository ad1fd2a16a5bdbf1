//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame`, and never
//! mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use rollcall_core::notify::{Notice, NoticeKind};

use crate::auth::render_header;
use crate::roster::render_roster;
use crate::signup::render_signup;
use crate::state::{AppState, Focus, TuiState};

const HEADER_HEIGHT: u16 = 2;
const NOTICE_HEIGHT: u16 = 1;
const HINTS_HEIGHT: u16 = 1;

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let state = &app.tui;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(5),
            Constraint::Length(NOTICE_HEIGHT),
            Constraint::Length(HINTS_HEIGHT),
        ])
        .split(area);

    render_header(&state.gate, frame, chunks[0]);
    render_body(state, frame, chunks[1]);
    render_notice(state.notifier.current(), frame, chunks[2]);
    render_hints(state, frame, chunks[3]);

    if let Some(overlay) = &app.overlay {
        overlay.render(frame, area);
    }
}

fn render_body(state: &TuiState, frame: &mut Frame, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_roster(
        &state.roster,
        state.focus == Focus::Roster,
        frame,
        columns[0],
    );
    render_signup(
        &state.signup,
        &state.affordances(),
        &state.tasks,
        state.focus == Focus::Signup,
        frame,
        columns[1],
    );
}

fn render_notice(notice: Option<&Notice>, frame: &mut Frame, area: Rect) {
    let Some(notice) = notice else {
        return;
    };
    let color = match notice.kind {
        NoticeKind::Success => Color::Green,
        NoticeKind::Info => Color::Blue,
        NoticeKind::Error => Color::Red,
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!(" {}", notice.text),
            Style::default().fg(color),
        ))),
        area,
    );
}

fn render_hints(state: &TuiState, frame: &mut Frame, area: Rect) {
    let affordances = state.affordances();
    let hints = match state.focus {
        Focus::Roster => {
            let mut hints = vec!["Tab form", "↑/↓ move", "r refresh"];
            if affordances.login_visible {
                hints.push("l login");
            }
            if affordances.status_visible {
                hints.push("d remove");
                hints.push("o logout");
            }
            hints.push("q quit");
            hints
        }
        Focus::Signup => vec![
            "Tab/Esc roster",
            "←/→ activity",
            "type email",
            "Enter sign up",
        ],
    };
    let text = if state.tasks.is_any_running() {
        format!(" {}  ·  working...", hints.join("  ·  "))
    } else {
        format!(" {}", hints.join("  ·  "))
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(Color::DarkGray),
        ))),
        area,
    );
}
