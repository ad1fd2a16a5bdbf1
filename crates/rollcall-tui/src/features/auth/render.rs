use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use rollcall_core::gate::{AuthGate, AuthPhase};
use rollcall_core::session::TokenStore;

use crate::overlays::login::{LoginField, LoginState};
use crate::overlays::render_utils::{calculate_overlay_area, render_overlay_container};

const TITLE: &str = "School Activity Sign-Up";

/// Title bar with the authentication status on the right.
pub fn render_header<S: TokenStore>(gate: &AuthGate<S>, frame: &mut Frame, area: Rect) {
    let affordances = gate.affordances();
    let status = if let Some(greeting) = affordances
        .greeting
        .filter(|_| affordances.status_visible)
    {
        Line::from(vec![
            Span::styled(greeting, Style::default().fg(Color::Green)),
            Span::styled("  [o] logout", Style::default().fg(Color::DarkGray)),
        ])
    } else if gate.phase() == AuthPhase::Unverified {
        Line::from(Span::styled(
            "Checking session...",
            Style::default().fg(Color::DarkGray),
        ))
    } else if affordances.login_visible {
        Line::from(Span::styled(
            "[l] Teacher login",
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::default()
    };

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        ))),
        inner,
    );
    frame.render_widget(Paragraph::new(status).alignment(Alignment::Right), inner);
}

const OVERLAY_WIDTH: u16 = 50;
const OVERLAY_HEIGHT: u16 = 9;

pub fn render_login_overlay(state: &LoginState, frame: &mut Frame, area: Rect) {
    let popup = calculate_overlay_area(area, area.height, OVERLAY_WIDTH, OVERLAY_HEIGHT);
    render_overlay_container(frame, popup, "Teacher Login", Color::Yellow);

    let inner = Rect::new(
        popup.x + 2,
        popup.y + 1,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(2),
    );

    let label = |field: LoginField, text: &'static str| {
        let style = if state.field == field {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        Span::styled(text, style)
    };

    let mut lines = vec![
        Line::from(vec![
            label(LoginField::Username, "Username: "),
            Span::raw(state.username.value().to_string()),
        ]),
        Line::from(vec![
            label(LoginField::Password, "Password: "),
            Span::raw(state.password.masked('•')),
        ]),
        Line::default(),
    ];

    if state.submitting {
        lines.push(Line::from(Span::styled(
            "Logging in...",
            Style::default().fg(Color::DarkGray),
        )));
    } else if let Some(error) = &state.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    } else {
        lines.push(Line::default());
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Tab switch field · Enter log in · Esc cancel",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(lines), inner);

    let (row, width) = match state.field {
        LoginField::Username => (0, state.username.display_width()),
        LoginField::Password => (
            1,
            u16::try_from(state.password.value().chars().count()).unwrap_or(u16::MAX),
        ),
    };
    let x = inner.x.saturating_add(10).saturating_add(width);
    if x < inner.right() {
        frame.set_cursor_position(Position::new(x, inner.y + row));
    }
}
