use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use rollcall_core::gate::Affordances;

use crate::state::Tasks;

use super::SignupForm;

pub const TEACHER_NOTICE: &str = "Teacher login required to register or unregister students.";

const EMAIL_PROMPT: &str = "Student email: ";

pub fn render_signup(
    form: &SignupForm,
    affordances: &Affordances,
    tasks: &Tasks,
    focused: bool,
    frame: &mut Frame,
    area: Rect,
) {
    let enabled = affordances.signup_form_enabled;
    let border = match (focused, enabled) {
        (true, true) => Color::Cyan,
        (true, false) => Color::Yellow,
        (false, _) => Color::DarkGray,
    };
    let text_style = if enabled {
        Style::default()
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" Sign Up a Student ");

    let mut lines = Vec::new();
    if affordances.teacher_notice_visible {
        lines.push(Line::from(Span::styled(
            TEACHER_NOTICE,
            Style::default().fg(Color::Yellow),
        )));
        lines.push(Line::from(Span::styled(
            "Press l to log in.",
            Style::default().fg(Color::Yellow),
        )));
        lines.push(Line::default());
    }

    let activity = form.selected().unwrap_or("-- Select an activity --");
    lines.push(Line::from(vec![
        Span::styled("Activity: ", text_style.add_modifier(Modifier::BOLD)),
        Span::styled(format!("◂ {activity} ▸"), text_style),
    ]));
    let email_line = lines.len();
    lines.push(Line::from(vec![
        Span::styled(EMAIL_PROMPT, text_style.add_modifier(Modifier::BOLD)),
        Span::styled(form.email.value().to_string(), text_style),
    ]));
    lines.push(Line::default());

    let submit_style = if affordances.submit_enabled {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let submit_label = if tasks.signup.task.is_running() {
        "Signing up...".to_string()
    } else {
        "[Enter] Sign Up".to_string()
    };
    lines.push(Line::from(Span::styled(submit_label, submit_style)));

    let queued = tasks.signup.queued_len();
    if queued > 0 {
        lines.push(Line::from(Span::styled(
            format!("{queued} queued"),
            Style::default().fg(Color::DarkGray),
        )));
    }
    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );

    if focused && enabled {
        let prompt_width = u16::try_from(EMAIL_PROMPT.len()).unwrap_or(0);
        let x = (area.x + 1 + prompt_width).saturating_add(form.email.display_width());
        let y = area.y + 1 + u16::try_from(email_line).unwrap_or(0);
        if x < area.right().saturating_sub(1) && y < area.bottom().saturating_sub(1) {
            frame.set_cursor_position(Position::new(x, y));
        }
    }
}
