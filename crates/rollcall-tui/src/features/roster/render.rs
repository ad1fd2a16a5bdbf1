use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use rollcall_core::roster::{NO_PARTICIPANTS, RosterView};

use super::RosterState;

/// Builds the roster lines and returns the index of the cursor line.
fn roster_lines(roster: &RosterState, focused: bool) -> (Vec<Line<'static>>, usize) {
    let mut lines = Vec::new();
    let mut cursor_line = 0;
    let mut row_index = 0;

    for card in roster.view().cards() {
        lines.push(Line::from(Span::styled(
            card.name.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(card.description.clone()));
        lines.push(Line::from(vec![
            Span::styled("Schedule: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(card.schedule.clone()),
        ]));
        lines.push(Line::from(vec![
            Span::styled(
                "Availability: ",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(card.availability()),
        ]));
        lines.push(Line::from(Span::styled(
            "Participants:",
            Style::default().add_modifier(Modifier::BOLD),
        )));

        if card.participants.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("  {NO_PARTICIPANTS}"),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )));
        }

        for row in &card.participants {
            let selected = focused && row_index == roster.cursor();
            if row_index == roster.cursor() {
                cursor_line = lines.len();
            }
            let marker = if selected { "▸ " } else { "  " };
            let mut spans = vec![Span::raw(format!("{marker}• {}", row.email))];
            if row.removable {
                spans.push(Span::styled("  [d] remove", Style::default().fg(Color::Red)));
            }
            let style = if selected {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            lines.push(Line::from(spans).style(style));
            row_index += 1;
        }

        lines.push(Line::default());
    }

    (lines, cursor_line)
}

pub fn render_roster(roster: &RosterState, focused: bool, frame: &mut Frame, area: Rect) {
    let border = if focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" Available Activities ");

    let paragraph = match roster.view() {
        RosterView::Loading => Paragraph::new(Line::from(Span::styled(
            "Loading activities...",
            Style::default().fg(Color::DarkGray),
        ))),
        RosterView::Failed { message } => Paragraph::new(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red),
        ))),
        RosterView::Loaded { .. } => {
            let (lines, cursor_line) = roster_lines(roster, focused);
            let visible = usize::from(area.height.saturating_sub(2));
            let scroll = cursor_line.saturating_sub(visible.saturating_sub(2));
            Paragraph::new(lines).scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0))
        }
    };

    frame.render_widget(
        paragraph.block(block).wrap(Wrap { trim: false }),
        area,
    );
}
