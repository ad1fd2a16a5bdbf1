//! Roster and roster-mutation commands.

use std::fmt::Write as _;

use anyhow::{Result, bail};
use rollcall_core::commands::{CommandOutcome, validate_signup_form};
use rollcall_core::gate::Affordances;
use rollcall_core::roster::{NO_PARTICIPANTS, RosterView};

use super::Client;

pub async fn activities(client: Client) -> Result<()> {
    let (mut board, _log_guard) = client.into_board();
    board.start().await;

    let (roster, affordances) = (board.roster(), board.affordances());
    if let RosterView::Failed { message } = roster {
        bail!("{message}");
    }
    print!("{}", format_roster(roster, &affordances));
    Ok(())
}

pub async fn signup(client: Client, activity: &str, email: &str) -> Result<()> {
    if let Err(message) = validate_signup_form(Some(activity), email) {
        bail!("{message}");
    }

    let (mut board, _log_guard) = client.into_board();
    board.start().await;
    report(&board.register(activity, email).await)
}

pub async fn unregister(client: Client, activity: &str, email: &str) -> Result<()> {
    let (mut board, _log_guard) = client.into_board();
    board.start().await;
    report(&board.remove(activity, email).await)
}

/// Prints a success notice; error notices become the command's error.
fn report(outcome: &CommandOutcome) -> Result<()> {
    if outcome.notice.is_error() {
        bail!("{}", outcome.notice.text);
    }
    println!("{}", outcome.notice.text);
    Ok(())
}

/// Plain-text rendering of the roster, one block per activity.
fn format_roster(roster: &RosterView, affordances: &Affordances) -> String {
    let mut out = String::new();

    if let Some(greeting) = &affordances.greeting {
        let _ = writeln!(out, "{greeting}\n");
    }

    for card in roster.cards() {
        let _ = writeln!(out, "{}", card.name);
        let _ = writeln!(out, "  {}", card.description);
        let _ = writeln!(out, "  Schedule: {}", card.schedule);
        let _ = writeln!(out, "  Availability: {}", card.availability());
        let _ = writeln!(out, "  Participants:");
        if card.participants.is_empty() {
            let _ = writeln!(out, "    {NO_PARTICIPANTS}");
        }
        for row in &card.participants {
            let marker = if row.removable { "  [removable]" } else { "" };
            let _ = writeln!(out, "    - {}{marker}", row.email);
        }
        out.push('\n');
    }

    out
}
