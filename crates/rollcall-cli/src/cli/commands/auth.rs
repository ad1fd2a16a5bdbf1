//! Teacher session commands.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result, bail};
use rollcall_core::gate::{AuthGate, AuthPhase, LoginOutcome};
use rollcall_core::session::SessionStore;

use super::Client;

pub async fn login(client: Client, username: &str, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => read_password()?,
    };

    // Only the login request is sent; the roster is not re-fetched.
    let mut gate = AuthGate::new(SessionStore::new(client.slot));
    match gate.login(&client.api, username, &password).await {
        LoginOutcome::LoggedIn { notice } => {
            println!("{}", notice.text);
            if let Some(greeting) = gate.affordances().greeting {
                println!("{greeting}");
            }
            Ok(())
        }
        LoginOutcome::Failed { inline_error } => bail!("{inline_error}"),
    }
}

/// Ends the session locally. No request is sent.
pub fn logout(client: Client) -> Result<()> {
    let mut gate = AuthGate::new(SessionStore::new(client.slot));
    let notice = gate.logout();
    println!("{}", notice.text);
    Ok(())
}

/// Reconciles the stored token with the server and prints the outcome.
pub async fn status(client: Client) -> Result<()> {
    let mut gate = AuthGate::new(SessionStore::new(client.slot));
    match gate.startup(&client.api).await {
        AuthPhase::Authenticated => {
            let name = gate.session().display_name().unwrap_or_default();
            println!("Logged in as {name}");
        }
        AuthPhase::Unauthenticated | AuthPhase::Unverified => println!("Not logged in"),
    }
    Ok(())
}

/// Reads one line from stdin, prompting on stderr when attached to a terminal.
fn read_password() -> Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprint!("Password: ");
        io::stderr().flush().context("flush prompt")?;
    }

    let mut line = String::new();
    stdin
        .lock()
        .read_line(&mut line)
        .context("read password from stdin")?;

    let password = line.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        bail!("No password provided");
    }
    Ok(password.to_string())
}
