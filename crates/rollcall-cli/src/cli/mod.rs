//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;

mod commands;

#[derive(Parser)]
#[command(name = "rollcall")]
#[command(version = "0.1")]
#[command(about = "Class-activity sign-up board in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Base URL of the sign-up board API (overrides ROLLCALL_BASE_URL and config)
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    /// Keep the session in memory only; nothing is read from or written to disk
    #[arg(long, global = true)]
    ephemeral: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Print the activity roster
    Activities,

    /// Log in as a teacher
    Login {
        /// Teacher username
        #[arg(short, long)]
        username: String,

        /// Password (read from stdin when omitted)
        #[arg(short, long, env = "ROLLCALL_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// End the stored session
    Logout,

    /// Verify the stored session and print who is logged in
    Status,

    /// Sign a student up for an activity
    Signup {
        /// Activity name, exactly as listed
        #[arg(short, long)]
        activity: String,

        /// Student email
        #[arg(short, long)]
        email: String,
    },

    /// Remove a student from an activity
    Unregister {
        /// Activity name, exactly as listed
        #[arg(short, long)]
        activity: String,

        /// Student email
        #[arg(short, long)]
        email: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Create a default config file
    Init,
    /// Store the API base URL in the config file
    SetBaseUrl {
        /// New base URL
        #[arg(value_name = "URL")]
        url: String,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli {
        command,
        base_url,
        ephemeral,
    } = cli;
    let setup = || commands::Client::build(base_url.as_deref(), ephemeral);

    // default to the interactive board
    let Some(command) = command else {
        return commands::tui::run(setup()?).await;
    };

    match command {
        Commands::Activities => commands::board::activities(setup()?).await,
        Commands::Signup { activity, email } => {
            commands::board::signup(setup()?, &activity, &email).await
        }
        Commands::Unregister { activity, email } => {
            commands::board::unregister(setup()?, &activity, &email).await
        }
        Commands::Login { username, password } => {
            commands::auth::login(setup()?, &username, password).await
        }
        Commands::Logout => commands::auth::logout(setup()?),
        Commands::Status => commands::auth::status(setup()?).await,

        // Config commands skip loading so they still work on a broken file.
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::SetBaseUrl { url } => commands::config::set_base_url(&url),
        },
    }
}
