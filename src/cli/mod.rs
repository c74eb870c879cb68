//! CLI for the Three11 access client
//!
//! One subcommand per entry surface: `login`, `signup`, and `demo` produce a
//! session; `code` checks a team access code without touching any state;
//! `status` and `logout` read and clear the current session.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::domain::{AccessTier, Session};
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::{
    AccessManager, DemoOverwrite, FileSessionStore, ReqwestApiClient, SessionStore,
};

/// Three11 access - session and access-tier resolution client
#[derive(Parser)]
#[command(name = "three11-access")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Log in with email and password
    Login {
        email: String,
        password: String,
    },

    /// Create an account, optionally redeeming a team access code
    Signup {
        email: String,
        password: String,
        name: String,
        #[arg(long)]
        team_code: Option<String>,
    },

    /// Start a locally synthesized demo session (no backend account)
    Demo {
        /// Replace a real session if one is current
        #[arg(long)]
        replace: bool,
    },

    /// Check whether a team access code is valid and what tier it grants
    Code { code: String },

    /// Show the current session
    Status,

    /// Clear the current session
    Logout,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    init_logging(&config.logging);

    let client = Arc::new(
        ReqwestApiClient::new(Duration::from_secs(config.backend.timeout_secs))
            .context("Failed to build HTTP client")?,
    );
    let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(&config.session.file));
    let manager = AccessManager::new(client, store, &config.backend.base_url);

    match cli.command {
        Command::Login { email, password } => {
            let session = manager.login(email, password).await?;
            print_session(&session);
        }
        Command::Signup {
            email,
            password,
            name,
            team_code,
        } => {
            let session = manager.signup(email, password, name, team_code).await?;
            print_session(&session);
        }
        Command::Demo { replace } => {
            let overwrite = if replace {
                DemoOverwrite::Replace
            } else {
                DemoOverwrite::Block
            };
            let session = manager.start_demo(overwrite)?;
            print_session(&session);
        }
        Command::Code { code } => {
            let status = manager.validate_team_code(&code).await?;
            match status.access_level {
                Some(tier) => println!("Code is valid and grants tier {}", tier),
                None => println!("Code is not valid"),
            }
        }
        Command::Status => match manager.current_session()? {
            Some(session) => print_session(&session),
            None => println!("Not signed in"),
        },
        Command::Logout => {
            manager.logout()?;
            println!("Signed out");
        }
    }

    Ok(())
}

fn print_session(session: &Session) {
    let kind = if session.is_demo() { " (demo)" } else { "" };

    println!("Signed in as {}{}", session.display_name(), kind);
    println!("  user id:     {}", session.user_id());
    if session.access_tier() != AccessTier::Demo {
        println!("  email:       {}", session.email());
    }
    println!("  tier:        {}", session.access_tier());
    println!(
        "  generations: {} of {}",
        session.generations_used(),
        session.generation_limit()
    );
}
