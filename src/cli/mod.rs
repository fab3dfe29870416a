//! CLI module for multilogin.
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing ([`Cli`], built with clap)
//! - Command handlers built on [`MultiloginClient`](crate::client::MultiloginClient)
//!
//! # Usage
//!
//! ```ignore
//! use clap::Parser;
//! use multilogin::cli::{run_cli_command, Cli};
//!
//! let cli = Cli::parse();
//! run_cli_command(cli.command).await?;
//! ```

pub mod args;
pub mod commands;

pub use args::{Cli, Command};

use color_eyre::eyre::Result;

use crate::config::ClientConfig;

/// Run a parsed CLI command with a client built from the environment.
pub async fn run_cli_command(command: Command) -> Result<()> {
    let client = commands::client_from_env(ClientConfig::from_env())?;

    match command {
        Command::SignIn => commands::sign_in(&client).await,
        Command::AutomationToken => commands::automation_token(&client).await,
        Command::Start {
            folder_id,
            profile_id,
            automation_type,
            headless,
        } => {
            commands::start(&client, &folder_id, &profile_id, automation_type, headless).await
        }
        Command::StopAll { profile_type } => commands::stop_all(&client, profile_type).await,
        Command::Status => commands::status(&client).await,
    }
}
