//! Command-line arguments for the multilogin CLI.

use clap::{Parser, Subcommand};

use crate::models::{AutomationType, ProfileType};

#[derive(Parser, Debug)]
#[command(name = "multilogin")]
#[command(version)]
#[command(about = "Multilogin profile automation client")]
#[command(after_help = "\
Environment:
  MLX_AUTOMATION_TOKEN     Use a pre-issued automation token
  MLX_EMAIL, MLX_PASSWORD  Account credentials (password is prompted when unset)
  MLX_API_URL, MLX_LAUNCHER_URL, MLX_LAUNCHER_PORT")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Sign in and show token status
    #[command(name = "signin")]
    SignIn,

    /// Mint an automation token and print it
    AutomationToken,

    /// Start a browser profile
    Start {
        /// Folder id (UUID)
        folder_id: String,
        /// Profile id (UUID)
        profile_id: String,
        /// Prepare the browser for an automation framework
        #[arg(long, value_enum)]
        automation_type: Option<AutomationType>,
        /// Start without a visible window
        #[arg(long)]
        headless: bool,
    },

    /// Stop launched profiles
    StopAll {
        /// Which profiles to stop
        #[arg(long = "type", value_enum, value_name = "TYPE")]
        profile_type: Option<ProfileType>,
    },

    /// Show which tokens are held
    Status,
}
