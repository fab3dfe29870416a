//! Handlers for the CLI commands.
//!
//! Command output goes to stdout; logs go to stderr.

use color_eyre::eyre::{eyre, Result, WrapErr};
use std::io::{self, Write};

use crate::auth::TokenStatus;
use crate::client::MultiloginClient;
use crate::config::ClientConfig;
use crate::models::{AutomationType, ProfileType};

pub const ENV_AUTOMATION_TOKEN: &str = "MLX_AUTOMATION_TOKEN";
pub const ENV_EMAIL: &str = "MLX_EMAIL";
pub const ENV_PASSWORD: &str = "MLX_PASSWORD";

/// Build a client from the environment.
///
/// `MLX_AUTOMATION_TOKEN` wins over `MLX_EMAIL`/`MLX_PASSWORD`. The password
/// is read from the terminal without echo when the variable is unset.
pub fn client_from_env(config: ClientConfig) -> Result<MultiloginClient> {
    if let Some(token) = env_value(ENV_AUTOMATION_TOKEN) {
        tracing::debug!("Using automation token from {}", ENV_AUTOMATION_TOKEN);
        return MultiloginClient::from_automation_token_with_config(&token, config)
            .wrap_err_with(|| format!("{} is not usable", ENV_AUTOMATION_TOKEN));
    }

    let email = env_value(ENV_EMAIL).ok_or_else(|| {
        eyre!(
            "set {} or {} (and optionally {})",
            ENV_AUTOMATION_TOKEN,
            ENV_EMAIL,
            ENV_PASSWORD
        )
    })?;
    let password = match env_value(ENV_PASSWORD) {
        Some(password) => password,
        None => prompt_password(&email)?,
    };

    Ok(MultiloginClient::with_config(&email, &password, config)?)
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn prompt_password(email: &str) -> Result<String> {
    eprint!("Password for {}: ", email);
    io::stderr().flush().wrap_err("Failed to flush stderr")?;
    rpassword::read_password().wrap_err("Failed to read password")
}

pub async fn sign_in(client: &MultiloginClient) -> Result<()> {
    client.ensure_authorized().await?;
    print_status(&client.token_status().await);
    Ok(())
}

pub async fn automation_token(client: &MultiloginClient) -> Result<()> {
    let token = client.issue_automation_token().await?;
    println!("{}", token);
    Ok(())
}

pub async fn start(
    client: &MultiloginClient,
    folder_id: &str,
    profile_id: &str,
    automation_type: Option<AutomationType>,
    headless: bool,
) -> Result<()> {
    let data = client
        .start_browser_profile(folder_id, profile_id, automation_type, headless)
        .await
        .wrap_err("Failed to start browser profile")?;
    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}

pub async fn stop_all(client: &MultiloginClient, profile_type: Option<ProfileType>) -> Result<()> {
    let data = client
        .stop_all_profiles(profile_type)
        .await
        .wrap_err("Failed to stop profiles")?;
    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}

pub async fn status(client: &MultiloginClient) -> Result<()> {
    print_status(&client.token_status().await);
    Ok(())
}

fn print_status(status: &TokenStatus) {
    for line in status_lines(status) {
        println!("{}", line);
    }
}

/// Human-readable summary of a [`TokenStatus`].
pub fn status_lines(status: &TokenStatus) -> Vec<String> {
    let describe = |expires_at: Option<chrono::DateTime<chrono::Utc>>, usable: bool| match expires_at
    {
        Some(at) if usable => format!("valid until {}", at.to_rfc3339()),
        Some(at) => format!("expired ({})", at.to_rfc3339()),
        None => "none".to_string(),
    };

    vec![
        format!(
            "access token:     {}",
            describe(status.access_expires_at, status.access_usable)
        ),
        format!(
            "refresh token:    {}",
            if status.has_refresh_token { "held" } else { "none" }
        ),
        format!(
            "automation token: {}",
            describe(status.automation_expires_at, status.automation_usable)
        ),
    ]
}
