//! Client configuration.
//!
//! Base URLs, the launcher port and token safety margins are injected here;
//! the library core never reads the environment on its own. The CLI calls
//! [`ClientConfig::from_env`] to pick up overrides.

use chrono::Duration as ChronoDuration;
use std::time::Duration;

use crate::auth::TokenPolicy;

/// Default Multilogin API base URL.
pub const API_URL: &str = "https://api.multilogin.com";
/// Default launcher base URL.
pub const LAUNCHER_URL: &str = "https://launcher.mlx.yt";
/// Default launcher port.
pub const LAUNCHER_PORT: u16 = 45001;
/// Lifetime requested for minted automation tokens.
pub const AUTOMATION_EXPIRATION_PERIOD: &str = "1h";

/// Environment variable overriding [`ClientConfig::api_url`].
pub const ENV_API_URL: &str = "MLX_API_URL";
/// Environment variable overriding [`ClientConfig::launcher_url`].
pub const ENV_LAUNCHER_URL: &str = "MLX_LAUNCHER_URL";
/// Environment variable overriding [`ClientConfig::launcher_port`].
pub const ENV_LAUNCHER_PORT: &str = "MLX_LAUNCHER_PORT";

/// Configuration for a [`MultiloginClient`](crate::client::MultiloginClient).
///
/// # Example
///
/// ```
/// use multilogin::config::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_api_url("http://127.0.0.1:8080")
///     .with_launcher_port(45002);
/// assert_eq!(config.launcher_base(), "https://launcher.mlx.yt:45002");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL for sign-in, refresh and automation token endpoints
    pub api_url: String,
    /// Launcher base URL (scheme + host, no port)
    pub launcher_url: String,
    /// Launcher port
    pub launcher_port: u16,
    /// Overall timeout of each HTTP call
    pub request_timeout: Duration,
    /// Safety margin before access token expiry
    pub access_token_margin: ChronoDuration,
    /// Safety margin before automation token expiry
    pub automation_token_margin: ChronoDuration,
    /// `expiration_period` sent when minting automation tokens
    pub automation_expiration_period: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let policy = TokenPolicy::default();
        Self {
            api_url: API_URL.to_string(),
            launcher_url: LAUNCHER_URL.to_string(),
            launcher_port: LAUNCHER_PORT,
            request_timeout: Duration::from_secs(30),
            access_token_margin: policy.access_margin,
            automation_token_margin: policy.automation_margin,
            automation_expiration_period: AUTOMATION_EXPIRATION_PERIOD.to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a new ClientConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with `MLX_API_URL`, `MLX_LAUNCHER_URL` and `MLX_LAUNCHER_PORT`
    /// applied when set. An unparseable port is ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(url) = non_empty_env(ENV_API_URL) {
            config.api_url = url;
        }
        if let Some(url) = non_empty_env(ENV_LAUNCHER_URL) {
            config.launcher_url = url;
        }
        if let Some(port) = non_empty_env(ENV_LAUNCHER_PORT) {
            match port.parse() {
                Ok(port) => config.launcher_port = port,
                Err(_) => tracing::warn!(
                    "Ignoring invalid {}='{}', using port {}",
                    ENV_LAUNCHER_PORT,
                    port,
                    config.launcher_port
                ),
            }
        }
        config
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_launcher_url(mut self, url: impl Into<String>) -> Self {
        self.launcher_url = url.into();
        self
    }

    pub fn with_launcher_port(mut self, port: u16) -> Self {
        self.launcher_port = port;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_access_token_margin(mut self, margin: ChronoDuration) -> Self {
        self.access_token_margin = margin;
        self
    }

    pub fn with_automation_token_margin(mut self, margin: ChronoDuration) -> Self {
        self.automation_token_margin = margin;
        self
    }

    pub fn with_automation_expiration_period(mut self, period: impl Into<String>) -> Self {
        self.automation_expiration_period = period.into();
        self
    }

    /// API base URL without a trailing slash.
    pub fn api_base(&self) -> String {
        self.api_url.trim_end_matches('/').to_string()
    }

    /// Launcher base URL including the port.
    pub fn launcher_base(&self) -> String {
        format!(
            "{}:{}",
            self.launcher_url.trim_end_matches('/'),
            self.launcher_port
        )
    }

    /// Safety margins as a [`TokenPolicy`].
    pub fn token_policy(&self) -> TokenPolicy {
        TokenPolicy {
            access_margin: self.access_token_margin,
            automation_margin: self.automation_token_margin,
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
