//! Payloads of the launcher endpoints.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Automation framework a started profile is prepared for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AutomationType {
    Selenium,
    Puppeteer,
    Playwright,
}

impl AutomationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AutomationType::Selenium => "selenium",
            AutomationType::Puppeteer => "puppeteer",
            AutomationType::Playwright => "playwright",
        }
    }
}

impl fmt::Display for AutomationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which launched profiles `stop_all` applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProfileType {
    #[default]
    All,
    Regular,
    Quick,
}

impl ProfileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileType::All => "all",
            ProfileType::Regular => "regular",
            ProfileType::Quick => "quick",
        }
    }
}

impl fmt::Display for ProfileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `data` of the profile start response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartProfileData {
    #[serde(default)]
    pub browser_type: String,
    #[serde(default)]
    pub core_version: i64,
    pub id: String,
    #[serde(default)]
    pub is_quick: bool,
    /// Automation port of the started browser, as a string.
    #[serde(default)]
    pub port: String,
}

/// `data` of the stop-all response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopAllProfilesData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub stopped_count: i64,
    #[serde(default)]
    pub profiles_stopped: Vec<String>,
}
