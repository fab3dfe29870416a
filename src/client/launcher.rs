//! Profile start/stop calls against the launcher.
//!
//! These only use the generic [`MultiloginClient::request`] contract; token
//! handling stays inside the client.

use uuid::Uuid;

use super::request::{ApiRequest, Target};
use super::MultiloginClient;
use crate::error::{MultiloginError, MultiloginResult};
use crate::models::{AutomationType, Envelope, ProfileType, StartProfileData, StopAllProfilesData};

pub const STOP_ALL_ENDPOINT: &str = "/api/v1/profile/stop_all";

/// Path of the start endpoint for one profile.
pub fn start_profile_endpoint(folder_id: &Uuid, profile_id: &Uuid) -> String {
    format!("/api/v2/profile/f/{}/p/{}/start", folder_id, profile_id)
}

fn parse_id(name: &str, value: &str) -> MultiloginResult<Uuid> {
    if value.trim().is_empty() {
        return Err(MultiloginError::InvalidArgument(format!(
            "{} cannot be empty",
            name
        )));
    }
    Uuid::parse_str(value.trim()).map_err(|e| {
        MultiloginError::InvalidArgument(format!("{} '{}' is not a valid UUID: {}", name, value, e))
    })
}

impl MultiloginClient {
    /// Start a browser profile through the launcher.
    ///
    /// `headless_mode` is always sent; `automation_type` only when given.
    pub async fn start_browser_profile(
        &self,
        folder_id: &str,
        profile_id: &str,
        automation_type: Option<AutomationType>,
        headless: bool,
    ) -> MultiloginResult<StartProfileData> {
        let folder = parse_id("folder_id", folder_id)?;
        let profile = parse_id("profile_id", profile_id)?;

        let mut request =
            ApiRequest::get(Target::Launcher, start_profile_endpoint(&folder, &profile))
                .query("headless_mode", headless.to_string());
        if let Some(automation_type) = automation_type {
            request = request.query("automation_type", automation_type.as_str());
        }

        tracing::info!(%folder, %profile, headless, "Starting browser profile");
        let envelope: Envelope<StartProfileData> = self.request(request).await?;
        envelope.into_data()
    }

    /// Stop every launched profile of the given type (all by default).
    pub async fn stop_all_profiles(
        &self,
        profile_type: Option<ProfileType>,
    ) -> MultiloginResult<StopAllProfilesData> {
        let profile_type = profile_type.unwrap_or_default();
        let request =
            ApiRequest::get(Target::Launcher, STOP_ALL_ENDPOINT).query("type", profile_type.as_str());

        tracing::info!(%profile_type, "Stopping launched profiles");
        let envelope: Envelope<StopAllProfilesData> = self.request(request).await?;
        envelope.into_data()
    }
}
