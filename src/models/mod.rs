//! Wire types for the Multilogin API.
//!
//! Every response is wrapped in the same `{status, data}` envelope; the
//! payload type is fixed per endpoint family.

pub mod auth;
pub mod envelope;
pub mod launcher;

pub use auth::{AuthData, AutomationData, RefreshRequest, SignInRequest};
pub use envelope::{ApiStatus, Envelope, SUCCESS_CODE};
pub use launcher::{
    AutomationType, ProfileType, StartProfileData, StopAllProfilesData,
};
