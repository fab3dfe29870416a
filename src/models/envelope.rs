//! The `{status, data}` response envelope.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{MultiloginError, MultiloginResult};

/// `status.http_code` value reported on success.
pub const SUCCESS_CODE: i64 = 200;

/// Status block carried by every response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiStatus {
    #[serde(default)]
    pub error_code: String,
    pub http_code: i64,
    #[serde(default)]
    pub message: String,
}

impl ApiStatus {
    /// Whether the status reports success.
    pub fn is_success(&self) -> bool {
        self.http_code == SUCCESS_CODE
    }
}

/// Decoded response envelope.
///
/// `data` is only decoded into `T` when the status reports success; failure
/// responses frequently carry an empty or differently shaped payload, and the
/// status message is what callers need to surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    pub status: ApiStatus,
    pub data: Option<T>,
}

#[derive(Deserialize)]
struct RawEnvelope {
    status: ApiStatus,
    #[serde(default)]
    data: serde_json::Value,
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Decode a response body received from `endpoint`.
    pub fn decode(endpoint: &str, body: &[u8]) -> MultiloginResult<Self> {
        let raw: RawEnvelope =
            serde_json::from_slice(body).map_err(|e| MultiloginError::protocol(endpoint, e))?;

        if !raw.status.is_success() {
            return Ok(Self {
                status: raw.status,
                data: None,
            });
        }

        let data = decode_data(raw.data).map_err(|e| MultiloginError::protocol(endpoint, e))?;
        Ok(Self {
            status: raw.status,
            data: Some(data),
        })
    }
}

/// Decode a success payload. A `null` or absent payload decodes as `{}` when
/// `T` cannot be built from `null` itself, so payloads whose fields all have
/// defaults come back as their default value.
fn decode_data<T: DeserializeOwned>(data: serde_json::Value) -> serde_json::Result<T> {
    if !data.is_null() {
        return serde_json::from_value(data);
    }
    serde_json::from_value(serde_json::Value::Null)
        .or_else(|err| serde_json::from_value(serde_json::json!({})).map_err(|_| err))
}

impl<T> Envelope<T> {
    /// Return the payload if the status reports success, otherwise a
    /// [`MultiloginError::Remote`] carrying the server message.
    pub fn into_data(self) -> MultiloginResult<T> {
        if !self.status.is_success() {
            return Err(MultiloginError::Remote {
                http_code: self.status.http_code,
                error_code: self.status.error_code,
                message: self.status.message,
            });
        }
        self.data.ok_or_else(|| MultiloginError::Protocol {
            endpoint: String::new(),
            message: "success response without data".to_string(),
        })
    }
}
