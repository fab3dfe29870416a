//! Bearer tokens and their embedded expiry.
//!
//! Tokens issued by the service are JWTs. Only the `exp` claim is read; the
//! signature is not verified, the server does that.

use base64::{engine::general_purpose::URL_SAFE, Engine};
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::fmt;

use crate::error::TokenFormatError;

/// A token value together with the expiry decoded from its own `exp` claim.
///
/// The only way to build one from a raw string is [`IssuedToken::parse`], so
/// a held token always has a real expiry.
#[derive(Clone, PartialEq, Eq)]
pub struct IssuedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl IssuedToken {
    /// Decode the expiry of `value` and wrap both.
    pub fn parse(value: impl Into<String>) -> Result<Self, TokenFormatError> {
        let value = value.into();
        let expires_at = parse_token_expiry(&value)?;
        Ok(Self { value, expires_at })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Usable only while `now < expires_at - margin`. An expiry too close to
    /// the minimum representable time to subtract the margin is never usable.
    pub fn is_usable_at(&self, now: DateTime<Utc>, margin: Duration) -> bool {
        self.expires_at
            .checked_sub_signed(margin)
            .is_some_and(|cutoff| now < cutoff)
    }

    /// First characters of the token, safe for logs.
    pub fn preview(&self) -> String {
        token_preview(&self.value)
    }
}

impl fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedToken")
            .field("value", &self.preview())
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Get a preview of a token (first 8 chars + ...).
pub fn token_preview(token: &str) -> String {
    if token.len() > 12 {
        format!("{}...", token.chars().take(8).collect::<String>())
    } else {
        "***".to_string()
    }
}

/// Extract the `exp` claim of a `header.claims.signature` token.
///
/// The claims segment is base64url; missing padding is added before decoding.
/// `exp` is accepted as an integer or a floating-point number of seconds since
/// the Unix epoch (fractional seconds are truncated).
pub fn parse_token_expiry(token: &str) -> Result<DateTime<Utc>, TokenFormatError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(TokenFormatError::SegmentCount(segments.len()));
    }

    let mut payload = segments[1].to_string();
    let remainder = payload.len() % 4;
    if remainder != 0 {
        payload.push_str(&"=".repeat(4 - remainder));
    }

    let decoded = URL_SAFE
        .decode(payload.as_bytes())
        .map_err(|e| TokenFormatError::Base64(e.to_string()))?;

    let claims: serde_json::Value =
        serde_json::from_slice(&decoded).map_err(|e| TokenFormatError::Json(e.to_string()))?;
    let claims = claims
        .as_object()
        .ok_or_else(|| TokenFormatError::Json("claims are not an object".to_string()))?;

    let exp = claims.get("exp").ok_or(TokenFormatError::MissingExpiry)?;
    let secs = match exp {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        _ => None,
    }
    .ok_or(TokenFormatError::InvalidExpiry)?;

    Utc.timestamp_opt(secs, 0)
        .single()
        .ok_or(TokenFormatError::InvalidExpiry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    fn token_with_claims(claims: &str) -> String {
        format!(
            "{}.{}.{}",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(claims),
            URL_SAFE_NO_PAD.encode("signature")
        )
    }

    #[test]
    fn test_integer_exp() {
        let token = token_with_claims(r#"{"exp": 1700000000}"#);
        let expiry = parse_token_expiry(&token).unwrap();
        assert_eq!(expiry.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_float_exp() {
        let token = token_with_claims(r#"{"exp": 1700000000.75, "sub": "u"}"#);
        assert_eq!(parse_token_expiry(&token).unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_padding_variants_agree() {
        // 18, 19 and 20 byte claims: the padded segment ends in no '=', "==" and "=".
        for claims in [
            r#"{"exp":1700000000}"#,
            r#"{"exp": 1700000000}"#,
            r#"{"exp":  1700000000}"#,
        ] {
            let unpadded = token_with_claims(claims);
            let segments: Vec<&str> = unpadded.split('.').collect();
            let padded = format!(
                "{}.{}.{}",
                segments[0],
                URL_SAFE.encode(claims),
                segments[2]
            );
            assert_eq!(parse_token_expiry(&unpadded).unwrap().timestamp(), 1_700_000_000);
            assert_eq!(parse_token_expiry(&padded).unwrap().timestamp(), 1_700_000_000);
        }
    }

    #[test]
    fn test_wrong_segment_count() {
        assert_eq!(
            parse_token_expiry("only.two"),
            Err(TokenFormatError::SegmentCount(2))
        );
        assert_eq!(
            parse_token_expiry("a.b.c.d"),
            Err(TokenFormatError::SegmentCount(4))
        );
        assert_eq!(parse_token_expiry(""), Err(TokenFormatError::SegmentCount(1)));
    }

    #[test]
    fn test_invalid_base64() {
        assert!(matches!(
            parse_token_expiry("aaa.!!!!.ccc"),
            Err(TokenFormatError::Base64(_))
        ));
    }

    #[test]
    fn test_non_json_claims() {
        let token = format!("h.{}.s", URL_SAFE_NO_PAD.encode("not json"));
        assert!(matches!(parse_token_expiry(&token), Err(TokenFormatError::Json(_))));
    }

    #[test]
    fn test_claims_not_object() {
        let token = token_with_claims("[1,2,3]");
        assert!(matches!(parse_token_expiry(&token), Err(TokenFormatError::Json(_))));
    }

    #[test]
    fn test_missing_exp() {
        let token = token_with_claims(r#"{"sub": "user"}"#);
        assert_eq!(parse_token_expiry(&token), Err(TokenFormatError::MissingExpiry));
    }

    #[test]
    fn test_string_exp_rejected() {
        let token = token_with_claims(r#"{"exp": "1700000000"}"#);
        assert_eq!(parse_token_expiry(&token), Err(TokenFormatError::InvalidExpiry));
    }

    #[test]
    fn test_issued_token_usability_boundary() {
        let token = IssuedToken::parse(token_with_claims(r#"{"exp": 1700000000}"#)).unwrap();
        let margin = Duration::minutes(5);
        let cutoff = Utc.timestamp_opt(1_700_000_000 - 300, 0).unwrap();

        assert!(token.is_usable_at(cutoff - Duration::seconds(1), margin));
        assert!(!token.is_usable_at(cutoff, margin));
        assert!(!token.is_usable_at(cutoff + Duration::seconds(1), margin));
    }

    #[test]
    fn test_expiry_at_minimum_time_is_never_usable() {
        let min = DateTime::<Utc>::MIN_UTC.timestamp();
        let token =
            IssuedToken::parse(token_with_claims(&format!(r#"{{"exp": {}}}"#, min))).unwrap();

        assert_eq!(token.expires_at().timestamp(), min);
        assert!(!token.is_usable_at(DateTime::<Utc>::MIN_UTC, Duration::minutes(5)));
        assert!(!token.is_usable_at(Utc::now(), Duration::minutes(5)));
    }

    #[test]
    fn test_debug_hides_token_value() {
        let raw = token_with_claims(r#"{"exp": 1700000000}"#);
        let token = IssuedToken::parse(raw.clone()).unwrap();
        let debug = format!("{:?}", token);
        assert!(!debug.contains(&raw));
        assert!(debug.contains("..."));
    }

    #[test]
    fn test_token_preview() {
        assert_eq!(token_preview("abcdefghijklmnop"), "abcdefgh...");
        assert_eq!(token_preview("short"), "***");
    }
}
