//! Mock implementations for testing.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with queued responses and request recording
//! - [`MockClock`] - Advanceable clock for expiry boundaries

pub mod clock;
pub mod http;

pub use clock::MockClock;
pub use http::{MockHttpClient, MockResponse, RecordedRequest};
