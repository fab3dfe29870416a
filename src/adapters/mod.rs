//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`SystemClock`] - wall clock
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - Configurable HTTP responses
//! - [`mock::MockClock`] - Advanceable time

pub mod mock;
pub mod reqwest_http;
pub mod system_clock;

pub use mock::{MockClock, MockHttpClient};
pub use reqwest_http::ReqwestHttpClient;
pub use system_clock::SystemClock;
