//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - executes a fully built HTTP request
//! - [`Clock`] - supplies the current time for expiry checks

pub mod clock;
pub mod http;

pub use clock::Clock;
pub use http::{Headers, HttpClient, HttpError, HttpMethod, HttpRequest, Response};
