//! Multilogin - client for the Multilogin profile automation API
//!
//! The core is the token lifecycle: [`MultiloginClient`] signs in, refreshes
//! and mints automation tokens lazily, right before a request that needs
//! one, and attaches the best usable token to every authorized call.
//!
//! ```no_run
//! # async fn run() -> multilogin::MultiloginResult<()> {
//! use multilogin::MultiloginClient;
//!
//! let client = MultiloginClient::new("user@example.com", "secret")?;
//! let stopped = client.stop_all_profiles(None).await?;
//! println!("stopped {} profiles", stopped.stopped_count);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod traits;

pub use client::{ApiRequest, MultiloginClient, Target};
pub use config::ClientConfig;
pub use error::{MultiloginError, MultiloginResult};
