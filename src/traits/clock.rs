//! Clock trait abstraction.
//!
//! Every expiry decision reads "now" through this trait so that tests can pin
//! time to either side of a token's safety margin.

use chrono::{DateTime, Utc};

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;
}
