//! Controllable clock for testing.

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::{Arc, Mutex};

use crate::traits::Clock;

/// Clock whose current time is set explicitly by the test.
///
/// Clones share the same underlying instant, so a test can keep one handle
/// and advance time while the client under test holds another.
#[derive(Debug, Clone)]
pub struct MockClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl MockClock {
    /// Create a clock frozen at the given instant.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    /// Create a clock frozen at the given Unix timestamp (seconds).
    pub fn at_timestamp(secs: i64) -> Self {
        let now = Utc.timestamp_opt(secs, 0).single().unwrap_or_default();
        Self::new(now)
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_is_shared_between_clones() {
        let clock = MockClock::at_timestamp(1_700_000_000);
        let handle = clock.clone();

        handle.advance(Duration::minutes(10));

        assert_eq!(clock.now().timestamp(), 1_700_000_600);
    }
}
