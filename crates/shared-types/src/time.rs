//! Time source abstraction so age and recency gates are testable.

use chrono::{DateTime, Utc};

/// Current wall-clock time.
pub trait Clock: Send + Sync {
    /// Now, in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Default system time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_clock() {
        let at = Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap();
        assert_eq!(FixedClock(at).now(), at);
    }

    #[test]
    fn test_system_clock_is_recent() {
        // After Jan 1, 2024
        assert!(SystemClock.now().timestamp() > 1_704_067_200);
    }
}
