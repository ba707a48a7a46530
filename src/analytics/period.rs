//! Query periods for analytics history.

use chrono::{DateTime, Duration, Utc};

/// Look-back window for analytics queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    Hour,
    #[default]
    Day,
    Week,
    Month,
}

impl Period {
    /// Parses `1h`, `24h`, `7d` or `30d`. Anything else, including a missing
    /// value, means the last 24 hours.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some("1h") => Period::Hour,
            Some("24h") => Period::Day,
            Some("7d") => Period::Week,
            Some("30d") => Period::Month,
            _ => Period::Day,
        }
    }

    pub fn duration(self) -> Duration {
        match self {
            Period::Hour => Duration::hours(1),
            Period::Day => Duration::hours(24),
            Period::Week => Duration::days(7),
            Period::Month => Duration::days(30),
        }
    }

    /// Start of the window ending at `now`.
    pub fn start_time(self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.duration()
    }
}
