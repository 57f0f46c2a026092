//! Wall-clock source for countdowns and date constraints.

use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    /// Real time
    System,
    /// Fixed time that only moves when advanced (simulation and tests)
    Manual { now_ms: i64 },
}

impl Clock {
    pub fn manual_at(instant: DateTime<Utc>) -> Self {
        Clock::Manual {
            now_ms: instant.timestamp_millis(),
        }
    }

    /// Unix time in milliseconds
    pub fn now_millis(&self) -> i64 {
        match self {
            Clock::System => Utc::now().timestamp_millis(),
            Clock::Manual { now_ms } => *now_ms,
        }
    }

    /// Today's date in UTC
    pub fn today(&self) -> NaiveDate {
        DateTime::<Utc>::from_timestamp_millis(self.now_millis())
            .unwrap_or_default()
            .date_naive()
    }

    /// Move a manual clock forward; the system clock ignores this.
    pub fn advance(&mut self, ms: u64) {
        if let Clock::Manual { now_ms } = self {
            *now_ms = now_ms.saturating_add(i64::try_from(ms).unwrap_or(i64::MAX));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_manual_clock_advances() {
        let start = Utc.with_ymd_and_hms(2026, 10, 19, 23, 59, 59).unwrap();
        let mut clock = Clock::manual_at(start);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());

        clock.advance(1000);
        assert_eq!(clock.now_millis(), start.timestamp_millis() + 1000);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 10, 20).unwrap());
    }

    #[test]
    fn test_manual_clock_saturates() {
        let mut clock = Clock::manual_at(Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap());
        clock.advance(u64::MAX);
        assert_eq!(clock.now_millis(), i64::MAX);
    }

    #[test]
    fn test_system_clock_ignores_advance() {
        let mut clock = Clock::System;
        clock.advance(10_000_000);
        assert!(matches!(clock, Clock::System));
    }
}
