use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

const MS_PER_DAY: i64 = 86_400_000;
const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_SECOND: i64 = 1_000;

/// Remaining time split into display units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Remaining {
    /// Successive floor division, each stage on the previous remainder.
    pub fn from_millis(ms: i64) -> Self {
        Self {
            days: ms / MS_PER_DAY,
            hours: (ms % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (ms % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (ms % MS_PER_MINUTE) / MS_PER_SECOND,
        }
    }
}

impl std::fmt::Display for Remaining {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}d {}h {}m {}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// What a countdown element should show right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownDisplay {
    Running(Remaining),
    /// Terminal state, reached once the target is not in the future.
    Expired,
}

impl CountdownDisplay {
    pub fn render(&self, expired_text: &str) -> String {
        match self {
            CountdownDisplay::Running(remaining) => remaining.to_string(),
            CountdownDisplay::Expired => expired_text.to_string(),
        }
    }
}

/// Countdown timer state (rendering-agnostic)
///
/// Holds the target instant read once from the element's end-date attribute.
/// A target that failed to parse behaves as already expired.
#[derive(Debug, Clone)]
pub struct CountdownState {
    /// Unix timestamp in milliseconds when the countdown ends
    end_ms: Option<i64>,
}

impl CountdownState {
    pub fn new(end_ms: Option<i64>) -> Self {
        Self { end_ms }
    }

    /// Build from the raw attribute text.
    pub fn from_attribute(raw: &str) -> Self {
        Self::new(parse_end_date(raw).map(|end| end.timestamp_millis()))
    }

    pub fn end_ms(&self) -> Option<i64> {
        self.end_ms
    }

    /// Milliseconds left at `now_ms`, clamped to zero
    pub fn remaining_ms(&self, now_ms: i64) -> i64 {
        self.end_ms.map_or(0, |end| (end - now_ms).max(0))
    }

    pub fn display_at(&self, now_ms: i64) -> CountdownDisplay {
        match self.end_ms {
            Some(end) if end - now_ms > 0 => {
                CountdownDisplay::Running(Remaining::from_millis(end - now_ms))
            }
            _ => CountdownDisplay::Expired,
        }
    }
}

/// Parse the end-date formats page authors use.
///
/// Date-only values are UTC midnight; date-times without an offset are
/// local time.
pub fn parse_end_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return day.and_hms_opt(0, 0, 0).map(|midnight| midnight.and_utc());
    }

    const LOCAL_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%B %d, %Y %H:%M:%S",
        "%b %d, %Y %H:%M:%S",
    ];
    for format in LOCAL_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return local_to_utc(naive);
        }
    }

    for format in ["%B %d, %Y", "%b %d, %Y"] {
        if let Ok(day) = NaiveDate::parse_from_str(raw, format) {
            return day.and_hms_opt(0, 0, 0).and_then(local_to_utc);
        }
    }

    None
}

fn local_to_utc(naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakdown() {
        let ms = 2 * MS_PER_DAY + 3 * MS_PER_HOUR + 4 * MS_PER_MINUTE + 5 * MS_PER_SECOND + 999;
        let remaining = Remaining::from_millis(ms);
        assert_eq!(
            remaining,
            Remaining {
                days: 2,
                hours: 3,
                minutes: 4,
                seconds: 5
            }
        );
        assert_eq!(remaining.to_string(), "2d 3h 4m 5s");
    }

    #[test]
    fn test_expired_at_zero_and_after() {
        let cd = CountdownState::new(Some(10_000));
        assert!(matches!(cd.display_at(9_000), CountdownDisplay::Running(_)));
        assert_eq!(cd.display_at(10_000), CountdownDisplay::Expired);
        assert_eq!(cd.display_at(20_000), CountdownDisplay::Expired);
        assert_eq!(cd.remaining_ms(20_000), 0);
    }

    #[test]
    fn test_unparseable_target_is_expired() {
        let cd = CountdownState::from_attribute("next tuesday");
        assert_eq!(cd.end_ms(), None);
        assert_eq!(cd.display_at(0).render("Offer Expired"), "Offer Expired");
    }

    #[test]
    fn test_parse_formats() {
        let utc = parse_end_date("2026-12-31T23:59:59Z").unwrap();
        assert_eq!(utc.timestamp(), 1_798_761_599);

        let date_only = parse_end_date("2026-12-31").unwrap();
        assert_eq!(date_only.timestamp(), 1_798_675_200);

        assert!(parse_end_date("2026-12-31T10:00").is_some());
        assert!(parse_end_date("December 31, 2026 23:59:59").is_some());
        assert!(parse_end_date("Dec 31, 2026").is_some());
        assert!(parse_end_date("").is_none());
    }
}
