//! Text formats for times and durations.
//!
//! The state file declares per field which format applies: `work.start` and
//! `work.end` go through [`timestamp`], break bounds through [`time_of_day`].
//! Nothing is sniffed, so an integer target can never be mistaken for a time.

use chrono::{NaiveDateTime, NaiveTime, TimeDelta, Timelike};

/// Persisted timestamp format, minute resolution.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Persisted and printed time-of-day format.
pub const TIME_OF_DAY_FORMAT: &str = "%H:%M";

/// Parses `YYYY-MM-DDTHH:MM`.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT).ok()
}

/// Parses `HH:MM`, also accepting `HH:MM:SS` from hand-edited files.
/// Seconds are dropped, so the value survives being written back as `HH:MM`.
pub fn parse_time_of_day(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    let time = NaiveTime::parse_from_str(s, TIME_OF_DAY_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()?;
    time.with_second(0).and_then(|t| t.with_nanosecond(0))
}

/// Drops seconds and sub-seconds; every stored instant has minute resolution.
pub fn truncate_to_minute(dt: NaiveDateTime) -> NaiveDateTime {
    dt.with_second(0)
        .and_then(|d| d.with_nanosecond(0))
        .unwrap_or(dt)
}

/// Formats a duration as `H:MM`: hours unpadded and not wrapped at 24, seconds dropped.
pub fn hours_minutes(d: TimeDelta) -> String {
    let minutes = d.num_minutes();
    let sign = if minutes < 0 { "-" } else { "" };
    let minutes = minutes.abs();
    format!("{}{}:{:02}", sign, minutes / 60, minutes % 60)
}

/// Serde codec for `YYYY-MM-DDTHH:MM` fields.
pub mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(super::TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_timestamp(&s).ok_or_else(|| {
            de::Error::custom(format!("invalid timestamp {:?}, expected YYYY-MM-DDTHH:MM", s))
        })
    }
}

/// Serde codec for `HH:MM` fields.
pub mod time_of_day {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(super::TIME_OF_DAY_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_time_of_day(&s)
            .ok_or_else(|| de::Error::custom(format!("invalid time of day {:?}, expected HH:MM", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_timestamp() {
        let dt = parse_timestamp("2000-01-01T12:15").unwrap();
        assert_eq!(dt, NaiveDate::from_ymd_opt(2000, 1, 1).unwrap().and_hms_opt(12, 15, 0).unwrap());
        assert!(parse_timestamp("12:15").is_none());
        assert!(parse_timestamp("480").is_none());
        assert!(parse_timestamp("hello world").is_none());
    }

    #[test]
    fn test_parse_time_of_day() {
        assert_eq!(parse_time_of_day("13:36"), NaiveTime::from_hms_opt(13, 36, 0));
        assert_eq!(parse_time_of_day("09:00:30"), NaiveTime::from_hms_opt(9, 0, 0));
        assert_eq!(parse_time_of_day("09:14:59"), NaiveTime::from_hms_opt(9, 14, 0));
        assert!(parse_time_of_day("2000-01-01T12:15").is_none());
        assert!(parse_time_of_day("25:00").is_none());
    }

    #[test]
    fn test_truncate_to_minute() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_milli_opt(8, 7, 59, 999)
            .unwrap();
        let t = truncate_to_minute(dt);
        assert_eq!(t.second(), 0);
        assert_eq!(t.nanosecond(), 0);
        assert_eq!(t.minute(), 7);
    }

    #[test]
    fn test_hours_minutes() {
        assert_eq!(hours_minutes(TimeDelta::minutes(555)), "9:15");
        assert_eq!(hours_minutes(TimeDelta::minutes(600)), "10:00");
        assert_eq!(hours_minutes(TimeDelta::zero()), "0:00");
        assert_eq!(hours_minutes(TimeDelta::minutes(25 * 60)), "25:00");
        assert_eq!(hours_minutes(TimeDelta::seconds(9 * 3600 + 59)), "9:00");
        assert_eq!(hours_minutes(TimeDelta::minutes(-5)), "-0:05");
    }
}
