use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

pub const MINUTES_PER_HOUR: i64 = 60;
pub const MINUTES_PER_DAY: i64 = 1440;
pub const MINUTES_PER_WEEK: i64 = 10080;
/// A month is always 28 days here. This is a convention of the reminder
/// model and must not be used for calendar arithmetic.
pub const MINUTES_PER_MONTH: i64 = 40320;

/// The units a relative offset can be expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
}

impl TimeUnit {
    /// Length of one unit in minutes
    pub fn minutes(&self) -> i64 {
        match self {
            Self::Minutes => 1,
            Self::Hours => MINUTES_PER_HOUR,
            Self::Days => MINUTES_PER_DAY,
            Self::Weeks => MINUTES_PER_WEEK,
            Self::Months => MINUTES_PER_MONTH,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minutes => "minutes",
            Self::Hours => "hours",
            Self::Days => "days",
            Self::Weeks => "weeks",
            Self::Months => "months",
        }
    }

    /// Name of the alarm trigger field holding a count of this unit
    pub fn trigger_field(&self) -> &'static str {
        match self {
            Self::Minutes => "min",
            Self::Hours => "hour",
            Self::Days => "day",
            Self::Weeks => "week",
            Self::Months => "month",
        }
    }

    /// Accepts singular, plural and the short forms used by trigger fields
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "min" | "mins" | "minute" | "minutes" => Some(Self::Minutes),
            "hour" | "hours" => Some(Self::Hours),
            "day" | "days" => Some(Self::Days),
            "week" | "weeks" => Some(Self::Weeks),
            "month" | "months" => Some(Self::Months),
            _ => None,
        }
    }
}

impl Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Breakdown of a relative offset as produced by parsing strings like
/// `"15 minutes"` or `"2 weeks"`.
///
/// The fields are not normalized: `"120 min"` is kept as 120 minutes and
/// not as 2 hours, and weeks are stored as days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Interval {
    pub months: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
}

#[derive(Error, Debug, PartialEq)]
pub enum IntervalParseError {
    #[error("Interval: `{0}` is not of the form `<count> <unit>`")]
    Malformed(String),
    #[error("Interval count: `{0}` is not a valid integer")]
    InvalidCount(String),
    #[error("Interval unit: `{0}` is not supported")]
    UnknownUnit(String),
}

impl Interval {
    /// Creates the breakdown for `count` of `unit`.
    /// The caller must make sure that `count * unit.minutes()` fits in an `i64`.
    pub fn of(count: i64, unit: TimeUnit) -> Self {
        let mut interval = Self::default();
        match unit {
            TimeUnit::Minutes => interval.minutes = count,
            TimeUnit::Hours => interval.hours = count,
            TimeUnit::Days => interval.days = count,
            TimeUnit::Weeks => interval.days = count * 7,
            TimeUnit::Months => interval.months = count,
        }
        interval
    }

    /// Sum of every field in minutes
    pub fn total_minutes(&self) -> i64 {
        self.months
            .saturating_mul(MINUTES_PER_MONTH)
            .saturating_add(self.days.saturating_mul(MINUTES_PER_DAY))
            .saturating_add(self.hours.saturating_mul(MINUTES_PER_HOUR))
            .saturating_add(self.minutes)
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

impl FromStr for Interval {
    type Err = IntervalParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s.split_whitespace().collect::<Vec<_>>();
        if parts.len() != 2 {
            return Err(IntervalParseError::Malformed(s.to_string()));
        }

        let count = parts[0]
            .parse::<i64>()
            .map_err(|_| IntervalParseError::InvalidCount(parts[0].to_string()))?;
        let unit = TimeUnit::from_name(parts[1])
            .ok_or_else(|| IntervalParseError::UnknownUnit(parts[1].to_string()))?;

        if count.checked_mul(unit.minutes()).is_none() {
            return Err(IntervalParseError::InvalidCount(parts[0].to_string()));
        }

        Ok(Self::of(count, unit))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_parses_every_unit() {
        let cases = vec![
            ("15 minutes", Interval::of(15, TimeUnit::Minutes), 15),
            ("1 min", Interval::of(1, TimeUnit::Minutes), 1),
            ("3 hours", Interval::of(3, TimeUnit::Hours), 180),
            ("2 days", Interval::of(2, TimeUnit::Days), 2880),
            ("1 week", Interval::of(1, TimeUnit::Weeks), 10080),
            ("1 MONTH", Interval::of(1, TimeUnit::Months), 40320),
        ];

        for (input, expected, minutes) in cases {
            let interval = input.parse::<Interval>().expect("Valid interval");
            assert_eq!(interval, expected);
            assert_eq!(interval.total_minutes(), minutes);
        }
    }

    #[test]
    fn it_keeps_weeks_as_days() {
        let interval = "2 weeks".parse::<Interval>().unwrap();
        assert_eq!(interval.days, 14);
        assert_eq!(interval.months, 0);
    }

    #[test]
    fn it_does_not_normalize_fields() {
        let interval = "120 min".parse::<Interval>().unwrap();
        assert_eq!(interval.minutes, 120);
        assert_eq!(interval.hours, 0);
    }

    #[test]
    fn it_rejects_invalid_intervals() {
        assert_eq!(
            "".parse::<Interval>(),
            Err(IntervalParseError::Malformed("".into()))
        );
        assert_eq!(
            "15".parse::<Interval>(),
            Err(IntervalParseError::Malformed("15".into()))
        );
        assert_eq!(
            "a minutes".parse::<Interval>(),
            Err(IntervalParseError::InvalidCount("a".into()))
        );
        assert_eq!(
            "5 fortnights".parse::<Interval>(),
            Err(IntervalParseError::UnknownUnit("fortnights".into()))
        );
        assert!(format!("{} months", i64::MAX).parse::<Interval>().is_err());
    }

    #[test]
    fn zero_interval() {
        let interval = "0 minutes".parse::<Interval>().unwrap();
        assert!(interval.is_zero());
        assert_eq!(interval.total_minutes(), 0);
    }
}
