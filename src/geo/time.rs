use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid HH:MM time: {0}")]
pub struct TimeParseError(pub String);

pub fn time_to_minutes(raw: &str) -> Result<u32, TimeParseError> {
    let err = || TimeParseError(raw.to_string());
    let (hours, minutes) = raw.trim().split_once(':').ok_or_else(err)?;
    let hours: u32 = hours.parse().map_err(|_| err())?;
    let minutes: u32 = minutes.parse().map_err(|_| err())?;
    if hours >= 24 || minutes >= 60 {
        return Err(err());
    }
    Ok(hours * 60 + minutes)
}

/// Formats minutes since midnight as `HH:MM`, wrapping past midnight.
pub fn minutes_to_time(minutes: u32) -> String {
    let minutes = minutes % MINUTES_PER_DAY;
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DepartureTime(u32);

impl DepartureTime {
    pub fn from_minutes(minutes: u32) -> Self {
        Self(minutes % MINUTES_PER_DAY)
    }

    pub fn minutes(&self) -> u32 {
        self.0
    }

    pub fn hour(&self) -> u32 {
        self.0 / 60
    }

    pub fn minute(&self) -> u32 {
        self.0 % 60
    }
}

impl Display for DepartureTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", minutes_to_time(self.0))
    }
}

impl FromStr for DepartureTime {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        time_to_minutes(s).map(Self)
    }
}

impl TryFrom<String> for DepartureTime {
    type Error = TimeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DepartureTime> for String {
    fn from(value: DepartureTime) -> Self {
        value.to_string()
    }
}

/// Departure times from `first` to `last` inclusive at a fixed interval.
pub fn departure_window(
    first: DepartureTime,
    last: DepartureTime,
    interval_minutes: u32,
) -> Vec<DepartureTime> {
    if interval_minutes == 0 || first > last {
        return Vec::new();
    }
    (first.minutes()..=last.minutes())
        .step_by(interval_minutes as usize)
        .map(DepartureTime::from_minutes)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_between_strings_and_minutes() {
        assert_eq!(time_to_minutes("14:30"), Ok(870));
        assert_eq!(time_to_minutes("07:00"), Ok(420));
        assert_eq!(time_to_minutes("0:05"), Ok(5));
        assert_eq!(minutes_to_time(870), "14:30");
        assert_eq!(minutes_to_time(MINUTES_PER_DAY + 65), "01:05");
    }

    #[test]
    fn rejects_malformed_times() {
        for raw in ["", "1430", "25:00", "12:60", "ab:cd", "12:"] {
            assert!(time_to_minutes(raw).is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn departure_time_serializes_as_string() {
        let t: DepartureTime = "08:30".parse().expect("valid time");
        assert_eq!((t.hour(), t.minute()), (8, 30));
        let json = serde_json::to_string(&t).expect("serialize");
        assert_eq!(json, "\"08:30\"");
        let back: DepartureTime = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, t);
    }

    #[test]
    fn builds_default_departure_window() {
        let first = "07:00".parse().expect("first");
        let last = "22:30".parse().expect("last");
        let window = departure_window(first, last, 30);
        assert_eq!(window.len(), 32);
        assert_eq!(window[0].to_string(), "07:00");
        assert_eq!(window[31].to_string(), "22:30");
        assert!(departure_window(last, first, 30).is_empty());
        assert!(departure_window(first, last, 0).is_empty());
    }
}
