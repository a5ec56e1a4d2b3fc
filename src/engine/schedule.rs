use chrono::{Datelike, NaiveDate};

use crate::error::ConfigError;
use crate::geo::time::{departure_window, DepartureTime};

pub const DEFAULT_FIRST_DEPARTURE: &str = "07:00";
pub const DEFAULT_LAST_DEPARTURE: &str = "22:30";
pub const DEFAULT_INTERVAL_MINUTES: u32 = 30;

/// Every day of one calendar month crossed with a fixed departure window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthSchedule {
    pub year: i32,
    pub month: u32,
    pub departures: Vec<DepartureTime>,
}

impl MonthSchedule {
    pub fn from_window(
        year: i32,
        month: u32,
        first: &str,
        last: &str,
        interval_minutes: u32,
    ) -> Result<Self, ConfigError> {
        NaiveDate::from_ymd_opt(year, month, 1).ok_or(ConfigError::InvalidMonth { year, month })?;
        let departures = departure_window(first.parse()?, last.parse()?, interval_minutes);
        if departures.is_empty() {
            return Err(ConfigError::EmptyDepartureWindow {
                first: first.to_string(),
                last: last.to_string(),
                interval: interval_minutes,
            });
        }
        Ok(Self {
            year,
            month,
            departures,
        })
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        let Some(first) = self.first_day() else {
            return Vec::new();
        };
        first
            .iter_days()
            .take_while(|day| day.month() == self.month)
            .collect()
    }

    pub fn candidate_count_per_route(&self) -> usize {
        self.dates().len() * self.departures.len()
    }
}
