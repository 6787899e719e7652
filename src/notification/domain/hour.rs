//! Calendar-hour key used to throttle reminders.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One local calendar hour, rendered as `YYYY-MM-DD-HH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HourBucket {
    date: NaiveDate,
    hour: u32,
}

/// Error returned when a stored hour key cannot be parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid hour bucket: {0}")]
pub struct ParseHourBucketError(pub String);

impl HourBucket {
    /// Returns the bucket containing a local wall-clock time.
    #[must_use]
    pub fn from_local(local: NaiveDateTime) -> Self {
        Self {
            date: local.date(),
            hour: local.hour(),
        }
    }

    /// Returns the calendar date.
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.date
    }

    /// Returns the hour of day, `0..24`.
    #[must_use]
    pub const fn hour(self) -> u32 {
        self.hour
    }
}

impl fmt::Display for HourBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.date.format("%Y-%m-%d"), self.hour)
    }
}

impl FromStr for HourBucket {
    type Err = ParseHourBucketError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseHourBucketError(value.to_owned());
        let (date_part, hour_part) = value.trim().rsplit_once('-').ok_or_else(invalid)?;
        let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|_| invalid())?;
        let hour = hour_part
            .parse::<u32>()
            .ok()
            .filter(|hour| *hour < 24)
            .ok_or_else(invalid)?;
        Ok(Self { date, hour })
    }
}
