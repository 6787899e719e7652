//! Gate timing and schedule settings.

use super::BusinessHours;
use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, Utc};
use std::time::Duration;

/// UTC−03:00, the offset of the field teams.
const DEFAULT_UTC_OFFSET_WEST_SECS: i32 = 3 * 3_600;

/// Settings controlling when the notification gate runs and fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateSettings {
    initial_delay: Duration,
    interval: Duration,
    utc_offset: FixedOffset,
    business_hours: BusinessHours,
    enforce_business_hours: bool,
}

impl Default for GateSettings {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(5),
            interval: Duration::from_secs(3_600),
            utc_offset: FixedOffset::west_opt(DEFAULT_UTC_OFFSET_WEST_SECS)
                .unwrap_or_else(|| Utc.fix()),
            business_hours: BusinessHours::default(),
            enforce_business_hours: true,
        }
    }
}

impl GateSettings {
    /// Sets the delay before the first reminder check.
    #[must_use]
    pub const fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Sets the period between reminder checks.
    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the offset used to derive local wall-clock time.
    #[must_use]
    pub const fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = offset;
        self
    }

    /// Replaces the business-hours schedule.
    #[must_use]
    pub fn with_business_hours(mut self, hours: BusinessHours) -> Self {
        self.business_hours = hours;
        self
    }

    /// Turns business-hours gating on or off.
    #[must_use]
    pub const fn with_enforce_business_hours(mut self, enforce: bool) -> Self {
        self.enforce_business_hours = enforce;
        self
    }

    /// Returns the delay before the first reminder check.
    #[must_use]
    pub const fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    /// Returns the period between reminder checks.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns the configured UTC offset.
    #[must_use]
    pub const fn utc_offset(&self) -> FixedOffset {
        self.utc_offset
    }

    /// Returns the business-hours schedule.
    #[must_use]
    pub const fn business_hours(&self) -> &BusinessHours {
        &self.business_hours
    }

    /// Returns whether business hours are enforced.
    #[must_use]
    pub const fn enforce_business_hours(&self) -> bool {
        self.enforce_business_hours
    }

    /// Converts an instant to local wall-clock time.
    #[must_use]
    pub fn local_time(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.utc_offset).naive_local()
    }

    /// Returns `true` when notifications may fire at `instant`.
    #[must_use]
    pub fn permits(&self, instant: DateTime<Utc>) -> bool {
        !self.enforce_business_hours || self.business_hours.is_open(self.local_time(instant))
    }
}
