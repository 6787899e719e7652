//! Weekly business-hours schedule.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use std::collections::HashMap;

const SECONDS_PER_HOUR: u32 = 3_600;

/// Half-open daily window `[start, end)` in seconds after local midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyWindow {
    start: u32,
    end: u32,
}

impl DailyWindow {
    /// Creates a window spanning whole hours, e.g. `hours(8, 18)` for
    /// 08:00 up to but excluding 18:00.
    #[must_use]
    pub const fn hours(start_hour: u32, end_hour: u32) -> Self {
        Self {
            start: start_hour.saturating_mul(SECONDS_PER_HOUR),
            end: end_hour.saturating_mul(SECONDS_PER_HOUR),
        }
    }

    /// Returns `true` when `seconds` after midnight falls inside the window.
    #[must_use]
    pub const fn contains(self, seconds: u32) -> bool {
        self.start <= seconds && seconds < self.end
    }

    /// Returns the window start in seconds after midnight.
    #[must_use]
    pub const fn start_seconds(self) -> u32 {
        self.start
    }

    /// Returns the exclusive window end in seconds after midnight.
    #[must_use]
    pub const fn end_seconds(self) -> u32 {
        self.end
    }
}

/// Days and hours during which proactive notifications are permitted.
///
/// A weekday without a window is closed all day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessHours {
    windows: HashMap<Weekday, DailyWindow>,
}

impl BusinessHours {
    /// Returns a schedule that is closed every day.
    #[must_use]
    pub fn closed() -> Self {
        Self {
            windows: HashMap::new(),
        }
    }

    /// Opens `weekday` for `window`, replacing any previous window.
    #[must_use]
    pub fn with_window(mut self, weekday: Weekday, window: DailyWindow) -> Self {
        self.windows.insert(weekday, window);
        self
    }

    /// Returns the window configured for `weekday`.
    #[must_use]
    pub fn window(&self, weekday: Weekday) -> Option<DailyWindow> {
        self.windows.get(&weekday).copied()
    }

    /// Returns `true` when the local wall-clock time is inside business hours.
    #[must_use]
    pub fn is_open(&self, local: NaiveDateTime) -> bool {
        self.window(local.weekday())
            .is_some_and(|window| window.contains(local.num_seconds_from_midnight()))
    }
}

impl Default for BusinessHours {
    /// Monday to Friday 08:00–18:00, Saturday 08:00–14:00, Sunday closed.
    fn default() -> Self {
        let weekdays = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ];
        weekdays
            .into_iter()
            .fold(Self::closed(), |hours, day| {
                hours.with_window(day, DailyWindow::hours(8, 18))
            })
            .with_window(Weekday::Sat, DailyWindow::hours(8, 14))
    }
}
