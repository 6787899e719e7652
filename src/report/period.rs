//! Reporting periods and week arithmetic.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Returns the Monday-start week containing `reference`, Monday..=Sunday.
#[must_use]
pub fn week_range(reference: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = u64::from(reference.weekday().num_days_from_monday());
    let monday = reference.checked_sub_days(Days::new(offset)).unwrap_or(reference);
    let sunday = monday.checked_add_days(Days::new(6)).unwrap_or(monday);
    (monday, sunday)
}

/// Window of task creation dates a report covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportPeriod {
    /// The Monday-start week containing the reference date.
    Week,
    /// The calendar month containing the reference date.
    #[default]
    Month,
    /// No restriction.
    All,
    /// An explicit inclusive range.
    Custom {
        /// First included date.
        start: NaiveDate,
        /// Last included date.
        end: NaiveDate,
    },
}

impl ReportPeriod {
    /// Resolves the period to an inclusive date range, or `None` for
    /// [`ReportPeriod::All`].
    #[must_use]
    pub fn range(self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            Self::Week => Some(week_range(today)),
            Self::Month => {
                let first = today.with_day(1).unwrap_or(today);
                let last = first
                    .checked_add_months(Months::new(1))
                    .and_then(|next| next.pred_opt())
                    .unwrap_or(today);
                Some((first, last))
            }
            Self::All => None,
            Self::Custom { start, end } => Some((start, end)),
        }
    }

    /// Returns `true` when `date` falls inside the period.
    #[must_use]
    pub fn contains(self, date: NaiveDate, today: NaiveDate) -> bool {
        self.range(today)
            .is_none_or(|(start, end)| start <= date && date <= end)
    }
}
