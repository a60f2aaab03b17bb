//! The trailing seven-day window used by weekly summaries.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::model::DailyActivity;

/// Number of calendar days covered by a summary, including today.
pub const WINDOW_DAYS: u64 = 7;

/// An inclusive range of calendar days ending on `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl SummaryWindow {
    /// The window `[today - 6, today]`.
    pub fn ending(today: NaiveDate) -> Self {
        let start = today
            .checked_sub_days(Days::new(WINDOW_DAYS - 1))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end: today }
    }

    /// Whether `date` falls inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Sum the minutes of every entry inside the window, saturating at `i64::MAX`.
    pub fn sum(&self, entries: &[DailyActivity]) -> i64 {
        entries
            .iter()
            .filter(|e| self.contains(e.date))
            .fold(0i64, |total, e| total.saturating_add(e.minutes_spent))
    }
}
