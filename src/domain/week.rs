//! Week numbering used to group diary entries
//!
//! Weeks start on Sunday and week 1 is the (possibly partial) week holding
//! January 1. This is not ISO-8601 numbering: the last days of a year can
//! land in week 53 or 54, and nothing here wraps them into the next year.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{DiaryError, Result};

/// Number of weeks the navigator cycles through before rolling the year.
pub const WEEKS_PER_YEAR: u32 = 52;

/// Largest week number `week_number` can return (Dec 31 of a leap year
/// starting on Saturday).
pub const MAX_WEEK_NUMBER: u32 = 54;

/// Week number of `date` within its calendar year.
///
/// `ceil((days_since_jan1 + weekday_of_jan1 + 1) / 7)`, with the weekday
/// counted from Sunday = 0.
pub fn week_number(date: NaiveDate) -> u32 {
    let days_since_jan1 = date.ordinal0();
    let offset = jan1_weekday(date);
    (days_since_jan1 + offset + 1).div_ceil(7)
}

/// Sunday-based weekday index of January 1 of `date`'s year.
fn jan1_weekday(date: NaiveDate) -> u32 {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    (weekday - date.ordinal0() as i64).rem_euclid(7) as u32
}

/// A (week number, year) pair identifying one displayed week.
///
/// Field order gives the derived ordering calendar semantics: year first,
/// then week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct WeekSelection {
    pub year: i32,
    pub week: u32,
}

impl WeekSelection {
    pub fn new(week: u32, year: i32) -> Self {
        WeekSelection { year, week }
    }

    /// The week a date belongs to
    pub fn of(date: NaiveDate) -> Self {
        WeekSelection::new(week_number(date), date.year())
    }

    /// Whether `date` falls in this week
    pub fn contains(&self, date: NaiveDate) -> bool {
        WeekSelection::of(date) == *self
    }
}

impl Default for WeekSelection {
    /// Placeholder shown before any diary has been loaded.
    fn default() -> Self {
        WeekSelection::new(1, 2025)
    }
}

impl fmt::Display for WeekSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

impl FromStr for WeekSelection {
    type Err = DiaryError;

    /// Parse `YYYY-Www` (case-insensitive `W`)
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || DiaryError::InvalidWeek(s.to_string());

        let (year_str, week_str) = s.trim().split_once('-').ok_or_else(invalid)?;
        let week_str = week_str
            .strip_prefix('W')
            .or_else(|| week_str.strip_prefix('w'))
            .ok_or_else(invalid)?;

        let year: i32 = year_str.parse().map_err(|_| invalid())?;
        let week: u32 = week_str.parse().map_err(|_| invalid())?;

        if !(1..=MAX_WEEK_NUMBER).contains(&week) {
            return Err(invalid());
        }

        Ok(WeekSelection::new(week, year))
    }
}

/// First and last day of `selection` inside its year.
///
/// Week 1 and the final week are clipped to January 1 and December 31.
/// Returns `None` when the week has no days in that year.
pub fn week_date_range(selection: WeekSelection) -> Option<(NaiveDate, NaiveDate)> {
    if selection.week == 0 {
        return None;
    }

    let jan1 = NaiveDate::from_ymd_opt(selection.year, 1, 1)?;
    let dec31 = NaiveDate::from_ymd_opt(selection.year, 12, 31)?;
    let offset = jan1.weekday().num_days_from_sunday() as i64;

    // Sunday on or before Jan 1 starts week 1
    let start = jan1 + Duration::days((selection.week as i64 - 1) * 7 - offset);
    let end = start + Duration::days(6);

    if start > dec31 || end < jan1 {
        return None;
    }

    Some((start.max(jan1), end.min(dec31)))
}
