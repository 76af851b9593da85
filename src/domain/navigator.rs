//! Week-to-week navigation over loaded entries
//!
//! Navigation walks one week at a time, skipping weeks without entries, and
//! never leaves the span between the oldest and the newest entry's week.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::entry::DiaryEntry;
use super::week::{WeekSelection, WEEKS_PER_YEAR};
use crate::error::{DiaryError, Result};

/// Direction of travel through the weeks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

impl FromStr for Direction {
    type Err = DiaryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "next" => Ok(Direction::Next),
            "previous" | "prev" => Ok(Direction::Previous),
            _ => Err(DiaryError::InvalidDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Next => write!(f, "next"),
            Direction::Previous => write!(f, "previous"),
        }
    }
}

/// Oldest and newest week that hold at least one entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekBounds {
    pub first: WeekSelection,
    pub last: WeekSelection,
}

impl WeekBounds {
    /// Bounds of a newest-first collection; `None` when it is empty.
    pub fn from_sorted(entries: &[DiaryEntry]) -> Option<Self> {
        let newest = entries.first()?;
        let oldest = entries.last()?;
        Some(WeekBounds {
            first: oldest.week(),
            last: newest.week(),
        })
    }

    pub fn contains(&self, selection: WeekSelection) -> bool {
        self.first <= selection && selection <= self.last
    }
}

/// Move one week in `direction`.
///
/// Weeks cycle through 1..=52; stepping past either end rolls the year.
/// Returns `None` when the year would overflow.
pub fn step(selection: WeekSelection, direction: Direction) -> Option<WeekSelection> {
    let WeekSelection { week, year } = selection;

    let (week, year) = match direction {
        Direction::Next if week >= WEEKS_PER_YEAR => (1, year.checked_add(1)?),
        Direction::Next => (week + 1, year),
        Direction::Previous if week <= 1 => (WEEKS_PER_YEAR, year.checked_sub(1)?),
        Direction::Previous => (week - 1, year),
    };

    Some(WeekSelection::new(week, year))
}

/// Find the nearest week with entries in `direction`, clamped to the
/// diary's bounds.
///
/// `entries` must be sorted newest first. Returns `EmptyDiary` when there
/// is nothing to navigate.
pub fn navigate_week(
    current: WeekSelection,
    direction: Direction,
    entries: &[DiaryEntry],
) -> Result<WeekSelection> {
    let bounds = WeekBounds::from_sorted(entries).ok_or(DiaryError::EmptyDiary)?;
    let occupied: BTreeSet<WeekSelection> = entries.iter().map(DiaryEntry::week).collect();

    // A walk from far outside the bounds passes through these weeks before
    // it can meet an entry, so it starts there instead.
    let (boundary, mut candidate) = match direction {
        Direction::Next if current >= bounds.last => return Ok(bounds.last),
        Direction::Previous if current <= bounds.first => return Ok(bounds.first),
        Direction::Next => {
            let entry_point =
                WeekSelection::new(WEEKS_PER_YEAR, bounds.first.year.saturating_sub(1));
            (bounds.last, current.max(entry_point))
        }
        Direction::Previous => {
            let entry_point = WeekSelection::new(1, bounds.last.year.saturating_add(1));
            (bounds.first, current.min(entry_point))
        }
    };

    loop {
        candidate = match step(candidate, direction) {
            Some(next) => next,
            None => return Ok(boundary),
        };

        match direction {
            Direction::Next if candidate >= boundary => return Ok(boundary),
            Direction::Previous if candidate <= boundary => return Ok(boundary),
            _ => {}
        }

        if occupied.contains(&candidate) {
            return Ok(candidate);
        }
    }
}
