//! Week browsing use case

use chrono::NaiveDate;

use crate::application::store::DiaryStore;
use crate::domain::{Direction, WeekSelection};
use crate::error::Result;

/// Where browsing starts before any navigation steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeekStart {
    /// Keep the selection made by the load (the newest week)
    #[default]
    Newest,
    Week(WeekSelection),
    /// The week holding this date, as picked from a calendar
    Date(NaiveDate),
}

/// Apply a starting point and a sequence of navigation steps to the store.
///
/// Returns the final selection.
pub fn browse_week(
    store: &mut DiaryStore,
    start: WeekStart,
    steps: &[Direction],
) -> Result<WeekSelection> {
    match start {
        WeekStart::Newest => {}
        WeekStart::Week(selection) => store.set_selected_week(selection),
        WeekStart::Date(date) => store.select_date(date),
    }

    for direction in steps {
        let selection = store.navigate_week(*direction)?;
        tracing::debug!(%direction, week = %selection, "navigated");
    }

    Ok(store.selected_week())
}
