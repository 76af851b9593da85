//! Output formatting utilities

use chrono::NaiveDate;
use serde::Serialize;

use crate::application::OccupiedWeek;
use crate::domain::{week_date_range, DiaryEntry, WeekSelection};
use crate::error::Result;

fn format_entry(entry: &DiaryEntry, date_format: &str) -> String {
    let date = entry.date.format(date_format);
    if entry.comment.is_empty() {
        format!("{}  {}\n", date, entry.site)
    } else {
        format!("{}  {}  {}\n", date, entry.site, entry.comment)
    }
}

/// Format a list of diary entries for display
pub fn format_entry_list<'a, I>(entries: I, date_format: &str) -> String
where
    I: IntoIterator<Item = &'a DiaryEntry>,
{
    let output: String = entries
        .into_iter()
        .map(|entry| format_entry(entry, date_format))
        .collect();

    if output.is_empty() {
        "No entries found".to_string()
    } else {
        output
    }
}

/// Format one week: a heading with its date span, then its entries
pub fn format_week(selection: WeekSelection, entries: &[&DiaryEntry], date_format: &str) -> String {
    let mut output = match week_date_range(selection) {
        Some((start, end)) => format!(
            "Week {} of {} ({} to {})\n",
            selection.week,
            selection.year,
            start.format(date_format),
            end.format(date_format)
        ),
        None => format!("Week {} of {}\n", selection.week, selection.year),
    };

    if entries.is_empty() {
        output.push_str("No entries this week\n");
    } else {
        for entry in entries {
            output.push_str(&format_entry(entry, date_format));
        }
    }

    output
}

/// Format the weeks that have entries
pub fn format_week_list(weeks: &[OccupiedWeek]) -> String {
    if weeks.is_empty() {
        return "No weeks found".to_string();
    }

    let mut output = String::new();
    for occupied in weeks {
        let noun = if occupied.count == 1 { "entry" } else { "entries" };
        output.push_str(&format!("{}  {} {}\n", occupied.week, occupied.count, noun));
    }
    output
}

#[derive(Serialize)]
struct WeekView<'a> {
    #[serde(flatten)]
    week: WeekSelection,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    entries: &'a [&'a DiaryEntry],
}

/// Serialize anything shown by the CLI as pretty JSON
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// JSON form of `format_week`
pub fn week_json(selection: WeekSelection, entries: &[&DiaryEntry]) -> Result<String> {
    let range = week_date_range(selection);
    to_json(&WeekView {
        week: selection,
        start: range.map(|(start, _)| start),
        end: range.map(|(_, end)| end),
        entries,
    })
}
