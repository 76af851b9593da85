//! Diary entry model

use chrono::NaiveDate;
use serde::Serialize;

use super::week::WeekSelection;

/// One logged injection: when, where, and any notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiaryEntry {
    pub date: NaiveDate,
    pub site: String,
    pub comment: String,
}

impl DiaryEntry {
    pub fn new(date: NaiveDate, site: impl Into<String>, comment: impl Into<String>) -> Self {
        DiaryEntry {
            date,
            site: site.into(),
            comment: comment.into(),
        }
    }

    /// The week this entry is grouped under
    pub fn week(&self) -> WeekSelection {
        WeekSelection::of(self.date)
    }
}

/// Sort entries newest first.
///
/// The sort is stable, so entries sharing a date keep their file order.
pub fn sort_newest_first(entries: &mut [DiaryEntry]) {
    entries.sort_by(|a, b| b.date.cmp(&a.date));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_entry_week() {
        let entry = DiaryEntry::new(date(2025, 1, 17), "arm", "");
        assert_eq!(entry.week(), WeekSelection::new(3, 2025));
    }

    #[test]
    fn test_sort_newest_first() {
        let mut entries = vec![
            DiaryEntry::new(date(2025, 1, 10), "arm", ""),
            DiaryEntry::new(date(2025, 1, 20), "thigh", ""),
            DiaryEntry::new(date(2024, 12, 30), "belly", ""),
        ];
        sort_newest_first(&mut entries);

        let dates: Vec<NaiveDate> = entries.iter().map(|e| e.date).collect();
        assert_eq!(
            dates,
            vec![date(2025, 1, 20), date(2025, 1, 10), date(2024, 12, 30)]
        );
    }

    #[test]
    fn test_sort_keeps_order_of_same_day_entries() {
        let mut entries = vec![
            DiaryEntry::new(date(2025, 1, 10), "first", ""),
            DiaryEntry::new(date(2025, 1, 11), "later", ""),
            DiaryEntry::new(date(2025, 1, 10), "second", ""),
        ];
        sort_newest_first(&mut entries);

        let sites: Vec<&str> = entries.iter().map(|e| e.site.as_str()).collect();
        assert_eq!(sites, vec!["later", "first", "second"]);
    }
}
