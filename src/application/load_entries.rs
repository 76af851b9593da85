//! Load diary use case

use std::ops::{Deref, DerefMut};
use tracing::{debug, info, warn};

use crate::application::store::DiaryStore;
use crate::domain::{parse_diary, sort_newest_first, WeekSelection};
use crate::error::Result;
use crate::infrastructure::DiarySource;

/// What a finished load did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    pub entries: usize,
    pub skipped: usize,
    /// Week of the newest entry, when there is one
    pub selected: Option<WeekSelection>,
}

/// Holds the store while a load is in flight.
///
/// Raises the loading flag on creation and lowers it when dropped, so the
/// flag is cleared on success, on error, and during unwinding.
pub struct LoadingGuard<'a> {
    store: &'a mut DiaryStore,
}

impl<'a> LoadingGuard<'a> {
    pub fn begin(store: &'a mut DiaryStore) -> Self {
        store.set_loading(true);
        LoadingGuard { store }
    }
}

impl Deref for LoadingGuard<'_> {
    type Target = DiaryStore;

    fn deref(&self) -> &DiaryStore {
        &*self.store
    }
}

impl DerefMut for LoadingGuard<'_> {
    fn deref_mut(&mut self) -> &mut DiaryStore {
        &mut *self.store
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.store.set_loading(false);
    }
}

/// Service that fills a store from a diary source
pub struct LoadEntriesService<S: DiarySource> {
    source: S,
    strict: bool,
}

impl<S: DiarySource> LoadEntriesService<S> {
    /// Create a new load service
    pub fn new(source: S) -> Self {
        LoadEntriesService {
            source,
            strict: false,
        }
    }

    /// Fail on the first skipped block instead of loading what parsed
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Fetch, parse and sort the diary, then select the newest week.
    ///
    /// On a failed fetch, or a skipped block in strict mode, the store keeps
    /// its previous entries.
    pub fn execute(&self, store: &mut DiaryStore) -> Result<LoadSummary> {
        let mut store = LoadingGuard::begin(store);

        debug!(source = %self.source.describe(), "fetching diary");
        let text = self.source.fetch()?;

        let outcome = parse_diary(&text);
        if self.strict {
            if let Some(skipped) = outcome.skipped.first() {
                return Err(skipped.clone().into_error());
            }
        }
        for skipped in &outcome.skipped {
            warn!(block = skipped.block, "Skipping diary block: {}", skipped.reason);
        }

        let mut entries = outcome.entries;
        sort_newest_first(&mut entries);

        let selected = entries.first().map(|newest| newest.week());
        let summary = LoadSummary {
            entries: entries.len(),
            skipped: outcome.skipped.len(),
            selected,
        };

        store.set_entries(entries);
        if let Some(week) = selected {
            store.set_selected_week(week);
        }

        info!(
            entries = summary.entries,
            skipped = summary.skipped,
            "loaded diary from {}",
            self.source.describe()
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::store::StoreEvent;
    use crate::domain::DiaryEntry;
    use crate::error::DiaryError;
    use crate::infrastructure::{FileSource, InMemorySource};
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;

    const DIARY: &str = "Injection Diary\nexported\n\
        <div>3/5/24</div>\n<div>arm</div>\n<div>felt fine</div>\n<div><br></div>\n\
        <div>3/19/24</div>\n<div>thigh</div>\n<div><br></div>\n\
        <div>oops</div>\n<div>belly</div>\n<div><br></div>\n\
        <div>3/12/24</div>\n<div>belly</div>\n";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_load_sorts_and_selects_newest_week() {
        let mut store = DiaryStore::new();
        let service = LoadEntriesService::new(InMemorySource::new(DIARY));

        let summary = service.execute(&mut store).unwrap();

        assert_eq!(summary.entries, 3);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.selected, Some(WeekSelection::of(date(2024, 3, 19))));

        let dates: Vec<NaiveDate> = store.entries().iter().map(|e| e.date).collect();
        assert_eq!(
            dates,
            vec![date(2024, 3, 19), date(2024, 3, 12), date(2024, 3, 5)]
        );
        assert!(dates.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(store.selected_week(), WeekSelection::of(date(2024, 3, 19)));
        assert!(!store.is_loading());
    }

    #[test]
    fn test_load_empty_diary_keeps_selection() {
        let mut store = DiaryStore::new();
        let service = LoadEntriesService::new(InMemorySource::new("header\nheader\n"));

        let summary = service.execute(&mut store).unwrap();

        assert_eq!(summary.entries, 0);
        assert_eq!(summary.selected, None);
        assert_eq!(store.selected_week(), WeekSelection::default());
        assert!(!store.is_loading());
    }

    #[test]
    fn test_failed_fetch_clears_loading_and_keeps_entries() {
        let temp = TempDir::new().unwrap();
        let mut store = DiaryStore::new();
        let existing = DiaryEntry::new(date(2024, 1, 1), "arm", "");
        store.set_entries(vec![existing.clone()]);

        let service = LoadEntriesService::new(FileSource::new(temp.path().join("missing.txt")));
        let result = service.execute(&mut store);

        assert!(matches!(result, Err(DiaryError::SourceNotFound(_))));
        assert!(!store.is_loading());
        assert_eq!(store.entries(), &[existing]);
    }

    #[test]
    fn test_reload_replaces_entries() {
        let mut store = DiaryStore::new();
        LoadEntriesService::new(InMemorySource::new(DIARY))
            .execute(&mut store)
            .unwrap();

        let smaller = "h\nh\n<div>4/2/24</div>\n<div>leg</div>\n";
        LoadEntriesService::new(InMemorySource::new(smaller))
            .execute(&mut store)
            .unwrap();

        assert_eq!(store.entries().len(), 1);
        assert_eq!(store.entries()[0].site, "leg");
        assert_eq!(store.selected_week(), WeekSelection::of(date(2024, 4, 2)));
    }

    #[test]
    fn test_loading_flag_events_bracket_the_load() {
        let mut store = DiaryStore::new();
        store.set_loading(false);

        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        store.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        LoadEntriesService::new(InMemorySource::new(DIARY))
            .execute(&mut store)
            .unwrap();

        let events = events.borrow();
        assert_eq!(events.first(), Some(&StoreEvent::LoadingChanged(true)));
        assert_eq!(events.last(), Some(&StoreEvent::LoadingChanged(false)));
        assert!(events.contains(&StoreEvent::EntriesReplaced { count: 3 }));
    }

    #[test]
    fn test_strict_load_fails_on_skipped_block() {
        let mut store = DiaryStore::new();
        let existing = DiaryEntry::new(date(2024, 1, 1), "arm", "");
        store.set_entries(vec![existing.clone()]);

        let result = LoadEntriesService::new(InMemorySource::new(DIARY))
            .strict(true)
            .execute(&mut store);

        match result {
            Err(DiaryError::MalformedBlock(msg)) => {
                assert_eq!(msg, "block 3: invalid date 'oops'")
            }
            other => panic!("Expected MalformedBlock, got {:?}", other),
        }
        assert!(!store.is_loading());
        assert_eq!(store.entries(), &[existing]);
    }

    #[test]
    fn test_strict_load_accepts_clean_diary() {
        let mut store = DiaryStore::new();
        let clean = "h\nh\n<div>4/2/24</div>\n<div>leg</div>\n";

        let summary = LoadEntriesService::new(InMemorySource::new(clean))
            .strict(true)
            .execute(&mut store)
            .unwrap();

        assert_eq!(summary.entries, 1);
        assert_eq!(summary.skipped, 0);
    }
}
