//! Diary session state
//!
//! `DiaryStore` owns everything a view needs: the loaded entries (newest
//! first), the selected week and the loading flag. Views read through the
//! accessors and register callbacks to hear about changes.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::{navigate_week, DiaryEntry, Direction, WeekBounds, WeekSelection};
use crate::error::Result;

/// A change a subscriber is told about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// The entry collection was replaced
    EntriesReplaced { count: usize },
    SelectionChanged(WeekSelection),
    LoadingChanged(bool),
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn Fn(&StoreEvent)>;

/// A week that has entries, with how many
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OccupiedWeek {
    #[serde(flatten)]
    pub week: WeekSelection,
    pub count: usize,
}

/// State container for one diary session
pub struct DiaryStore {
    entries: Vec<DiaryEntry>,
    selected_week: WeekSelection,
    is_loading: bool,
    subscribers: BTreeMap<SubscriptionId, Subscriber>,
    next_subscription: u64,
}

impl Default for DiaryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DiaryStore {
    /// Empty store, flagged as loading until the first load finishes
    pub fn new() -> Self {
        DiaryStore {
            entries: Vec::new(),
            selected_week: WeekSelection::default(),
            is_loading: true,
            subscribers: BTreeMap::new(),
            next_subscription: 0,
        }
    }

    /// Entries sorted newest first
    pub fn entries(&self) -> &[DiaryEntry] {
        &self.entries
    }

    pub fn selected_week(&self) -> WeekSelection {
        self.selected_week
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Oldest and newest occupied week, if anything is loaded
    pub fn bounds(&self) -> Option<WeekBounds> {
        WeekBounds::from_sorted(&self.entries)
    }

    /// Entries that fall in the selected week, newest first
    pub fn filtered_entries(&self) -> Vec<&DiaryEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.week() == self.selected_week)
            .collect()
    }

    /// Every week with at least one entry, newest first
    pub fn occupied_weeks(&self) -> Vec<OccupiedWeek> {
        let mut counts: BTreeMap<WeekSelection, usize> = BTreeMap::new();
        for entry in &self.entries {
            *counts.entry(entry.week()).or_insert(0) += 1;
        }

        counts
            .into_iter()
            .rev()
            .map(|(week, count)| OccupiedWeek { week, count })
            .collect()
    }

    /// Replace the entry collection.
    ///
    /// Callers hand over entries already sorted newest first.
    pub fn set_entries(&mut self, entries: Vec<DiaryEntry>) {
        self.entries = entries;
        let count = self.entries.len();
        self.notify(&StoreEvent::EntriesReplaced { count });
    }

    pub fn set_selected_week(&mut self, selection: WeekSelection) {
        if self.selected_week == selection {
            return;
        }
        self.selected_week = selection;
        self.notify(&StoreEvent::SelectionChanged(selection));
    }

    /// Replace the selection with a value computed from the current one
    pub fn update_selected_week<F>(&mut self, f: F)
    where
        F: FnOnce(WeekSelection) -> WeekSelection,
    {
        let next = f(self.selected_week);
        self.set_selected_week(next);
    }

    /// Select the week containing `date`, as picked from a calendar
    pub fn select_date(&mut self, date: NaiveDate) {
        self.set_selected_week(WeekSelection::of(date));
    }

    /// Move the selection to the nearest week with entries in `direction`
    pub fn navigate_week(&mut self, direction: Direction) -> Result<WeekSelection> {
        let next = navigate_week(self.selected_week, direction, &self.entries)?;
        self.set_selected_week(next);
        Ok(next)
    }

    pub fn set_loading(&mut self, loading: bool) {
        if self.is_loading == loading {
            return;
        }
        self.is_loading = loading;
        self.notify(&StoreEvent::LoadingChanged(loading));
    }

    /// Register a callback that runs after every change
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&StoreEvent) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.insert(id, Box::new(callback));
        id
    }

    /// Returns false if the subscription was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(&id).is_some()
    }

    fn notify(&self, event: &StoreEvent) {
        for subscriber in self.subscribers.values() {
            subscriber(event);
        }
    }
}

impl std::fmt::Debug for DiaryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiaryStore")
            .field("entries", &self.entries.len())
            .field("selected_week", &self.selected_week)
            .field("is_loading", &self.is_loading)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
