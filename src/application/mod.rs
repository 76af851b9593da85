//! Application layer - Use cases and session state

pub mod browse_week;
pub mod load_entries;
pub mod manage_config;
pub mod store;

pub use browse_week::{browse_week, WeekStart};
pub use load_entries::{LoadEntriesService, LoadSummary, LoadingGuard};
pub use manage_config::ConfigService;
pub use store::{DiaryStore, OccupiedWeek, StoreEvent, SubscriptionId};
