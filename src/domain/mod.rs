//! Domain layer - Diary entries, parsing and week navigation

pub mod entry;
pub mod navigator;
pub mod parser;
pub mod week;

pub use entry::{sort_newest_first, DiaryEntry};
pub use navigator::{navigate_week, Direction, WeekBounds};
pub use parser::{parse_diary, parse_diary_entries, ParseOutcome, SkipReason, SkippedBlock};
pub use week::{week_date_range, week_number, WeekSelection};
