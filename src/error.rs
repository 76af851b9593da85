//! Error types for injdiary

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for injdiary
#[derive(Debug, Error)]
pub enum DiaryError {
    #[error("Diary file not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Malformed diary block: {0}")]
    MalformedBlock(String),

    #[error("Invalid week: {0}")]
    InvalidWeek(String),

    #[error("Invalid direction: {0}")]
    InvalidDirection(String),

    #[error("The diary has no entries")]
    EmptyDiary,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DiaryError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            DiaryError::SourceNotFound(_) => 2,
            DiaryError::InvalidDate(_)
            | DiaryError::InvalidWeek(_)
            | DiaryError::InvalidDirection(_) => 3,
            DiaryError::EmptyDiary => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            DiaryError::SourceNotFound(path) => {
                format!(
                    "Diary file not found: {}\n\n\
                    Suggestions:\n\
                    • Pass the export explicitly: injdiary --file InjectionDiary.txt list\n\
                    • Configure it once: injdiary config diary_file path/to/diary.txt\n\
                    • Set INJDIARY_FILE environment variable to the export path",
                    path.display()
                )
            }
            DiaryError::InvalidWeek(input) => {
                format!(
                    "Invalid week: '{}'\n\n\
                    Weeks are written as YYYY-Www with a week between 1 and 54.\n\n\
                    Examples:\n\
                    injdiary week 2025-W05\n\
                    injdiary week 2024-w52",
                    input
                )
            }
            DiaryError::InvalidDate(input) => {
                format!(
                    "Invalid date: '{}'\n\n\
                    Expected format: DD-MM-YYYY\n\
                    Example: injdiary week --date 17-01-2025",
                    input
                )
            }
            DiaryError::InvalidDirection(input) => {
                format!(
                    "Invalid direction: '{}'\n\n\
                    Valid directions: next, previous (or prev)\n\
                    Example: injdiary week --go previous --go previous",
                    input
                )
            }
            DiaryError::EmptyDiary => "The diary has no entries\n\n\
                Suggestions:\n\
                • Check that the export starts with two header lines\n\
                • Run with -v to see which blocks were skipped"
                .to_string(),
            DiaryError::Config(msg) => {
                if msg.contains("Unknown config key") {
                    format!(
                        "{}\n\n\
                        Example: injdiary config date_format '%Y-%m-%d'",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using DiaryError
pub type Result<T> = std::result::Result<T, DiaryError>;
