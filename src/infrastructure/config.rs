//! Configuration management

use crate::error::{DiaryError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "injdiary.toml";

/// Environment variable that overrides `diary_file`
pub const DIARY_FILE_ENV: &str = "INJDIARY_FILE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub diary_file: PathBuf,
    pub date_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            diary_file: PathBuf::from("InjectionDiary.txt"),
            date_format: "%d-%m-%Y".to_string(),
        }
    }
}

impl Config {
    /// Load config from a file, falling back to defaults when it is missing
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(DiaryError::Io(e)),
        };

        let config: Config = toml::from_str(&contents)?;
        validate_date_format(&config.date_format)?;

        Ok(config)
    }

    /// Save config as pretty TOML
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let contents = toml::to_string_pretty(self)?;

        fs::write(path, contents)?;

        Ok(())
    }

    /// Diary path after applying the environment override.
    ///
    /// Relative paths are resolved against `base`, the directory that holds
    /// the config file.
    pub fn resolve_diary_file(&self, base: &Path) -> PathBuf {
        let configured = std::env::var_os(DIARY_FILE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| self.diary_file.clone());

        if configured.is_absolute() {
            configured
        } else {
            base.join(configured)
        }
    }
}

/// Reject strftime strings chrono cannot render for a plain date.
///
/// Unknown specifiers fail, and so do time and offset fields like `%H` or
/// `%z`, which a `NaiveDate` has no value for.
pub fn validate_date_format(format: &str) -> Result<()> {
    if format.is_empty() {
        return Err(DiaryError::Config("date_format must not be empty".to_string()));
    }

    let mut rendered = String::new();
    if write!(rendered, "{}", NaiveDate::MIN.format(format)).is_err() {
        return Err(DiaryError::Config(format!(
            "Invalid date_format: '{}'",
            format
        )));
    }
    Ok(())
}
