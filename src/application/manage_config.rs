//! Config management use case

use crate::error::{DiaryError, Result};
use crate::infrastructure::config::validate_date_format;
use crate::infrastructure::Config;
use std::path::PathBuf;

const VALID_KEYS: &str = "diary_file, date_format";

/// Service for reading and writing the config file
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Create a new config service for the file at `path`
    pub fn new(path: PathBuf) -> Self {
        ConfigService { path }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = Config::load(&self.path)?;

        match key {
            "diary_file" => Ok(config.diary_file.display().to_string()),
            "date_format" => Ok(config.date_format),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set a config value and write the file
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = Config::load(&self.path)?;

        match key {
            "diary_file" => {
                if value.trim().is_empty() {
                    return Err(DiaryError::Config(
                        "diary_file must not be empty".to_string(),
                    ));
                }
                config.diary_file = PathBuf::from(value);
            }
            "date_format" => {
                validate_date_format(value)?;
                config.date_format = value.to_string();
            }
            _ => return Err(unknown_key(key)),
        }

        config.save(&self.path)
    }

    /// Current config, defaults included
    pub fn list(&self) -> Result<Config> {
        Config::load(&self.path)
    }
}

fn unknown_key(key: &str) -> DiaryError {
    DiaryError::Config(format!(
        "Unknown config key: '{}'. Valid keys are: {}",
        key, VALID_KEYS
    ))
}
