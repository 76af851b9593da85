//! Diary sources
//!
//! A source hands the raw export text to the load use case. The parser
//! never knows where the text came from.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use crate::error::{DiaryError, Result};

/// Something that can supply the raw text of a diary export
pub trait DiarySource {
    /// Fetch the full export
    fn fetch(&self) -> Result<String>;

    /// Human-readable origin, used in log messages
    fn describe(&self) -> String;
}

/// Reads the export from a file on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }
}

impl DiarySource for FileSource {
    fn fetch(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DiaryError::SourceNotFound(self.path.clone())
            } else {
                DiaryError::Io(e)
            }
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Export text already held in memory
#[derive(Debug, Clone)]
pub struct InMemorySource {
    text: String,
    label: String,
}

impl InMemorySource {
    pub fn new(text: impl Into<String>) -> Self {
        InMemorySource {
            text: text.into(),
            label: "<memory>".to_string(),
        }
    }

    /// Drain a reader (usually stdin) into memory
    pub fn from_reader<R: Read>(mut reader: R, label: &str) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(InMemorySource {
            text,
            label: label.to_string(),
        })
    }
}

impl DiarySource for InMemorySource {
    fn fetch(&self) -> Result<String> {
        Ok(self.text.clone())
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

impl<S: DiarySource + ?Sized> DiarySource for Box<S> {
    fn fetch(&self) -> Result<String> {
        (**self).fetch()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
