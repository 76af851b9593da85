//! Infrastructure layer - Config file and diary sources

pub mod config;
pub mod source;

pub use config::Config;
pub use source::{DiarySource, FileSource, InMemorySource};
