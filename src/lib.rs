//! injdiary - Injection diary viewer
//!
//! Parses a diary export into dated entries and browses them one calendar
//! week at a time, skipping weeks without entries.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;

pub use error::DiaryError;
