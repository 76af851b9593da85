//! Diary export parsing
//!
//! The export is plain text: two header lines, then one block per entry.
//! Blocks are separated by an HTML blank paragraph and every line inside a
//! block may be wrapped in a `<div>` element:
//!
//! ```text
//! Injection Diary
//! exported 03/20/24
//! <div>3/5/24</div>
//! <div>arm</div>
//! <div>felt fine</div>
//! <div><br></div>
//! <div>3/12/24</div>
//! <div>thigh</div>
//! ```

use chrono::NaiveDate;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use super::entry::DiaryEntry;
use crate::error::{DiaryError, Result};

/// Lines at the top of every export that carry no entries.
pub const HEADER_LINES: usize = 2;

/// Separator between two entry blocks.
pub const BLOCK_DELIMITER: &str = "<div><br></div>\n";

const OPEN_TAG: &str = "<div>";
const CLOSE_TAG: &str = "</div>";

/// `MM/DD/YY` or `MM/DD/YYYY`
fn date_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{2}|\d{4})$").unwrap())
}

/// Why a block was left out of the parsed entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Block has no site line
    MalformedBlock,
    /// First line is not a usable date
    InvalidDate(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MalformedBlock => write!(f, "missing site line"),
            SkipReason::InvalidDate(token) => write!(f, "invalid date '{}'", token),
        }
    }
}

/// A block that did not produce an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedBlock {
    /// 1-based position among the non-empty blocks
    pub block: usize,
    pub reason: SkipReason,
}

impl SkippedBlock {
    /// Convert into an error, for strict loads that refuse partial diaries
    pub fn into_error(self) -> DiaryError {
        DiaryError::MalformedBlock(format!("block {}: {}", self.block, self.reason))
    }
}

/// Result of one parse pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    /// Entries in file order
    pub entries: Vec<DiaryEntry>,
    pub skipped: Vec<SkippedBlock>,
}

/// Parse a diary export, keeping a record of every block that was skipped.
pub fn parse_diary(text: &str) -> ParseOutcome {
    let normalized = text.replace("\r\n", "\n");
    let body = normalized
        .split('\n')
        .skip(HEADER_LINES)
        .collect::<Vec<_>>()
        .join("\n");

    let mut outcome = ParseOutcome::default();

    let blocks = body
        .split(BLOCK_DELIMITER)
        .filter(|block| !block.trim().is_empty());

    for (idx, block) in blocks.enumerate() {
        match parse_block(block) {
            Ok(entry) => outcome.entries.push(entry),
            Err(reason) => outcome.skipped.push(SkippedBlock {
                block: idx + 1,
                reason,
            }),
        }
    }

    outcome
}

/// Parse a diary export and return only the entries.
pub fn parse_diary_entries(text: &str) -> Vec<DiaryEntry> {
    parse_diary(text).entries
}

fn parse_block(block: &str) -> std::result::Result<DiaryEntry, SkipReason> {
    // The newline before the next delimiter is not an extra line
    let block = block.strip_suffix('\n').unwrap_or(block);
    let lines: Vec<&str> = block.split('\n').collect();

    if lines.len() < 2 {
        return Err(SkipReason::MalformedBlock);
    }

    let token = strip_markup(lines[0]);
    let date = parse_date_token(&token).map_err(|_| SkipReason::InvalidDate(token.clone()))?;

    let site = strip_markup(lines[1]);
    let comment = lines[2..]
        .iter()
        .map(|line| strip_markup(line))
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string();

    Ok(DiaryEntry::new(date, site, comment))
}

/// Remove the first opening and first closing `div` tag from a line
fn strip_markup(line: &str) -> String {
    line.replacen(OPEN_TAG, "", 1).replacen(CLOSE_TAG, "", 1)
}

/// Parse a `MM/DD/YY` or `MM/DD/YYYY` token.
///
/// Two-digit years are read as 20YY.
pub fn parse_date_token(token: &str) -> Result<NaiveDate> {
    let invalid = || DiaryError::InvalidDate(token.to_string());

    let captures = date_regex().captures(token.trim()).ok_or_else(invalid)?;

    let month: u32 = captures[1].parse().map_err(|_| invalid())?;
    let day: u32 = captures[2].parse().map_err(|_| invalid())?;
    let year_str = &captures[3];
    let year: i32 = if year_str.len() == 2 {
        format!("20{}", year_str).parse().map_err(|_| invalid())?
    } else {
        year_str.parse().map_err(|_| invalid())?
    };

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}
