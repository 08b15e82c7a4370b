//! CSV loading for presence logs.
//!
//! Each row is `user_id,date,start,end` with an ISO date (`YYYY-MM-DD`) and
//! two wall-clock times (`HH:MM:SS`). Loading is best-effort: a row that does
//! not parse is logged and skipped, and only a source that cannot be opened
//! or read fails the load.

use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveTime, Timelike};
use presence_core::error::{PresenceError, Result};
use presence_core::models::{DayEntry, PresenceLog, UserId};
use thiserror::Error;
use tracing::debug;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";
const FIELDS_PER_ROW: usize = 4;

// ── Public API ────────────────────────────────────────────────────────────────

/// Row counts from a single load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Rows returned by the CSV reader, including skipped ones.
    pub rows_read: usize,
    /// Rows that parsed and were written into the log.
    pub rows_loaded: usize,
    /// Rows dropped because a field failed to parse.
    pub rows_skipped: usize,
}

/// Load the presence log stored at `path`.
///
/// Fails with [`PresenceError::FileRead`] when the file cannot be opened or
/// read; malformed rows never fail the load.
pub fn load_presence_log(path: &Path) -> Result<PresenceLog> {
    let file = std::fs::File::open(path).map_err(|source| PresenceError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let (log, stats) = load_from_reader(file).map_err(|source| PresenceError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        "File {}: {} read, {} loaded, {} skipped, {} users",
        path.display(),
        stats.rows_read,
        stats.rows_loaded,
        stats.rows_skipped,
        log.len(),
    );

    Ok(log)
}

/// Build a [`PresenceLog`] from any CSV source.
///
/// Rows that fail to parse are skipped. The only error is an I/O failure
/// of the underlying reader.
pub fn load_from_reader<R: Read>(source: R) -> std::io::Result<(PresenceLog, LoadStats)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source);

    let mut log = PresenceLog::new();
    let mut stats = LoadStats::default();

    for (idx, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) if e.is_io_error() => return Err(into_io_error(e)),
            Err(e) => {
                // Invalid UTF-8 and similar per-row decoding faults.
                debug!("Skipping line {}: {}", idx + 1, e);
                stats.rows_read += 1;
                stats.rows_skipped += 1;
                continue;
            }
        };
        stats.rows_read += 1;

        match parse_row(&record) {
            Ok((user_id, date, entry)) => {
                log.insert(user_id, date, entry);
                stats.rows_loaded += 1;
            }
            Err(e) => {
                debug!("Skipping line {}: {}", idx + 1, e);
                stats.rows_skipped += 1;
            }
        }
    }

    Ok((log, stats))
}

// ── Row parsing ───────────────────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq, Eq)]
enum RowError {
    #[error("expected 4 fields, found {0}")]
    FieldCount(usize),

    #[error("invalid user id \"{0}\"")]
    UserId(String),

    #[error("invalid date \"{0}\"")]
    Date(String),

    #[error("invalid time \"{0}\"")]
    Time(String),
}

type ParsedRow = (UserId, NaiveDate, DayEntry);

fn parse_row(record: &csv::StringRecord) -> std::result::Result<ParsedRow, RowError> {
    if record.len() != FIELDS_PER_ROW {
        return Err(RowError::FieldCount(record.len()));
    }

    let user_id = record[0]
        .parse::<UserId>()
        .map_err(|_| RowError::UserId(record[0].to_string()))?;
    let date = NaiveDate::parse_from_str(&record[1], DATE_FORMAT)
        .map_err(|_| RowError::Date(record[1].to_string()))?;
    let start = parse_time(&record[2])?;
    let end = parse_time(&record[3])?;

    Ok((user_id, date, DayEntry::new(start, end)))
}

fn parse_time(field: &str) -> std::result::Result<NaiveTime, RowError> {
    let time = NaiveTime::parse_from_str(field, TIME_FORMAT)
        .map_err(|_| RowError::Time(field.to_string()))?;
    // chrono represents `:60` as a leap second; seconds must stay in 0..=59.
    if time.nanosecond() >= 1_000_000_000 {
        return Err(RowError::Time(field.to_string()));
    }
    Ok(time)
}

fn into_io_error(err: csv::Error) -> std::io::Error {
    match err.into_kind() {
        csv::ErrorKind::Io(e) => e,
        other => std::io::Error::other(format!("{:?}", other)),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
