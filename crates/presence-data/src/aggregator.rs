//! Per-weekday reductions over a single user's presence record.

use presence_core::models::{weekday_index, UserRecord, WeekdayBuckets};
use presence_core::time_utils::seconds_since_midnight;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Arithmetic mean of `values`; `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn mean_secs(values: &[i64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<i64>() as f64 / values.len() as f64
}

// ── WeekdayAggregator ─────────────────────────────────────────────────────────

/// Stateless helper that groups a user's day entries by weekday.
///
/// Index 0 of every returned array is Monday, index 6 is Sunday.
pub struct WeekdayAggregator;

impl WeekdayAggregator {
    /// Presence durations (seconds) grouped by weekday.
    ///
    /// Every weekday gets a bucket, empty when no date falls on it. Within a
    /// bucket, durations follow date order.
    pub fn group_by_weekday(record: &UserRecord) -> WeekdayBuckets {
        let mut buckets: WeekdayBuckets = Default::default();
        for (date, entry) in record {
            buckets[weekday_index(*date)].push(entry.duration_secs());
        }
        buckets
    }

    /// Total presence seconds per weekday; `0` where there is no data.
    pub fn total_by_weekday(record: &UserRecord) -> [i64; 7] {
        Self::group_by_weekday(record).map(|bucket| bucket.iter().sum())
    }

    /// Mean presence seconds per weekday; `0.0` where there is no data.
    pub fn mean_by_weekday(record: &UserRecord) -> [f64; 7] {
        Self::group_by_weekday(record).map(|bucket| mean_secs(&bucket))
    }

    /// Start and end times (seconds since midnight) grouped by weekday.
    pub fn group_start_end_by_weekday(record: &UserRecord) -> [(Vec<i64>, Vec<i64>); 7] {
        let mut buckets: [(Vec<i64>, Vec<i64>); 7] = Default::default();
        for (date, entry) in record {
            let (starts, ends) = &mut buckets[weekday_index(*date)];
            starts.push(seconds_since_midnight(entry.start));
            ends.push(seconds_since_midnight(entry.end));
        }
        buckets
    }

    /// Mean `(start, end)` seconds since midnight per weekday.
    pub fn mean_start_end_by_weekday(record: &UserRecord) -> [(f64, f64); 7] {
        Self::group_start_end_by_weekday(record)
            .map(|(starts, ends)| (mean_secs(&starts), mean_secs(&ends)))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
