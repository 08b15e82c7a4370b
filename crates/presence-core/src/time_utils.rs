use chrono::{NaiveTime, Timelike};

// ── Wall-clock arithmetic ─────────────────────────────────────────────────────

/// Number of whole seconds between midnight and `time`.
///
/// Sub-second precision is discarded, so the result is always in
/// `0..=86_399`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveTime;
/// use presence_core::time_utils::seconds_since_midnight;
///
/// let t = NaiveTime::from_hms_opt(12, 20, 5).unwrap();
/// assert_eq!(seconds_since_midnight(t), 44_405);
/// ```
pub fn seconds_since_midnight(time: NaiveTime) -> i64 {
    i64::from(time.num_seconds_from_midnight())
}

/// Seconds elapsed from `start` to `end` on the same day.
///
/// Not clamped and not wrapped across midnight: an `end` earlier than
/// `start` yields a negative value.
pub fn interval(start: NaiveTime, end: NaiveTime) -> i64 {
    seconds_since_midnight(end) - seconds_since_midnight(start)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
