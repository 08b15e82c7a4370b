use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::time_utils::interval;

/// Numeric identifier of an employee as it appears in the presence CSV.
pub type UserId = u32;

/// Three-letter weekday labels, Monday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Index of `date`'s weekday in [`WEEKDAY_LABELS`] (Monday = 0, Sunday = 6).
pub fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_monday() as usize
}

/// Display label shown for a user that has no richer naming source.
pub fn default_user_name(user_id: UserId) -> String {
    format!("User {}", user_id)
}

/// One continuous presence interval for a user on a single date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    /// Wall-clock time the user arrived.
    pub start: NaiveTime,
    /// Wall-clock time the user left.
    pub end: NaiveTime,
}

impl DayEntry {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Presence duration in seconds; negative when `end` precedes `start`.
    pub fn duration_secs(&self) -> i64 {
        interval(self.start, self.end)
    }
}

/// All presence entries of a single user, keyed and ordered by date.
pub type UserRecord = BTreeMap<NaiveDate, DayEntry>;

/// Seven per-weekday sequences of durations in seconds, Monday first.
pub type WeekdayBuckets = [Vec<i64>; 7];

/// Parsed contents of a presence file: every user's [`UserRecord`].
///
/// Users iterate in ascending id order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresenceLog {
    users: BTreeMap<UserId, UserRecord>,
}

impl PresenceLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `entry` for `user_id` on `date`.
    ///
    /// A later insert for the same user and date replaces the earlier entry;
    /// the replaced value is returned.
    pub fn insert(
        &mut self,
        user_id: UserId,
        date: NaiveDate,
        entry: DayEntry,
    ) -> Option<DayEntry> {
        self.users.entry(user_id).or_default().insert(date, entry)
    }

    /// The record for `user_id`, if the user appears in the log.
    pub fn get(&self, user_id: UserId) -> Option<&UserRecord> {
        self.users.get(&user_id)
    }

    /// User ids in ascending order.
    pub fn user_ids(&self) -> impl Iterator<Item = UserId> + '_ {
        self.users.keys().copied()
    }

    /// Number of distinct users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Total number of day entries across all users.
    pub fn entries_count(&self) -> usize {
        self.users.values().map(BTreeMap::len).sum()
    }
}
