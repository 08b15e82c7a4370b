//! Query surface consumed by the HTTP layer.
//!
//! Every query takes a fully loaded [`PresenceLog`] and returns plain rows,
//! Monday first, ready to be serialised as JSON arrays.

use presence_core::error::{PresenceError, Result};
use presence_core::models::{default_user_name, PresenceLog, UserId, UserRecord, WEEKDAY_LABELS};
use serde::{Deserialize, Serialize};

use crate::aggregator::WeekdayAggregator;

// ── Public types ──────────────────────────────────────────────────────────────

/// A user entry as listed by [`list_users`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub user_id: UserId,
    /// Display label, `"User {id}"`.
    pub name: String,
}

/// `(weekday label, mean seconds)`.
pub type MeanRow = (&'static str, f64);
/// `(weekday label, total seconds)`.
pub type TotalRow = (&'static str, i64);
/// `(weekday label, mean start seconds, mean end seconds)`.
pub type StartEndRow = (&'static str, f64, f64);

// ── Queries ───────────────────────────────────────────────────────────────────

/// All users present in `log`, ordered by id ascending.
pub fn list_users(log: &PresenceLog) -> Vec<UserSummary> {
    log.user_ids()
        .map(|user_id| UserSummary {
            user_id,
            name: default_user_name(user_id),
        })
        .collect()
}

/// Mean presence time per weekday for `user_id`.
pub fn mean_time_weekday(log: &PresenceLog, user_id: UserId) -> Result<Vec<MeanRow>> {
    let record = user_record(log, user_id)?;
    Ok(labelled(WeekdayAggregator::mean_by_weekday(record)))
}

/// Total presence time per weekday for `user_id`.
pub fn presence_weekday(log: &PresenceLog, user_id: UserId) -> Result<Vec<TotalRow>> {
    let record = user_record(log, user_id)?;
    Ok(labelled(WeekdayAggregator::total_by_weekday(record)))
}

/// Mean arrival and departure time per weekday for `user_id`.
pub fn presence_start_end(log: &PresenceLog, user_id: UserId) -> Result<Vec<StartEndRow>> {
    let record = user_record(log, user_id)?;
    Ok(WEEKDAY_LABELS
        .iter()
        .zip(WeekdayAggregator::mean_start_end_by_weekday(record))
        .map(|(label, (start, end))| (*label, start, end))
        .collect())
}

// ── Private ───────────────────────────────────────────────────────────────────

fn user_record(log: &PresenceLog, user_id: UserId) -> Result<&UserRecord> {
    log.get(user_id).ok_or(PresenceError::UserNotFound(user_id))
}

fn labelled<T>(values: [T; 7]) -> Vec<(&'static str, T)> {
    WEEKDAY_LABELS.into_iter().zip(values).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::load_presence_log;
    use std::path::Path;

    fn fixture() -> PresenceLog {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../runtime/data/test_data.csv");
        load_presence_log(&path).unwrap()
    }

    // ── list_users ────────────────────────────────────────────────────────────

    #[test]
    fn test_list_users() {
        let users = list_users(&fixture());
        assert_eq!(
            users,
            vec![
                UserSummary {
                    user_id: 10,
                    name: "User 10".to_string(),
                },
                UserSummary {
                    user_id: 11,
                    name: "User 11".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_list_users_empty_log() {
        assert!(list_users(&PresenceLog::new()).is_empty());
    }

    #[test]
    fn test_user_summary_json_shape() {
        let json = serde_json::to_value(&list_users(&fixture())[0]).unwrap();
        assert_eq!(json, serde_json::json!({"user_id": 10, "name": "User 10"}));
    }

    // ── mean_time_weekday ─────────────────────────────────────────────────────

    #[test]
    fn test_mean_time_weekday() {
        let log = fixture();

        assert_eq!(
            mean_time_weekday(&log, 10).unwrap(),
            vec![
                ("Mon", 0.0),
                ("Tue", 30_047.0),
                ("Wed", 24_465.0),
                ("Thu", 23_705.0),
                ("Fri", 0.0),
                ("Sat", 0.0),
                ("Sun", 0.0),
            ]
        );
        assert_eq!(
            mean_time_weekday(&log, 11).unwrap(),
            vec![
                ("Mon", 24_123.0),
                ("Tue", 16_564.0),
                ("Wed", 25_321.0),
                ("Thu", 22_984.0),
                ("Fri", 6_426.0),
                ("Sat", 0.0),
                ("Sun", 0.0),
            ]
        );
    }

    #[test]
    fn test_mean_time_weekday_unknown_user() {
        let err = mean_time_weekday(&fixture(), 0).unwrap_err();
        assert!(matches!(err, PresenceError::UserNotFound(0)));
    }

    // ── presence_weekday ──────────────────────────────────────────────────────

    #[test]
    fn test_presence_weekday() {
        let log = fixture();

        assert_eq!(
            presence_weekday(&log, 10).unwrap(),
            vec![
                ("Mon", 0),
                ("Tue", 30_047),
                ("Wed", 24_465),
                ("Thu", 23_705),
                ("Fri", 0),
                ("Sat", 0),
                ("Sun", 0),
            ]
        );
        assert_eq!(
            presence_weekday(&log, 11).unwrap(),
            vec![
                ("Mon", 24_123),
                ("Tue", 16_564),
                ("Wed", 25_321),
                ("Thu", 45_968),
                ("Fri", 6_426),
                ("Sat", 0),
                ("Sun", 0),
            ]
        );
    }

    #[test]
    fn test_presence_weekday_unknown_user() {
        assert!(presence_weekday(&fixture(), 0).unwrap_err().is_not_found());
    }

    #[test]
    fn test_fixture_thursday_bucket_for_user_11() {
        let log = fixture();
        let buckets = WeekdayAggregator::group_by_weekday(log.get(11).unwrap());
        assert_eq!(buckets[3], vec![22_969, 22_999]);
    }

    // ── presence_start_end ────────────────────────────────────────────────────

    #[test]
    fn test_presence_start_end() {
        let rows = presence_start_end(&fixture(), 10).unwrap();

        assert_eq!(rows.len(), 7);
        assert_eq!(rows[0], ("Mon", 0.0, 0.0));
        // 09:39:05 -> 17:59:52
        assert_eq!(rows[1], ("Tue", 34_745.0, 64_792.0));
        assert_eq!(rows[6].0, "Sun");
    }

    #[test]
    fn test_presence_start_end_unknown_user() {
        assert!(presence_start_end(&fixture(), 99).is_err());
    }
}
