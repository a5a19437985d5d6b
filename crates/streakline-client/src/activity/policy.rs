//! Fixed thresholds shared by the activity rules and record logging.

/// Stored as the `activity_policy_version` meta row and echoed in status
/// payloads.
pub const ACTIVITY_POLICY_VERSION: &str = "v1";

/// Smallest daily count that keeps a day in range (inclusive).
pub const MIN_DAILY_COUNT: i64 = 3;

/// First daily count that pushes a day out of range (exclusive upper bound).
pub const MAX_DAILY_COUNT_EXCLUSIVE: i64 = 25;

/// Limit reported whenever no valid streak or window exists.
pub const DEFAULT_LIMIT: i64 = 3;

/// Longest run a streak may stay at one limit before it is invalidated.
pub const MAX_RUN_AT_LIMIT: u32 = 7;

pub const STREAK_WINDOW_DAYS: u32 = 30;
pub const STATUS_WINDOW_DAYS: u32 = 7;

/// A user's first entry of the day must bring them to at least this many records.
pub const FIRST_DAY_MIN_RECORDS: i64 = 3;

/// No user may hold more than this many records on a single day.
pub const MAX_RECORDS_PER_DAY: i64 = 25;

pub const fn is_in_range(count: i64) -> bool {
    count >= MIN_DAILY_COUNT && count < MAX_DAILY_COUNT_EXCLUSIVE
}
