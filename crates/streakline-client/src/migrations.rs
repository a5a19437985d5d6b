use rusqlite::Connection;
use rusqlite_migration::{M, Migrations};

use crate::activity::policy::ACTIVITY_POLICY_VERSION;

const MIGRATION_SQL: [&str; 2] = [
    include_str!("migrations/0001_bootstrap.sql"),
    include_str!("migrations/0002_one_owner_per_center.sql"),
];

pub const SCHEMA_VERSION: &str = "v1";

pub const EXPECTED_USER_VERSION: i64 = MIGRATION_SQL.len() as i64;

/// Indexes setup recreates from their `safe_repair` block when missing.
pub const REPAIRABLE_INDEXES: [&str; 3] = [
    "idx_internal_users_center_role",
    "idx_internal_users_one_owner_per_center",
    "idx_internal_daily_records_user_date",
];

/// Meta rows setup restores when missing and rejects when drifted.
pub const REQUIRED_META: [(&str, &str); 2] = [
    ("schema_version", SCHEMA_VERSION),
    ("activity_policy_version", ACTIVITY_POLICY_VERSION),
];

pub fn run_pending(conn: &mut Connection) -> rusqlite_migration::Result<()> {
    Migrations::new(MIGRATION_SQL.into_iter().map(M::up).collect()).to_latest(conn)
}

/// Body of the `-- streakline:safe_repair:start:<name>` block, if any
/// migration carries one.
pub fn safe_repair_statement(name: &str) -> Option<&'static str> {
    let start_marker = format!("-- streakline:safe_repair:start:{name}\n");
    let end_marker = format!("-- streakline:safe_repair:end:{name}");

    MIGRATION_SQL.into_iter().find_map(|sql| {
        let body_start = sql.find(&start_marker)? + start_marker.len();
        let body_len = sql[body_start..].find(&end_marker)?;
        Some(sql[body_start..body_start + body_len].trim())
    })
}
