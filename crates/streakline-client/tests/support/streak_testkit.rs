#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate};
use rusqlite::{Connection, params};
use serde_json::Value;
use streakline_client::commands::records::{self, CustomerEntry, RecordsAddOptions};
use streakline_client::commands::users::{self, UserCreateOptions};
use streakline_client::{ClientResult, SuccessEnvelope};
use tempfile::{Builder, TempDir};

pub fn temp_home_in_tmp(prefix: &str) -> std::io::Result<(TempDir, PathBuf)> {
    let dir = Builder::new().prefix(prefix).tempdir_in("/tmp")?;
    let home = dir.path().join("streakline-home");
    fs::create_dir_all(&home)?;
    Ok((dir, home))
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

pub fn register(home: &Path, username: &str, role: &str, center: &str) {
    let result = users::create_with_options(UserCreateOptions {
        username: username.to_string(),
        role: role.to_string(),
        center: center.to_string(),
        home_override: Some(home),
    });
    assert!(result.is_ok(), "could not register {username}");
}

pub fn customers(count: usize) -> Vec<CustomerEntry> {
    (0..count)
        .map(|index| CustomerEntry::new(&format!("Customer {index}"), &format!("90000{index:05}")))
        .collect()
}

pub fn try_log_day(
    home: &Path,
    username: &str,
    day: NaiveDate,
    entries: Vec<CustomerEntry>,
) -> ClientResult<SuccessEnvelope> {
    records::add_with_options(RecordsAddOptions {
        username: username.to_string(),
        customers: entries,
        today: Some(day),
        home_override: Some(home),
    })
}

pub fn log_day(home: &Path, username: &str, day: NaiveDate, count: usize) {
    if count == 0 {
        return;
    }
    let result = try_log_day(home, username, day, customers(count));
    assert!(result.is_ok(), "could not log {count} records for {username} on {day}");
}

/// Writes `counts` (oldest first) straight into the store on the consecutive
/// days ending at `today`, bypassing the per-day limits of `records add`.
pub fn seed_trailing_days(home: &Path, username: &str, today: NaiveDate, counts: &[usize]) {
    let opened = Connection::open(home.join("streakline.db"));
    assert!(opened.is_ok());
    if let Ok(connection) = opened {
        let user_id = connection.query_row(
            "SELECT user_id FROM internal_users WHERE username = ?1",
            [username],
            |row| row.get::<_, String>(0),
        );
        assert!(user_id.is_ok(), "unknown user {username}");
        let user_id = user_id.unwrap_or_default();

        let start = today - Duration::days(counts.len() as i64 - 1);
        for (offset, count) in counts.iter().enumerate() {
            let day = (start + Duration::days(offset as i64)).format("%Y-%m-%d").to_string();
            for index in 0..*count {
                let inserted = connection.execute(
                    "INSERT INTO internal_daily_records
                        (record_id, user_id, record_date, name, phone, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, '0')",
                    params![
                        format!("rec_seed_{user_id}_{day}_{index}"),
                        &user_id,
                        &day,
                        format!("Customer {index}"),
                        format!("90000{index:05}")
                    ],
                );
                assert!(inserted.is_ok());
            }
        }
    }
}

pub fn payload(result: ClientResult<SuccessEnvelope>) -> Value {
    assert!(result.is_ok());
    if let Ok(success) = result {
        let value = serde_json::to_value(success);
        assert!(value.is_ok());
        if let Ok(json) = value {
            return json;
        }
    }
    Value::Null
}

pub fn error_code(result: ClientResult<SuccessEnvelope>) -> String {
    assert!(result.is_err());
    match result {
        Err(error) => error.code,
        Ok(_) => String::new(),
    }
}
