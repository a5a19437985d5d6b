use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{Connection, TransactionBehavior, params};
use ulid::Ulid;

use crate::activity::clock::resolve_clock;
use crate::activity::policy::{FIRST_DAY_MIN_RECORDS, MAX_RECORDS_PER_DAY};
use crate::commands::common::{now_timestamp, open_store};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{RecordRow, RecordedRange, RecordsAddData, RecordsListData};
use crate::dates::{format_iso_date, selected_date_or_today};
use crate::profiles::require_user;
use crate::state::map_sqlite_error;
use crate::{ClientError, ClientResult};

/// One logged customer contact before it is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerEntry {
    pub name: String,
    pub phone: String,
}

impl CustomerEntry {
    pub fn new(name: &str, phone: &str) -> Self {
        Self {
            name: name.to_string(),
            phone: phone.to_string(),
        }
    }

    /// Parses the `NAME:PHONE` argument form. The phone is everything after
    /// the last colon.
    pub fn parse(value: &str) -> ClientResult<Self> {
        match value.rsplit_once(':') {
            Some((name, phone)) => Ok(Self::new(name, phone)),
            None => Err(ClientError::invalid_argument_for_command(
                "`--customer` must use NAME:PHONE format.",
                Some("records add"),
            )),
        }
    }

    fn trimmed(&self) -> Option<Self> {
        let name = self.name.trim();
        let phone = self.phone.trim();
        if name.is_empty() || phone.is_empty() {
            return None;
        }
        Some(Self::new(name, phone))
    }
}

#[derive(Debug, Default)]
pub struct RecordsAddOptions<'a> {
    pub username: String,
    pub customers: Vec<CustomerEntry>,
    pub today: Option<NaiveDate>,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct RecordsListOptions<'a> {
    pub username: String,
    pub date: Option<String>,
    pub today: Option<NaiveDate>,
    pub home_override: Option<&'a Path>,
}

pub fn add(username: &str, customers: Vec<CustomerEntry>) -> ClientResult<SuccessEnvelope> {
    add_with_options(RecordsAddOptions {
        username: username.to_string(),
        customers,
        today: None,
        home_override: None,
    })
}

/// Logs customers for today only. The whole batch is rejected when it would
/// leave a fresh day under the minimum or any day over the maximum.
#[doc(hidden)]
pub fn add_with_options(options: RecordsAddOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let today = resolve_clock(options.today).today();
    let mut session = open_store(options.home_override)?;
    let db_path = session.db_path.clone();
    let user = require_user(&session.connection, &db_path, &options.username)?;

    let accepted = options
        .customers
        .iter()
        .filter_map(CustomerEntry::trimmed)
        .collect::<Vec<CustomerEntry>>();
    let skipped = (options.customers.len() - accepted.len()) as i64;
    let new_count = accepted.len() as i64;

    let transaction = session
        .connection
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|error| map_sqlite_error(&db_path, &error))?;

    let existing = count_for_day(&transaction, &db_path, &user.user_id, today)?;
    let total_after = existing + new_count;
    if existing == 0 && total_after < FIRST_DAY_MIN_RECORDS {
        return Err(ClientError::first_day_minimum(&user.username, new_count));
    }
    if total_after > MAX_RECORDS_PER_DAY {
        return Err(ClientError::daily_maximum_exceeded(
            &user.username,
            existing,
            new_count,
        ));
    }

    let created_at = now_timestamp();
    let record_date = format_iso_date(&today);
    for customer in &accepted {
        transaction
            .execute(
                "INSERT INTO internal_daily_records (
                    record_id,
                    user_id,
                    record_date,
                    name,
                    phone,
                    created_at
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    format!("rec_{}", Ulid::new()),
                    &user.user_id,
                    &record_date,
                    &customer.name,
                    &customer.phone,
                    &created_at
                ],
            )
            .map_err(|error| map_sqlite_error(&db_path, &error))?;
    }
    transaction
        .commit()
        .map_err(|error| map_sqlite_error(&db_path, &error))?;

    tracing::debug!(
        username = %user.username,
        %record_date,
        added = new_count,
        total_after,
        "logged daily records"
    );

    success(
        "records add",
        RecordsAddData {
            username: user.username,
            date: record_date,
            added: new_count,
            skipped,
            total_for_day: total_after,
            message: format!("Saved! Total customers for today: {total_after}"),
        },
    )
}

pub fn list(username: &str, date: Option<&str>) -> ClientResult<SuccessEnvelope> {
    list_with_options(RecordsListOptions {
        username: username.to_string(),
        date: date.map(std::string::ToString::to_string),
        today: None,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn list_with_options(options: RecordsListOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let today = resolve_clock(options.today).today();
    let selected = selected_date_or_today(options.date.as_deref(), today, "records list")?;
    let session = open_store(options.home_override)?;
    let user = require_user(&session.connection, &session.db_path, &options.username)?;
    let rows = records_for_day(&session.connection, &session.db_path, &user.user_id, selected)?;

    success(
        "records list",
        RecordsListData {
            username: user.username,
            date: format_iso_date(&selected),
            today: format_iso_date(&today),
            total: rows.len() as i64,
            rows,
        },
    )
}

pub(crate) fn count_for_day(
    connection: &Connection,
    db_path: &Path,
    user_id: &str,
    date: NaiveDate,
) -> ClientResult<i64> {
    connection
        .query_row(
            "SELECT COUNT(*) FROM internal_daily_records WHERE user_id = ?1 AND record_date = ?2",
            params![user_id, format_iso_date(&date)],
            |row| row.get::<_, i64>(0),
        )
        .map_err(|error| map_sqlite_error(db_path, &error))
}

/// First and last dates on which `user_id` logged anything.
pub(crate) fn recorded_range(
    connection: &Connection,
    db_path: &Path,
    user_id: &str,
) -> ClientResult<RecordedRange> {
    connection
        .query_row(
            "SELECT MIN(record_date), MAX(record_date)
             FROM internal_daily_records WHERE user_id = ?1",
            [user_id],
            |row| {
                Ok(RecordedRange {
                    earliest: row.get::<_, Option<String>>(0)?,
                    latest: row.get::<_, Option<String>>(1)?,
                })
            },
        )
        .map_err(|error| map_sqlite_error(db_path, &error))
}

/// Records in insertion order.
pub(crate) fn records_for_day(
    connection: &Connection,
    db_path: &Path,
    user_id: &str,
    date: NaiveDate,
) -> ClientResult<Vec<RecordRow>> {
    let mut statement = connection
        .prepare_cached(
            "SELECT record_id, record_date, name, phone, created_at
             FROM internal_daily_records
             WHERE user_id = ?1 AND record_date = ?2
             ORDER BY rowid ASC",
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let rows_iter = statement
        .query_map(params![user_id, format_iso_date(&date)], |row| {
            Ok(RecordRow {
                record_id: row.get(0)?,
                record_date: row.get(1)?,
                name: row.get(2)?,
                phone: row.get(3)?,
                created_at: row.get(4)?,
            })
        })
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let mut rows = Vec::new();
    for row in rows_iter {
        rows.push(row.map_err(|error| map_sqlite_error(db_path, &error))?);
    }
    Ok(rows)
}
