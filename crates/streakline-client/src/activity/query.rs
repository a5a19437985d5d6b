use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rusqlite::{Connection, params};

use crate::ClientResult;
use crate::activity::clock::Clock;
use crate::activity::window::{DailyCountSeries, DailyCountSource, build_series, window_start};
use crate::dates::{format_iso_date, parse_record_date};
use crate::state::map_sqlite_error;

/// Store-backed counts: one grouped count query per window.
pub struct SqliteDailyCounts<'a> {
    connection: &'a Connection,
    db_path: PathBuf,
    clock: &'a dyn Clock,
}

impl<'a> SqliteDailyCounts<'a> {
    pub fn new(connection: &'a Connection, db_path: &Path, clock: &'a dyn Clock) -> Self {
        Self {
            connection,
            db_path: db_path.to_path_buf(),
            clock,
        }
    }
}

impl DailyCountSource for SqliteDailyCounts<'_> {
    fn counts_for_window(&self, user_id: &str, days: u32) -> ClientResult<DailyCountSeries> {
        let today = self.clock.today();
        let start = window_start(today, days);
        let counts_by_date =
            load_counts_by_date(self.connection, &self.db_path, user_id, start, today)?;
        let series = build_series(today, days, &counts_by_date);
        tracing::debug!(
            user_id,
            days,
            %today,
            recorded_days = counts_by_date.len(),
            "built daily count series"
        );
        Ok(series)
    }
}

fn load_counts_by_date(
    connection: &Connection,
    db_path: &Path,
    user_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> ClientResult<HashMap<NaiveDate, i64>> {
    let mut statement = connection
        .prepare_cached(
            "SELECT record_date, COUNT(*)
             FROM internal_daily_records
             WHERE user_id = ?1
               AND record_date >= ?2
               AND record_date <= ?3
             GROUP BY record_date",
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let rows_iter = statement
        .query_map(
            params![user_id, format_iso_date(&start), format_iso_date(&end)],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)),
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let mut counts = HashMap::new();
    for row in rows_iter {
        let (record_date, count) = row.map_err(|error| map_sqlite_error(db_path, &error))?;
        let Some(date) = parse_record_date(&record_date) else {
            continue;
        };
        counts.insert(date, count);
    }

    Ok(counts)
}
