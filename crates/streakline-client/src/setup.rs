//! Store bootstrap: every command opens the store through here, so migrations,
//! schema checks and index repair run before any query.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OptionalExtension, params};

use crate::migrations::{
    EXPECTED_USER_VERSION, REPAIRABLE_INDEXES, REQUIRED_META, SCHEMA_VERSION, run_pending,
    safe_repair_statement,
};
use crate::state::{
    ensure_store_directory, map_sqlite_error, open_connection, resolve_store_home, store_db_path,
};
use crate::{ClientError, ClientResult};

struct CoreTable {
    name: &'static str,
    columns: &'static [&'static str],
}

const CORE_TABLES: [CoreTable; 3] = [
    CoreTable {
        name: "internal_meta",
        columns: &["key", "value"],
    },
    CoreTable {
        name: "internal_users",
        columns: &["user_id", "username", "role", "center", "created_at"],
    },
    CoreTable {
        name: "internal_daily_records",
        columns: &["record_id", "user_id", "record_date", "name", "phone", "created_at"],
    },
];

#[derive(Debug, Clone)]
pub struct SetupContext {
    pub db_path: PathBuf,
    pub schema_version: String,
}

pub fn ensure_initialized_at(home_override: &Path) -> ClientResult<SetupContext> {
    initialize(Some(home_override)).map(|(context, _connection)| context)
}

/// Initializes the store and hands back the connection that did it.
pub(crate) fn initialize(home_override: Option<&Path>) -> ClientResult<(SetupContext, Connection)> {
    let store_home = resolve_store_home(home_override)?;
    ensure_store_directory(&store_home)?;

    let db_path = store_db_path(&store_home);
    let mut connection = open_connection(&db_path)?;
    run_pending(&mut connection).map_err(|error| map_migration_error(&db_path, &error))?;

    check_user_version(&connection, &db_path)?;
    check_core_tables(&connection, &db_path)?;
    reconcile_meta(&connection, &db_path)?;
    repair_indexes(&connection, &db_path)?;

    tracing::debug!(db_path = %db_path.display(), "store initialized");

    Ok((
        SetupContext {
            db_path,
            schema_version: SCHEMA_VERSION.to_string(),
        },
        connection,
    ))
}

/// Lock, corruption and permission failures keep their store codes; anything
/// else raised while migrating is a migration failure.
fn map_migration_error(db_path: &Path, error: &rusqlite_migration::Error) -> ClientError {
    if let rusqlite_migration::Error::RusqliteError { err, .. } = error {
        let mapped = map_sqlite_error(db_path, err);
        if matches!(
            mapped.code.as_str(),
            "store_locked" | "store_corrupt" | "store_init_permission_denied"
        ) {
            return mapped;
        }
    }
    ClientError::migration_failed(db_path, &error.to_string())
}

fn check_user_version(connection: &Connection, db_path: &Path) -> ClientResult<()> {
    let user_version = connection
        .query_row("PRAGMA user_version", [], |row| row.get::<_, i64>(0))
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    if user_version == EXPECTED_USER_VERSION {
        Ok(())
    } else {
        Err(ClientError::store_corrupt(db_path))
    }
}

fn check_core_tables(connection: &Connection, db_path: &Path) -> ClientResult<()> {
    let mut statement = connection
        .prepare("SELECT name FROM pragma_table_info(?1)")
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    for table in &CORE_TABLES {
        let present = statement
            .query_map([table.name], |row| row.get::<_, String>(0))
            .and_then(|rows| rows.collect::<Result<Vec<String>, _>>())
            .map_err(|error| map_sqlite_error(db_path, &error))?;

        let complete = table
            .columns
            .iter()
            .all(|column| present.iter().any(|name| name.as_str() == *column));
        if !complete {
            tracing::warn!(table = table.name, "core table missing or incomplete");
            return Err(ClientError::store_corrupt(db_path));
        }
    }

    Ok(())
}

/// Missing meta rows are restored; a row holding another value means the
/// store was written by a different schema or policy and is rejected.
fn reconcile_meta(connection: &Connection, db_path: &Path) -> ClientResult<()> {
    for (key, expected) in REQUIRED_META {
        let stored = connection
            .query_row(
                "SELECT value FROM internal_meta WHERE key = ?1",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|error| map_sqlite_error(db_path, &error))?;

        match stored {
            Some(value) if value == expected => {}
            Some(value) => {
                tracing::warn!(key, %value, expected, "store meta drifted");
                return Err(ClientError::store_corrupt(db_path));
            }
            None => {
                tracing::warn!(key, "restoring missing store meta");
                connection
                    .execute(
                        "INSERT INTO internal_meta (key, value) VALUES (?1, ?2)",
                        params![key, expected],
                    )
                    .map_err(|error| map_sqlite_error(db_path, &error))?;
            }
        }
    }

    Ok(())
}

fn repair_indexes(connection: &Connection, db_path: &Path) -> ClientResult<()> {
    for index in REPAIRABLE_INDEXES {
        let exists = connection
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'index' AND name = ?1",
                [index],
                |_row| Ok(()),
            )
            .optional()
            .map_err(|error| map_sqlite_error(db_path, &error))?
            .is_some();
        if exists {
            continue;
        }

        let sql = safe_repair_statement(index).ok_or_else(|| {
            ClientError::store_init_failed(db_path, "Missing canonical SQL for schema repair.")
        })?;
        tracing::warn!(index, "recreating missing index");
        connection
            .execute_batch(sql)
            .map_err(|error| map_sqlite_error(db_path, &error))?;
    }

    Ok(())
}
