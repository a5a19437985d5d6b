use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::Connection;

use crate::ClientResult;
use crate::setup::initialize;

/// An initialized store plus an open connection to it.
pub(crate) struct StoreSession {
    pub(crate) db_path: PathBuf,
    pub(crate) connection: Connection,
}

pub(crate) fn open_store(home_override: Option<&Path>) -> ClientResult<StoreSession> {
    let (setup, connection) = initialize(home_override)?;
    Ok(StoreSession {
        db_path: setup.db_path,
        connection,
    })
}

pub(crate) fn now_timestamp() -> String {
    let now = SystemTime::now().duration_since(UNIX_EPOCH);
    match now {
        Ok(duration) => format!("{}", duration.as_secs()),
        Err(_) => "0".to_string(),
    }
}

pub(crate) fn status_label(is_active: bool) -> &'static str {
    if is_active { "Active" } else { "Inactive" }
}
