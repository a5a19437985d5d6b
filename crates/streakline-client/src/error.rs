use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

use crate::activity::policy::{FIRST_DAY_MIN_RECORDS, MAX_RECORDS_PER_DAY};

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `streakline {cmd} --help` for usage."),
            None => "Run `streakline --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn user_not_found(username: &str) -> Self {
        Self::new(
            "user_not_found",
            &format!("User `{username}` was not found."),
            vec![
                "Run `streakline users list` to see registered usernames.".to_string(),
                "Register the user with `streakline users create <username> --role user --center <center>`."
                    .to_string(),
            ],
        )
        .with_data(json!({
            "username": username,
        }))
    }

    pub fn username_taken(username: &str) -> Self {
        Self::new(
            "username_taken",
            &format!("Username `{username}` is already registered."),
            vec!["Choose a different username; usernames are unique across all centers.".to_string()],
        )
        .with_data(json!({
            "username": username,
        }))
    }

    pub fn center_owner_exists(center: &str) -> Self {
        Self::new(
            "center_owner_exists",
            &format!("Center `{center}` already has a center owner."),
            vec![
                "Register this person with role `user` instead.".to_string(),
                "Run `streakline users list --center <center> --role centerowner` to see the owner."
                    .to_string(),
            ],
        )
        .with_data(json!({
            "center": center,
        }))
    }

    pub fn center_owner_has_no_streak(username: &str, center: &str) -> Self {
        Self::new(
            "center_owner_has_no_streak",
            &format!("`{username}` is the center owner of `{center}`; streaks are tracked for users only."),
            vec![
                format!("Run `streakline dash {username}` to open the {center} center dashboard."),
            ],
        )
        .with_data(json!({
            "username": username,
            "center": center,
        }))
    }

    pub fn first_day_minimum(username: &str, attempted: i64) -> Self {
        Self::new(
            "first_day_minimum",
            &format!(
                "You must add at least {FIRST_DAY_MIN_RECORDS} customers for a new day (got {attempted}). Nothing was saved."
            ),
            vec![format!(
                "Rerun `streakline records add {username}` with at least {FIRST_DAY_MIN_RECORDS} `--customer` entries."
            )],
        )
        .with_data(json!({
            "username": username,
            "attempted": attempted,
            "minimum": FIRST_DAY_MIN_RECORDS,
        }))
    }

    pub fn daily_maximum_exceeded(username: &str, existing: i64, attempted: i64) -> Self {
        Self::new(
            "daily_maximum_exceeded",
            &format!(
                "You cannot have more than {MAX_RECORDS_PER_DAY} customers in one day ({existing} already saved, {attempted} new). Nothing was saved."
            ),
            vec![format!(
                "Run `streakline records list {username}` to review today's customers."
            )],
        )
        .with_data(json!({
            "username": username,
            "existing": existing,
            "attempted": attempted,
            "maximum": MAX_RECORDS_PER_DAY,
        }))
    }

    pub fn report_write_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "report_write_failed",
            &format!("Could not write the activity report to `{location}`: {detail}"),
            vec![
                "Choose a writable location with `--output <path>`.".to_string(),
                "Use `--output -` to print the report to stdout.".to_string(),
            ],
        )
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }

    pub fn store_init_permission_denied(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_init_permission_denied",
            &format!("Cannot initialize store at `{location}`: {detail}"),
            vec![format!(
                "Grant write access to `{location}` or set `STREAKLINE_HOME` to a writable directory."
            )],
        )
    }

    pub fn store_locked(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_locked",
            &format!("Store database is locked at `{location}`."),
            vec![format!(
                "Close other processes using `{location}` so the lock is released."
            )],
        )
    }

    pub fn store_corrupt(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_corrupt",
            &format!("Store database appears corrupt at `{location}`."),
            vec![format!(
                "Replace `{location}` with a valid SQLite store file or restore from backup."
            )],
        )
    }

    pub fn migration_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "migration_failed",
            &format!("Store migration failed at `{location}`: {detail}"),
            vec!["Resolve conflicting schema objects referenced in the error details.".to_string()],
        )
    }

    pub fn store_init_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_init_failed",
            &format!("Store initialization failed at `{location}`: {detail}"),
            Vec::new(),
        )
    }

    /// Errors caused by the local store or the process itself rather than by the
    /// caller's input.
    pub fn is_internal(&self) -> bool {
        self.code.starts_with("internal_")
            || matches!(
                self.code.as_str(),
                "store_init_permission_denied"
                    | "store_locked"
                    | "store_corrupt"
                    | "migration_failed"
                    | "store_init_failed"
            )
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
