use std::collections::BTreeSet;
use std::path::Path;

use rusqlite::{TransactionBehavior, params};
use ulid::Ulid;

use crate::commands::common::{now_timestamp, open_store};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{CentersData, UserCreateData, UsersListData};
use crate::profiles::{
    BASE_CENTERS, Role, StoredUser, UserFilter, center_has_owner, distinct_centers, find_user,
    list_users,
};
use crate::state::{map_sqlite_error, unique_violation_target};
use crate::{ClientError, ClientResult};

#[derive(Debug, Default)]
pub struct UserCreateOptions<'a> {
    pub username: String,
    pub role: String,
    pub center: String,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct UsersListOptions<'a> {
    pub center: Option<String>,
    pub role: Option<String>,
    pub home_override: Option<&'a Path>,
}

pub fn create(username: &str, role: &str, center: &str) -> ClientResult<SuccessEnvelope> {
    create_with_options(UserCreateOptions {
        username: username.to_string(),
        role: role.to_string(),
        center: center.to_string(),
        home_override: None,
    })
}

#[doc(hidden)]
pub fn create_with_options(options: UserCreateOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let username = options.username.trim();
    let center = options.center.trim();
    if username.is_empty() {
        return Err(ClientError::invalid_argument_for_command(
            "`username` must not be empty.",
            Some("users create"),
        ));
    }
    if center.is_empty() {
        return Err(ClientError::invalid_argument_for_command(
            "Select a center: `--center` must not be empty.",
            Some("users create"),
        ));
    }
    let role = Role::parse_argument(options.role.trim(), "users create")?;

    let mut session = open_store(options.home_override)?;
    let db_path = session.db_path.clone();
    let user = StoredUser {
        user_id: format!("usr_{}", Ulid::new()),
        username: username.to_string(),
        role,
        center: center.to_string(),
        created_at: now_timestamp(),
    };

    // Both checks run under the write lock taken for the insert.
    let transaction = session
        .connection
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|error| map_sqlite_error(&db_path, &error))?;
    if role == Role::CenterOwner && center_has_owner(&transaction, &db_path, center)? {
        return Err(ClientError::center_owner_exists(center));
    }
    if find_user(&transaction, &db_path, username)?.is_some() {
        return Err(ClientError::username_taken(username));
    }
    transaction
        .execute(
            "INSERT INTO internal_users (user_id, username, role, center, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                &user.user_id,
                &user.username,
                user.role.as_str(),
                &user.center,
                &user.created_at
            ],
        )
        .map_err(|error| map_insert_error(&db_path, &error, &user))?;
    transaction
        .commit()
        .map_err(|error| map_sqlite_error(&db_path, &error))?;

    tracing::info!(
        username = %user.username,
        role = user.role.as_str(),
        center = %user.center,
        "registered user"
    );

    success(
        "users create",
        UserCreateData {
            message: format!(
                "Registered `{}` as {} at {}.",
                user.username,
                user.role.label(),
                user.center
            ),
            user: user.to_row(),
        },
    )
}

fn map_insert_error(db_path: &Path, error: &rusqlite::Error, user: &StoredUser) -> ClientError {
    match unique_violation_target(error) {
        Some("internal_users.username") => ClientError::username_taken(&user.username),
        Some("internal_users.center") => ClientError::center_owner_exists(&user.center),
        _ => map_sqlite_error(db_path, error),
    }
}

pub fn list(center: Option<&str>, role: Option<&str>) -> ClientResult<SuccessEnvelope> {
    list_with_options(UsersListOptions {
        center: center.map(std::string::ToString::to_string),
        role: role.map(std::string::ToString::to_string),
        home_override: None,
    })
}

#[doc(hidden)]
pub fn list_with_options(options: UsersListOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let role = match options.role.as_deref() {
        Some(value) => Some(Role::parse_argument(value, "users list")?),
        None => None,
    };
    let session = open_store(options.home_override)?;
    let users = list_users(
        &session.connection,
        &session.db_path,
        &UserFilter {
            center: options.center.as_deref(),
            role,
            username_contains: None,
        },
    )?;

    success(
        "users list",
        UsersListData {
            center: options.center.clone(),
            role: role.map(|value| value.as_str().to_string()),
            rows: users.iter().map(StoredUser::to_row).collect(),
        },
    )
}

pub fn centers() -> ClientResult<SuccessEnvelope> {
    centers_with_home_override(None)
}

/// Registered centers merged with the base signup centers, sorted and unique.
#[doc(hidden)]
pub fn centers_with_home_override(home_override: Option<&Path>) -> ClientResult<SuccessEnvelope> {
    let session = open_store(home_override)?;
    let mut centers = BTreeSet::new();
    for center in distinct_centers(&session.connection, &session.db_path)? {
        centers.insert(center);
    }
    for base in BASE_CENTERS {
        centers.insert(base.to_string());
    }

    success(
        "centers list",
        CentersData {
            centers: centers.into_iter().collect(),
        },
    )
}
