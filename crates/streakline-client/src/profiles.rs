use std::path::Path;

use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::contracts::types::UserRow;
use crate::state::map_sqlite_error;
use crate::{ClientError, ClientResult};

/// Centers offered at signup even before anyone has registered there.
pub const BASE_CENTERS: [&str; 3] = ["balasore", "bbsr", "basta"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    CenterOwner,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::CenterOwner => "centerowner",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::CenterOwner => "Center Owner",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "user" => Some(Self::User),
            "centerowner" => Some(Self::CenterOwner),
            _ => None,
        }
    }

    pub fn parse_argument(value: &str, command: &str) -> ClientResult<Self> {
        Self::parse(value).ok_or_else(|| {
            ClientError::invalid_argument_for_command(
                "`role` must be one of: user, centerowner.",
                Some(command),
            )
        })
    }
}

#[derive(Debug, Clone)]
pub struct StoredUser {
    pub user_id: String,
    pub username: String,
    pub role: Role,
    pub center: String,
    pub created_at: String,
}

impl StoredUser {
    pub fn to_row(&self) -> UserRow {
        UserRow {
            user_id: self.user_id.clone(),
            username: self.username.clone(),
            role: self.role.as_str().to_string(),
            role_label: self.role.label().to_string(),
            center: self.center.clone(),
            created_at: self.created_at.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserFilter<'a> {
    pub center: Option<&'a str>,
    pub role: Option<Role>,
    pub username_contains: Option<&'a str>,
}

const USER_COLUMNS: &str = "user_id, username, role, center, created_at";

pub fn find_user(
    connection: &Connection,
    db_path: &Path,
    username: &str,
) -> ClientResult<Option<StoredUser>> {
    connection
        .query_row(
            &format!("SELECT {USER_COLUMNS} FROM internal_users WHERE username = ?1 LIMIT 1"),
            [username],
            read_user,
        )
        .optional()
        .map_err(|error| map_sqlite_error(db_path, &error))
}

pub fn require_user(
    connection: &Connection,
    db_path: &Path,
    username: &str,
) -> ClientResult<StoredUser> {
    find_user(connection, db_path, username)?.ok_or_else(|| ClientError::user_not_found(username))
}

pub fn center_has_owner(connection: &Connection, db_path: &Path, center: &str) -> ClientResult<bool> {
    let exists = connection
        .query_row(
            "SELECT 1 FROM internal_users WHERE role = 'centerowner' AND center = ?1 LIMIT 1",
            [center],
            |_row| Ok(true),
        )
        .optional()
        .map_err(|error| map_sqlite_error(db_path, &error))?
        .unwrap_or(false);
    Ok(exists)
}

/// Users ordered by center, then username. The username filter is a
/// case-insensitive substring match.
pub fn list_users(
    connection: &Connection,
    db_path: &Path,
    filter: &UserFilter<'_>,
) -> ClientResult<Vec<StoredUser>> {
    let mut statement = connection
        .prepare(&format!(
            "SELECT {USER_COLUMNS}
             FROM internal_users
             WHERE (?1 IS NULL OR center = ?1)
               AND (?2 IS NULL OR role = ?2)
               AND (?3 IS NULL OR instr(lower(username), lower(?3)) > 0)
             ORDER BY center ASC, username ASC"
        ))
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let role = filter.role.map(Role::as_str);
    let rows_iter = statement
        .query_map(
            params![filter.center, role, filter.username_contains],
            read_user,
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let mut users = Vec::new();
    for row in rows_iter {
        users.push(row.map_err(|error| map_sqlite_error(db_path, &error))?);
    }
    Ok(users)
}

pub fn distinct_centers(connection: &Connection, db_path: &Path) -> ClientResult<Vec<String>> {
    let mut statement = connection
        .prepare(
            "SELECT DISTINCT center FROM internal_users
             WHERE TRIM(center) <> ''
             ORDER BY center ASC",
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let rows_iter = statement
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let mut centers = Vec::new();
    for row in rows_iter {
        centers.push(row.map_err(|error| map_sqlite_error(db_path, &error))?);
    }
    Ok(centers)
}

fn read_user(row: &Row<'_>) -> rusqlite::Result<StoredUser> {
    let raw_role: String = row.get(2)?;
    let role = Role::parse(&raw_role).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            rusqlite::types::Type::Text,
            format!("unknown role `{raw_role}`").into(),
        )
    })?;
    Ok(StoredUser {
        user_id: row.get(0)?,
        username: row.get(1)?,
        role,
        center: row.get(3)?,
        created_at: row.get(4)?,
    })
}
