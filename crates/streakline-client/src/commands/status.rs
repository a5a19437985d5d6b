use std::path::Path;

use chrono::NaiveDate;

use crate::activity::clock::{Clock, resolve_clock};
use crate::activity::compute_activity_status;
use crate::activity::policy::ACTIVITY_POLICY_VERSION;
use crate::activity::query::SqliteDailyCounts;
use crate::commands::common::{StoreSession, open_store};
use crate::commands::records::{count_for_day, recorded_range};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{StatusData, StreakDay};
use crate::dates::format_iso_date;
use crate::profiles::{Role, StoredUser, require_user};
use crate::{ClientError, ClientResult};

#[derive(Debug, Default)]
pub struct StatusRunOptions<'a> {
    pub username: String,
    pub today: Option<NaiveDate>,
    pub home_override: Option<&'a Path>,
}

pub fn run(username: &str) -> ClientResult<SuccessEnvelope> {
    run_with_options(StatusRunOptions {
        username: username.to_string(),
        today: None,
        home_override: None,
    })
}

/// Personal streak page. Center owners have no streak of their own and are
/// pointed at `dash`.
#[doc(hidden)]
pub fn run_with_options(options: StatusRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let clock = resolve_clock(options.today);
    let session = open_store(options.home_override)?;
    let user = require_user(&session.connection, &session.db_path, &options.username)?;
    if user.role == Role::CenterOwner {
        return Err(ClientError::center_owner_has_no_streak(&user.username, &user.center));
    }
    let data = status_for_user(&session, &user, clock.as_ref())?;
    success("status", data)
}

pub(crate) fn status_for_user(
    session: &StoreSession,
    user: &StoredUser,
    clock: &dyn Clock,
) -> ClientResult<StatusData> {
    let today = clock.today();
    let source = SqliteDailyCounts::new(&session.connection, &session.db_path, clock);
    let status = compute_activity_status(&source, &user.user_id)?;
    let today_count = count_for_day(&session.connection, &session.db_path, &user.user_id, today)?;

    let streak = status
        .streak_dates
        .iter()
        .zip(status.streak_counts.iter())
        .map(|(date, count)| StreakDay {
            date: format_iso_date(date),
            count: *count,
        })
        .collect::<Vec<StreakDay>>();

    Ok(StatusData {
        username: user.username.clone(),
        role: user.role.as_str().to_string(),
        role_label: user.role.label().to_string(),
        center: user.center.clone(),
        today: format_iso_date(&today),
        today_count,
        policy_version: ACTIVITY_POLICY_VERSION.to_string(),
        is_active: status.is_active,
        streak_status_text: if status.is_active {
            "Active user".to_string()
        } else {
            "Inactive user".to_string()
        },
        current_limit: status.current_limit,
        streak,
        recorded_range: recorded_range(&session.connection, &session.db_path, &user.user_id)?,
    })
}
