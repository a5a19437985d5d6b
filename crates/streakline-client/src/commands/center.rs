use std::path::Path;

use chrono::NaiveDate;

use crate::ClientResult;
use crate::activity::clock::{Clock, resolve_clock};
use crate::activity::compute_activity_status;
use crate::activity::query::SqliteDailyCounts;
use crate::commands::common::{StoreSession, open_store, status_label};
use crate::commands::records::records_for_day;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{CenterData, CenterMemberRow, CustomerRow};
use crate::dates::{format_iso_date, selected_date_or_today};
use crate::profiles::{Role, UserFilter, list_users};

#[derive(Debug, Default)]
pub struct CenterShowOptions<'a> {
    pub center: String,
    pub date: Option<String>,
    pub search: Option<String>,
    pub today: Option<NaiveDate>,
    pub home_override: Option<&'a Path>,
}

pub fn show(center: &str, date: Option<&str>, search: Option<&str>) -> ClientResult<SuccessEnvelope> {
    show_with_options(CenterShowOptions {
        center: center.to_string(),
        date: date.map(std::string::ToString::to_string),
        search: search.map(std::string::ToString::to_string),
        today: None,
        home_override: None,
    })
}

/// Admin view of any center.
#[doc(hidden)]
pub fn show_with_options(options: CenterShowOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let clock = resolve_clock(options.today);
    let selected = selected_date_or_today(options.date.as_deref(), clock.today(), "center show")?;
    let session = open_store(options.home_override)?;
    let data = center_dashboard(
        &session,
        clock.as_ref(),
        &options.center,
        selected,
        options.search.as_deref(),
        true,
    )?;
    success("center show", data)
}

/// One row per `user`-role member of `center` whose username contains
/// `search`, each with its streak status and the customers logged on
/// `selected`.
pub(crate) fn center_dashboard(
    session: &StoreSession,
    clock: &dyn Clock,
    center: &str,
    selected: NaiveDate,
    search: Option<&str>,
    is_admin_view: bool,
) -> ClientResult<CenterData> {
    let search = search.map(str::trim).filter(|value| !value.is_empty());
    let members = list_users(
        &session.connection,
        &session.db_path,
        &UserFilter {
            center: Some(center),
            role: Some(Role::User),
            username_contains: search,
        },
    )?;

    let source = SqliteDailyCounts::new(&session.connection, &session.db_path, clock);
    let mut rows = Vec::with_capacity(members.len());
    for member in &members {
        let status = compute_activity_status(&source, &member.user_id)?;
        let customers = records_for_day(
            &session.connection,
            &session.db_path,
            &member.user_id,
            selected,
        )?
        .into_iter()
        .map(|record| CustomerRow {
            name: record.name,
            phone: record.phone,
        })
        .collect::<Vec<CustomerRow>>();

        rows.push(CenterMemberRow {
            username: member.username.clone(),
            status: status_label(status.is_active).to_string(),
            is_active: status.is_active,
            current_limit: status.current_limit,
            count: customers.len() as i64,
            customers,
        });
    }

    Ok(CenterData {
        center: center.to_string(),
        today: format_iso_date(&clock.today()),
        selected_date: format_iso_date(&selected),
        search: search.map(std::string::ToString::to_string),
        is_admin_view,
        rows,
    })
}
