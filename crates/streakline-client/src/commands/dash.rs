use std::path::Path;

use chrono::NaiveDate;

use crate::ClientResult;
use crate::activity::clock::resolve_clock;
use crate::commands::center::center_dashboard;
use crate::commands::common::open_store;
use crate::commands::status::status_for_user;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::dates::selected_date_or_today;
use crate::profiles::{Role, require_user};

#[derive(Debug, Default)]
pub struct DashRunOptions<'a> {
    pub username: String,
    pub date: Option<String>,
    pub search: Option<String>,
    pub today: Option<NaiveDate>,
    pub home_override: Option<&'a Path>,
}

pub fn run(username: &str, date: Option<&str>, search: Option<&str>) -> ClientResult<SuccessEnvelope> {
    run_with_options(DashRunOptions {
        username: username.to_string(),
        date: date.map(std::string::ToString::to_string),
        search: search.map(std::string::ToString::to_string),
        today: None,
        home_override: None,
    })
}

/// Routes by role: center owners land on their own center's dashboard,
/// everyone else on their personal status. The envelope carries the command
/// of the view that was rendered.
#[doc(hidden)]
pub fn run_with_options(options: DashRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let clock = resolve_clock(options.today);
    let selected = selected_date_or_today(options.date.as_deref(), clock.today(), "dash")?;
    let session = open_store(options.home_override)?;
    let user = require_user(&session.connection, &session.db_path, &options.username)?;

    match user.role {
        Role::CenterOwner => {
            let data = center_dashboard(
                &session,
                clock.as_ref(),
                &user.center,
                selected,
                options.search.as_deref(),
                false,
            )?;
            success("center show", data)
        }
        Role::User => {
            let data = status_for_user(&session, &user, clock.as_ref())?;
            success("status", data)
        }
    }
}
