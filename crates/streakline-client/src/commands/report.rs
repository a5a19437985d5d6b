use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;

use crate::activity::clock::resolve_clock;
use crate::activity::policy::STREAK_WINDOW_DAYS;
use crate::activity::query::SqliteDailyCounts;
use crate::activity::window::{DailyCountSource, window_start};
use crate::activity::compute_window_status;
use crate::commands::common::{open_store, status_label};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::ReportData;
use crate::dates::format_iso_date;
use crate::profiles::{Role, UserFilter, list_users};
use crate::{ClientError, ClientResult};

pub const DEFAULT_REPORT_FILENAME: &str = "admin_activity_report.csv";

/// Where the CSV goes. `Stdout` returns the body inside the envelope instead
/// of touching the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportTarget {
    File(PathBuf),
    Stdout,
}

impl ReportTarget {
    pub fn from_argument(value: Option<&str>) -> Self {
        match value {
            Some("-") => Self::Stdout,
            Some(path) => Self::File(PathBuf::from(path)),
            None => Self::File(PathBuf::from(DEFAULT_REPORT_FILENAME)),
        }
    }
}

#[derive(Debug)]
pub struct ReportExportOptions<'a> {
    pub target: ReportTarget,
    pub today: Option<NaiveDate>,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Clone, Serialize)]
struct ReportRow<'a> {
    #[serde(rename = "Center")]
    center: &'a str,
    #[serde(rename = "Username")]
    username: &'a str,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "CallsThatDay")]
    calls_that_day: i64,
    #[serde(rename = "StatusLast7Days")]
    status_last_7_days: &'static str,
    #[serde(rename = "CurrentLimit")]
    current_limit: i64,
}

pub fn export(output: Option<&str>) -> ClientResult<SuccessEnvelope> {
    export_with_options(ReportExportOptions {
        target: ReportTarget::from_argument(output),
        today: None,
        home_override: None,
    })
}

/// One row per (user, date) across the 30-day window, with the 7-day status
/// repeated on every row of that user.
#[doc(hidden)]
pub fn export_with_options(options: ReportExportOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let clock = resolve_clock(options.today);
    let today = clock.today();
    let session = open_store(options.home_override)?;
    let members = list_users(
        &session.connection,
        &session.db_path,
        &UserFilter {
            role: Some(Role::User),
            ..UserFilter::default()
        },
    )?;
    let source = SqliteDailyCounts::new(&session.connection, &session.db_path, clock.as_ref());

    let report_path = match &options.target {
        ReportTarget::File(path) => path.clone(),
        ReportTarget::Stdout => PathBuf::from("-"),
    };
    let mut writer = csv::Writer::from_writer(Vec::new());
    let mut rows_written = 0_i64;
    for member in &members {
        let series = source.counts_for_window(&member.user_id, STREAK_WINDOW_DAYS)?;
        let window = compute_window_status(&source, &member.user_id)?;
        for day in series.entries() {
            writer
                .serialize(ReportRow {
                    center: &member.center,
                    username: &member.username,
                    date: format_iso_date(&day.date),
                    calls_that_day: day.count,
                    status_last_7_days: status_label(window.is_active),
                    current_limit: window.current_limit,
                })
                .map_err(|error| ClientError::report_write_failed(&report_path, &error.to_string()))?;
            rows_written += 1;
        }
    }
    if members.is_empty() {
        writer
            .write_record([
                "Center",
                "Username",
                "Date",
                "CallsThatDay",
                "StatusLast7Days",
                "CurrentLimit",
            ])
            .map_err(|error| ClientError::report_write_failed(&report_path, &error.to_string()))?;
    }
    let body = writer
        .into_inner()
        .map_err(|error| ClientError::report_write_failed(&report_path, &error.to_string()))?;

    let (path, csv) = match options.target {
        ReportTarget::File(path) => {
            write_report_file(&path, &body)?;
            tracing::info!(path = %path.display(), rows_written, "exported activity report");
            (Some(path.display().to_string()), None)
        }
        ReportTarget::Stdout => {
            let text = String::from_utf8(body)
                .map_err(|error| ClientError::internal_serialization(&error.to_string()))?;
            (None, Some(text))
        }
    };

    success(
        "report export",
        ReportData {
            path,
            csv,
            window_start: format_iso_date(&window_start(today, STREAK_WINDOW_DAYS)),
            window_end: format_iso_date(&today),
            users: members.len() as i64,
            rows_written,
        },
    )
}

fn write_report_file(path: &Path, body: &[u8]) -> ClientResult<()> {
    let mut file =
        File::create(path).map_err(|error| ClientError::report_write_failed(path, &error.to_string()))?;
    file.write_all(body)
        .map_err(|error| ClientError::report_write_failed(path, &error.to_string()))?;
    file.flush()
        .map_err(|error| ClientError::report_write_failed(path, &error.to_string()))
}
