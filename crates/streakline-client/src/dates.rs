use chrono::NaiveDate;

use crate::{ClientError, ClientResult};

const ISO_DATE: &str = "%Y-%m-%d";

pub fn format_iso_date(date: &NaiveDate) -> String {
    date.format(ISO_DATE).to_string()
}

/// Strict `YYYY-MM-DD`: zero-padded, no time suffix, a real calendar day.
pub fn parse_record_date(value: &str) -> Option<NaiveDate> {
    let shaped = value.len() == 10
        && value.bytes().enumerate().all(|(index, byte)| match index {
            4 | 7 => byte == b'-',
            _ => byte.is_ascii_digit(),
        });
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(value, ISO_DATE).ok()
}

/// The `--date` argument of a dashboard or listing, or `today` when absent.
/// A malformed value is an error rather than a silent switch to today.
pub fn selected_date_or_today(
    value: Option<&str>,
    today: NaiveDate,
    command: &str,
) -> ClientResult<NaiveDate> {
    let Some(raw) = value else {
        return Ok(today);
    };
    parse_record_date(raw).ok_or_else(|| {
        ClientError::invalid_argument_for_command(
            &format!("`--date {raw}` is not a real calendar date in YYYY-MM-DD format."),
            Some(command),
        )
    })
}
