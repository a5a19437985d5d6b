mod center_text;
mod error_text;
mod format;
mod json;
mod mode;
mod records_text;
mod report_text;
mod status_text;
mod users_text;

use std::io;

use streakline_client::{ClientError, SuccessEnvelope};

use crate::stdout_io::write_stdout_line;

pub use mode::{OutputMode, mode_for_command};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout_line(&body)
}

pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_line(&body)
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "users create" => users_text::render_user_create(&success.data),
        "users list" => users_text::render_users_list(&success.data),
        "centers list" => users_text::render_centers(&success.data),
        "records add" => records_text::render_records_add(&success.data),
        "records list" => records_text::render_records_list(&success.data),
        "status" => status_text::render_status(&success.data),
        "center show" => center_text::render_center(&success.data),
        "report export" => report_text::render_report(&success.data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}
