mod cli;
mod dispatch;
mod output;
mod stdout_io;

use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use stdout_io::write_stdout_text;
use streakline_client::ClientError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_ENV_VAR: &str = "STREAKLINE_LOG";

const ROOT_HELP: &str = "Streakline - daily customer-contact streak tracker

Usage:
  streakline <command>

Start here:
  streakline users create <username> --role user --center <center>
  streakline records add <username> --customer NAME:PHONE ...
  streakline dash <username>
";

const TOP_LEVEL_HELP: &str = "Streakline - daily customer-contact streak tracker

USAGE: streakline <command>

Set up people:
  streakline users create <username> --role <user|centerowner> --center <center>
  streakline users list [--center <center>] [--role <role>]
  streakline centers list                                  Registered centers plus the base centers

Log the day's work (today only, 3 to 25 customers per day):
  streakline records add <username> --customer NAME:PHONE ...
  streakline records list <username> [--date YYYY-MM-DD]

See who is keeping their streak:
  streakline dash <username>                               Status for users, center dashboard for owners
  streakline status <username>                             Streak over the last 30 days
  streakline center show <center> [--date D] [--search q]  Admin view of any center

Reports:
  streakline report export [--output <path>|-]             30-day CSV with the 7-day status per user

Add `--json` to any command for machine-readable output.
Set STREAKLINE_HOME to choose where the store lives and STREAKLINE_LOG=debug to trace a run.
";

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

/// Events go to stderr so stdout stays reserved for command output.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if write_stdout_text(ROOT_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }
    let parsed = cli::Cli::try_parse();
    let cli = match parsed {
        Ok(value) => value,
        Err(err) => return Err(handle_parse_error(&err, &raw_args)),
    };
    let mode = output::mode_for_command(&cli.command);

    let dispatched = dispatch::dispatch(&cli);
    match dispatched {
        Ok(success) => {
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            tracing::debug!(code = %error.code, "command failed");
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(exit_code_for_error(&error))
        }
    }
}

/// Help and version requests exit 0; every other parse failure is rendered
/// as an `invalid_argument` error in the requested output mode.
fn handle_parse_error(err: &clap::Error, raw_args: &[String]) -> ExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            let text = if is_top_level_help_request(raw_args) {
                TOP_LEVEL_HELP.to_string()
            } else {
                err.to_string()
            };
            if write_stdout_text(&text).is_err() {
                return ExitCode::from(2);
            }
            return ExitCode::SUCCESS;
        }
        ErrorKind::DisplayVersion => {
            if write_stdout_text(&err.to_string()).is_err() {
                return ExitCode::from(2);
            }
            return ExitCode::SUCCESS;
        }
        _ => {}
    }

    let command_hint = if matches!(
        err.kind(),
        ErrorKind::MissingRequiredArgument
            | ErrorKind::InvalidValue
            | ErrorKind::ValueValidation
            | ErrorKind::WrongNumberOfValues
            | ErrorKind::UnknownArgument
            | ErrorKind::InvalidSubcommand
    ) {
        command_path_from_args(raw_args)
    } else {
        None
    };
    let clean_message = strip_clap_boilerplate(&err.to_string());
    let parse_error = ClientError::invalid_argument_for_command(&clean_message, command_hint);
    let mode = infer_requested_output_mode(raw_args);
    if output::print_failure(&parse_error, mode).is_err() {
        return ExitCode::from(2);
    }
    ExitCode::from(1)
}

fn is_top_level_help_request(raw_args: &[String]) -> bool {
    raw_args.len() == 2 && matches!(raw_args[1].as_str(), "--help" | "-h")
}

/// Strips clap's trailing boilerplate (Usage line, "For more information" hint)
/// so our "What to do next" section is the single source of guidance.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed.trim_end().to_string()
}

/// Maps the leading words of the raw args onto a known command path for the
/// `--help` hint.
fn command_path_from_args(raw_args: &[String]) -> Option<&'static str> {
    let words: Vec<&str> = raw_args
        .iter()
        .skip(1)
        .filter(|value| !value.starts_with('-'))
        .map(String::as_str)
        .collect();

    match words.as_slice() {
        ["users", "create", ..] => Some("users create"),
        ["users", "list", ..] => Some("users list"),
        ["users", ..] => Some("users"),
        ["centers", ..] => Some("centers list"),
        ["records", "add", ..] => Some("records add"),
        ["records", "list", ..] => Some("records list"),
        ["records", ..] => Some("records"),
        ["center", "show", ..] => Some("center show"),
        ["center", ..] => Some("center"),
        ["report", "export", ..] => Some("report export"),
        ["report", ..] => Some("report"),
        ["status", ..] => Some("status"),
        ["dash", ..] => Some("dash"),
        _ => None,
    }
}

fn exit_code_for_error(error: &ClientError) -> ExitCode {
    if error.is_internal() {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}

fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        return output::OutputMode::Json;
    }
    output::OutputMode::Text
}
