use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use streakline_client::commands::records::CustomerEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsoDate(pub String);

impl IsoDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn parse_iso_date(value: &str) -> Result<IsoDate, String> {
    if value.len() != 10 {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    let bytes = value.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    for index in [0usize, 1, 2, 3, 5, 6, 8, 9] {
        if !bytes[index].is_ascii_digit() {
            return Err("date must use YYYY-MM-DD format".to_string());
        }
    }

    if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        return Err("date must use valid calendar values".to_string());
    }

    Ok(IsoDate(value.to_string()))
}

pub fn parse_role(value: &str) -> Result<String, String> {
    match value {
        "user" | "centerowner" => Ok(value.to_string()),
        _ => Err("role must be one of: user, centerowner".to_string()),
    }
}

pub fn parse_customer(value: &str) -> Result<CustomerEntry, String> {
    CustomerEntry::parse(value).map_err(|error| error.message)
}

/// Extended help shown after `streakline records add --help`.
pub const RECORDS_ADD_AFTER_HELP: &str = "\
How logging works:
  Records are always saved for today.
  Pass one `--customer NAME:PHONE` per contact; the phone is everything after the last colon.
  Entries with an empty name or phone are skipped.

Daily limits:
  The first save of a day needs at least 3 customers.
  A day can hold at most 25 customers in total.
  A batch that breaks either rule is rejected as a whole.

Example:
  streakline records add asha --customer \"Meena:9876500001\" --customer \"Ravi:9876500002\" --customer \"Lata:9876500003\"
";

#[derive(Debug, Parser)]
#[command(
    name = "streakline",
    version,
    about = "daily customer-contact streak tracker",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Register and list users
    #[command(arg_required_else_help = true)]
    Users {
        #[command(subcommand)]
        command: UsersCommand,
    },
    /// List known centers
    #[command(arg_required_else_help = true)]
    Centers {
        #[command(subcommand)]
        command: CentersCommand,
    },
    /// Log and review daily customer records
    #[command(arg_required_else_help = true)]
    Records {
        #[command(subcommand)]
        command: RecordsCommand,
    },
    /// Show a user's streak status over the last 30 days
    Status {
        /// Username to inspect
        username: String,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Center dashboards
    #[command(arg_required_else_help = true)]
    Center {
        #[command(subcommand)]
        command: CenterCommand,
    },
    /// Open the dashboard for a user's role
    Dash {
        /// Username whose dashboard to open
        username: String,
        /// Day whose customers are listed (YYYY-MM-DD, center owners only)
        #[arg(long, value_parser = parse_iso_date)]
        date: Option<IsoDate>,
        /// Only show members whose username contains this text (center owners only)
        #[arg(long)]
        search: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Activity reports
    #[command(arg_required_else_help = true)]
    Report {
        #[command(subcommand)]
        command: ReportCommand,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum UsersCommand {
    /// Register a user at a center
    Create {
        /// Unique username
        username: String,
        /// Role: user or centerowner
        #[arg(long, value_parser = parse_role)]
        role: String,
        /// Center the user belongs to
        #[arg(long)]
        center: String,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// List registered users ordered by center and username
    List {
        /// Only users of this center
        #[arg(long)]
        center: Option<String>,
        /// Only users with this role
        #[arg(long, value_parser = parse_role)]
        role: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum CentersCommand {
    /// List registered centers merged with the base centers
    List {
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum RecordsCommand {
    /// Log today's customer contacts for a user
    #[command(after_long_help = RECORDS_ADD_AFTER_HELP)]
    Add {
        /// Username logging the contacts
        username: String,
        /// One contact as NAME:PHONE (repeatable)
        #[arg(long = "customer", value_parser = parse_customer, required = true)]
        customers: Vec<CustomerEntry>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// List a user's records for one day
    List {
        /// Username to inspect
        username: String,
        /// Day to list (YYYY-MM-DD, defaults to today)
        #[arg(long, value_parser = parse_iso_date)]
        date: Option<IsoDate>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum CenterCommand {
    /// Show every member of a center with streak status and customers
    Show {
        /// Center to inspect
        center: String,
        /// Day whose customers are listed (YYYY-MM-DD, defaults to today)
        #[arg(long, value_parser = parse_iso_date)]
        date: Option<IsoDate>,
        /// Only show members whose username contains this text
        #[arg(long)]
        search: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ReportCommand {
    /// Export the 30-day activity report as CSV
    Export {
        /// Output file path, or `-` for stdout (defaults to admin_activity_report.csv)
        #[arg(long)]
        output: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
