use streakline_client::commands;
use streakline_client::{ClientResult, SuccessEnvelope};

use crate::cli::{
    CenterCommand, CentersCommand, Cli, Commands, IsoDate, RecordsCommand, ReportCommand,
    UsersCommand,
};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Users { command } => match command {
            UsersCommand::Create {
                username,
                role,
                center,
                ..
            } => commands::users::create(username, role, center),
            UsersCommand::List { center, role, .. } => {
                commands::users::list(center.as_deref(), role.as_deref())
            }
        },
        Commands::Centers {
            command: CentersCommand::List { .. },
        } => commands::users::centers(),
        Commands::Records { command } => match command {
            RecordsCommand::Add {
                username,
                customers,
                ..
            } => commands::records::add(username, customers.clone()),
            RecordsCommand::List { username, date, .. } => {
                commands::records::list(username, date_str(date.as_ref()))
            }
        },
        Commands::Status { username, .. } => commands::status::run(username),
        Commands::Center {
            command:
                CenterCommand::Show {
                    center,
                    date,
                    search,
                    ..
                },
        } => commands::center::show(center, date_str(date.as_ref()), search.as_deref()),
        Commands::Dash {
            username,
            date,
            search,
            ..
        } => commands::dash::run(username, date_str(date.as_ref()), search.as_deref()),
        Commands::Report {
            command: ReportCommand::Export { output, .. },
        } => commands::report::export(output.as_deref()),
    }
}

fn date_str(date: Option<&IsoDate>) -> Option<&str> {
    date.map(IsoDate::as_str)
}
