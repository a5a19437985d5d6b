use crate::cli::{
    CenterCommand, CentersCommand, Commands, RecordsCommand, ReportCommand, UsersCommand,
};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

pub fn mode_for_command(command: &Commands) -> OutputMode {
    let json = match command {
        Commands::Users { command } => match command {
            UsersCommand::Create { json, .. } | UsersCommand::List { json, .. } => *json,
        },
        Commands::Centers {
            command: CentersCommand::List { json },
        } => *json,
        Commands::Records { command } => match command {
            RecordsCommand::Add { json, .. } | RecordsCommand::List { json, .. } => *json,
        },
        Commands::Center {
            command: CenterCommand::Show { json, .. },
        } => *json,
        Commands::Report {
            command: ReportCommand::Export { json, .. },
        } => *json,
        Commands::Status { json, .. } | Commands::Dash { json, .. } => *json,
    };

    if json {
        OutputMode::Json
    } else {
        OutputMode::Text
    }
}
