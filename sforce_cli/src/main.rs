use std::process::ExitCode;

use clap::Parser;

mod cli;
mod commands;
mod errors;
mod logging;
mod ui;

use cli::{SforceCli, SforceCliCommand};

fn main() -> ExitCode {
    let cli = SforceCli::parse();
    logging::initialize_logging(cli.verbose);

    let result = match cli.command {
        SforceCliCommand::Serve {
            connection,
            selection,
        } => commands::serve(&connection, &selection),
        SforceCliCommand::Tools { selection } => commands::list_tools(&selection, cli.format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => e.exit_code(),
    }
}
