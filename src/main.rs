use anyhow::Result;

use olympic_ties::cli::Command;
use olympic_ties::{handle_schedule, handle_sports, handle_ties, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Ties { source, output } => handle_ties(source, output.clone()),
        Command::Schedule { source, json } => handle_schedule(source, *json),
        Command::Sports => handle_sports(),
    }
}
