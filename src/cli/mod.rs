use anyhow::Result;

pub mod args;
mod commands;
mod exit_status;
pub mod report;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

use commands::{init::init, names::names};

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    match args.command {
        Some(Command::Names(cmd)) => names(cmd),
        Some(Command::Init) => init(),
        None => Ok(ExitStatus::Success),
    }
}
