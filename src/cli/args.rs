//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `names`: Resolve and print the property names of source files
//! - `init`: Initialize propname configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Names(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root directory (config lookup and relative paths)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Parser)]
pub struct NamesArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Exit with status 1 when any property name is unresolved
    #[arg(long)]
    pub strict: bool,

    /// Do not follow imports when resolving computed keys
    #[arg(long)]
    pub no_imports: bool,
}

#[derive(Debug, Args)]
pub struct NamesCommand {
    /// Files or directories to scan, relative to the source root (overrides config includes)
    pub paths: Vec<PathBuf>,
    #[command(flatten)]
    pub args: NamesArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the resolved name of every object and type property
    Names(NamesCommand),
    /// Initialize a new .propnamerc.json configuration file
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names_command() {
        let args = Arguments::try_parse_from([
            "propname", "names", "src", "lib", "--format", "json", "--strict", "-v",
        ])
        .unwrap();

        let Some(Command::Names(cmd)) = &args.command else {
            panic!("expected names command");
        };
        assert_eq!(cmd.paths, vec![PathBuf::from("src"), PathBuf::from("lib")]);
        assert_eq!(cmd.args.format, OutputFormat::Json);
        assert!(cmd.args.strict);
        assert!(!cmd.args.no_imports);
        assert!(args.verbose());
    }

    #[test]
    fn test_names_defaults() {
        let args = Arguments::try_parse_from(["propname", "names"]).unwrap();
        let Some(Command::Names(cmd)) = args.command else {
            panic!("expected names command");
        };
        assert!(cmd.paths.is_empty());
        assert_eq!(cmd.args.format, OutputFormat::Text);
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Arguments::command().debug_assert();
    }
}
