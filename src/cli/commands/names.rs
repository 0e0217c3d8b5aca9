use anyhow::{Context, Result};

use super::super::args::{NamesCommand, OutputFormat};
use super::super::exit_status::ExitStatus;
use super::super::report;
use crate::core::AnalysisContext;

pub fn names(cmd: NamesCommand) -> Result<ExitStatus> {
    let args = &cmd.args;
    let ctx = AnalysisContext::new(&args.common, &cmd.paths)?;
    let result = ctx.analyze(!args.no_imports);

    match args.format {
        OutputFormat::Text => report::report(&result),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result.files)
                .context("Failed to serialize property names")?;
            println!("{}", json);
        }
    }
    report::print_parse_warning(result.parse_errors.len(), ctx.verbose);

    Ok(ExitStatus::for_names(args.strict, result.unresolved_count()))
}
