//! Report formatting and printing utilities.
//!
//! Kept apart from the core so propname can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::core::{AnalysisResult, FileNames, PropertyKind, PropertyName};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Shown in place of a name that could not be determined.
pub const UNRESOLVED: &str = "<unresolved>";

/// Print every file's property names followed by a summary to stdout.
pub fn report(result: &AnalysisResult) {
    report_to(result, &mut io::stdout().lock());
}

/// Print a report to a custom writer.
pub fn report_to<W: Write>(result: &AnalysisResult, writer: &mut W) {
    for file in result.files.iter().filter(|f| !f.properties.is_empty()) {
        print_file(file, writer);
    }
    print_summary(result, writer);
}

/// Print a warning about files that could not be parsed.
pub fn print_parse_warning(count: usize, verbose: bool) {
    print_parse_warning_to(count, verbose, &mut io::stderr().lock());
}

/// Print a parse warning to a custom writer.
pub fn print_parse_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be parsed (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

fn print_file<W: Write>(file: &FileNames, writer: &mut W) {
    let _ = writeln!(writer, "{}", file.file.bold());

    let locations: Vec<String> = file
        .properties
        .iter()
        .map(|p| format!("{}:{}", p.line, p.col))
        .collect();
    let location_width = locations.iter().map(|l| l.len()).max().unwrap_or(0);
    let name_width = file
        .properties
        .iter()
        .map(|p| UnicodeWidthStr::width(display_name(p)))
        .max()
        .unwrap_or(0);

    for (property, location) in file.properties.iter().zip(&locations) {
        let name = display_name(property);
        let padding = " ".repeat(name_width - UnicodeWidthStr::width(name));
        let name = match property.name {
            Some(_) => name.normal(),
            None => name.red(),
        };

        let _ = writeln!(
            writer,
            "  {:>width$}  {}{}  {}",
            location.dimmed(),
            name,
            padding,
            kind_label(property.kind).dimmed().cyan(),
            width = location_width
        );
    }
    let _ = writeln!(writer);
}

fn print_summary<W: Write>(result: &AnalysisResult, writer: &mut W) {
    let total = result.property_count();
    let unresolved = result.unresolved_count();
    let files = result.files.len();

    if unresolved == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Found {} property {} in {} {}",
                total,
                if total == 1 { "name" } else { "names" },
                files,
                if files == 1 { "file" } else { "files" }
            )
            .green()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} of {} property {} could not be resolved",
            "warning:".bold().yellow(),
            unresolved,
            total,
            if total == 1 { "name" } else { "names" }
        );
    }
}

fn display_name(property: &PropertyName) -> &str {
    property.name.as_deref().unwrap_or(UNRESOLVED)
}

fn kind_label(kind: PropertyKind) -> &'static str {
    match kind {
        PropertyKind::Literal => "literal",
        PropertyKind::Computed => "computed",
        PropertyKind::Spread => "spread",
    }
}
