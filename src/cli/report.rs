//! Console and JSON output for the transform command.

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::core::TransformStats;
use crate::transform::TransformOutput;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print one modified file, and in verbose mode each of its rewrites.
pub fn print_file(file_path: &str, output: &TransformOutput, verbose: bool) {
    print_file_to(file_path, output, verbose, &mut io::stdout().lock());
}

pub fn print_file_to<W: Write>(
    file_path: &str,
    output: &TransformOutput,
    verbose: bool,
    writer: &mut W,
) {
    let _ = writeln!(
        writer,
        "{} {} ({} string(s))",
        "-->".blue(),
        file_path,
        output.transform_count
    );
    if !verbose {
        return;
    }

    let width = output
        .transformations
        .iter()
        .map(|r| r.source_line.to_string().len())
        .max()
        .unwrap_or(1);
    for record in &output.transformations {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {:?}",
            record.source_line,
            "|".blue(),
            record.kind.dimmed(),
            record.original_key,
            width = width
        );
    }
}

/// Print the batch summary line.
pub fn print_summary(stats: &TransformStats, apply: bool) {
    print_summary_to(stats, apply, &mut io::stdout().lock());
}

pub fn print_summary_to<W: Write>(stats: &TransformStats, apply: bool, writer: &mut W) {
    if stats.strings_transformed == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "No translatable text found in {} source file(s)",
                stats.files_processed
            )
            .green()
        );
        return;
    }

    if apply {
        let _ = writeln!(
            writer,
            "{} {} string(s) in {} file(s).",
            "Transformed".green().bold(),
            stats.strings_transformed,
            stats.files_modified
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} string(s) in {} file(s).",
            "Would transform".yellow().bold(),
            stats.strings_transformed,
            stats.files_modified
        );
    }

    for (kind, count) in &stats.by_kind {
        let _ = writeln!(writer, "  - {}: {}", kind, count);
    }

    if !apply {
        let _ = writeln!(writer, "Run with {} to write these changes.", "--apply".cyan());
    }
}

/// Print a file that could not be processed.
pub fn print_file_error(file_path: &str, error: &anyhow::Error, verbose: bool) {
    if verbose {
        eprintln!(
            "{} {} {}",
            FAILURE_MARK.red(),
            file_path,
            format!("{:#}", error).dimmed()
        );
    }
}

/// Print a warning about files that could not be processed.
pub fn print_parse_warning(count: usize, verbose: bool) {
    print_parse_warning_to(count, verbose, &mut io::stderr().lock());
}

pub fn print_parse_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be processed (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

/// Write the JSON report consumed by the translation workflow.
pub fn write_json_report(path: &Path, stats: &TransformStats) -> Result<()> {
    let json = serde_json::to_string_pretty(stats).context("Failed to serialize report")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write report: {}", path.display()))
}
