use std::fs;

use anyhow::Result;
use colored::Colorize;

use super::super::args::TransformCommand;
use super::super::exit_status::ExitStatus;
use super::super::report::{
    print_file, print_file_error, print_parse_warning, print_summary, write_json_report,
};
use crate::core::{TransformContext, TransformStats};
use crate::transform::TransformOptions;

/// Run the transform over the configured source tree.
///
/// Dry run by default. With `--apply` every modified file is written back
/// in place. Files that cannot be read, parsed or written are counted and
/// turn the exit status into `Failure`; the rest of the batch still runs.
pub fn transform(cmd: TransformCommand) -> Result<ExitStatus> {
    let args = cmd.args;
    let verbose = args.common.verbose;
    let ctx = TransformContext::new(&args.common)?;

    let options = TransformOptions {
        debug: args.debug,
        ..Default::default()
    };
    let mut stats = TransformStats::default();
    let outcomes = ctx.run_batch(&options, &mut stats);

    let mut failures = 0;
    for outcome in &outcomes {
        let output = match &outcome.result {
            Ok(output) => output,
            Err(e) => {
                failures += 1;
                print_file_error(&outcome.file_path, e, verbose);
                continue;
            }
        };
        if !output.modified {
            continue;
        }

        print_file(&outcome.file_path, output, verbose);
        if args.apply
            && let Err(e) = fs::write(&outcome.file_path, &output.code)
        {
            failures += 1;
            eprintln!(
                "{} Failed to write {}: {}",
                "warning:".bold().yellow(),
                outcome.file_path,
                e
            );
        }
    }

    print_summary(&stats, args.apply);
    print_parse_warning(failures, verbose);

    if let Some(path) = &args.report {
        write_json_report(path, &stats)?;
        if verbose {
            eprintln!("Report written to {}", path.display());
        }
    }

    if failures > 0 {
        Ok(ExitStatus::Failure)
    } else {
        Ok(ExitStatus::Success)
    }
}
