//! Batch context for transforming a whole source tree.
//!
//! `TransformContext` loads configuration, scans the source files and runs
//! the per-file transform in parallel. Build-wide statistics live in an
//! explicit [`TransformStats`] owned by the caller, reset at batch start.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, Result, anyhow};
use rayon::prelude::*;
use serde::Serialize;

use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::file_scanner::scan_files,
    transform::{TransformOptions, TransformOutput, TransformRules, TransformationRecord, transform_source},
};

/// Per-file entry of the JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct FileDetail {
    pub file: String,
    pub transformations: Vec<TransformationRecord>,
}

/// Build-wide statistics.
///
/// Serializes to the report layout:
/// `{ stringsTransformed, filesModified, fileDetails: [{ file, transformations }] }`.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformStats {
    pub strings_transformed: usize,
    pub files_modified: usize,
    pub file_details: Vec<FileDetail>,
    #[serde(skip)]
    pub files_processed: usize,
    #[serde(skip)]
    pub by_kind: BTreeMap<String, usize>,
}

impl TransformStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fold one file's output into the totals.
    pub fn absorb(&mut self, file: &str, output: &TransformOutput) {
        self.files_processed += 1;
        if !output.modified {
            return;
        }
        self.files_modified += 1;
        self.strings_transformed += output.transform_count;
        for record in &output.transformations {
            *self.by_kind.entry(record.kind.clone()).or_default() += 1;
        }
        self.file_details.push(FileDetail {
            file: file.to_string(),
            transformations: output.transformations.clone(),
        });
    }
}

/// Outcome of one file in a batch.
pub struct FileOutcome {
    pub file_path: String,
    pub result: Result<TransformOutput>,
}

pub struct TransformContext {
    pub config: Config,
    pub root_dir: PathBuf,
    /// Files to transform, in path order.
    pub files: Vec<String>,
    pub rules: TransformRules,
    pub verbose: bool,
}

impl TransformContext {
    /// Load configuration from the source root (or the current directory)
    /// and scan its source files.
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;

        let root_dir = common_args
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let path = root_dir
            .to_str()
            .with_context(|| anyhow!("Invalid path: {:?}", root_dir))?;

        let config_result = load_config(Path::new(path))?;
        if verbose && !config_result.from_file {
            eprintln!(
                "Note: No {} found, using default configuration",
                CONFIG_FILE_NAME
            );
        }
        let config = config_result.config;
        let rules = TransformRules::from_config(&config)?;

        // Collapse `./` segments so reported paths stay readable
        let scan_root: PathBuf = root_dir.join(&config.source_root).components().collect();
        let scan_result = scan_files(&scan_root, &config, verbose);
        if scan_result.skipped_count > 0 {
            eprintln!(
                "Warning: {} path(s) skipped due to access errors{}",
                scan_result.skipped_count,
                if verbose { "" } else { " (use -v for details)" }
            );
        }

        Ok(Self {
            config,
            root_dir,
            files: scan_result.files,
            rules,
            verbose,
        })
    }

    /// Transform every file in parallel.
    ///
    /// Files are independent, so each worker reads and parses its own file.
    /// Results come back in path order; a failing file never stops the
    /// others.
    pub fn transform_all(&self, options: &TransformOptions) -> Vec<FileOutcome> {
        self.files
            .par_iter()
            .map(|file_path| {
                let result = fs::read_to_string(file_path)
                    .with_context(|| format!("Failed to read file: {}", file_path))
                    .and_then(|code| transform_source(&code, file_path, options, &self.rules));
                FileOutcome {
                    file_path: file_path.clone(),
                    result,
                }
            })
            .collect()
    }

    /// Run a batch, resetting `stats` first and absorbing each successful
    /// file in path order.
    pub fn run_batch(&self, options: &TransformOptions, stats: &mut TransformStats) -> Vec<FileOutcome> {
        stats.reset();
        let outcomes = self.transform_all(options);
        for outcome in &outcomes {
            if let Ok(output) = &outcome.result {
                stats.absorb(&outcome.file_path, output);
            }
        }
        outcomes
    }
}
