use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::{Pattern, glob};
use walkdir::WalkDir;

use crate::config::{Config, TEST_FILE_PATTERNS};

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning files.
pub struct ScanResult {
    /// Source files in path order.
    pub files: Vec<String>,
    pub skipped_count: usize,
}

/// Compiled `ignores` plus the default test-file patterns.
struct IgnoreFilter {
    literal_paths: Vec<PathBuf>,
    patterns: Vec<Pattern>,
}

impl IgnoreFilter {
    fn new(base_dir: &Path, ignores: &[String], ignore_test_files: bool, verbose: bool) -> Self {
        let mut literal_paths = Vec::new();
        let mut patterns = Vec::new();

        for p in ignores {
            if !is_glob_pattern(p) {
                literal_paths.push(base_dir.join(p));
                continue;
            }
            match Pattern::new(p) {
                Ok(pattern) => patterns.push(pattern),
                Err(e) => {
                    if verbose {
                        eprintln!(
                            "{} Invalid ignore pattern '{}': {}",
                            "warning:".bold().yellow(),
                            p,
                            e
                        );
                    }
                }
            }
        }

        if ignore_test_files {
            patterns.extend(TEST_FILE_PATTERNS.iter().filter_map(|p| Pattern::new(p).ok()));
        }

        Self {
            literal_paths,
            patterns,
        }
    }

    fn is_ignored(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.literal_paths.iter().any(|ignore| path.starts_with(ignore))
            || self.patterns.iter().any(|p| p.matches(&path_str))
    }
}

/// Directories to walk: every literal include that exists and every
/// directory a glob include expands to.
fn include_dirs(base_dir: &Path, includes: &[String], verbose: bool) -> Vec<PathBuf> {
    if includes.is_empty() {
        return vec![base_dir.to_path_buf()];
    }

    let mut dirs = Vec::new();
    for inc in includes {
        if is_glob_pattern(inc) {
            let full_pattern = base_dir.join(inc);
            match glob(&full_pattern.to_string_lossy()) {
                Ok(entries) => dirs.extend(entries.flatten().filter(|entry| entry.is_dir())),
                Err(e) => {
                    if verbose {
                        eprintln!(
                            "{} Invalid glob pattern '{}': {}",
                            "warning:".bold().yellow(),
                            inc,
                            e
                        );
                    }
                }
            }
        } else {
            let path = base_dir.join(inc);
            if path.exists() {
                dirs.push(path);
            } else if verbose {
                eprintln!(
                    "{} Include path does not exist: {}",
                    "warning:".bold().yellow(),
                    path.display()
                );
            }
        }
    }
    dirs
}

/// Collect transformable source files under `base_dir` according to the
/// `includes`, `ignores` and `ignoreTestFiles` settings.
pub fn scan_files(base_dir: &Path, config: &Config, verbose: bool) -> ScanResult {
    let filter = IgnoreFilter::new(base_dir, &config.ignores, config.ignore_test_files, verbose);

    // Overlapping includes yield the same file twice
    let mut files = BTreeSet::new();
    let mut skipped_count = 0;

    for dir in include_dirs(base_dir, &config.includes, verbose) {
        for entry in WalkDir::new(dir) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    if verbose {
                        eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                    }
                    continue;
                }
            };
            let path = entry.path();
            if filter.is_ignored(path) {
                continue;
            }
            if path.is_file() && is_transformable_file(path) {
                files.insert(path.to_string_lossy().into_owned());
            }
        }
    }

    ScanResult {
        files: files.into_iter().collect(),
        skipped_count,
    }
}

/// JS/TS sources, excluding type declaration files.
fn is_transformable_file(path: &Path) -> bool {
    let is_declaration = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(".d.ts"));
    !is_declaration
        && matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("tsx" | "ts" | "jsx" | "js")
        )
}
