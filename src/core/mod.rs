//! Source handling shared by the transform and the batch driver.
//!
//! - `parsers`: swc parsing and span-addressable source text
//! - `comments`: `i18n-ignore` line suppressions
//! - `file_scanner`: include/ignore-aware source discovery
//! - `context`: batch context and build-wide statistics

pub mod comments;
pub mod context;
pub mod file_scanner;
pub mod parsers;

pub use context::{FileDetail, FileOutcome, TransformContext, TransformStats};
