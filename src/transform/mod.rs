//! The rewrite engine.
//!
//! Per candidate element the pipeline is:
//!
//! ```text
//! analysis::analyze_children   classify children into buckets
//!   -> strategy::select_strategy   pick one rewrite shape (or skip)
//!   -> template::build_template    one key per branch combination
//!   -> rewriter::rewrite_element   owned replacement + records
//! ```
//!
//! `orchestrator::transform_source` walks a whole file, splices the rendered
//! replacements into the original text and injects imports.

pub mod analysis;
pub mod branches;
pub mod imports;
pub mod naming;
pub mod orchestrator;
pub mod rebrand;
pub mod record;
pub mod rewriter;
pub mod rules;
pub mod strategy;
pub mod template;

#[cfg(test)]
mod test_support;

pub use orchestrator::{TRANSFORMED_MARKER, TransformOptions, TransformOutput, transform_source};
pub use record::TransformationRecord;
pub use rules::TransformRules;
pub use strategy::{SkipReason, TransformStrategy};
