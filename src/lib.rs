//! jsx-i18n-transform - build-time i18n rewriting for JSX sources
//!
//! Rewrites user-facing text inside configured text elements (and string
//! values of configured object fields) into runtime translation calls,
//! injects the required import and tags each rewritten file with a marker
//! comment so a second run leaves it alone.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (`transform` and `init`)
//! - `config`: Configuration file loading and parsing
//! - `core`: Parsing, suppression comments, file scanning and batch runs
//! - `transform`: The rewrite engine (analysis, strategy, templates, output)
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod transform;
pub mod utils;
