//! Source file parsing.
//!
//! - `jsx`: JSX/TSX source file parser (uses swc for AST generation)

pub mod jsx;
