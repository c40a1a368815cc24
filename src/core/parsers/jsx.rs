use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::sync::Arc;
use swc_common::{
    BytePos, FileName, Globals, SourceMap, Span,
    comments::{Comment, SingleThreadedComments},
};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

/// Map of byte positions to comments.
pub type CommentMap = HashMap<BytePos, Vec<Comment>>;

/// Thread-safe extracted comments from SingleThreadedComments.
/// Extracted during parsing and stored independently of swc types.
#[derive(Debug, Clone)]
pub struct ExtractedComments {
    pub leading: CommentMap,
    pub trailing: CommentMap,
}

impl ExtractedComments {
    /// Extract comments from SingleThreadedComments.
    /// This must be called before SingleThreadedComments is dropped.
    pub fn from_swc(comments: &SingleThreadedComments) -> Self {
        let (leading, trailing) = comments.borrow_all();
        Self {
            leading: leading.iter().map(|(k, v)| (*k, v.clone())).collect(),
            trailing: trailing.iter().map(|(k, v)| (*k, v.clone())).collect(),
        }
    }

    pub fn borrow_all(&self) -> (&CommentMap, &CommentMap) {
        (&self.leading, &self.trailing)
    }
}

/// Original text of a parsed file, addressable by swc spans.
///
/// swc positions are global to the `SourceMap`, so every lookup subtracts the
/// file's start position to get a byte offset into `code`.
#[derive(Debug, Clone)]
pub struct SourceText {
    code: String,
    start_pos: BytePos,
}

impl SourceText {
    pub fn new(code: String, start_pos: BytePos) -> Self {
        Self { code, start_pos }
    }

    pub fn as_str(&self) -> &str {
        &self.code
    }

    /// Byte offset of a position inside `code`.
    pub fn offset(&self, pos: BytePos) -> usize {
        (pos.0.saturating_sub(self.start_pos.0) as usize).min(self.code.len())
    }

    /// Source text covered by a span.
    pub fn slice(&self, span: Span) -> &str {
        let start = self.offset(span.lo);
        let end = self.offset(span.hi).max(start);
        &self.code[start..end]
    }
}

pub struct ParsedJSX {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
    pub comments: ExtractedComments,
    pub source: SourceText,
}

/// Pick the parser syntax from the file extension.
///
/// `.ts` files cannot contain JSX and treat `<T>(x)` as a type assertion, so
/// they are the only extension parsed with `tsx` disabled.
fn syntax_for(file_path: &str) -> Syntax {
    Syntax::Typescript(TsSyntax {
        tsx: !file_path.ends_with(".ts"),
        ..Default::default()
    })
}

/// Parse JSX/TSX source code string into an AST.
///
/// Accepts a shared SourceMap for thread-safe parallel parsing.
pub fn parse_jsx_source(
    code: String,
    file_path: &str,
    source_map: Arc<SourceMap>,
) -> Result<ParsedJSX> {
    use swc_common::GLOBALS;

    // Wrap in GLOBALS.set() for thread safety
    GLOBALS.set(&Globals::new(), || {
        let source_file =
            source_map.new_source_file(FileName::Real(file_path.into()).into(), code.clone());

        let comments = SingleThreadedComments::default();
        let mut parser = Parser::new(
            syntax_for(file_path),
            StringInput::from(&*source_file),
            Some(&comments),
        );

        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse {}: {:?}", file_path, e))?;

        // Extract comments immediately (before SingleThreadedComments drops)
        let extracted_comments = ExtractedComments::from_swc(&comments);

        Ok(ParsedJSX {
            module,
            source: SourceText::new(code, source_file.start_pos),
            source_map,
            comments: extracted_comments,
        })
    })
}
