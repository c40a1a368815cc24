//! Per-file driver: walks one module, rewrites every candidate element and
//! translatable object field, then injects imports and the marker comment.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use swc_common::{SourceMap, Span};
use swc_ecma_ast::{CallExpr, Callee, Expr, JSXElement, JSXElementName, KeyValueProp, Lit, PropName};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::comments::{Suppressions, collect_suppressions};
use crate::core::parsers::jsx::{SourceText, parse_jsx_source};
use crate::transform::analysis::analyze_children;
use crate::transform::imports::{FileImportState, import_declaration, import_insertion, shebang_end};
use crate::transform::record::TransformationRecord;
use crate::transform::rewriter::{Rewrite, rewrite_element, rewrite_property};
use crate::transform::rules::TransformRules;
use crate::transform::strategy::{SkipReason, select_strategy};

/// First-line comment marking a file as already rewritten.
pub const TRANSFORMED_MARKER: &str = "// @i18n-transformed";

#[derive(Debug, Clone, Default)]
pub struct TransformOptions {
    /// Print every skipped candidate and every rewrite to stderr.
    pub debug: bool,
    /// 1-based lines to leave untouched, in addition to `i18n-ignore` comments.
    pub ignored_lines: HashSet<usize>,
}

#[derive(Debug, Clone)]
pub struct TransformOutput {
    pub modified: bool,
    pub code: String,
    pub transform_count: usize,
    pub transformations: Vec<TransformationRecord>,
}

impl TransformOutput {
    fn unchanged(code: String) -> Self {
        Self {
            modified: false,
            code,
            transform_count: 0,
            transformations: Vec::new(),
        }
    }
}

/// Replace `code[start..end]` with `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Edit {
    start: usize,
    end: usize,
    text: String,
}

impl Edit {
    fn insert(at: usize, text: String) -> Self {
        Self {
            start: at,
            end: at,
            text,
        }
    }
}

/// True when the marker sits on the first line (after any shebang).
pub fn has_transformed_marker(code: &str) -> bool {
    code[shebang_end(code)..]
        .lines()
        .next()
        .is_some_and(|line| line.trim() == TRANSFORMED_MARKER)
}

fn apply_edits(code: &str, mut edits: Vec<Edit>) -> String {
    // Stable: inserts pushed first stay ahead of edits at the same offset
    edits.sort_by_key(|edit| edit.start);

    let extra: usize = edits.iter().map(|edit| edit.text.len()).sum();
    let mut out = String::with_capacity(code.len() + extra);
    let mut cursor = 0;
    for edit in edits {
        if edit.start < cursor {
            continue;
        }
        out.push_str(&code[cursor..edit.start]);
        out.push_str(&edit.text);
        cursor = edit.end;
    }
    out.push_str(&code[cursor..]);
    out
}

struct FileTransformer<'a> {
    rules: &'a TransformRules,
    source: &'a SourceText,
    source_map: &'a SourceMap,
    suppressions: &'a Suppressions,
    file_path: &'a str,
    debug: bool,
    edits: Vec<Edit>,
    records: Vec<TransformationRecord>,
    uses_translate: bool,
    uses_template: bool,
}

impl FileTransformer<'_> {
    fn line_of(&self, span: Span) -> usize {
        self.source_map.lookup_char_pos(span.lo).line
    }

    fn log_skip(&self, line: usize, what: &str, reason: &SkipReason) {
        if self.debug {
            eprintln!(
                "{} {}:{} skip {}: {}",
                "debug:".bold().cyan(),
                self.file_path,
                line,
                what,
                reason
            );
        }
    }

    fn log_suppressed(&self, line: usize, what: &str) {
        if self.debug {
            eprintln!(
                "{} {}:{} skip {}: {}",
                "debug:".bold().cyan(),
                self.file_path,
                line,
                what,
                "i18n-ignore".dimmed()
            );
        }
    }

    fn install(&mut self, start: usize, end: usize, rewrite: Rewrite, render: String) {
        if self.debug {
            for record in &rewrite.records {
                eprintln!(
                    "{} {}:{} {} {:?}",
                    "debug:".bold().cyan(),
                    self.file_path,
                    record.source_line,
                    record.kind.green(),
                    record.original_key
                );
            }
        }
        self.uses_translate |= rewrite.replacement.uses_translate_function();
        self.uses_template |= rewrite.replacement.uses_template_component();
        self.edits.push(Edit {
            start,
            end,
            text: render,
        });
        self.records.extend(rewrite.records);
    }

    /// Returns true when the element was rewritten.
    fn try_element(&mut self, element: &JSXElement) -> bool {
        let JSXElementName::Ident(name) = &element.opening.name else {
            return false;
        };
        if !self.rules.is_text_component(&name.sym) {
            return false;
        }
        let Some(closing) = &element.closing else {
            return false;
        };

        let what = format!("<{}>", name.sym);
        let line = self.line_of(element.span);
        if self.suppressions.is_suppressed(line) {
            self.log_suppressed(line, &what);
            return false;
        }

        let analysis = analyze_children(&element.children, self.rules, self.source);
        let strategy = select_strategy(&analysis);
        match rewrite_element(element, &analysis, &strategy, self.rules, self.source, line) {
            Ok(rewrite) => {
                let start = self.source.offset(element.opening.span.hi);
                let end = self.source.offset(closing.span.lo);
                let render = rewrite.replacement.render_as_child();
                self.install(start, end, rewrite, render);
                true
            }
            Err(reason) => {
                self.log_skip(line, &what, &reason);
                false
            }
        }
    }

    fn try_property(&mut self, prop: &KeyValueProp) -> bool {
        let field = match &prop.key {
            PropName::Ident(ident) => &*ident.sym,
            PropName::Str(s) => match s.value.as_str() {
                Some(value) => value,
                None => return false,
            },
            _ => return false,
        };
        if !self.rules.translatable_properties.contains(field) {
            return false;
        }
        let Expr::Lit(Lit::Str(value)) = &*prop.value else {
            return false;
        };
        let Some(text) = value.value.as_str() else {
            return false;
        };
        if text.trim().is_empty() {
            return false;
        }

        let what = format!("property '{}'", field);
        let line = self.line_of(value.span);
        if self.suppressions.is_suppressed(line) {
            self.log_suppressed(line, &what);
            return false;
        }

        match rewrite_property(field, text, self.rules, line) {
            Ok(rewrite) => {
                let start = self.source.offset(value.span.lo);
                let end = self.source.offset(value.span.hi);
                let render = rewrite.replacement.render();
                self.install(start, end, rewrite, render);
                true
            }
            Err(reason) => {
                self.log_skip(line, &what, &reason);
                false
            }
        }
    }

    fn is_translate_call(&self, call: &CallExpr) -> bool {
        matches!(
            &call.callee,
            Callee::Expr(callee) if matches!(&**callee, Expr::Ident(ident) if ident.sym == self.rules.translate_function.as_str())
        )
    }
}

impl Visit for FileTransformer<'_> {
    fn visit_jsx_element(&mut self, element: &JSXElement) {
        if self.try_element(element) {
            // Only the children were replaced; attributes are still live code
            element.opening.visit_with(self);
            return;
        }
        element.visit_children_with(self);
    }

    fn visit_call_expr(&mut self, call: &CallExpr) {
        if self.is_translate_call(call) {
            return;
        }
        call.visit_children_with(self);
    }

    fn visit_key_value_prop(&mut self, prop: &KeyValueProp) {
        if self.try_property(prop) {
            return;
        }
        prop.visit_children_with(self);
    }
}

/// Transform one source file.
///
/// Parse failures are the only error. Everything the transform does not
/// understand is left byte-identical.
pub fn transform_source(
    code: &str,
    file_path: &str,
    options: &TransformOptions,
    rules: &TransformRules,
) -> Result<TransformOutput> {
    if has_transformed_marker(code) {
        return Ok(TransformOutput::unchanged(code.to_string()));
    }

    let source_map = Arc::new(SourceMap::default());
    let parsed = parse_jsx_source(code.to_string(), file_path, source_map)?;

    let mut suppressions = collect_suppressions(&parsed.comments, &parsed.source_map);
    suppressions.extend_lines(options.ignored_lines.iter().copied());

    let mut transformer = FileTransformer {
        rules,
        source: &parsed.source,
        source_map: &parsed.source_map,
        suppressions: &suppressions,
        file_path,
        debug: options.debug,
        edits: Vec::new(),
        records: Vec::new(),
        uses_translate: false,
        uses_template: false,
    };
    parsed.module.visit_with(&mut transformer);

    if transformer.records.is_empty() {
        return Ok(TransformOutput::unchanged(code.to_string()));
    }

    let FileTransformer {
        edits: node_edits,
        records,
        uses_translate,
        uses_template,
        ..
    } = transformer;

    let mut edits = vec![Edit::insert(
        shebang_end(code),
        format!("{}\n", TRANSFORMED_MARKER),
    )];

    let state = FileImportState::scan(&parsed.module, rules);
    let missing = state.missing(uses_translate, uses_template, rules);
    if !missing.is_empty() {
        let declaration = import_declaration(&missing, &rules.import_source);
        let (at, text) = import_insertion(&parsed.module, &parsed.source, &declaration);
        edits.push(Edit::insert(at, text));
    }
    edits.extend(node_edits);

    Ok(TransformOutput {
        modified: true,
        code: apply_edits(code, edits),
        transform_count: records.len(),
        transformations: records,
    })
}
