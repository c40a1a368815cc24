//! Linearizes candidate content into a translation key.
//!
//! Children are walked in order. Text is whitespace-collapsed, values become
//! `{name}` placeholders and nested formatted elements become
//! `<tag>content</tag>`. For conditional content one branch combination is
//! chosen up front and its leaves are spliced in as if they were plain
//! children.

use std::sync::LazyLock;

use regex::Regex;
use swc_common::Spanned;
use swc_ecma_ast::{Expr, JSXElement, JSXElementChild, JSXExpr};

use crate::core::parsers::jsx::SourceText;
use crate::transform::analysis::{ContentAnalysis, ExprClass, classify_expr, literal_content};
use crate::transform::branches::unwrap_parens;
use crate::transform::naming::{PlaceholderNames, tag_for_element};
use crate::transform::rules::TransformRules;
use crate::utils::{collapse_whitespace, contains_alphabetic};

static SPACE_BEFORE_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([:;,.!?)])").unwrap());

static SPACE_AFTER_OPEN_PAREN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(\s+").unwrap());

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{[^{}]*\}").unwrap());

static TAG_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[A-Za-z][A-Za-z0-9_-]*>").unwrap());

/// Minimum length of a key once placeholders are removed.
pub const MIN_KEY_CHARS: usize = 2;

#[derive(Debug, Clone)]
pub struct Template<'a> {
    pub key: String,
    /// Placeholder tag to the nested element it stands for.
    pub components: Vec<(String, &'a JSXElement)>,
    /// Placeholder name to the interpolated expression.
    pub params: Vec<(String, &'a Expr)>,
}

impl Template<'_> {
    pub fn is_valid(&self) -> bool {
        is_valid_key(&self.key)
    }

    pub fn param_names(&self) -> Vec<String> {
        self.params.iter().map(|(name, _)| name.clone()).collect()
    }
}

/// A key is valid when, without placeholders and tag markers, it still has
/// at least two characters including a letter.
pub fn is_valid_key(key: &str) -> bool {
    let stripped = PLACEHOLDER.replace_all(key, "");
    let stripped = TAG_MARKER.replace_all(&stripped, "");
    let text = stripped.trim();
    text.chars().count() >= MIN_KEY_CHARS && contains_alphabetic(text)
}

/// Collapse, trim and tidy spacing around punctuation.
pub fn normalize_key(key: &str) -> String {
    let key = collapse_whitespace(key);
    let key = key.trim();
    let key = SPACE_BEFORE_PUNCTUATION.replace_all(key, "$1");
    SPACE_AFTER_OPEN_PAREN.replace_all(&key, "(").into_owned()
}

struct TemplateBuilder<'a, 'r> {
    analysis: &'r ContentAnalysis<'a>,
    combination: &'r [usize],
    rules: &'r TransformRules,
    source: &'r SourceText,
    names: PlaceholderNames,
    next_conditional: usize,
    template: Template<'a>,
}

impl<'a> TemplateBuilder<'a, '_> {
    fn push_text(&mut self, text: &str) {
        let text = collapse_whitespace(text);
        let text = if self.template.key.ends_with(' ') {
            text.strip_prefix(' ').unwrap_or(&text)
        } else {
            &text
        };
        self.template.key.push_str(text);
    }

    fn push_param(&mut self, expr: &'a Expr) {
        let expr = unwrap_parens(expr);
        let name = self.names.for_expr(expr, self.source.slice(expr.span()));
        self.template.key.push('{');
        self.template.key.push_str(&name);
        self.template.key.push('}');
        if !self.template.params.iter().any(|(n, _)| *n == name) {
            self.template.params.push((name, expr));
        }
    }

    fn push_element(&mut self, element: &'a JSXElement) {
        let tag = self.names.unique(tag_for_element(&element.opening));
        let content = literal_content(element, self.rules).unwrap_or_default();
        self.template.key.push_str(&format!("<{tag}>{content}</{tag}>"));
        self.template.components.push((tag, element));
    }

    fn child(&mut self, child: &'a JSXElementChild) {
        match child {
            JSXElementChild::JSXText(text) => self.push_text(&text.value),
            JSXElementChild::JSXExprContainer(container) => {
                if let JSXExpr::Expr(expr) = &container.expr {
                    self.expr(expr);
                }
            }
            JSXElementChild::JSXElement(element) => self.push_element(element),
            // Rejected during analysis.
            JSXElementChild::JSXFragment(_) | JSXElementChild::JSXSpreadChild(_) => {}
        }
    }

    fn expr(&mut self, expr: &'a Expr) {
        match classify_expr(expr, self.rules) {
            ExprClass::Literal(value) => self.push_text(&value),
            ExprClass::Variable => self.push_param(expr),
            ExprClass::Conditional(_) => self.conditional(),
            _ => {}
        }
    }

    /// Splice in the chosen leaf of the next conditional.
    fn conditional(&mut self) {
        let index = self.next_conditional;
        self.next_conditional += 1;

        let analysis = self.analysis;
        let Some(info) = analysis.conditionals.get(index) else {
            return;
        };
        let choice = self.combination.get(index).copied().unwrap_or(0);
        let Some(leaf) = info.leaves.get(choice) else {
            return;
        };
        match classify_expr(leaf.value, self.rules) {
            ExprClass::Literal(value) => self.push_text(&value),
            ExprClass::Variable => self.push_param(leaf.value),
            _ => {}
        }
    }

    fn finish(mut self) -> Template<'a> {
        let key = normalize_key(&self.template.key);
        self.template.key = self.rules.rebrand.apply(&key);
        self.template
    }
}

/// Build the template for one branch combination.
///
/// `combination` holds one leaf index per conditional, in the order the
/// conditionals appear in `analysis`. Pass an empty slice for content without
/// conditionals.
pub fn build_template<'a>(
    children: &'a [JSXElementChild],
    analysis: &ContentAnalysis<'a>,
    combination: &[usize],
    rules: &TransformRules,
    source: &SourceText,
) -> Template<'a> {
    let mut builder = TemplateBuilder {
        analysis,
        combination,
        rules,
        source,
        names: PlaceholderNames::new(),
        next_conditional: 0,
        template: Template {
            key: String::new(),
            components: Vec::new(),
            params: Vec::new(),
        },
    };
    for child in children {
        builder.child(child);
    }
    builder.finish()
}
