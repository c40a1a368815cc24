//! Content analysis of a candidate element's children.
//!
//! Every child is sorted into one bucket (static text, spacer, variable,
//! conditional, nested formatted element). Anything the transform cannot
//! represent faithfully marks the whole analysis unsupported; the node is
//! then left untouched.

use std::fmt;

use swc_ecma_ast::{
    BinaryOp, Callee, CondExpr, Expr, JSXElement, JSXElementChild, JSXElementName, JSXExpr, Lit,
};

use crate::core::parsers::jsx::SourceText;
use crate::transform::branches::{FlattenedLeaf, as_conditional, flatten_conditional, unwrap_parens};
use crate::transform::naming::{PlaceholderNames, tag_for_element};
use crate::transform::rules::TransformRules;
use crate::utils::collapse_whitespace;

/// Why a candidate cannot be transformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnsupportedReason {
    LogicalExpression,
    UnsupportedExpression(&'static str),
    AlreadyTranslated,
    NestedDynamicContent,
    UnsupportedElement(String),
    Fragment,
    SpreadChild,
    UnsupportedBranchValue(&'static str),
    BranchLimitExceeded { count: usize, max: usize },
}

impl fmt::Display for UnsupportedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LogicalExpression => write!(f, "logical expression (&&, ||, ??) in content"),
            Self::UnsupportedExpression(kind) => write!(f, "unsupported expression: {}", kind),
            Self::AlreadyTranslated => write!(f, "content already calls the translate function"),
            Self::NestedDynamicContent => write!(f, "nested element contains dynamic content"),
            Self::UnsupportedElement(name) => write!(f, "unsupported element <{}>", name),
            Self::Fragment => write!(f, "fragment in content"),
            Self::SpreadChild => write!(f, "spread child in content"),
            Self::UnsupportedBranchValue(kind) => {
                write!(f, "unsupported conditional branch value: {}", kind)
            }
            Self::BranchLimitExceeded { count, max } => write!(
                f,
                "{} branch combinations exceed the limit of {}",
                count, max
            ),
        }
    }
}

/// How an expression inside content is treated.
#[derive(Debug, Clone)]
pub enum ExprClass<'a> {
    /// String literal, substitution-free template, `null` or `undefined`.
    Literal(String),
    Conditional(&'a CondExpr),
    Logical,
    /// Identifier, member access or call: interpolated as a param.
    Variable,
    /// A call to the translate function itself.
    TranslateCall,
    Element,
    Other(&'static str),
}

/// Classify an expression found in candidate content.
pub fn classify_expr<'a>(expr: &'a Expr, rules: &TransformRules) -> ExprClass<'a> {
    match unwrap_parens(expr) {
        Expr::Lit(Lit::Str(s)) => match s.value.as_str() {
            Some(value) => ExprClass::Literal(value.to_string()),
            None => ExprClass::Other("string with lone surrogates"),
        },
        Expr::Lit(Lit::Null(_)) => ExprClass::Literal(String::new()),
        Expr::Ident(ident) if ident.sym == "undefined" => ExprClass::Literal(String::new()),
        Expr::Tpl(tpl) if tpl.exprs.is_empty() => {
            match tpl
                .quasis
                .first()
                .and_then(|q| q.cooked.as_ref())
                .and_then(|c| c.as_str())
            {
                Some(value) => ExprClass::Literal(value.to_string()),
                None => ExprClass::Other("template literal"),
            }
        }
        Expr::Cond(cond) => ExprClass::Conditional(cond),
        Expr::Bin(bin)
            if matches!(
                bin.op,
                BinaryOp::LogicalAnd | BinaryOp::LogicalOr | BinaryOp::NullishCoalescing
            ) =>
        {
            ExprClass::Logical
        }
        Expr::Call(call) if is_translate_callee(&call.callee, rules) => ExprClass::TranslateCall,
        Expr::Ident(_) | Expr::Member(_) | Expr::OptChain(_) | Expr::Call(_) => {
            ExprClass::Variable
        }
        Expr::TsNonNull(inner) => match classify_expr(&inner.expr, rules) {
            ExprClass::Variable => ExprClass::Variable,
            _ => ExprClass::Other("non-null assertion"),
        },
        Expr::JSXElement(_) | Expr::JSXFragment(_) => ExprClass::Element,
        other => ExprClass::Other(expr_kind(other)),
    }
}

fn is_translate_callee(callee: &Callee, rules: &TransformRules) -> bool {
    matches!(
        callee,
        Callee::Expr(expr) if matches!(&**expr, Expr::Ident(ident) if ident.sym == rules.translate_function.as_str())
    )
}

/// Short human-readable name of an expression kind for diagnostics.
pub fn expr_kind(expr: &Expr) -> &'static str {
    match expr {
        Expr::Lit(Lit::Num(_)) => "number",
        Expr::Lit(Lit::Bool(_)) => "boolean",
        Expr::Lit(Lit::BigInt(_)) => "bigint",
        Expr::Lit(Lit::Regex(_)) => "regex",
        Expr::Lit(_) => "literal",
        Expr::Tpl(_) => "template literal",
        Expr::TaggedTpl(_) => "tagged template",
        Expr::Bin(_) => "binary expression",
        Expr::Unary(_) => "unary expression",
        Expr::Update(_) => "update expression",
        Expr::Assign(_) => "assignment",
        Expr::Arrow(_) | Expr::Fn(_) => "function",
        Expr::Array(_) => "array",
        Expr::Object(_) => "object",
        Expr::New(_) => "new expression",
        Expr::Seq(_) => "sequence expression",
        Expr::Await(_) => "await expression",
        Expr::Yield(_) => "yield expression",
        Expr::This(_) => "this",
        Expr::TsAs(_) | Expr::TsTypeAssertion(_) | Expr::TsSatisfies(_) => "type assertion",
        _ => "expression",
    }
}

/// An interpolated value.
#[derive(Debug, Clone)]
pub struct VariableRef<'a> {
    pub name: String,
    pub expr: &'a Expr,
}

/// A nested formatted element whose content is plain text.
#[derive(Debug, Clone)]
pub struct NestedElement<'a> {
    pub tag: String,
    pub content: String,
    pub element: &'a JSXElement,
}

/// A conditional found in content, flattened to its leaves.
#[derive(Debug, Clone)]
pub struct ConditionalInfo<'a> {
    pub expr: &'a CondExpr,
    /// Either outcome is itself a conditional.
    pub is_nested: bool,
    /// Every leaf is literal text.
    pub is_fully_literal: bool,
    pub has_variable_leaves: bool,
    pub has_element_leaves: bool,
    pub leaves: Vec<FlattenedLeaf<'a>>,
}

impl<'a> ConditionalInfo<'a> {
    pub fn test(&self) -> &'a Expr {
        &self.expr.test
    }

    pub fn consequent(&self) -> &'a Expr {
        &self.expr.cons
    }

    pub fn alternate(&self) -> &'a Expr {
        &self.expr.alt
    }

    pub fn branch_count(&self) -> usize {
        self.leaves.len()
    }
}

#[derive(Debug, Clone)]
pub struct ContentAnalysis<'a> {
    pub static_texts: Vec<String>,
    pub variables: Vec<VariableRef<'a>>,
    pub conditionals: Vec<ConditionalInfo<'a>>,
    pub nested_elements: Vec<NestedElement<'a>>,
    pub spacers: Vec<String>,
    pub unsupported: Option<UnsupportedReason>,
    /// Product of every conditional's branch count (1 without conditionals).
    pub total_branch_count: usize,
}

impl Default for ContentAnalysis<'_> {
    fn default() -> Self {
        Self {
            static_texts: Vec::new(),
            variables: Vec::new(),
            conditionals: Vec::new(),
            nested_elements: Vec::new(),
            spacers: Vec::new(),
            unsupported: None,
            total_branch_count: 1,
        }
    }
}

impl<'a> ContentAnalysis<'a> {
    pub fn has_static_text(&self) -> bool {
        !self.static_texts.is_empty()
    }

    /// Variables anywhere in the content, including conditional leaves.
    pub fn has_variables(&self) -> bool {
        !self.variables.is_empty() || self.conditionals.iter().any(|c| c.has_variable_leaves)
    }

    pub fn has_nested_elements(&self) -> bool {
        !self.nested_elements.is_empty()
    }

    pub fn all_conditionals_fully_literal(&self) -> bool {
        self.conditionals.iter().all(|c| c.is_fully_literal)
    }

    pub fn push_conditional(&mut self, info: ConditionalInfo<'a>) {
        self.conditionals.push(info);
        // Saturating, so overflow still exceeds any limit
        self.total_branch_count = self
            .conditionals
            .iter()
            .map(ConditionalInfo::branch_count)
            .try_fold(1usize, |total, count| total.checked_mul(count))
            .unwrap_or(usize::MAX);
    }

    /// Keeps the first reason; later ones add nothing.
    pub fn mark_unsupported(&mut self, reason: UnsupportedReason) {
        self.unsupported.get_or_insert(reason);
    }

    /// Enforce the branch limit, marking the analysis unsupported above it.
    pub fn check_branch_limit(&mut self, max: usize) {
        if self.total_branch_count > max {
            self.mark_unsupported(UnsupportedReason::BranchLimitExceeded {
                count: self.total_branch_count,
                max,
            });
        }
    }
}

/// Name of an element, or `None` for member and namespaced names.
pub fn element_name(element: &JSXElement) -> Option<&str> {
    match &element.opening.name {
        JSXElementName::Ident(ident) => Some(&ident.sym),
        _ => None,
    }
}

fn display_element_name(element: &JSXElement, source: &SourceText) -> String {
    match element_name(element) {
        Some(name) => name.to_string(),
        None => {
            use swc_common::Spanned;
            source.slice(element.opening.name.span()).to_string()
        }
    }
}

/// Literal content of a nested element, whitespace collapsed.
///
/// Returns `None` when the element holds anything other than text, string
/// literals or comments.
pub fn literal_content(element: &JSXElement, rules: &TransformRules) -> Option<String> {
    let mut content = String::new();
    for child in &element.children {
        match child {
            JSXElementChild::JSXText(text) => content.push_str(&text.value),
            JSXElementChild::JSXExprContainer(container) => match &container.expr {
                JSXExpr::JSXEmptyExpr(_) => {}
                JSXExpr::Expr(expr) => match classify_expr(expr, rules) {
                    ExprClass::Literal(value) => content.push_str(&value),
                    _ => return None,
                },
            },
            _ => return None,
        }
    }
    Some(collapse_whitespace(&content))
}

struct Analyzer<'r> {
    rules: &'r TransformRules,
    source: &'r SourceText,
    names: PlaceholderNames,
}

impl<'r> Analyzer<'r> {
    fn child<'a>(
        &mut self,
        child: &'a JSXElementChild,
        analysis: &mut ContentAnalysis<'a>,
    ) -> Result<(), UnsupportedReason> {
        match child {
            JSXElementChild::JSXText(text) => {
                self.literal(&text.value, analysis);
                Ok(())
            }
            JSXElementChild::JSXExprContainer(container) => match &container.expr {
                JSXExpr::JSXEmptyExpr(_) => Ok(()),
                JSXExpr::Expr(expr) => self.expr(expr, analysis),
            },
            JSXElementChild::JSXElement(element) => self.nested(element, analysis),
            JSXElementChild::JSXFragment(_) => Err(UnsupportedReason::Fragment),
            JSXElementChild::JSXSpreadChild(_) => Err(UnsupportedReason::SpreadChild),
        }
    }

    fn literal(&mut self, value: &str, analysis: &mut ContentAnalysis<'_>) {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            analysis.spacers.push(value.to_string());
        } else {
            analysis.static_texts.push(collapse_whitespace(trimmed));
        }
    }

    fn expr<'a>(
        &mut self,
        expr: &'a Expr,
        analysis: &mut ContentAnalysis<'a>,
    ) -> Result<(), UnsupportedReason> {
        use swc_common::Spanned;

        match classify_expr(expr, self.rules) {
            ExprClass::Literal(value) => {
                self.literal(&value, analysis);
                Ok(())
            }
            ExprClass::Conditional(cond) => {
                let info = self.conditional(cond)?;
                analysis.push_conditional(info);
                Ok(())
            }
            ExprClass::Variable => {
                let name = self
                    .names
                    .for_expr(expr, self.source.slice(unwrap_parens(expr).span()));
                analysis.variables.push(VariableRef {
                    name,
                    expr: unwrap_parens(expr),
                });
                Ok(())
            }
            ExprClass::Logical => Err(UnsupportedReason::LogicalExpression),
            ExprClass::TranslateCall => Err(UnsupportedReason::AlreadyTranslated),
            ExprClass::Element => Err(UnsupportedReason::UnsupportedExpression("inline element")),
            ExprClass::Other(kind) => Err(UnsupportedReason::UnsupportedExpression(kind)),
        }
    }

    fn conditional<'a>(
        &mut self,
        cond: &'a CondExpr,
    ) -> Result<ConditionalInfo<'a>, UnsupportedReason> {
        let leaves = flatten_conditional(cond);
        let is_nested = as_conditional(&cond.cons).is_some() || as_conditional(&cond.alt).is_some();

        let mut info = ConditionalInfo {
            expr: cond,
            is_nested,
            is_fully_literal: true,
            has_variable_leaves: false,
            has_element_leaves: false,
            leaves: Vec::new(),
        };

        for leaf in &leaves {
            match classify_expr(leaf.value, self.rules) {
                ExprClass::Literal(_) => {}
                ExprClass::Variable => {
                    info.is_fully_literal = false;
                    info.has_variable_leaves = true;
                }
                ExprClass::Element => {
                    info.is_fully_literal = false;
                    info.has_element_leaves = true;
                }
                ExprClass::TranslateCall => return Err(UnsupportedReason::AlreadyTranslated),
                ExprClass::Logical => return Err(UnsupportedReason::LogicalExpression),
                ExprClass::Conditional(_) => {
                    return Err(UnsupportedReason::UnsupportedBranchValue("conditional"));
                }
                ExprClass::Other(kind) => {
                    return Err(UnsupportedReason::UnsupportedBranchValue(kind));
                }
            }
        }

        info.leaves = leaves;
        Ok(info)
    }

    fn nested<'a>(
        &mut self,
        element: &'a JSXElement,
        analysis: &mut ContentAnalysis<'a>,
    ) -> Result<(), UnsupportedReason> {
        match element_name(element) {
            Some(name) if self.rules.is_text_component(name) => {}
            _ => {
                return Err(UnsupportedReason::UnsupportedElement(display_element_name(
                    element,
                    self.source,
                )));
            }
        }

        let content =
            literal_content(element, self.rules).ok_or(UnsupportedReason::NestedDynamicContent)?;
        let tag = self.names.unique(tag_for_element(&element.opening));
        analysis.nested_elements.push(NestedElement {
            tag,
            content,
            element,
        });
        Ok(())
    }
}

/// Analyze the children of one candidate element.
///
/// Stops at the first unsupported child. The branch limit is checked after
/// the full pass.
pub fn analyze_children<'a>(
    children: &'a [JSXElementChild],
    rules: &TransformRules,
    source: &SourceText,
) -> ContentAnalysis<'a> {
    let mut analysis = ContentAnalysis::default();
    let mut analyzer = Analyzer {
        rules,
        source,
        names: PlaceholderNames::new(),
    };

    for child in children {
        if let Err(reason) = analyzer.child(child, &mut analysis) {
            analysis.mark_unsupported(reason);
            return analysis;
        }
    }

    analysis.check_branch_limit(rules.max_branch_count);
    analysis
}
