//! Builds replacement code for a candidate from its strategy and templates.
//!
//! A [`Replacement`] owns everything it needs (keys, verbatim source of
//! params, guards and component clones), so rendering does not borrow the
//! syntax tree. The walker installs the rendered text over the node's span.

use swc_common::Spanned;
use swc_ecma_ast::{Expr, JSXElement};

use crate::core::parsers::jsx::SourceText;
use crate::transform::analysis::ContentAnalysis;
use crate::transform::branches::{GuardCondition, branch_combinations, unwrap_parens};
use crate::transform::record::TransformationRecord;
use crate::transform::rules::TransformRules;
use crate::transform::strategy::{SkipReason, TransformStrategy};
use crate::transform::template::{Template, build_template, is_valid_key};

/// One entry of a params object: `name` or `name: value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamArg {
    pub name: String,
    pub value: String,
}

impl ParamArg {
    fn render(&self) -> String {
        if self.name == self.value {
            self.name.clone()
        } else {
            format!("{}: {}", self.name, self.value)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replacement {
    /// `t("key", { name })`
    Call {
        function: String,
        key: String,
        params: Vec<ParamArg>,
    },
    /// `<I18nText i18nKey={"key"} components={{ bold: <Text bold /> }} />`
    Template {
        component: String,
        key_prop: String,
        key: String,
        components: Vec<(String, String)>,
        params: Vec<ParamArg>,
    },
    /// `g1 ? r1 : g2 ? r2 : fallback`
    Conditional {
        branches: Vec<(String, Replacement)>,
        fallback: Box<Replacement>,
    },
}

/// Double-quoted JavaScript string literal.
pub fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

fn render_params(params: &[ParamArg]) -> String {
    let fields: Vec<String> = params.iter().map(ParamArg::render).collect();
    format!("{{ {} }}", fields.join(", "))
}

impl Replacement {
    /// Render as a JavaScript expression.
    pub fn render(&self) -> String {
        match self {
            Self::Call {
                function,
                key,
                params,
            } => {
                if params.is_empty() {
                    format!("{}({})", function, js_string(key))
                } else {
                    format!("{}({}, {})", function, js_string(key), render_params(params))
                }
            }
            Self::Template {
                component,
                key_prop,
                key,
                components,
                params,
            } => {
                let mut out = format!("<{} {}={{{}}}", component, key_prop, js_string(key));
                if !components.is_empty() {
                    let fields: Vec<String> = components
                        .iter()
                        .map(|(tag, clone)| format!("{}: {}", tag, clone))
                        .collect();
                    out.push_str(&format!(" components={{{{ {} }}}}", fields.join(", ")));
                }
                if !params.is_empty() {
                    out.push_str(&format!(" params={{{}}}", render_params(params)));
                }
                out.push_str(" />");
                out
            }
            Self::Conditional { branches, fallback } => {
                let mut out = String::new();
                for (guard, branch) in branches {
                    out.push_str(&format!("{} ? {} : ", guard, branch.render()));
                }
                out.push_str(&fallback.render());
                out
            }
        }
    }

    /// Render as a JSX child: elements stand alone, expressions get braces.
    pub fn render_as_child(&self) -> String {
        match self {
            Self::Template { .. } => self.render(),
            _ => format!("{{{}}}", self.render()),
        }
    }

    pub fn uses_translate_function(&self) -> bool {
        match self {
            Self::Call { .. } => true,
            Self::Template { .. } => false,
            Self::Conditional { branches, fallback } => {
                fallback.uses_translate_function()
                    || branches.iter().any(|(_, b)| b.uses_translate_function())
            }
        }
    }

    pub fn uses_template_component(&self) -> bool {
        match self {
            Self::Call { .. } => false,
            Self::Template { .. } => true,
            Self::Conditional { branches, fallback } => {
                fallback.uses_template_component()
                    || branches.iter().any(|(_, b)| b.uses_template_component())
            }
        }
    }
}

/// A successful rewrite of one node.
#[derive(Debug, Clone)]
pub struct Rewrite {
    pub replacement: Replacement,
    pub records: Vec<TransformationRecord>,
}

/// Expressions that bind tighter than every operator a guard is combined
/// with and can be negated or joined as-is.
fn is_atomic(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Ident(_)
            | Expr::Member(_)
            | Expr::SuperProp(_)
            | Expr::Call(_)
            | Expr::OptChain(_)
            | Expr::Lit(_)
            | Expr::Tpl(_)
            | Expr::This(_)
            | Expr::Paren(_)
            | Expr::Unary(_)
            | Expr::TsNonNull(_)
    )
}

/// Cannot appear unparenthesized as the test of a conditional.
fn needs_parens_as_test(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Cond(_) | Expr::Assign(_) | Expr::Seq(_) | Expr::Arrow(_) | Expr::Yield(_)
    )
}

fn render_guard(guards: &[GuardCondition], source: &SourceText) -> String {
    if let [single] = guards
        && !single.negated
    {
        let text = source.slice(single.test.span());
        return if needs_parens_as_test(single.test) {
            format!("({})", text)
        } else {
            text.to_string()
        };
    }

    guards
        .iter()
        .map(|guard| {
            let test = unwrap_parens(guard.test);
            let text = source.slice(test.span());
            let atom = if is_atomic(test) {
                text.to_string()
            } else {
                format!("({})", text)
            };
            if guard.negated {
                format!("!{}", atom)
            } else {
                atom
            }
        })
        .collect::<Vec<_>>()
        .join(" && ")
}

/// The outer element's opening tag as a self-closing element.
fn self_closing_clone(element: &JSXElement, source: &SourceText) -> String {
    let opening = source.slice(element.opening.span);
    if element.opening.self_closing {
        return opening.to_string();
    }
    let head = opening.strip_suffix('>').unwrap_or(opening).trim_end();
    format!("{} />", head)
}

fn param_args(template: &Template, source: &SourceText) -> Vec<ParamArg> {
    template
        .params
        .iter()
        .map(|(name, expr)| ParamArg {
            name: name.clone(),
            value: source.slice(expr.span()).to_string(),
        })
        .collect()
}

fn leaf_replacement(
    template: &Template,
    templated: bool,
    rules: &TransformRules,
    source: &SourceText,
) -> Replacement {
    if templated {
        Replacement::Template {
            component: rules.template_component.clone(),
            key_prop: rules.template_key_prop.clone(),
            key: template.key.clone(),
            components: template
                .components
                .iter()
                .map(|(tag, element)| (tag.clone(), self_closing_clone(element, source)))
                .collect(),
            params: param_args(template, source),
        }
    } else {
        Replacement::Call {
            function: rules.translate_function.clone(),
            key: template.key.clone(),
            params: param_args(template, source),
        }
    }
}

fn checked<'a>(template: Template<'a>) -> Result<Template<'a>, SkipReason> {
    if template.is_valid() {
        Ok(template)
    } else {
        Err(SkipReason::InvalidKey(template.key))
    }
}

/// Rewrite the children of a candidate element according to `strategy`.
///
/// Fails with the skip reason when the strategy is a skip or any built key is
/// invalid; nothing is rewritten in that case.
pub fn rewrite_element<'a>(
    element: &'a JSXElement,
    analysis: &ContentAnalysis<'a>,
    strategy: &TransformStrategy,
    rules: &TransformRules,
    source: &SourceText,
    line: usize,
) -> Result<Rewrite, SkipReason> {
    if let TransformStrategy::Skip(reason) = strategy {
        return Err(reason.clone());
    }
    let kind = strategy.as_str();
    let templated = strategy.is_templated();

    if !strategy.is_branched() {
        let template = checked(build_template(
            &element.children,
            analysis,
            &[],
            rules,
            source,
        ))?;
        let replacement = leaf_replacement(&template, templated, rules, source);
        let record = TransformationRecord::new(kind, &template.key, replacement.render(), line)
            .with_params(template.param_names());
        return Ok(Rewrite {
            replacement,
            records: vec![record],
        });
    }

    let counts: Vec<usize> = analysis
        .conditionals
        .iter()
        .map(|c| c.branch_count())
        .collect();

    let mut branches = Vec::new();
    let mut records: Vec<TransformationRecord> = Vec::new();
    for combination in branch_combinations(&counts) {
        let template = checked(build_template(
            &element.children,
            analysis,
            &combination,
            rules,
            source,
        ))?;
        let leaf = leaf_replacement(&template, templated, rules, source);

        if !records.iter().any(|r| r.original_key == template.key) {
            records.push(
                TransformationRecord::new(kind, &template.key, leaf.render(), line)
                    .with_params(template.param_names()),
            );
        }

        let guards: Vec<GuardCondition> = combination
            .iter()
            .enumerate()
            .flat_map(|(index, &choice)| analysis.conditionals[index].leaves[choice].guards.clone())
            .collect();
        branches.push((render_guard(&guards, source), leaf));
    }

    let Some((_, fallback)) = branches.pop() else {
        return Err(SkipReason::NoStaticText);
    };
    Ok(Rewrite {
        replacement: Replacement::Conditional {
            branches,
            fallback: Box::new(fallback),
        },
        records,
    })
}

/// Rewrite the string value of a translatable object field.
pub fn rewrite_property(
    field: &str,
    value: &str,
    rules: &TransformRules,
    line: usize,
) -> Result<Rewrite, SkipReason> {
    if rules.is_debug_text(value) {
        return Err(SkipReason::DebugText);
    }
    let key = rules.rebrand.apply(value);
    if !is_valid_key(key.trim()) {
        return Err(SkipReason::InvalidKey(key));
    }

    let replacement = Replacement::Call {
        function: rules.translate_function.clone(),
        key: key.clone(),
        params: Vec::new(),
    };
    let record = TransformationRecord::new(
        format!("property:{}", field),
        key,
        replacement.render(),
        line,
    );
    Ok(Rewrite {
        replacement,
        records: vec![record],
    })
}
