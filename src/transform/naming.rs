//! Placeholder naming for interpolated values and nested elements.

use std::collections::{HashMap, HashSet};

use swc_ecma_ast::{
    Callee, Expr, JSXAttrName, JSXAttrOrSpread, JSXAttrValue, JSXExpr, JSXOpeningElement, Lit,
    MemberExpr, MemberProp, OptChainBase,
};

use crate::transform::branches::unwrap_parens;

/// Fallback placeholder name when nothing readable can be derived.
pub const FALLBACK_NAME: &str = "value";

/// Derive a readable placeholder name from an interpolated expression.
///
/// - `name` -> `name`
/// - `user.name`, `user?.name`, `row["name"]` -> `name`
/// - `format(x)` -> `format`
/// - `items.join(", ")` -> `items`
pub fn derive_display_name(expr: &Expr) -> Option<String> {
    match unwrap_parens(expr) {
        Expr::Ident(ident) => Some(ident.sym.to_string()),
        Expr::Member(member) => member_name(member),
        Expr::OptChain(chain) => match &*chain.base {
            OptChainBase::Member(member) => member_name(member),
            OptChainBase::Call(call) => call_name(&call.callee),
        },
        Expr::Call(call) => match &call.callee {
            Callee::Expr(callee) => call_name(callee),
            _ => None,
        },
        Expr::TsNonNull(inner) => derive_display_name(&inner.expr),
        Expr::TsAs(inner) => derive_display_name(&inner.expr),
        _ => None,
    }
    .map(|name| sanitize(&name))
    .filter(|name| !name.is_empty())
}

fn member_name(member: &MemberExpr) -> Option<String> {
    match &member.prop {
        MemberProp::Ident(prop) => Some(prop.sym.to_string()),
        MemberProp::Computed(computed) => match &*computed.expr {
            Expr::Lit(Lit::Str(s)) => s.value.as_str().map(str::to_string),
            _ => derive_display_name(&member.obj),
        },
        MemberProp::PrivateName(private) => Some(private.name.to_string()),
    }
}

/// For calls on a member expression the base object names the value,
/// otherwise the called function does.
fn call_name(callee: &Expr) -> Option<String> {
    match unwrap_parens(callee) {
        Expr::Member(member) => object_name(&member.obj),
        Expr::OptChain(chain) => match &*chain.base {
            OptChainBase::Member(member) => object_name(&member.obj),
            OptChainBase::Call(_) => None,
        },
        other => derive_display_name(other),
    }
}

fn object_name(obj: &Expr) -> Option<String> {
    match unwrap_parens(obj) {
        Expr::This(_) => None,
        other => derive_display_name(other),
    }
}

/// Keep only identifier characters so the name is usable as an object key.
fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '$')
        .collect();
    match cleaned.chars().next() {
        Some(c) if c.is_numeric() => format!("_{}", cleaned),
        _ => cleaned,
    }
}

/// Placeholder tag for a nested formatted element, from its attributes.
pub fn tag_for_element(opening: &JSXOpeningElement) -> &'static str {
    const FORMATTING: [(&str, &str); 4] = [
        ("bold", "bold"),
        ("italic", "italic"),
        ("color", "accent"),
        ("underline", "underline"),
    ];
    FORMATTING
        .iter()
        .find(|(attr, _)| has_enabled_attr(opening, attr))
        .map(|(_, tag)| *tag)
        .unwrap_or("styled")
}

/// True when the attribute is present and not explicitly `{false}`.
fn has_enabled_attr(opening: &JSXOpeningElement, name: &str) -> bool {
    opening.attrs.iter().any(|attr| {
        let JSXAttrOrSpread::JSXAttr(attr) = attr else {
            return false;
        };
        let JSXAttrName::Ident(ident) = &attr.name else {
            return false;
        };
        if ident.sym != name {
            return false;
        }
        !matches!(
            &attr.value,
            Some(JSXAttrValue::JSXExprContainer(container))
                if matches!(&container.expr, JSXExpr::Expr(expr) if matches!(&**expr, Expr::Lit(Lit::Bool(b)) if !b.value))
        )
    })
}

/// Allocates unique placeholder names within one node.
///
/// Params and component tags share one namespace so a name never refers to
/// both. The same expression text always maps back to the same name.
#[derive(Debug, Default)]
pub struct PlaceholderNames {
    taken: HashSet<String>,
    by_source: HashMap<String, String>,
}

impl PlaceholderNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name for an interpolated expression, reusing the name of an earlier
    /// occurrence of the same source text.
    pub fn for_expr(&mut self, expr: &Expr, source_text: &str) -> String {
        if let Some(name) = self.by_source.get(source_text) {
            return name.clone();
        }
        let base = derive_display_name(expr).unwrap_or_else(|| FALLBACK_NAME.to_string());
        let name = self.unique(&base);
        self.by_source.insert(source_text.to_string(), name.clone());
        name
    }

    /// Next free name for `base`: `base`, `base2`, `base3`, ...
    pub fn unique(&mut self, base: &str) -> String {
        let mut n = 1;
        loop {
            let candidate = if n == 1 {
                base.to_string()
            } else {
                format!("{}{}", base, n)
            };
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}
