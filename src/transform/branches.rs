//! Branch flattening for conditional (`?:`) content.
//!
//! A conditional, possibly with further conditionals in its outcomes, is
//! expanded into the list of leaves it can evaluate to. Each leaf carries the
//! guard conditions that select it:
//!
//! ```text
//! a ? "x" : b ? "y" : "z"
//!   => [a]        -> "x"
//!      [!a, b]    -> "y"
//!      [!a, !b]   -> "z"
//! ```
//!
//! Flattening is local to one conditional. Combining sibling conditionals is
//! done with [`branch_combinations`] by the caller.

use swc_ecma_ast::{CondExpr, Expr};

/// One boolean test on the path to a leaf.
#[derive(Debug, Clone, Copy)]
pub struct GuardCondition<'a> {
    pub test: &'a Expr,
    pub negated: bool,
}

/// A reachable outcome of a conditional and the guards selecting it.
#[derive(Debug, Clone)]
pub struct FlattenedLeaf<'a> {
    pub guards: Vec<GuardCondition<'a>>,
    pub value: &'a Expr,
}

/// Strip any number of wrapping parentheses.
pub fn unwrap_parens(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(paren) => unwrap_parens(&paren.expr),
        _ => expr,
    }
}

/// Returns the conditional behind `expr`, looking through parentheses.
pub fn as_conditional(expr: &Expr) -> Option<&CondExpr> {
    match unwrap_parens(expr) {
        Expr::Cond(cond) => Some(cond),
        _ => None,
    }
}

/// Expand a conditional into all of its leaves, in source order.
pub fn flatten_conditional(cond: &CondExpr) -> Vec<FlattenedLeaf<'_>> {
    let mut leaves = Vec::new();
    let mut guards = Vec::new();
    flatten_cond_into(cond, &mut guards, &mut leaves);
    leaves
}

fn flatten_cond_into<'a>(
    cond: &'a CondExpr,
    guards: &mut Vec<GuardCondition<'a>>,
    out: &mut Vec<FlattenedLeaf<'a>>,
) {
    guards.push(GuardCondition {
        test: &cond.test,
        negated: false,
    });
    flatten_expr_into(&cond.cons, guards, out);
    guards.pop();

    guards.push(GuardCondition {
        test: &cond.test,
        negated: true,
    });
    flatten_expr_into(&cond.alt, guards, out);
    guards.pop();
}

fn flatten_expr_into<'a>(
    expr: &'a Expr,
    guards: &mut Vec<GuardCondition<'a>>,
    out: &mut Vec<FlattenedLeaf<'a>>,
) {
    match as_conditional(expr) {
        Some(cond) => flatten_cond_into(cond, guards, out),
        None => out.push(FlattenedLeaf {
            guards: guards.clone(),
            value: unwrap_parens(expr),
        }),
    }
}

/// Cartesian product of leaf indices, one index per conditional.
///
/// The first conditional varies slowest, so combinations come out in the
/// order a reader scans the branches. An empty input yields one empty
/// combination.
pub fn branch_combinations(branch_counts: &[usize]) -> Vec<Vec<usize>> {
    branch_counts
        .iter()
        .fold(vec![Vec::new()], |combos, &count| {
            let mut next = Vec::with_capacity(combos.len() * count);
            for prefix in &combos {
                for leaf in 0..count {
                    let mut combo = prefix.clone();
                    combo.push(leaf);
                    next.push(combo);
                }
            }
            next
        })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use swc_common::SourceMap;
    use swc_ecma_ast::{Lit, ModuleItem, Stmt};

    use super::*;
    use crate::core::parsers::jsx::{ParsedJSX, parse_jsx_source};

    fn parse_expr_stmt(code: &str) -> ParsedJSX {
        parse_jsx_source(code.to_string(), "test.tsx", Arc::new(SourceMap::default())).unwrap()
    }

    fn first_cond(parsed: &ParsedJSX) -> &CondExpr {
        let ModuleItem::Stmt(Stmt::Expr(stmt)) = &parsed.module.body[0] else {
            panic!("expected expression statement");
        };
        as_conditional(&stmt.expr).expect("conditional")
    }

    fn leaf_text(leaf: &FlattenedLeaf) -> String {
        match leaf.value {
            Expr::Lit(Lit::Str(s)) => s.value.as_str().unwrap_or_default().to_string(),
            _ => "<expr>".to_string(),
        }
    }

    fn guard_signs(leaf: &FlattenedLeaf) -> Vec<bool> {
        leaf.guards.iter().map(|g| g.negated).collect()
    }

    #[test]
    fn test_flat_conditional_has_two_leaves() {
        let parsed = parse_expr_stmt(r#"cond ? "Yes" : "No";"#);
        let leaves = flatten_conditional(first_cond(&parsed));

        assert_eq!(leaves.len(), 2);
        assert_eq!(leaf_text(&leaves[0]), "Yes");
        assert_eq!(guard_signs(&leaves[0]), vec![false]);
        assert_eq!(leaf_text(&leaves[1]), "No");
        assert_eq!(guard_signs(&leaves[1]), vec![true]);
    }

    #[test]
    fn test_nested_in_alternate() {
        let parsed = parse_expr_stmt(r#"a ? "x" : b ? "y" : "z";"#);
        let leaves = flatten_conditional(first_cond(&parsed));

        assert_eq!(leaves.len(), 3);
        assert_eq!(
            leaves.iter().map(leaf_text).collect::<Vec<_>>(),
            vec!["x", "y", "z"]
        );
        assert_eq!(guard_signs(&leaves[1]), vec![true, false]);
        assert_eq!(guard_signs(&leaves[2]), vec![true, true]);
    }

    #[test]
    fn test_nested_in_both_outcomes_through_parens() {
        let parsed = parse_expr_stmt(r#"a ? (b ? "1" : "2") : (c ? "3" : "4");"#);
        let leaves = flatten_conditional(first_cond(&parsed));

        assert_eq!(leaves.len(), 4);
        assert_eq!(
            leaves.iter().map(leaf_text).collect::<Vec<_>>(),
            vec!["1", "2", "3", "4"]
        );
        assert!(leaves.iter().all(|l| l.guards.len() == 2));
    }

    #[test]
    fn test_non_literal_leaf_is_kept() {
        let parsed = parse_expr_stmt(r#"a ? name : "none";"#);
        let leaves = flatten_conditional(first_cond(&parsed));
        assert_eq!(leaf_text(&leaves[0]), "<expr>");
        assert!(matches!(leaves[0].value, Expr::Ident(_)));
    }

    #[test]
    fn test_branch_combinations() {
        assert_eq!(branch_combinations(&[]), vec![Vec::<usize>::new()]);
        assert_eq!(branch_combinations(&[2]), vec![vec![0], vec![1]]);
        assert_eq!(
            branch_combinations(&[2, 3]),
            vec![
                vec![0, 0],
                vec![0, 1],
                vec![0, 2],
                vec![1, 0],
                vec![1, 1],
                vec![1, 2]
            ]
        );
        assert_eq!(branch_combinations(&[2, 2, 2]).len(), 8);
    }
}
