//! Shared fixtures for the transform unit tests.

use std::sync::Arc;

use swc_common::SourceMap;
use swc_ecma_ast::{JSXElement, JSXElementName};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::parsers::jsx::{SourceText, parse_jsx_source};

struct FirstCandidate<'a> {
    found: Option<&'a JSXElement>,
}

impl<'a> FirstCandidate<'a> {
    fn find(module: &'a swc_ecma_ast::Module) -> Option<&'a JSXElement> {
        use swc_ecma_ast::{ModuleItem, Stmt};

        let mut finder = FirstCandidate { found: None };
        for item in &module.body {
            if let ModuleItem::Stmt(Stmt::Expr(stmt)) = item {
                finder.expr(&stmt.expr);
            }
            if finder.found.is_some() {
                break;
            }
        }
        finder.found
    }

    fn expr(&mut self, expr: &'a swc_ecma_ast::Expr) {
        use swc_ecma_ast::Expr;

        match expr {
            Expr::JSXElement(element) => {
                if matches!(&element.opening.name, JSXElementName::Ident(i) if i.sym == "Text") {
                    self.found = Some(element);
                }
            }
            Expr::Paren(paren) => self.expr(&paren.expr),
            _ => {}
        }
    }
}

/// Parse `code` (a JSX expression, `;` optional) and run `f` on the first
/// top-level `<Text>` element.
pub fn with_first_candidate<R>(code: &str, f: impl FnOnce(&JSXElement, &SourceText) -> R) -> R {
    let code = if code.trim_end().ends_with(';') {
        code.to_string()
    } else {
        format!("{};", code)
    };
    let parsed = parse_jsx_source(code, "test.tsx", Arc::new(SourceMap::default()))
        .expect("fixture should parse");
    let element = FirstCandidate::find(&parsed.module).expect("fixture has a <Text> element");
    f(element, &parsed.source)
}

/// Count `<Text>` elements anywhere in `code`.
pub fn count_candidates(code: &str) -> usize {
    struct Counter(usize);

    impl Visit for Counter {
        fn visit_jsx_element(&mut self, element: &JSXElement) {
            if matches!(&element.opening.name, JSXElementName::Ident(i) if i.sym == "Text") {
                self.0 += 1;
            }
            element.visit_children_with(self);
        }
    }

    let parsed = parse_jsx_source(code.to_string(), "test.tsx", Arc::new(SourceMap::default()))
        .expect("fixture should parse");
    let mut counter = Counter(0);
    parsed.module.visit_with(&mut counter);
    counter.0
}
