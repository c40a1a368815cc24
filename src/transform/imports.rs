//! Import bookkeeping for rewritten files.

use swc_ecma_ast::{Expr, ImportSpecifier, Lit, Module, ModuleDecl, ModuleItem, Stmt};

use crate::core::parsers::jsx::SourceText;
use crate::transform::rules::TransformRules;

/// Which of the injected symbols a file already binds.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FileImportState {
    pub has_translate_import: bool,
    pub has_template_component_import: bool,
}

impl FileImportState {
    /// Any import binding the same local name counts, whatever its source.
    pub fn scan(module: &Module, rules: &TransformRules) -> Self {
        let mut state = Self::default();
        for item in &module.body {
            let ModuleItem::ModuleDecl(ModuleDecl::Import(import)) = item else {
                continue;
            };
            for specifier in &import.specifiers {
                let local: &str = match specifier {
                    ImportSpecifier::Named(named) => &named.local.sym,
                    ImportSpecifier::Default(default) => &default.local.sym,
                    ImportSpecifier::Namespace(namespace) => &namespace.local.sym,
                };
                if local == rules.translate_function {
                    state.has_translate_import = true;
                }
                if local == rules.template_component {
                    state.has_template_component_import = true;
                }
            }
        }
        state
    }

    /// Symbols that are used but not yet imported, in declaration order.
    pub fn missing<'r>(
        &self,
        uses_translate: bool,
        uses_template: bool,
        rules: &'r TransformRules,
    ) -> Vec<&'r str> {
        let mut symbols = Vec::new();
        if uses_translate && !self.has_translate_import {
            symbols.push(rules.translate_function.as_str());
        }
        if uses_template && !self.has_template_component_import {
            symbols.push(rules.template_component.as_str());
        }
        symbols
    }
}

pub fn import_declaration(symbols: &[&str], source: &str) -> String {
    format!(
        "import {{ {} }} from {};",
        symbols.join(", "),
        crate::transform::rewriter::js_string(source)
    )
}

/// Byte offset just past a leading `#!` line, or 0.
pub fn shebang_end(code: &str) -> usize {
    if !code.starts_with("#!") {
        return 0;
    }
    code.find('\n').map(|i| i + 1).unwrap_or(code.len())
}

/// Where injected imports go, and the text to insert there.
///
/// After the directive prologue (`"use client";` and friends) when one
/// exists, otherwise at the top of the file below any shebang.
pub fn import_insertion(module: &Module, source: &SourceText, declaration: &str) -> (usize, String) {
    let last_directive = module
        .body
        .iter()
        .take_while(|item| {
            matches!(
                item,
                ModuleItem::Stmt(Stmt::Expr(stmt)) if matches!(&*stmt.expr, Expr::Lit(Lit::Str(_)))
            )
        })
        .last();

    match last_directive {
        Some(ModuleItem::Stmt(stmt)) => {
            use swc_common::Spanned;
            (source.offset(stmt.span().hi), format!("\n{}", declaration))
        }
        _ => (shebang_end(source.as_str()), format!("{}\n", declaration)),
    }
}
