//! AST visitor that collects module specifier sites.
//!
//! A site is the text between the delimiters of a string or template literal
//! that names a module, together with enough position information to splice a
//! replacement back into the source.

use std::fmt;

use oxc_ast::ast::{
    Argument, CallExpression, ExportAllDeclaration, ExportNamedDeclaration, Expression,
    ImportDeclaration, ImportExpression, StringLiteral, TemplateLiteral,
};
use oxc_ast_visit::{Visit, walk};
use oxc_syntax::operator::BinaryOperator;

/// The syntactic form a specifier appeared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecifierKind {
    /// `import x from "m"` / `import "m"`
    Import,
    /// `export { x } from "m"` / `export * from "m"`
    ExportFrom,
    /// `import("m")`
    DynamicImport,
    /// `require("m")` / `require.resolve("m")`
    Require,
}

impl fmt::Display for SpecifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpecifierKind::Import => "import",
            SpecifierKind::ExportFrom => "export-from",
            SpecifierKind::DynamicImport => "dynamic-import",
            SpecifierKind::Require => "require",
        };
        f.write_str(name)
    }
}

/// Delimiter of the literal holding a specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Quote(char),
    Backtick,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecifierSite {
    pub kind: SpecifierKind,
    /// Specifier text as the program sees it (escapes decoded).
    pub value: String,
    /// Byte range of the literal's contents, delimiters excluded.
    pub start: u32,
    pub end: u32,
    pub delimiter: Delimiter,
}

/// Collects specifier sites in source order.
pub struct SpecifierCollector<'s> {
    source: &'s str,
    sites: Vec<SpecifierSite>,
}

impl<'s> SpecifierCollector<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            sites: Vec::new(),
        }
    }

    pub fn into_sites(mut self) -> Vec<SpecifierSite> {
        self.sites.sort_by_key(|site| site.start);
        self.sites
    }

    fn push_string(&mut self, kind: SpecifierKind, lit: &StringLiteral<'_>) {
        let quote = self.source[lit.span.start as usize..]
            .chars()
            .next()
            .unwrap_or('"');
        self.sites.push(SpecifierSite {
            kind,
            value: lit.value.to_string(),
            start: lit.span.start + 1,
            end: lit.span.end.saturating_sub(1),
            delimiter: Delimiter::Quote(quote),
        });
    }

    fn push_template(&mut self, kind: SpecifierKind, tpl: &TemplateLiteral<'_>) {
        let Some(head) = tpl.quasis.first() else {
            return;
        };
        let raw = head.value.raw.as_str();
        let value = head.value.cooked.as_ref().map_or(raw, |cooked| cooked.as_str());
        let start = tpl.span.start + 1;
        self.sites.push(SpecifierSite {
            kind,
            value: value.to_string(),
            start,
            end: start + raw.len() as u32,
            delimiter: Delimiter::Backtick,
        });
    }

    /// Record the leading literal of a call argument or dynamic import source.
    fn push_expression(&mut self, kind: SpecifierKind, expr: &Expression<'_>) {
        match leading_literal(expr) {
            Some(Expression::StringLiteral(lit)) => self.push_string(kind, lit),
            Some(Expression::TemplateLiteral(tpl)) => self.push_template(kind, tpl),
            _ => {}
        }
    }
}

/// Left-most operand of a `+` chain, parentheses stripped.
fn leading_literal<'e, 'a>(expr: &'e Expression<'a>) -> Option<&'e Expression<'a>> {
    let mut current = expr.without_parentheses();
    loop {
        match current {
            Expression::BinaryExpression(bin) if bin.operator == BinaryOperator::Addition => {
                current = bin.left.without_parentheses();
            }
            Expression::StringLiteral(_) | Expression::TemplateLiteral(_) => return Some(current),
            _ => return None,
        }
    }
}

/// `require(...)` or `require.<member>(...)`.
fn is_require_call(call: &CallExpression<'_>) -> bool {
    match &call.callee {
        Expression::Identifier(ident) => ident.name == "require",
        Expression::StaticMemberExpression(member) => {
            matches!(&member.object, Expression::Identifier(ident) if ident.name == "require")
        }
        _ => false,
    }
}

impl<'a, 's> Visit<'a> for SpecifierCollector<'s> {
    fn visit_import_declaration(&mut self, decl: &ImportDeclaration<'a>) {
        self.push_string(SpecifierKind::Import, &decl.source);
    }

    fn visit_export_named_declaration(&mut self, decl: &ExportNamedDeclaration<'a>) {
        if let Some(source) = &decl.source {
            self.push_string(SpecifierKind::ExportFrom, source);
        }
        // `export const x = require("m")`
        walk::walk_export_named_declaration(self, decl);
    }

    fn visit_export_all_declaration(&mut self, decl: &ExportAllDeclaration<'a>) {
        self.push_string(SpecifierKind::ExportFrom, &decl.source);
    }

    fn visit_import_expression(&mut self, expr: &ImportExpression<'a>) {
        self.push_expression(SpecifierKind::DynamicImport, &expr.source);
        walk::walk_import_expression(self, expr);
    }

    fn visit_call_expression(&mut self, call: &CallExpression<'a>) {
        if is_require_call(call) {
            if let Some(expr) = call.arguments.first().and_then(Argument::as_expression) {
                self.push_expression(SpecifierKind::Require, expr);
            }
        }
        walk::walk_call_expression(self, call);
    }
}
