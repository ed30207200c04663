//! Per-file rewriting: parse, collect specifier sites, resolve, splice.

use std::path::Path;

use modalias_resolver::Resolver;
use oxc_allocator::Allocator;
use oxc_ast_visit::Visit;
use oxc_parser::{Parser, ParserReturn};
use oxc_span::SourceType;

use crate::collect::{Delimiter, SpecifierCollector, SpecifierKind, SpecifierSite};
use crate::error::{Result, TransformError};

/// One specifier that was replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub kind: SpecifierKind,
    pub original: String,
    pub replacement: String,
    /// Byte offset of the literal's contents in the original source.
    pub start: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
    pub code: String,
    pub rewrites: Vec<Rewrite>,
}

impl TransformOutput {
    pub fn changed(&self) -> bool {
        !self.rewrites.is_empty()
    }
}

/// Rewrites aliased specifiers in one source file at a time.
#[derive(Debug, Clone)]
pub struct Transformer {
    resolver: Resolver,
}

impl Transformer {
    pub fn new(resolver: Resolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Rewrite `source`, the contents of `filename`.
    ///
    /// Only the contents of rewritten literals change; every other byte of the
    /// input is preserved.
    pub fn transform(&self, source: &str, filename: &Path) -> Result<TransformOutput> {
        let allocator = Allocator::default();
        let source_type = source_type_for(filename);

        let ParserReturn {
            program, errors, ..
        } = Parser::new(&allocator, source, source_type).parse();

        if let Some(error) = errors.first() {
            return Err(TransformError::Parse {
                path: filename.to_path_buf(),
                message: error.message.to_string(),
            });
        }

        let mut collector = SpecifierCollector::new(source);
        collector.visit_program(&program);
        let sites = collector.into_sites();

        let mut code = String::with_capacity(source.len());
        let mut rewrites = Vec::new();
        let mut cursor = 0usize;

        for site in sites {
            let Some(replacement) = self.replacement_for(&site, filename) else {
                continue;
            };

            let (start, end) = (site.start as usize, site.end as usize);
            code.push_str(&source[cursor..start]);
            code.push_str(&escape(&replacement, site.delimiter));
            cursor = end;

            tracing::debug!(
                "{}: rewrote {} {} -> {}",
                filename.display(),
                site.kind,
                site.value,
                replacement
            );
            rewrites.push(Rewrite {
                kind: site.kind,
                original: site.value,
                replacement,
                start: site.start,
            });
        }
        code.push_str(&source[cursor..]);

        Ok(TransformOutput { code, rewrites })
    }

    fn replacement_for(&self, site: &SpecifierSite, filename: &Path) -> Option<String> {
        if !is_bare_specifier(&site.value) {
            return None;
        }
        self.resolver
            .resolve(&site.value, filename)
            .into_replacement()
            .filter(|replacement| *replacement != site.value)
    }
}

/// Parser settings for `filename`.
///
/// JSX is accepted in every JavaScript flavour since `.js` React sources are
/// common. Unknown extensions such as `.es` and `.es6` parse as ES modules.
fn source_type_for(filename: &Path) -> SourceType {
    match SourceType::from_path(filename) {
        Ok(source_type) if source_type.is_javascript() => source_type.with_jsx(true),
        Ok(source_type) => source_type,
        Err(_) => SourceType::mjs().with_jsx(true),
    }
}

/// Only bare specifiers are alias candidates; relative and absolute paths
/// are already file references.
pub fn is_bare_specifier(specifier: &str) -> bool {
    !specifier.is_empty() && !specifier.starts_with('.') && !specifier.starts_with('/')
}

fn escape(text: &str, delimiter: Delimiter) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match (c, delimiter) {
            ('\\', _) => out.push_str("\\\\"),
            ('\n', Delimiter::Quote(_)) => out.push_str("\\n"),
            (c, Delimiter::Quote(q)) if c == q => {
                out.push('\\');
                out.push(c);
            }
            ('`', Delimiter::Backtick) => out.push_str("\\`"),
            ('$', Delimiter::Backtick) if chars.peek() == Some(&'{') => out.push_str("\\$"),
            (c, _) => out.push(c),
        }
    }
    out
}
