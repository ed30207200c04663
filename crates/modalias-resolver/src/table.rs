//! The alias table: literal names with prefix-walk lookup, plus ordered
//! regular-expression patterns.

use indexmap::IndexMap;
use modalias_config::{ConfigError, LiteralTarget, NormalizedConfig, Result};
use regex::Regex;

use crate::template::Template;

/// A compiled pattern alias.
#[derive(Debug, Clone)]
pub struct PatternAlias {
    regex: Regex,
    template: Template,
    external: bool,
}

impl PatternAlias {
    pub fn new(pattern: &str, template: &str, external: bool) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
            key: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            regex,
            template: Template::parse(template),
            external,
        })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

/// Outcome of a table lookup, before any path arithmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasMatch<'t, 's> {
    /// A literal key matched a leading run of `/`-separated segments.
    Literal {
        key: &'t str,
        target: &'t LiteralTarget,
        /// The unmatched tail of the specifier, empty or starting with `/`.
        /// For the catch-all `""` key this is the whole specifier.
        rest: &'s str,
    },
    /// A pattern matched; `expanded` is the filled-in template.
    Pattern { expanded: String, external: bool },
}

/// Immutable alias lookup structure, built once per file transform.
///
/// Literal entries always win over patterns. Among literals the longest
/// matching segment prefix wins; among patterns the first one in
/// configuration order wins, so pattern precedence depends on configuration
/// order, not on how specific a pattern is.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    literals: IndexMap<String, LiteralTarget>,
    patterns: Vec<PatternAlias>,
}

impl AliasTable {
    /// Build from a normalized configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPattern` when a pattern key is not a valid
    /// regular expression.
    pub fn build(config: &NormalizedConfig) -> Result<Self> {
        let literals = config
            .literals()
            .map(|(key, target)| (key.to_string(), target.clone()))
            .collect::<IndexMap<_, _>>();

        let patterns = config
            .patterns()
            .map(|(pattern, template, external)| PatternAlias::new(pattern, template, external))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            "Built alias table with {} literal and {} pattern entries",
            literals.len(),
            patterns.len()
        );

        Ok(Self { literals, patterns })
    }

    pub fn len(&self) -> usize {
        self.literals.len() + self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn literal(&self, key: &str) -> Option<&LiteralTarget> {
        self.literals.get(key)
    }

    pub fn patterns(&self) -> &[PatternAlias] {
        &self.patterns
    }

    /// Find the alias for `specifier`.
    ///
    /// Tries the full specifier, then shrinks it one trailing segment at a
    /// time down to the empty prefix, looking for a literal key. Only when no
    /// prefix matches are patterns tried, in order, against the whole
    /// specifier.
    pub fn lookup<'t, 's>(&'t self, specifier: &'s str) -> Option<AliasMatch<'t, 's>> {
        if specifier.is_empty() {
            return None;
        }

        if let Some(found) = self.lookup_literal(specifier) {
            return Some(found);
        }

        self.patterns.iter().find_map(|alias| {
            alias.regex.captures(specifier).map(|caps| AliasMatch::Pattern {
                expanded: alias.template.expand(&caps),
                external: alias.external,
            })
        })
    }

    fn lookup_literal<'t, 's>(&'t self, specifier: &'s str) -> Option<AliasMatch<'t, 's>> {
        if self.literals.is_empty() {
            return None;
        }

        // Prefix boundaries: the whole string, then each `/` from the right
        let boundaries = std::iter::once(specifier.len())
            .chain(specifier.rmatch_indices('/').map(|(i, _)| i));

        for end in boundaries {
            let prefix = &specifier[..end];
            if let Some((key, target)) = self.literals.get_key_value(prefix) {
                return Some(AliasMatch::Literal {
                    key,
                    target,
                    rest: &specifier[end..],
                });
            }
        }

        // Catch-all entry at the empty prefix
        self.literals
            .get_key_value("")
            .map(|(key, target)| AliasMatch::Literal {
                key,
                target,
                rest: specifier,
            })
    }
}
