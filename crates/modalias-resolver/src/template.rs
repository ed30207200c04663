//! Substitution templates for pattern aliases.
//!
//! A template such as `./src/\1` is parsed once into literal and capture-group
//! tokens and expanded against each match. `\\` stands for a literal
//! backslash, `\N` (one or more digits) for capture group `N`; any other
//! backslash is kept as-is.

use regex::Captures;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateToken {
    Literal(String),
    Group(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    tokens: Vec<TemplateToken>,
}

impl Template {
    pub fn parse(source: &str) -> Self {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((_, c)) = chars.next() {
            if c != '\\' {
                literal.push(c);
                continue;
            }

            match chars.peek() {
                Some(&(_, '\\')) => {
                    chars.next();
                    literal.push('\\');
                }
                Some(&(start, d)) if d.is_ascii_digit() => {
                    let mut end = start;
                    while let Some(&(i, d)) = chars.peek() {
                        if !d.is_ascii_digit() {
                            break;
                        }
                        end = i + d.len_utf8();
                        chars.next();
                    }
                    if !literal.is_empty() {
                        tokens.push(TemplateToken::Literal(std::mem::take(&mut literal)));
                    }
                    // Out-of-range indices behave like missing groups
                    let index = source[start..end].parse().unwrap_or(usize::MAX);
                    tokens.push(TemplateToken::Group(index));
                }
                _ => literal.push('\\'),
            }
        }

        if !literal.is_empty() {
            tokens.push(TemplateToken::Literal(literal));
        }

        Self { tokens }
    }

    pub fn tokens(&self) -> &[TemplateToken] {
        &self.tokens
    }

    /// Expand against a match; missing or non-participating groups are empty.
    pub fn expand(&self, captures: &Captures<'_>) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            match token {
                TemplateToken::Literal(text) => out.push_str(text),
                TemplateToken::Group(index) => {
                    if let Some(group) = captures.get(*index) {
                        out.push_str(group.as_str());
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn expand(pattern: &str, template: &str, input: &str) -> String {
        let re = Regex::new(pattern).unwrap();
        let caps = re.captures(input).unwrap();
        Template::parse(template).expand(&caps)
    }

    #[test]
    fn parses_groups_and_literals() {
        let template = Template::parse("./src/\\1/x\\12");
        assert_eq!(
            template.tokens(),
            [
                TemplateToken::Literal("./src/".to_string()),
                TemplateToken::Group(1),
                TemplateToken::Literal("/x".to_string()),
                TemplateToken::Group(12),
            ]
        );
    }

    #[test]
    fn double_backslash_is_a_literal_backslash() {
        let template = Template::parse("a\\\\1b");
        assert_eq!(
            template.tokens(),
            [TemplateToken::Literal("a\\1b".to_string())]
        );
    }

    #[test]
    fn escaped_backslash_before_group() {
        // `\\\1` is a literal backslash followed by group 1
        assert_eq!(expand("^x/(.*)", "dir\\\\\\1", "x/file"), "dir\\file");
    }

    #[test]
    fn lone_backslash_is_kept() {
        let template = Template::parse("a\\b\\");
        assert_eq!(
            template.tokens(),
            [TemplateToken::Literal("a\\b\\".to_string())]
        );
    }

    #[test]
    fn expands_capture_groups() {
        assert_eq!(
            expand("^my-alias/(.*)", "./src/\\1", "my-alias/widgets/button"),
            "./src/widgets/button"
        );
        assert_eq!(
            expand("^(\\w+)-(\\w+)$", "./\\2/\\1", "core-utils"),
            "./utils/core"
        );
    }

    #[test]
    fn missing_groups_expand_to_empty() {
        assert_eq!(expand("^lib(/.*)?$", "./lib\\1\\7", "lib"), "./lib");
    }
}
