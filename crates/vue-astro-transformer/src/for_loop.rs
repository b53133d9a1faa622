//! Parsing of `v-for` expressions.

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

fn for_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)^\s*(.+?)\s+(?:in|of)\s+(.+?)\s*$").unwrap())
}

/// A `v-for` expression split into aliases and source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForExpression<'a> {
    /// The item alias, `item` when none could be read.
    pub item: &'a str,
    /// The index alias.
    pub index: Option<&'a str>,
    /// The iterated expression.
    pub source: &'a str,
    /// Aliases after the index (`(value, key, index)`), which have no
    /// counterpart in `Array.prototype.map`.
    pub extra_aliases: Vec<&'a str>,
    /// False when the expression had no `<alias> in <source>` shape and was
    /// used whole as the source.
    pub well_formed: bool,
}

impl<'a> ForExpression<'a> {
    /// Parses `item in items`, `(item, index) in items` or the `of` form.
    pub fn parse(expression: &'a str) -> Self {
        let Some(caps) = for_re().captures(expression) else {
            return Self {
                item: "item",
                index: None,
                source: expression.trim(),
                extra_aliases: Vec::new(),
                well_formed: false,
            };
        };

        let lhs = caps.get(1).map_or("", |m| m.as_str()).trim();
        let source = caps.get(2).map_or("", |m| m.as_str()).trim();

        let Some(inner) = lhs.strip_prefix('(').and_then(|l| l.strip_suffix(')')) else {
            return Self {
                item: if lhs.is_empty() { "item" } else { lhs },
                index: None,
                source,
                extra_aliases: Vec::new(),
                well_formed: true,
            };
        };

        let mut parts = split_top_level(inner).into_iter();
        let item = parts.next().filter(|p| !p.is_empty()).unwrap_or("item");
        let index = parts.next().filter(|p| !p.is_empty());
        Self {
            item,
            index,
            source,
            extra_aliases: parts.filter(|p| !p.is_empty()).collect(),
            well_formed: true,
        }
    }

    /// The parameter list of the generated arrow function.
    pub fn params(&self) -> String {
        match self.index {
            Some(index) => format!("{}, {index}", self.item),
            None => self.item.to_string(),
        }
    }

    /// The expression `.map` is called on. A numeric range `n` becomes an
    /// array of `1..=n`.
    pub fn iterable(&self) -> Cow<'a, str> {
        if !self.source.is_empty() && self.source.bytes().all(|b| b.is_ascii_digit()) {
            Cow::Owned(format!(
                "Array.from({{ length: {} }}, (_, i) => i + 1)",
                self.source
            ))
        } else {
            Cow::Borrowed(self.source)
        }
    }
}

/// Splits on commas that are not nested in brackets.
fn split_top_level(input: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, c) in input.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(input[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(input[start..].trim());
    parts
}
