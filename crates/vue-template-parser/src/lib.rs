//! Vue template parser for vuecast.
//!
//! This crate parses the template syntax of Vue single-file components:
//! - Lexer (tokenizer) using `logos`
//! - Recursive descent parser with error recovery
//! - AST types for elements, directives, interpolations, text and comments
//! - Vue-compatible whitespace condensing
//!
//! Directive expressions are kept as source text; no JavaScript parsing
//! happens here.
//!
//! # Example
//!
//! ```
//! use vue_template_parser::{parse, DirectiveKind, TemplateNode};
//!
//! let result = parse(r#"<p v-if="ok">{{ msg }}</p>"#);
//! assert!(result.errors.is_empty());
//!
//! let TemplateNode::Element(p) = &result.document.fragment.nodes[0] else {
//!     panic!("expected an element");
//! };
//! assert!(p.has_directive(DirectiveKind::If));
//! ```

mod ast;
mod entities;
mod error;
mod lexer;
mod line_index;
mod parser;
mod span;

pub use ast::*;
pub use entities::decode_entities;
pub use error::{ParseError, ParseErrorKind};
pub use lexer::{Lexer, Token, TokenKind};
pub use line_index::{LineCol, LineIndex};
pub use span::Span;

/// HTML void elements that never have children or closing tags.
const HTML_VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Returns true if the given element name is an HTML void element.
pub fn is_void_element(name: &str) -> bool {
    HTML_VOID_ELEMENTS
        .iter()
        .any(|void| void.eq_ignore_ascii_case(name))
}

/// How whitespace-only and multi-space text is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WhitespaceMode {
    /// Remove insignificant whitespace between tags and collapse runs of
    /// whitespace in text to a single space.
    #[default]
    Condense,
    /// Keep text exactly as written.
    Preserve,
}

/// Options for parsing Vue templates.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Whitespace handling.
    pub whitespace: WhitespaceMode,
}

/// The result of parsing a template.
#[derive(Debug)]
pub struct ParseResult {
    /// The parsed document.
    pub document: TemplateDocument,
    /// Any errors encountered during parsing.
    pub errors: Vec<ParseError>,
}

/// Parses a Vue template into an AST.
///
/// Parsing never fails outright: malformed markup is recovered from and
/// reported in [`ParseResult::errors`].
pub fn parse(source: &str) -> ParseResult {
    parse_with_options(source, ParseOptions::default())
}

/// Parses a Vue template with custom options.
pub fn parse_with_options(source: &str, options: ParseOptions) -> ParseResult {
    parser::Parser::new(source, options).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        let result = parse("");
        assert!(result.errors.is_empty());
        assert!(result.document.fragment.nodes.is_empty());
    }

    #[test]
    fn test_parse_simple_element() {
        let result = parse("<div>hello</div>");
        assert!(result.errors.is_empty());
        assert_eq!(result.document.fragment.nodes.len(), 1);
    }

    #[test]
    fn test_void_elements() {
        assert!(is_void_element("br"));
        assert!(is_void_element("IMG"));
        assert!(!is_void_element("div"));
    }
}
