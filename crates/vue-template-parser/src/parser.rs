//! Recursive descent parser for Vue templates.

use crate::ast::*;
use crate::entities::decode_entities;
use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::span::to_size;
use crate::{is_void_element, ParseOptions, ParseResult, Span, WhitespaceMode};
use smol_str::SmolStr;

/// Elements whose content is kept verbatim until the matching closing tag.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

fn is_raw_text_element(name: &str) -> bool {
    RAW_TEXT_ELEMENTS
        .iter()
        .any(|raw| raw.eq_ignore_ascii_case(name))
}

/// The Vue template parser.
pub struct Parser<'src> {
    /// The source being parsed.
    source: &'src str,
    /// The token stream.
    tokens: Vec<Token>,
    /// Current position in the token stream.
    pos: usize,
    /// Parse errors collected during parsing.
    errors: Vec<ParseError>,
    /// Parser options.
    options: ParseOptions,
    /// EOF token for when we're past the end
    eof_token: Token,
    /// How many `<pre>` elements enclose the current position.
    pre_depth: usize,
}

impl<'src> Parser<'src> {
    /// Creates a new parser.
    pub fn new(source: &'src str, options: ParseOptions) -> Self {
        let tokens: Vec<Token> = Lexer::new(source).collect();
        let eof_token = Token {
            kind: TokenKind::Eof,
            span: Span::empty(to_size(source.len())),
        };
        Self {
            source,
            tokens,
            pos: 0,
            errors: Vec::new(),
            options,
            eof_token,
            pre_depth: 0,
        }
    }

    /// Parses the source into a template document.
    pub fn parse(mut self) -> ParseResult {
        let document = self.parse_document();
        ParseResult {
            document,
            errors: self.errors,
        }
    }

    // === Token helpers ===

    /// Returns the current token.
    fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof_token)
    }

    /// Returns the current token kind.
    fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    /// Byte offset of the current token.
    fn offset(&self) -> usize {
        self.current().span.start_offset()
    }

    /// Advances to the next token.
    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Checks if the current token matches the given kind.
    fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Reports an error at the current position.
    fn error(&mut self, kind: ParseErrorKind) {
        self.errors.push(ParseError::new(kind, self.current().span));
    }

    /// Reports an error at the given span.
    fn error_at(&mut self, kind: ParseErrorKind, span: Span) {
        self.errors.push(ParseError::new(kind, span));
    }

    fn skip_whitespace(&mut self) {
        while self.check(TokenKind::Whitespace) {
            self.advance();
        }
    }

    /// Moves the token cursor to byte offset `end`.
    ///
    /// Content read straight from the source may stop inside a token; in that
    /// case the remainder of the source is lexed again from `end`.
    fn sync_to(&mut self, end: usize) {
        let end_size = to_size(end);
        while self.current().span.end <= end_size && !self.check(TokenKind::Eof) {
            self.advance();
        }
        if self.current().span.start < end_size && !self.check(TokenKind::Eof) {
            self.tokens.truncate(self.pos);
            self.tokens.extend(Lexer::new_at(self.source, end));
        }
    }

    /// Reads characters from the current offset while `pred` holds.
    fn read_while(&mut self, pred: impl Fn(char) -> bool) -> (&'src str, Span) {
        let source = self.source;
        let start = self.offset();
        let len = source[start..]
            .find(|c: char| !pred(c))
            .unwrap_or(source.len() - start);
        let end = start + len;
        self.sync_to(end);
        (&source[start..end], Span::from_offsets(start, end))
    }

    // === Parsing ===

    fn parse_document(&mut self) -> TemplateDocument {
        let mut open = Vec::new();
        let nodes = self.parse_children(&mut open);
        let nodes = self.finish_children(nodes);
        let span = Span::from_offsets(0, self.source.len());
        TemplateDocument {
            fragment: Fragment { nodes, span },
            span,
        }
    }

    /// Applies whitespace handling to a finished list of siblings.
    fn finish_children(&self, nodes: Vec<TemplateNode>) -> Vec<TemplateNode> {
        if self.pre_depth == 0 && self.options.whitespace == WhitespaceMode::Condense {
            condense_whitespace(nodes)
        } else {
            nodes
        }
    }

    /// Parses sibling nodes until end of input or a closing tag that belongs
    /// to one of the `open` elements.
    fn parse_children(&mut self, open: &mut Vec<SmolStr>) -> Vec<TemplateNode> {
        let mut children = Vec::new();

        loop {
            match self.current_kind() {
                TokenKind::Eof => break,
                TokenKind::LAngleSlash => {
                    let name = self.peek_closing_name();
                    if open.iter().any(|tag| tag.eq_ignore_ascii_case(name)) {
                        break;
                    }
                    self.skip_stray_closing_tag(open.last().cloned());
                }
                TokenKind::CommentOpen => children.push(self.parse_comment()),
                TokenKind::LMustache => self.parse_interpolation(&mut children),
                TokenKind::LAngle if self.starts_element() => {
                    children.push(self.parse_element(open));
                }
                _ => self.parse_text(&mut children),
            }
        }

        children
    }

    /// Returns true if the `<` at the current position opens a tag.
    fn starts_element(&self) -> bool {
        self.source
            .as_bytes()
            .get(self.offset() + 1)
            .is_some_and(|b| b.is_ascii_alphabetic())
    }

    /// Returns the name of the closing tag at the current `</`.
    fn peek_closing_name(&self) -> &'src str {
        let source = self.source;
        let start = (self.offset() + 2).min(source.len());
        let rest = &source[start..];
        let len = rest
            .find(|c: char| c.is_ascii_whitespace() || c == '>' || c == '/')
            .unwrap_or(rest.len());
        &rest[..len]
    }

    /// Skips a closing tag that matches no open element.
    fn skip_stray_closing_tag(&mut self, parent: Option<SmolStr>) {
        let start = self.offset();
        let found = self.peek_closing_name().to_string();
        let end = self.closing_tag_end(start);
        let span = Span::from_offsets(start, end);
        let kind = match parent {
            Some(expected) => ParseErrorKind::MismatchedClosingTag {
                expected: expected.to_string(),
                found,
            },
            None => ParseErrorKind::UnexpectedToken {
                expected: "element or text".to_string(),
                found: format!("</{found}>"),
            },
        };
        self.error_at(kind, span);
        self.sync_to(end);
    }

    /// Offset just past the `>` of the closing tag starting at `start`.
    fn closing_tag_end(&self, start: usize) -> usize {
        self.source[start..]
            .find('>')
            .map(|gt| start + gt + 1)
            .unwrap_or(self.source.len())
    }

    /// Consumes the closing tag at the current `</`.
    fn parse_closing_tag(&mut self) {
        let start = self.offset();
        if !self.source[start..].contains('>') {
            self.error(ParseErrorKind::UnexpectedEof {
                expected: "'>'".to_string(),
            });
        }
        let end = self.closing_tag_end(start);
        self.sync_to(end);
    }

    fn parse_comment(&mut self) -> TemplateNode {
        let source = self.source;
        let start = self.offset();
        let body_start = start + 4;
        let (body_end, end) = match source[body_start..].find("-->") {
            Some(rel) => (body_start + rel, body_start + rel + 3),
            None => {
                self.error(ParseErrorKind::UnterminatedComment);
                (source.len(), source.len())
            }
        };
        self.sync_to(end);

        TemplateNode::Comment(Comment {
            span: Span::from_offsets(start, end),
            data: source[body_start..body_end].to_string(),
        })
    }

    fn parse_interpolation(&mut self, children: &mut Vec<TemplateNode>) {
        let source = self.source;
        let start = self.offset();
        let inner_start = start + 2;

        let Some(rel) = source[inner_start..].find("}}") else {
            // Keep the delimiter as text and carry on parsing after it.
            self.error(ParseErrorKind::UnterminatedInterpolation);
            self.sync_to(inner_start);
            push_text(children, Span::from_offsets(start, inner_start), "{{");
            return;
        };

        let inner_end = inner_start + rel;
        let raw = &source[inner_start..inner_end];
        let expression = raw.trim();
        let expr_start = inner_start + (raw.len() - raw.trim_start().len());
        let end = inner_end + 2;
        self.sync_to(end);

        children.push(TemplateNode::Interpolation(Interpolation {
            span: Span::from_offsets(start, end),
            expression_span: Span::from_offsets(expr_start, expr_start + expression.len()),
            expression: expression.to_string(),
        }));
    }

    fn parse_text(&mut self, children: &mut Vec<TemplateNode>) {
        let source = self.source;
        let start = self.offset();
        let end = self.find_text_end(start);
        self.sync_to(end);
        push_text(children, Span::from_offsets(start, end), &source[start..end]);
    }

    /// Text runs until the next tag, comment or interpolation. The first
    /// character always belongs to the text, so a `<` that does not open a
    /// tag is consumed here.
    fn find_text_end(&self, start: usize) -> usize {
        let bytes = self.source.as_bytes();
        let mut i = start + 1;
        while i < bytes.len() {
            let next = bytes.get(i + 1).copied();
            match bytes[i] {
                b'{' if next == Some(b'{') => return i,
                b'<' if next.is_some_and(|b| b.is_ascii_alphabetic() || b == b'/' || b == b'!') => {
                    return i
                }
                _ => i += 1,
            }
        }
        bytes.len()
    }

    /// Parses an element starting at `<`.
    fn parse_element(&mut self, open: &mut Vec<SmolStr>) -> TemplateNode {
        let start = self.offset();
        self.advance(); // consume `<`

        let (name, _) =
            self.read_while(|c| !c.is_ascii_whitespace() && c != '/' && c != '>');
        let name = SmolStr::new(name);
        let props = self.parse_props();

        let self_closing = match self.current_kind() {
            TokenKind::SlashRAngle => {
                self.advance();
                true
            }
            TokenKind::RAngle => {
                self.advance();
                false
            }
            TokenKind::Eof => {
                self.error(ParseErrorKind::UnexpectedEof {
                    expected: "'>'".to_string(),
                });
                false
            }
            found => {
                self.error(ParseErrorKind::UnexpectedToken {
                    expected: "'>'".to_string(),
                    found: found.name().to_string(),
                });
                false
            }
        };
        let tag_end = self.offset();

        let children = if self_closing || is_void_element(&name) {
            Vec::new()
        } else if is_raw_text_element(&name) {
            self.parse_raw_text(&name, Span::from_offsets(start, tag_end))
        } else {
            let is_pre = name.eq_ignore_ascii_case("pre");
            if is_pre {
                self.pre_depth += 1;
            }
            open.push(name.clone());
            let mut nodes = self.parse_children(open);
            open.pop();
            if is_pre {
                self.pre_depth -= 1;
                strip_leading_newline(&mut nodes);
            } else {
                nodes = self.finish_children(nodes);
            }

            if self.check(TokenKind::LAngleSlash)
                && self.peek_closing_name().eq_ignore_ascii_case(&name)
            {
                self.parse_closing_tag();
            } else {
                self.error_at(
                    ParseErrorKind::UnclosedTag {
                        tag_name: name.to_string(),
                    },
                    Span::from_offsets(start, tag_end),
                );
            }
            nodes
        };

        TemplateNode::Element(Element {
            span: Span::from_offsets(start, self.offset()),
            name,
            props,
            children,
            self_closing,
        })
    }

    /// Reads the body of a raw-text element such as `<script>`.
    fn parse_raw_text(&mut self, name: &str, open_tag: Span) -> Vec<TemplateNode> {
        let source = self.source;
        let content_start = self.offset();
        let close = find_closing_tag(&source[content_start..], name).map(|rel| content_start + rel);
        let content_end = close.unwrap_or(source.len());
        self.sync_to(content_end);

        match close {
            Some(_) => self.parse_closing_tag(),
            None => self.error_at(
                ParseErrorKind::UnclosedTag {
                    tag_name: name.to_string(),
                },
                open_tag,
            ),
        }

        if content_end > content_start {
            let data = &source[content_start..content_end];
            vec![TemplateNode::Text(Text {
                span: Span::from_offsets(content_start, content_end),
                data: data.to_string(),
                is_whitespace: data.chars().all(|c| c.is_ascii_whitespace()),
            })]
        } else {
            Vec::new()
        }
    }

    /// Parses attributes and directives up to the end of the start tag.
    fn parse_props(&mut self) -> Vec<Prop> {
        let mut props = Vec::new();

        loop {
            self.skip_whitespace();
            match self.current_kind() {
                TokenKind::RAngle | TokenKind::SlashRAngle | TokenKind::Eof => break,
                // A new tag begins; the start tag is missing its `>`.
                TokenKind::LAngle | TokenKind::LAngleSlash | TokenKind::CommentOpen => break,
                TokenKind::Slash => self.advance(),
                TokenKind::Eq => {
                    self.error(ParseErrorKind::InvalidAttribute {
                        message: "expected attribute name before '='".to_string(),
                    });
                    self.advance();
                }
                _ => props.push(self.parse_prop()),
            }
        }

        props
    }

    fn parse_prop(&mut self) -> Prop {
        let source = self.source;
        let start = self.offset();
        let (name, name_span) = self.read_while(|c| {
            !c.is_ascii_whitespace() && !matches!(c, '/' | '>' | '=')
        });

        let after_ws = skip_ascii_whitespace(source, name_span.end_offset());
        let (value, end) = if source[after_ws..].starts_with('=') {
            let value_start = skip_ascii_whitespace(source, after_ws + 1);
            self.sync_to(value_start);
            self.parse_prop_value()
        } else {
            (None, name_span.end_offset())
        };
        let span = Span::from_offsets(start, end);

        match split_directive(name) {
            Some(parts) => Prop::Directive(Directive {
                span,
                raw_name: SmolStr::new(name),
                kind: DirectiveKind::from_name(parts.name),
                name: SmolStr::new(parts.name),
                arg: parts.arg.map(|arg| DirectiveArg {
                    span: Span::from_offsets(start + arg.start, start + arg.end),
                    content: SmolStr::new(&name[arg.start..arg.end]),
                    is_static: arg.is_static,
                }),
                modifiers: parts.modifiers.into_iter().map(SmolStr::new).collect(),
                expression: value.map(|(raw, span)| Expression {
                    span,
                    content: decode_entities(raw),
                }),
            }),
            None => Prop::Attribute(Attribute {
                span,
                name: SmolStr::new(name),
                value: value.map(|(raw, span)| AttributeValue {
                    span,
                    content: decode_entities(raw),
                }),
            }),
        }
    }

    /// Reads a quoted or unquoted value. Returns the raw text with its span
    /// and the offset where the prop ends.
    fn parse_prop_value(&mut self) -> (Option<(&'src str, Span)>, usize) {
        let source = self.source;
        let start = self.offset();

        match source[start..].chars().next() {
            Some(quote @ ('"' | '\'')) => {
                let inner_start = start + 1;
                let (inner_end, end) = match source[inner_start..].find(quote) {
                    Some(rel) => (inner_start + rel, inner_start + rel + 1),
                    None => {
                        self.error(ParseErrorKind::InvalidAttribute {
                            message: "unterminated attribute value".to_string(),
                        });
                        (source.len(), source.len())
                    }
                };
                self.sync_to(end);
                let span = Span::from_offsets(inner_start, inner_end);
                (Some((&source[inner_start..inner_end], span)), end)
            }
            Some('>') | None => {
                self.error(ParseErrorKind::InvalidAttribute {
                    message: "missing attribute value".to_string(),
                });
                (Some(("", Span::from_offsets(start, start))), start)
            }
            Some(_) => {
                let (raw, span) = self.read_while(|c| !c.is_ascii_whitespace() && c != '>');
                (Some((raw, span)), span.end_offset())
            }
        }
    }
}

/// Appends text, merging with a directly preceding text node.
fn push_text(children: &mut Vec<TemplateNode>, span: Span, data: &str) {
    if let Some(TemplateNode::Text(prev)) = children.last_mut() {
        if prev.span.end == span.start {
            prev.span = prev.span.cover(span);
            prev.data.push_str(data);
            prev.is_whitespace = prev.is_whitespace && is_blank(data);
            return;
        }
    }
    children.push(TemplateNode::Text(Text {
        span,
        data: data.to_string(),
        is_whitespace: is_blank(data),
    }));
}

fn is_blank(data: &str) -> bool {
    data.chars().all(|c| c.is_ascii_whitespace())
}

fn skip_ascii_whitespace(source: &str, from: usize) -> usize {
    source[from..]
        .find(|c: char| !c.is_ascii_whitespace())
        .map(|rel| from + rel)
        .unwrap_or(source.len())
}

/// Finds `</name` (ASCII case-insensitive) followed by a tag boundary.
fn find_closing_tag(haystack: &str, name: &str) -> Option<usize> {
    let bytes = haystack.as_bytes();
    let mut from = 0;
    while let Some(rel) = haystack[from..].find("</") {
        let at = from + rel;
        let name_start = at + 2;
        let name_end = name_start + name.len();
        let matches_name = bytes
            .get(name_start..name_end)
            .is_some_and(|candidate| candidate.eq_ignore_ascii_case(name.as_bytes()));
        let boundary = bytes
            .get(name_end)
            .map_or(true, |b| b.is_ascii_whitespace() || *b == b'>' || *b == b'/');
        if matches_name && boundary {
            return Some(at);
        }
        from = at + 2;
    }
    None
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Neighbor {
    Text,
    Interpolation,
    Element,
    Comment,
}

impl From<&TemplateNode> for Neighbor {
    fn from(node: &TemplateNode) -> Self {
        match node {
            TemplateNode::Text(_) => Neighbor::Text,
            TemplateNode::Interpolation(_) => Neighbor::Interpolation,
            TemplateNode::Element(_) => Neighbor::Element,
            TemplateNode::Comment(_) => Neighbor::Comment,
        }
    }
}

/// Drops or shrinks whitespace-only text between siblings and collapses
/// whitespace runs inside other text.
fn condense_whitespace(nodes: Vec<TemplateNode>) -> Vec<TemplateNode> {
    let neighbors: Vec<Neighbor> = nodes.iter().map(Neighbor::from).collect();
    let mut out = Vec::with_capacity(nodes.len());

    for (i, node) in nodes.into_iter().enumerate() {
        let TemplateNode::Text(mut text) = node else {
            out.push(node);
            continue;
        };

        if is_blank(&text.data) {
            let prev = i.checked_sub(1).map(|j| neighbors[j]);
            let next = neighbors.get(i + 1).copied();
            let remove = match (prev, next) {
                (None, _) | (_, None) => true,
                (Some(Neighbor::Comment), Some(Neighbor::Comment | Neighbor::Element)) => true,
                (Some(Neighbor::Element), Some(Neighbor::Comment)) => true,
                (Some(Neighbor::Element), Some(Neighbor::Element)) => {
                    text.data.contains(['\n', '\r'])
                }
                _ => false,
            };
            if remove {
                continue;
            }
            text.data = " ".to_string();
            text.is_whitespace = true;
        } else {
            text.data = collapse_whitespace(&text.data);
            text.is_whitespace = false;
        }
        out.push(TemplateNode::Text(text));
    }

    out
}

fn collapse_whitespace(data: &str) -> String {
    let mut out = String::with_capacity(data.len());
    let mut in_run = false;
    for c in data.chars() {
        if c.is_ascii_whitespace() {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

/// A newline directly after `<pre>` is not part of its content.
fn strip_leading_newline(nodes: &mut Vec<TemplateNode>) {
    let emptied = match nodes.first_mut() {
        Some(TemplateNode::Text(first)) => {
            let data = &first.data;
            let stripped = data
                .strip_prefix("\r\n")
                .or_else(|| data.strip_prefix('\n'))
                .map(str::to_string);
            if let Some(stripped) = stripped {
                first.data = stripped;
            }
            first.data.is_empty()
        }
        _ => false,
    };
    if emptied {
        nodes.remove(0);
    }
}

/// A directive name split into its parts, with the argument as a byte
/// range into the raw attribute name.
#[derive(Debug, PartialEq, Eq)]
struct DirectiveName<'a> {
    name: &'a str,
    arg: Option<RawArg>,
    modifiers: Vec<&'a str>,
}

#[derive(Debug, PartialEq, Eq)]
struct RawArg {
    start: usize,
    end: usize,
    is_static: bool,
}

/// Splits `v-name:arg.mod`, `:arg`, `.arg`, `@arg` and `#arg`. Returns
/// `None` for plain attributes.
fn split_directive(raw: &str) -> Option<DirectiveName<'_>> {
    let mut modifiers = Vec::new();
    let (name, mut cursor, has_arg) = if let Some(after) = raw.strip_prefix("v-") {
        let len = after.find([':', '.']).unwrap_or(after.len());
        let name = &after[..len];
        if !name.starts_with(|c: char| c.is_ascii_alphanumeric()) {
            return None;
        }
        let cursor = 2 + len;
        if raw[cursor..].starts_with(':') {
            (name, cursor + 1, true)
        } else {
            (name, cursor, false)
        }
    } else {
        match raw.chars().next()? {
            ':' => ("bind", 1, true),
            '@' => ("on", 1, true),
            '#' => ("slot", 1, true),
            '.' => {
                modifiers.push("prop");
                ("bind", 1, true)
            }
            _ => return None,
        }
    };

    let mut arg = None;
    if has_arg {
        let rest = &raw[cursor..];
        if rest.starts_with('[') {
            let (content_end, arg_end) = match rest.find(']') {
                Some(close) => (cursor + close, cursor + close + 1),
                None => (raw.len(), raw.len()),
            };
            arg = Some(RawArg {
                start: cursor + 1,
                end: content_end,
                is_static: false,
            });
            cursor = arg_end;
        } else {
            let len = rest.find('.').unwrap_or(rest.len());
            if len > 0 {
                arg = Some(RawArg {
                    start: cursor,
                    end: cursor + len,
                    is_static: true,
                });
            }
            cursor += len;
        }
    }

    modifiers.extend(raw[cursor..].split('.').filter(|m| !m.is_empty()));
    Some(DirectiveName {
        name,
        arg,
        modifiers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> ParseResult {
        Parser::new(source, ParseOptions::default()).parse()
    }

    fn first_element(result: &ParseResult) -> &Element {
        result
            .document
            .fragment
            .nodes
            .iter()
            .find_map(TemplateNode::as_element)
            .expect("Expected Element")
    }

    #[test]
    fn test_parse_simple_element() {
        let result = parse("<div>hello</div>");
        assert!(result.errors.is_empty());
        assert_eq!(result.document.fragment.nodes.len(), 1);

        let el = first_element(&result);
        assert_eq!(el.name.as_str(), "div");
        assert_eq!(el.children.len(), 1);
        assert_eq!(el.span, Span::from_offsets(0, 16));
    }

    #[test]
    fn test_parse_unicode_text() {
        let result = parse("<div>—</div>");
        assert!(result.errors.is_empty());

        let el = first_element(&result);
        if let TemplateNode::Text(text) = &el.children[0] {
            assert_eq!(text.data, "—");
            assert!(!text.is_whitespace);
        } else {
            panic!("Expected Text");
        }
    }

    #[test]
    fn test_parse_interpolation() {
        let result = parse("<p>Hi {{  user.name }}!</p>");
        assert!(result.errors.is_empty());

        let el = first_element(&result);
        assert_eq!(el.children.len(), 3);
        if let TemplateNode::Interpolation(interp) = &el.children[1] {
            assert_eq!(interp.expression, "user.name");
            assert_eq!(interp.expression_span, Span::from_offsets(10, 19));
        } else {
            panic!("Expected Interpolation");
        }
    }

    #[test]
    fn test_parse_directives() {
        let result = parse(r#"<li v-for="item in items" :key="item.id" @click.stop="pick(item)">x</li>"#);
        assert!(result.errors.is_empty());

        let el = first_element(&result);
        let dirs: Vec<_> = el.directives().collect();
        assert_eq!(dirs.len(), 3);

        assert_eq!(dirs[0].kind, DirectiveKind::For);
        assert_eq!(dirs[0].expression_text(), Some("item in items"));

        assert_eq!(dirs[1].kind, DirectiveKind::Bind);
        assert_eq!(dirs[1].static_arg(), Some("key"));
        assert_eq!(dirs[1].raw_name.as_str(), ":key");

        assert_eq!(dirs[2].kind, DirectiveKind::On);
        assert_eq!(dirs[2].static_arg(), Some("click"));
        assert_eq!(dirs[2].modifiers, vec![SmolStr::new("stop")]);
    }

    #[test]
    fn test_parse_dynamic_argument() {
        let result = parse(r#"<a v-bind:[attr.name]="value"></a>"#);
        let el = first_element(&result);
        let dir = el.directive(DirectiveKind::Bind).expect("bind");
        let arg = dir.arg.as_ref().expect("arg");
        assert!(!arg.is_static);
        assert_eq!(arg.content.as_str(), "attr.name");
        assert!(dir.modifiers.is_empty());
    }

    #[test]
    fn test_parse_boolean_and_unquoted_attributes() {
        let result = parse("<input disabled value=abc>");
        assert!(result.errors.is_empty());

        let el = first_element(&result);
        assert!(el.children.is_empty());
        match &el.props[..] {
            [Prop::Attribute(disabled), Prop::Attribute(value)] => {
                assert_eq!(disabled.name.as_str(), "disabled");
                assert!(disabled.value.is_none());
                assert_eq!(value.value.as_ref().map(|v| v.content.as_str()), Some("abc"));
            }
            other => panic!("unexpected props: {other:?}"),
        }
    }

    #[test]
    fn test_attribute_values_are_decoded() {
        let result = parse(r#"<div v-if="a &amp;&amp; b" title="&quot;hi&quot;"></div>"#);
        let el = first_element(&result);
        assert_eq!(
            el.directive(DirectiveKind::If).and_then(|d| d.expression_text()),
            Some("a && b")
        );
        if let Prop::Attribute(title) = &el.props[1] {
            assert_eq!(title.value.as_ref().map(|v| v.content.as_str()), Some("\"hi\""));
        } else {
            panic!("Expected Attribute");
        }
    }

    #[test]
    fn test_parse_self_closing() {
        let result = parse(r#"<MyWidget :size="2" />"#);
        assert!(result.errors.is_empty());
        let el = first_element(&result);
        assert!(el.self_closing);
        assert_eq!(el.props.len(), 1);
    }

    #[test]
    fn test_parse_comment() {
        let result = parse("<!-- note --><p>x</p>");
        assert!(result.errors.is_empty());
        if let TemplateNode::Comment(comment) = &result.document.fragment.nodes[0] {
            assert_eq!(comment.data, " note ");
        } else {
            panic!("Expected Comment");
        }
    }

    #[test]
    fn test_condense_removes_newline_between_elements() {
        let result = parse("<div v-if=\"a\">A</div>\n<div v-else>B</div>\n");
        let kinds: Vec<_> = result
            .document
            .fragment
            .nodes
            .iter()
            .map(|n| matches!(n, TemplateNode::Element(_)))
            .collect();
        assert_eq!(kinds, vec![true, true]);
    }

    #[test]
    fn test_condense_keeps_single_space_between_inline_siblings() {
        let result = parse("<p><b>a</b> <i>b</i>  {{ c }}\n  text</p>");
        let el = first_element(&result);
        let texts: Vec<_> = el
            .children
            .iter()
            .filter_map(|n| match n {
                TemplateNode::Text(t) => Some(t.data.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec![" ", " ", " text"]);
    }

    #[test]
    fn test_preserve_mode_keeps_whitespace() {
        let options = ParseOptions {
            whitespace: WhitespaceMode::Preserve,
        };
        let result = Parser::new("<a>1</a>\n<b>2</b>", options).parse();
        assert_eq!(result.document.fragment.nodes.len(), 3);
    }

    #[test]
    fn test_pre_content_is_preserved() {
        let result = parse("<pre>\n  a\n\n  b</pre>");
        let el = first_element(&result);
        if let TemplateNode::Text(text) = &el.children[0] {
            assert_eq!(text.data, "  a\n\n  b");
        } else {
            panic!("Expected Text");
        }
    }

    #[test]
    fn test_raw_text_element() {
        let result = parse("<script>if (a < b) { x = '</div>' }</script><p>after</p>");
        assert!(result.errors.is_empty());
        let el = first_element(&result);
        assert_eq!(el.name.as_str(), "script");
        if let TemplateNode::Text(text) = &el.children[0] {
            assert_eq!(text.data, "if (a < b) { x = '</div>' }");
        } else {
            panic!("Expected Text");
        }
        assert_eq!(result.document.fragment.nodes.len(), 2);
    }

    #[test]
    fn test_void_element_has_no_children() {
        let result = parse("<p><br>line</p>");
        assert!(result.errors.is_empty());
        let el = first_element(&result);
        assert_eq!(el.children.len(), 2);
    }

    #[test]
    fn test_less_than_in_text() {
        let result = parse("<p>1 < 2</p>");
        assert!(result.errors.is_empty());
        let el = first_element(&result);
        if let TemplateNode::Text(text) = &el.children[0] {
            assert_eq!(text.data, "1 < 2");
        } else {
            panic!("Expected Text");
        }
    }

    #[test]
    fn test_unclosed_tag_recovers() {
        let result = parse("<div><span>text</div><p>x</p>");
        assert_eq!(result.errors.len(), 1);
        assert!(matches!(
            &result.errors[0].kind,
            ParseErrorKind::UnclosedTag { tag_name } if tag_name == "span"
        ));
        assert_eq!(result.document.fragment.nodes.len(), 2);
    }

    #[test]
    fn test_stray_closing_tag_is_skipped() {
        let result = parse("<div>a</span>b</div>");
        assert_eq!(result.errors.len(), 1);
        assert!(matches!(
            result.errors[0].kind,
            ParseErrorKind::MismatchedClosingTag { .. }
        ));
        let el = first_element(&result);
        assert_eq!(el.children.len(), 2);
    }

    #[test]
    fn test_unterminated_interpolation() {
        let result = parse("<p>{{ oops</p>");
        assert_eq!(result.errors.len(), 1);
        assert_eq!(
            result.errors[0].kind,
            ParseErrorKind::UnterminatedInterpolation
        );
        let el = first_element(&result);
        if let TemplateNode::Text(text) = &el.children[0] {
            assert_eq!(text.data, "{{ oops");
        } else {
            panic!("Expected Text");
        }
    }

    #[test]
    fn test_unterminated_comment() {
        let result = parse("<!-- open");
        assert_eq!(result.errors[0].kind, ParseErrorKind::UnterminatedComment);
    }

    #[test]
    fn test_split_directive_shorthands() {
        let slot = split_directive("#default").expect("slot");
        assert_eq!(slot.name, "slot");
        assert_eq!(
            slot.arg,
            Some(RawArg {
                start: 1,
                end: 8,
                is_static: true
            })
        );

        let prop = split_directive(".value").expect("prop bind");
        assert_eq!(prop.name, "bind");
        assert_eq!(prop.modifiers, vec!["prop"]);

        let model = split_directive("v-model.trim").expect("model");
        assert_eq!(model.name, "model");
        assert_eq!(model.arg, None);
        assert_eq!(model.modifiers, vec!["trim"]);

        assert_eq!(split_directive("class"), None);
        assert_eq!(split_directive("v-"), None);
    }
}
