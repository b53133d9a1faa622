//! Vue template lexer using logos.
//!
//! The lexer only recognises the markup skeleton of a template: tag
//! delimiters, quotes, mustache delimiters and whitespace. Names, attribute
//! values and raw content are read from the source by offset, with the
//! token stream used as a synchronisation point.

use crate::span::to_size;
use crate::Span;
use logos::Logos;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The span of the token in the source.
    pub span: Span,
}

/// Token kinds for Vue template markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Logos, Default)]
pub enum TokenKind {
    /// `<!--`
    #[token("<!--", priority = 12)]
    CommentOpen,

    /// `</`
    #[token("</", priority = 10)]
    LAngleSlash,

    /// `<`
    #[token("<", priority = 10)]
    LAngle,

    /// `/>`
    #[token("/>", priority = 10)]
    SlashRAngle,

    /// `>`
    #[token(">", priority = 10)]
    RAngle,

    /// `/`
    #[token("/", priority = 10)]
    Slash,

    /// `=`
    #[token("=", priority = 10)]
    Eq,

    /// `"`
    #[token("\"", priority = 10)]
    DoubleQuote,

    /// `'`
    #[token("'", priority = 10)]
    SingleQuote,

    /// `{{`
    #[token("{{", priority = 11)]
    LMustache,

    /// `}}`
    #[token("}}", priority = 11)]
    RMustache,

    /// An identifier (tag name, attribute name, etc.)
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_\-]*", priority = 4)]
    Ident,

    /// Spaces, tabs and line breaks.
    #[regex(r"[ \t\r\n\x0C]+", priority = 5)]
    Whitespace,

    /// Anything else. A lone brace is text as well.
    #[regex(r#"[^<>=/"'{} \t\r\n\x0C]+"#, priority = 1)]
    #[regex(r"[{}]", priority = 1)]
    Text,

    /// End of file
    Eof,

    /// Invalid/unknown token
    #[default]
    Error,
}

impl TokenKind {
    /// Returns a human-readable name for this token kind.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::CommentOpen => "'<!--'",
            TokenKind::LAngleSlash => "'</'",
            TokenKind::LAngle => "'<'",
            TokenKind::SlashRAngle => "'/>'",
            TokenKind::RAngle => "'>'",
            TokenKind::Slash => "'/'",
            TokenKind::Eq => "'='",
            TokenKind::DoubleQuote => "'\"'",
            TokenKind::SingleQuote => "'''",
            TokenKind::LMustache => "'{{'",
            TokenKind::RMustache => "'}}'",
            TokenKind::Ident => "identifier",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Text => "text",
            TokenKind::Eof => "end of file",
            TokenKind::Error => "invalid token",
        }
    }

    /// Returns true for tokens that close a start tag.
    pub fn ends_start_tag(&self) -> bool {
        matches!(self, TokenKind::RAngle | TokenKind::SlashRAngle)
    }
}

/// A lexer for Vue template source.
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, TokenKind>,
    source: &'src str,
    base: usize,
    finished: bool,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source.
    pub fn new(source: &'src str) -> Self {
        Self::new_at(source, 0)
    }

    /// Creates a lexer over `source[offset..]` whose spans stay relative to
    /// the start of `source`. An offset that is out of bounds or not on a
    /// char boundary yields only `Eof`.
    pub fn new_at(source: &'src str, offset: usize) -> Self {
        let (tail, base) = match source.get(offset..) {
            Some(tail) => (tail, offset),
            None => ("", source.len()),
        };
        Self {
            inner: TokenKind::lexer(tail),
            source,
            base,
            finished: false,
        }
    }

    /// Returns the source string being lexed.
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Returns the text of the current token.
    pub fn slice(&self) -> &'src str {
        self.inner.slice()
    }

    fn span(&self) -> Span {
        let range = self.inner.span();
        Span::from_offsets(self.base + range.start, self.base + range.end)
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.inner.next() {
            Some(Ok(kind)) => Some(Token {
                kind,
                span: self.span(),
            }),
            Some(Err(())) => Some(Token {
                kind: TokenKind::Error,
                span: self.span(),
            }),
            None => {
                self.finished = true;
                let end = to_size(self.source.len());
                Some(Token {
                    kind: TokenKind::Eof,
                    span: Span::new(end, end),
                })
            }
        }
    }
}
