//! Parse error types.

use crate::Span;
use thiserror::Error;

/// An error that occurred during parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// The location in the template where the error occurred.
    pub span: Span,
}

impl ParseError {
    /// Creates a new parse error.
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The kind of parse error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// An unexpected token was encountered.
    #[error("unexpected token: expected {expected}, found {found}")]
    UnexpectedToken {
        /// What was expected.
        expected: String,
        /// What was found.
        found: String,
    },

    /// An unexpected end of file was encountered.
    #[error("unexpected end of file: expected {expected}")]
    UnexpectedEof {
        /// What was expected.
        expected: String,
    },

    /// An element was never closed.
    #[error("unclosed tag: <{tag_name}>")]
    UnclosedTag {
        /// The name of the unclosed tag.
        tag_name: String,
    },

    /// A closing tag does not match any open element.
    #[error("mismatched closing tag: expected </{expected}>, found </{found}>")]
    MismatchedClosingTag {
        /// The tag that was open.
        expected: String,
        /// The closing tag found.
        found: String,
    },

    /// A `{{` without a matching `}}`.
    #[error("interpolation is missing its closing `}}}}`")]
    UnterminatedInterpolation,

    /// A `<!--` without a matching `-->`.
    #[error("comment is missing its closing `-->`")]
    UnterminatedComment,

    /// An attribute could not be read.
    #[error("invalid attribute: {message}")]
    InvalidAttribute {
        /// A description of the problem.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ParseError::new(
            ParseErrorKind::MismatchedClosingTag {
                expected: "div".to_string(),
                found: "span".to_string(),
            },
            Span::from_offsets(0, 7),
        );
        assert_eq!(
            error.to_string(),
            "mismatched closing tag: expected </div>, found </span>"
        );
    }

    #[test]
    fn test_unterminated_interpolation_display() {
        let error = ParseError::new(
            ParseErrorKind::UnterminatedInterpolation,
            Span::from_offsets(0, 2),
        );
        assert_eq!(
            error.to_string(),
            "interpolation is missing its closing `}}`"
        );
    }
}
