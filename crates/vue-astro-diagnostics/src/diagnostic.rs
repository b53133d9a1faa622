//! Diagnostic types.

use vue_template_parser::{ParseError, Span};

/// A diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The diagnostic code.
    pub code: DiagnosticCode,
    /// The severity level.
    pub severity: Severity,
    /// The diagnostic message.
    pub message: String,
    /// The source location, relative to the checked template.
    pub span: Span,
}

impl Diagnostic {
    /// Creates a new diagnostic with the code's default severity.
    pub fn new(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self {
            severity: code.default_severity(),
            code,
            message: message.into(),
            span,
        }
    }

    /// Moves the span by `offset` bytes, e.g. from template-relative to
    /// file-relative positions.
    pub fn shifted(mut self, offset: usize) -> Self {
        self.span = Span::from_offsets(
            self.span.start_offset() + offset,
            self.span.end_offset() + offset,
        );
        self
    }
}

impl From<&ParseError> for Diagnostic {
    fn from(error: &ParseError) -> Self {
        Diagnostic::new(DiagnosticCode::ParseError, error.to_string(), error.span)
    }
}

/// The severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// A hint about how the output differs from Vue semantics.
    Hint,
    /// Output that is valid but probably not what was meant.
    Warning,
    /// Input that could not be read as written.
    Error,
}

impl Severity {
    /// Returns the severity as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Hint => "hint",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnostic codes for all checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    // === Parse Codes ===
    /// `parse-error`: the template parser had to recover
    ParseError,

    // === Structure Codes ===
    /// `orphan-else`: `v-else`/`v-else-if` without a preceding `v-if`
    OrphanElse,
    /// `duplicate-attribute`: the same attribute is emitted twice
    DuplicateAttribute,
    /// `duplicate-directive`: a control directive is repeated
    DuplicateDirective,

    // === Conversion Codes ===
    /// `conflicting-content-directives`: `v-html` and `v-text` together
    ConflictingContentDirectives,
    /// `content-directive-discards-children`
    ContentDirectiveDiscardsChildren,
    /// `malformed-for`: a `v-for` expression that could not be split
    MalformedFor,
    /// `unsupported-directive`: a directive with no Astro form
    UnsupportedDirective,
    /// `inert-event-handler`: `v-on` kept as a `data-on-*` marker
    InertEventHandler,
    /// `dynamic-style-object`: `v-show` merged into an object or array style
    DynamicStyleObject,
}

impl DiagnosticCode {
    /// Every code, in declaration order.
    pub const ALL: [DiagnosticCode; 10] = [
        DiagnosticCode::ParseError,
        DiagnosticCode::OrphanElse,
        DiagnosticCode::DuplicateAttribute,
        DiagnosticCode::DuplicateDirective,
        DiagnosticCode::ConflictingContentDirectives,
        DiagnosticCode::ContentDirectiveDiscardsChildren,
        DiagnosticCode::MalformedFor,
        DiagnosticCode::UnsupportedDirective,
        DiagnosticCode::InertEventHandler,
        DiagnosticCode::DynamicStyleObject,
    ];

    /// Returns the default severity for this diagnostic code.
    pub fn default_severity(&self) -> Severity {
        match self {
            DiagnosticCode::ParseError => Severity::Error,

            DiagnosticCode::OrphanElse
            | DiagnosticCode::DuplicateAttribute
            | DiagnosticCode::DuplicateDirective
            | DiagnosticCode::ConflictingContentDirectives
            | DiagnosticCode::ContentDirectiveDiscardsChildren
            | DiagnosticCode::MalformedFor
            | DiagnosticCode::UnsupportedDirective
            | DiagnosticCode::DynamicStyleObject => Severity::Warning,

            DiagnosticCode::InertEventHandler => Severity::Hint,
        }
    }

    /// Returns the diagnostic code as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::ParseError => "parse-error",
            DiagnosticCode::OrphanElse => "orphan-else",
            DiagnosticCode::DuplicateAttribute => "duplicate-attribute",
            DiagnosticCode::DuplicateDirective => "duplicate-directive",
            DiagnosticCode::ConflictingContentDirectives => "conflicting-content-directives",
            DiagnosticCode::ContentDirectiveDiscardsChildren => {
                "content-directive-discards-children"
            }
            DiagnosticCode::MalformedFor => "malformed-for",
            DiagnosticCode::UnsupportedDirective => "unsupported-directive",
            DiagnosticCode::InertEventHandler => "inert-event-handler",
            DiagnosticCode::DynamicStyleObject => "dynamic-style-object",
        }
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vue_template_parser::ParseErrorKind;

    #[test]
    fn test_shifted() {
        let diagnostic = Diagnostic::new(
            DiagnosticCode::OrphanElse,
            "orphan",
            Span::from_offsets(2, 5),
        )
        .shifted(10);
        assert_eq!(diagnostic.span, Span::from_offsets(12, 15));
        assert_eq!(diagnostic.severity, Severity::Warning);
    }

    #[test]
    fn test_from_parse_error() {
        let error = ParseError::new(
            ParseErrorKind::UnclosedTag {
                tag_name: "p".into(),
            },
            Span::from_offsets(0, 3),
        );
        let diagnostic = Diagnostic::from(&error);
        assert_eq!(diagnostic.code, DiagnosticCode::ParseError);
        assert_eq!(diagnostic.severity, Severity::Error);
        assert_eq!(diagnostic.message, "unclosed tag: <p>");
    }

    #[test]
    fn test_severity_order() {
        assert!(Severity::Hint < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }
}
