//! Conversion diagnostics for vuecast.
//!
//! This crate reports template constructs whose Astro output differs from
//! what the Vue template meant:
//! - Structure checks (orphan `v-else`, duplicate attributes and directives)
//! - Conversion checks (dropped directives, inert event handlers, `v-for`
//!   and `v-show` edge cases)
//! - Parse errors the template parser recovered from
//!
//! # Example
//!
//! ```
//! use vue_template_parser::parse;
//! use vue_astro_diagnostics::{check, DiagnosticOptions};
//!
//! let source = r#"<input v-model="query">"#;
//! let doc = parse(source);
//! let diagnostics = check(&doc.document, DiagnosticOptions::all());
//!
//! for diagnostic in diagnostics {
//!     println!("{}: {}", diagnostic.code, diagnostic.message);
//! }
//! ```

pub mod conversion;
mod diagnostic;
pub mod structure;

pub use diagnostic::{Diagnostic, DiagnosticCode, Severity};

use vue_template_parser::{ParseError, TemplateDocument};

/// Options for diagnostic checking.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticOptions {
    /// Whether to run structure checks.
    pub structure: bool,
    /// Whether to run conversion checks.
    pub conversion: bool,
}

impl DiagnosticOptions {
    /// Returns options with all checks enabled.
    pub fn all() -> Self {
        Self {
            structure: true,
            conversion: true,
        }
    }
}

/// Runs all enabled diagnostic checks on a template.
pub fn check(doc: &TemplateDocument, options: DiagnosticOptions) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    if options.structure {
        diagnostics.extend(structure::check(doc));
    }

    if options.conversion {
        diagnostics.extend(conversion::check(doc));
    }

    diagnostics.sort_by_key(|d| d.span.start);

    diagnostics
}

/// Turns recovered parse errors into diagnostics.
pub fn parse_diagnostics(errors: &[ParseError]) -> Vec<Diagnostic> {
    errors.iter().map(Diagnostic::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vue_template_parser::parse;

    #[test]
    fn test_check_empty_document() {
        let doc = parse("").document;
        let diagnostics = check(&doc, DiagnosticOptions::all());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_disabled_checks() {
        let doc = parse(r#"<p v-else v-model="x"></p>"#).document;
        assert!(check(&doc, DiagnosticOptions::default()).is_empty());

        let structure_only = check(
            &doc,
            DiagnosticOptions {
                structure: true,
                ..Default::default()
            },
        );
        assert_eq!(structure_only.len(), 1);
        assert_eq!(structure_only[0].code, DiagnosticCode::OrphanElse);
    }

    #[test]
    fn test_sorted_by_position() {
        let doc = parse(r#"<b v-model="x"></b><i v-else></i>"#).document;
        let diagnostics = check(&doc, DiagnosticOptions::all());
        let codes: Vec<_> = diagnostics.iter().map(|d| d.code).collect();
        assert_eq!(
            codes,
            vec![DiagnosticCode::UnsupportedDirective, DiagnosticCode::OrphanElse]
        );
    }

    #[test]
    fn test_parse_diagnostics() {
        let result = parse("<div><p></div>");
        let diagnostics = parse_diagnostics(&result.errors);
        assert_eq!(diagnostics.len(), result.errors.len());
        assert!(diagnostics
            .iter()
            .all(|d| d.code == DiagnosticCode::ParseError));
    }
}
