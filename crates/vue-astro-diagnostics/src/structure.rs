//! Structural checks.
//!
//! - `v-else` / `v-else-if` without a `v-if` directly before it
//! - Attributes that end up on the output element twice
//! - Repeated control directives, of which only the first is used

use crate::{Diagnostic, DiagnosticCode};
use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use vue_astro_transformer::{conditional_kind, group_siblings, RenderUnit};
use vue_template_parser::{DirectiveKind, Element, Prop, TemplateDocument, TemplateNode};

/// Runs structural checks on a document.
pub fn check(doc: &TemplateDocument) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    check_fragment(&doc.fragment.nodes, &mut diagnostics);
    diagnostics
}

fn check_fragment(nodes: &[TemplateNode], diagnostics: &mut Vec<Diagnostic>) {
    for unit in group_siblings(nodes) {
        let RenderUnit::Single(TemplateNode::Element(el)) = unit else {
            continue;
        };
        if let Some(kind @ (DirectiveKind::ElseIf | DirectiveKind::Else)) = conditional_kind(el) {
            let span = el.directive(kind).map_or(el.span, |dir| dir.span);
            diagnostics.push(Diagnostic::new(
                DiagnosticCode::OrphanElse,
                format!(
                    "`{}` on <{}> has no preceding `v-if` sibling and is rendered unconditionally",
                    if kind == DirectiveKind::Else { "v-else" } else { "v-else-if" },
                    el.name
                ),
                span,
            ));
        }
    }

    for node in nodes {
        if let TemplateNode::Element(el) = node {
            check_attributes(el, diagnostics);
            check_directives(el, diagnostics);
            check_fragment(&el.children, diagnostics);
        }
    }
}

/// The attribute name a prop produces on the output element, if any.
fn output_name(prop: &Prop) -> Option<SmolStr> {
    let name = match prop {
        Prop::Attribute(attr) => attr.name.as_str(),
        Prop::Directive(dir) if dir.kind == DirectiveKind::Bind => dir.static_arg()?,
        Prop::Directive(_) => return None,
    };
    Some(SmolStr::from(name.to_ascii_lowercase()))
}

fn check_attributes(el: &Element, diagnostics: &mut Vec<Diagnostic>) {
    let mut seen = FxHashSet::default();
    for prop in &el.props {
        let Some(name) = output_name(prop) else {
            continue;
        };
        if !seen.insert(name.clone()) {
            diagnostics.push(Diagnostic::new(
                DiagnosticCode::DuplicateAttribute,
                format!("`{name}` is set more than once on <{}>", el.name),
                prop.span(),
            ));
        }
    }
}

fn check_directives(el: &Element, diagnostics: &mut Vec<Diagnostic>) {
    let mut seen = FxHashSet::default();
    for dir in el.directives() {
        let key = match dir.kind {
            kind if kind.is_conditional() => DirectiveKind::If,
            kind @ (DirectiveKind::For
            | DirectiveKind::Show
            | DirectiveKind::Html
            | DirectiveKind::Text) => kind,
            _ => continue,
        };
        if !seen.insert(key) {
            diagnostics.push(Diagnostic::new(
                DiagnosticCode::DuplicateDirective,
                format!(
                    "`{}` is ignored; <{}> already has a {} directive",
                    dir.raw_name,
                    el.name,
                    if key == DirectiveKind::If {
                        "conditional".to_string()
                    } else {
                        format!("`v-{}`", dir.name)
                    }
                ),
                dir.span,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vue_template_parser::parse;

    fn codes(source: &str) -> Vec<&'static str> {
        check(&parse(source).document)
            .iter()
            .map(|d| d.code.as_str())
            .collect()
    }

    #[test]
    fn test_chain_is_clean() {
        assert!(codes(r#"<p v-if="a">a</p><p v-else-if="b">b</p><p v-else>c</p>"#).is_empty());
    }

    #[test]
    fn test_orphan_else() {
        let diagnostics = check(&parse(r#"<div><p v-if="a">a</p> <p v-else>b</p></div>"#).document);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::OrphanElse);
        assert_eq!(
            diagnostics[0].message,
            "`v-else` on <p> has no preceding `v-if` sibling and is rendered unconditionally"
        );
    }

    #[test]
    fn test_orphan_after_closed_chain() {
        assert_eq!(
            codes(r#"<i v-if="a"></i><i v-else></i><i v-else-if="b"></i>"#),
            vec!["orphan-else"]
        );
    }

    #[test]
    fn test_duplicate_attribute() {
        assert_eq!(
            codes(r#"<div class="a" :class="b" :id="x" v-bind="rest"></div>"#),
            vec!["duplicate-attribute"]
        );
    }

    #[test]
    fn test_duplicate_directive() {
        let diagnostics = check(&parse(r#"<p v-if="a" v-else v-show="b" v-show="c"></p>"#).document);
        let messages: Vec<_> = diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "`v-else` is ignored; <p> already has a conditional directive",
                "`v-show` is ignored; <p> already has a `v-show` directive",
            ]
        );
    }
}
