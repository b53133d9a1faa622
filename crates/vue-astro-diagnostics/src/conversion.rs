//! Checks for Vue features that lose meaning in the Astro output.

use crate::{Diagnostic, DiagnosticCode};
use vue_astro_transformer::ForExpression;
use vue_template_parser::{Directive, DirectiveKind, Element, TemplateDocument, TemplateNode};

/// Runs conversion checks on a document.
pub fn check(doc: &TemplateDocument) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    check_fragment(&doc.fragment.nodes, &mut diagnostics);
    diagnostics
}

fn check_fragment(nodes: &[TemplateNode], diagnostics: &mut Vec<Diagnostic>) {
    for node in nodes {
        if let TemplateNode::Element(el) = node {
            check_element(el, diagnostics);
            check_fragment(&el.children, diagnostics);
        }
    }
}

fn check_element(el: &Element, diagnostics: &mut Vec<Diagnostic>) {
    check_content_directives(el, diagnostics);

    for dir in el.directives() {
        match dir.kind {
            DirectiveKind::For => check_for(dir, diagnostics),
            DirectiveKind::On => diagnostics.push(Diagnostic::new(
                DiagnosticCode::InertEventHandler,
                format!(
                    "`{}` is kept as an inert `data-on-{}` attribute; the handler never runs",
                    dir.raw_name,
                    dir.static_arg().unwrap_or("event")
                ),
                dir.span,
            )),
            DirectiveKind::Other => diagnostics.push(unsupported(dir)),
            _ => {}
        }
    }

    if el.has_directive(DirectiveKind::Show) {
        check_show_style(el, diagnostics);
    }
}

fn check_content_directives(el: &Element, diagnostics: &mut Vec<Diagnostic>) {
    let html = el.directive(DirectiveKind::Html);
    let text = el.directive(DirectiveKind::Text);

    if let (Some(_), Some(text)) = (html, text) {
        diagnostics.push(Diagnostic::new(
            DiagnosticCode::ConflictingContentDirectives,
            format!("<{}> has both `v-html` and `v-text`; `v-text` is ignored", el.name),
            text.span,
        ));
    }

    let Some(dir) = html.or(text) else {
        return;
    };
    let has_children = el.children.iter().any(|child| match child {
        TemplateNode::Text(text) => !text.is_whitespace,
        _ => true,
    });
    if has_children {
        diagnostics.push(Diagnostic::new(
            DiagnosticCode::ContentDirectiveDiscardsChildren,
            format!("the children of <{}> are replaced by `{}`", el.name, dir.raw_name),
            dir.span,
        ));
    }
}

fn check_for(dir: &Directive, diagnostics: &mut Vec<Diagnostic>) {
    let Some(expression) = dir.expression_text() else {
        diagnostics.push(Diagnostic::new(
            DiagnosticCode::MalformedFor,
            "`v-for` has no expression",
            dir.span,
        ));
        return;
    };

    let parsed = ForExpression::parse(expression);
    if !parsed.well_formed {
        diagnostics.push(Diagnostic::new(
            DiagnosticCode::MalformedFor,
            format!(
                "`v-for=\"{}\"` is not of the form `item in source`; iterating it as `item`",
                expression.trim()
            ),
            dir.span,
        ));
    } else if !parsed.extra_aliases.is_empty() {
        diagnostics.push(Diagnostic::new(
            DiagnosticCode::MalformedFor,
            format!(
                "`v-for` alias `{}` has no counterpart in `.map()` and is undefined in the output",
                parsed.extra_aliases.join("`, `")
            ),
            dir.span,
        ));
    }
}

fn unsupported(dir: &Directive) -> Diagnostic {
    let message = match dir.name.as_str() {
        "model" => "`v-model` two-way binding has no Astro equivalent and is dropped".to_string(),
        "slot" => format!(
            "`{}` is dropped; use Astro's `slot` attribute and `<slot />` instead",
            dir.raw_name
        ),
        _ => format!("`{}` has no Astro equivalent and is dropped", dir.raw_name),
    };
    Diagnostic::new(DiagnosticCode::UnsupportedDirective, message, dir.span)
}

/// `v-show` concatenates its ternary to the bound style, which only works
/// for string styles.
fn check_show_style(el: &Element, diagnostics: &mut Vec<Diagnostic>) {
    let bound_style = el.directives().find(|dir| {
        dir.kind == DirectiveKind::Bind
            && dir
                .static_arg()
                .is_some_and(|arg| arg.eq_ignore_ascii_case("style"))
    });
    let Some(dir) = bound_style else {
        return;
    };
    let expression = dir.expression_text().unwrap_or("").trim_start();
    if expression.starts_with('{') || expression.starts_with('[') {
        diagnostics.push(Diagnostic::new(
            DiagnosticCode::DynamicStyleObject,
            "`v-show` is merged into `:style` by string concatenation; an object or array style becomes invalid",
            dir.span,
        ));
    }
}
