//! Astro markup generation.
//!
//! Walks the template tree depth-first. Sibling lists are first split into
//! render units so `v-if` chains become one nested ternary; everything else
//! is lowered node by node and concatenated without separators.

use crate::directives::{AttrSpec, ElementDirectives};
use crate::escape::{escape_attr, has_placeholder, template_literal};
use crate::for_loop::ForExpression;
use crate::group::{group_siblings, Branch, RenderUnit};
use crate::style::merge_show_into_style;
use vue_template_parser::{Element, TemplateNode};

/// Where generated code lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    /// Between tags, where expressions need `{}`.
    Markup,
    /// Inside an expression, such as a ternary branch.
    Expression,
}

/// Generates Astro markup for a sibling list.
pub fn generate_fragment(nodes: &[TemplateNode]) -> String {
    let mut output = String::new();
    write_fragment(nodes, &mut output);
    output
}

fn write_fragment(nodes: &[TemplateNode], output: &mut String) {
    for unit in group_siblings(nodes) {
        match unit {
            RenderUnit::Single(node) => write_node(node, output),
            RenderUnit::Chain(branches) => {
                output.push('{');
                write_chain(&branches, output);
                output.push('}');
            }
        }
    }
}

fn write_node(node: &TemplateNode, output: &mut String) {
    match node {
        TemplateNode::Text(text) => output.push_str(&text.data),
        TemplateNode::Interpolation(interp) => {
            output.push('{');
            output.push_str(&interp.expression);
            output.push('}');
        }
        TemplateNode::Comment(comment) => {
            output.push_str("<!--");
            output.push_str(&comment.data);
            output.push_str("-->");
        }
        TemplateNode::Element(el) => {
            if el.directives().any(|dir| dir.kind.is_conditional()) {
                log::debug!("<{}> has v-else/v-else-if without a preceding v-if", el.name);
            }
            write_element(el, Position::Markup, output);
        }
    }
}

/// `c1 ? (b1) : c2 ? (b2) : (else)`, or `... : null` without a `v-else`.
fn write_chain(branches: &[Branch<'_>], output: &mut String) {
    for branch in branches {
        match branch.condition() {
            Some(condition) => {
                output.push_str(condition);
                output.push_str(" ? (");
                write_element(branch.element, Position::Expression, output);
                output.push_str(") : ");
            }
            None => {
                output.push('(');
                write_element(branch.element, Position::Expression, output);
                output.push(')');
                return;
            }
        }
    }
    output.push_str("null");
}

/// Generates an element whose conditional directive, if any, has already
/// been handled by the caller.
fn write_element(el: &Element, position: Position, output: &mut String) {
    let dirs = ElementDirectives::extract(el);

    let Some(for_dir) = dirs.for_loop else {
        write_plain_element(el, &dirs, output);
        return;
    };

    let for_expr = ForExpression::parse(for_dir.expression_text().unwrap_or(""));
    if position == Position::Markup {
        output.push('{');
    }
    output.push_str(&for_expr.iterable());
    output.push_str(".map((");
    output.push_str(&for_expr.params());
    output.push_str(") => (");
    write_plain_element(el, &dirs, output);
    output.push_str("))");
    if position == Position::Markup {
        output.push('}');
    }
}

fn write_plain_element(el: &Element, dirs: &ElementDirectives<'_>, output: &mut String) {
    let is_wrapper =
        el.name.as_str() == "template" && (dirs.conditional.is_some() || dirs.for_loop.is_some());
    let tag = if is_wrapper { "Fragment" } else { el.name.as_str() };

    output.push('<');
    output.push_str(tag);

    let attrs = match dirs.show_condition() {
        Some(condition) => merge_show_into_style(dirs.attrs.clone(), condition),
        None => dirs.attrs.clone(),
    };
    for attr in &attrs {
        write_attr(attr, output);
    }

    if let Some(content) = dirs.content {
        output.push(' ');
        output.push_str(content.attribute());
        output.push_str("={");
        output.push_str(content.expression());
        output.push_str("}></");
        output.push_str(tag);
        output.push('>');
        return;
    }

    output.push('>');
    write_fragment(&el.children, output);
    output.push_str("</");
    output.push_str(tag);
    output.push('>');
}

fn write_attr(attr: &AttrSpec<'_>, output: &mut String) {
    match attr {
        AttrSpec::Static { name, value: None } => {
            output.push(' ');
            output.push_str(name);
        }
        AttrSpec::Static {
            name,
            value: Some(value),
        } => {
            output.push(' ');
            output.push_str(name);
            if has_placeholder(value) {
                output.push_str("={");
                output.push_str(&template_literal(value));
                output.push('}');
            } else {
                output.push_str("=\"");
                output.push_str(&escape_attr(value));
                output.push('"');
            }
        }
        AttrSpec::Bound { name, expression } => {
            output.push(' ');
            output.push_str(name);
            output.push_str("={");
            output.push_str(expression.as_deref().unwrap_or("true"));
            output.push('}');
        }
        AttrSpec::DynamicKey { key, expression } => {
            output.push_str(" {...{[");
            output.push_str(key);
            output.push_str("]: ");
            output.push_str(expression.unwrap_or("true"));
            output.push_str("}}");
        }
        AttrSpec::Spread { expression } => {
            output.push_str(" {...");
            output.push_str(expression.unwrap_or("{}"));
            output.push('}');
        }
        AttrSpec::Event { event, expression } => {
            output.push_str(" data-on-");
            output.push_str(event.unwrap_or("event"));
            output.push_str("=\"");
            output.push_str(&escape_attr(expression.unwrap_or("")));
            output.push('"');
        }
        AttrSpec::Unsupported { raw_name } => {
            log::debug!("dropping unsupported directive `{raw_name}`");
        }
    }
}
