//! Folding `v-show` into the element's `style`.

use crate::directives::AttrSpec;
use crate::escape::escape_backticks;
use std::borrow::Cow;

/// The inline style applied when a `v-show` condition is false.
pub const HIDDEN_STYLE: &str = "display: none;";

/// `(cond) ? '' : 'display: none;'`
pub fn visibility_ternary(condition: &str) -> String {
    format!("({condition}) ? '' : '{HIDDEN_STYLE}'")
}

fn is_style(attr: &AttrSpec<'_>) -> bool {
    match attr {
        AttrSpec::Static { name, .. } | AttrSpec::Bound { name, .. } => {
            name.eq_ignore_ascii_case("style")
        }
        _ => false,
    }
}

/// Encodes a `v-show` condition in the `style` attribute.
///
/// - no `style`: a `style` binding is appended;
/// - static `style="..."`: becomes a template literal that appends the hidden
///   style when the condition is false;
/// - bound `:style="expr"`: the expression is concatenated with the
///   visibility ternary.
///
/// The `style` attribute keeps its position; other attributes are untouched.
pub fn merge_show_into_style<'a>(mut attrs: Vec<AttrSpec<'a>>, condition: &str) -> Vec<AttrSpec<'a>> {
    let Some(index) = attrs.iter().position(is_style) else {
        attrs.push(AttrSpec::Bound {
            name: "style",
            expression: Some(Cow::Owned(visibility_ternary(condition))),
        });
        return attrs;
    };

    let merged = match &attrs[index] {
        AttrSpec::Static { name, value } => AttrSpec::Bound {
            name: *name,
            expression: Some(Cow::Owned(static_style_template(
                value.as_deref().unwrap_or(""),
                condition,
            ))),
        },
        AttrSpec::Bound { name, expression } => AttrSpec::Bound {
            name: *name,
            expression: Some(Cow::Owned(format!(
                "({} ?? '') + ({})",
                expression.as_deref().unwrap_or("''"),
                visibility_ternary(condition)
            ))),
        },
        other => other.clone(),
    };
    attrs[index] = merged;
    attrs
}

/// `` `orig;${cond ? '' : 'display: none;'}` ``
fn static_style_template(original: &str, condition: &str) -> String {
    let trimmed = original.trim_end();
    let separator = if trimmed.is_empty() || trimmed.ends_with(';') {
        ""
    } else {
        ";"
    };
    format!(
        "`{}{separator}${{{condition} ? '' : '{HIDDEN_STYLE}'}}`",
        escape_backticks(original)
    )
}
