//! Escaping helpers for generated attribute values.

/// Escapes `&` then `"` for use inside a double-quoted attribute.
pub fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

/// Escapes backticks for use inside a template literal.
pub fn escape_backticks(value: &str) -> String {
    value.replace('`', "\\`")
}

/// Returns true if a static value contains a `${...}` placeholder.
pub fn has_placeholder(value: &str) -> bool {
    value.contains("${")
}

/// Wraps `value` in a template literal. A backtick pair already surrounding
/// the whole value is stripped first.
pub fn template_literal(value: &str) -> String {
    let inner = value
        .strip_prefix('`')
        .and_then(|rest| rest.strip_suffix('`'))
        .unwrap_or(value);
    format!("`{}`", escape_backticks(inner))
}
