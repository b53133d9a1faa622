//! Heuristic detection of Vue template syntax in a template body.

use regex::Regex;
use std::sync::OnceLock;

fn mustache_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{\s*[^}]+?\s*\}\}").unwrap())
}

fn directive_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\sv-(if|else-if|else|for|show|model|bind|on|slot|html|text)\b").unwrap()
    })
}

fn shorthand_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?:\s|<)[:@][a-zA-Z]").unwrap())
}

/// Returns true if `body` contains mustache interpolation, a `v-` directive
/// or a `:`/`@` binding shorthand.
///
/// Plain Astro markup never matches, so a `false` result means the body can
/// be passed through untouched.
pub fn is_vue_template(body: &str) -> bool {
    mustache_re().is_match(body) || directive_re().is_match(body) || shorthand_re().is_match(body)
}
