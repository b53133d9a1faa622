use std::collections::BTreeSet;
use vue_astro_diagnostics::{check, parse_diagnostics, DiagnosticCode, DiagnosticOptions};
use vue_template_parser::parse;

const EVERY_CODE: &str = r#"<section>
  <p v-else>orphan</p>
  <div class="a" :class="b"></div>
  <div v-if="x" v-if="y"></div>
  <div v-html="h" v-text="t"><b>lost</b></div>
  <li v-for="items"></li>
  <input v-model="q">
  <button @click="go()">Go</button>
  <p :style="{ color: c }" v-show="ok"></p>
  <span>unclosed
</section>"#;

#[test]
fn test_codes_are_unique_kebab_case() {
    let names: BTreeSet<_> = DiagnosticCode::ALL.iter().map(|c| c.as_str()).collect();
    assert_eq!(names.len(), DiagnosticCode::ALL.len());
    for name in names {
        assert!(
            name.bytes().all(|b| b.is_ascii_lowercase() || b == b'-'),
            "`{name}` is not kebab-case"
        );
    }
}

#[test]
fn test_every_code_is_reachable() {
    let result = parse(EVERY_CODE);
    let mut reported: BTreeSet<&'static str> = check(&result.document, DiagnosticOptions::all())
        .iter()
        .map(|d| d.code.as_str())
        .collect();
    reported.extend(parse_diagnostics(&result.errors).iter().map(|d| d.code.as_str()));

    let expected: BTreeSet<_> = DiagnosticCode::ALL.iter().map(|c| c.as_str()).collect();
    assert_eq!(reported, expected);
}
