//! Transform entry points.

use crate::codegen::generate_fragment;
use crate::detect::is_vue_template;
use crate::preamble::split_frontmatter;
use vue_template_parser::{parse_with_options, ParseError, ParseOptions};

/// The extension of files the transform applies to.
pub const ASTRO_EXTENSION: &str = ".astro";

/// Options for transformation.
#[derive(Debug, Clone, Default)]
pub struct TransformOptions {
    /// Options passed to the template parser.
    pub parse: ParseOptions,
}

/// The result of a successful transformation.
#[derive(Debug, Clone)]
pub struct TransformOutput {
    /// The frontmatter block, a line break, the generated template and a
    /// trailing line break.
    pub code: String,
    /// Errors the template parser recovered from. Spans are relative to the
    /// template body.
    pub parse_errors: Vec<ParseError>,
    /// Byte offset of the template body in the input.
    pub body_offset: usize,
}

/// Converts the Vue template below the frontmatter of an `.astro` source.
///
/// Returns `None`, meaning "leave the input untouched", when there is no
/// closed frontmatter fence or the body shows no Vue syntax.
pub fn transform_source(code: &str) -> Option<TransformOutput> {
    transform_source_with_options(code, &TransformOptions::default())
}

/// [`transform_source`] with custom options.
pub fn transform_source_with_options(
    code: &str,
    options: &TransformOptions,
) -> Option<TransformOutput> {
    let split = split_frontmatter(code)?;
    if !is_vue_template(split.body) {
        return None;
    }

    let parsed = parse_with_options(split.body, options.parse.clone());
    let template = generate_fragment(&parsed.document.fragment.nodes);

    Some(TransformOutput {
        code: format!("{}\n{}\n", split.block, template.trim_end()),
        parse_errors: parsed.errors,
        body_offset: split.body_offset,
    })
}

/// Transforms `code` if `id` names an `.astro` file.
///
/// `id` may carry a `?query` suffix, which is ignored. It is never read from
/// disk.
pub fn vue_template_astro_transform(code: &str, id: &str) -> Option<TransformOutput> {
    if !is_astro_id(id) {
        return None;
    }
    transform_source(code)
}

/// Strips a `?query` suffix from a module id.
pub fn strip_query(id: &str) -> &str {
    id.split_once('?').map_or(id, |(path, _)| path)
}

/// Returns true if the module id points at an `.astro` file.
pub fn is_astro_id(id: &str) -> bool {
    strip_query(id).ends_with(ASTRO_EXTENSION)
}
