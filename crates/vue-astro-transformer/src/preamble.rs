//! Frontmatter splitting for `.astro` sources.

/// The fence that opens and closes the frontmatter block.
pub const FENCE: &str = "---";

/// An `.astro` source split at its frontmatter fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frontmatter<'a> {
    /// The frontmatter block including both fences, byte-for-byte.
    pub block: &'a str,
    /// The template body after the closing fence.
    pub body: &'a str,
    /// Byte offset of `body` within the original source.
    pub body_offset: usize,
}

/// Splits `code` into its frontmatter block and template body.
///
/// Returns `None` when the source does not start with `---` or the fence is
/// never closed. One line break directly after the closing fence is dropped
/// from the body.
pub fn split_frontmatter(code: &str) -> Option<Frontmatter<'_>> {
    if !code.starts_with(FENCE) {
        return None;
    }

    let closing = "\n---";
    let end = code.get(FENCE.len()..)?.find(closing)? + FENCE.len() + closing.len();
    let block = &code[..end];
    let rest = &code[end..];
    let body = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))
        .unwrap_or(rest);

    Some(Frontmatter {
        block,
        body,
        body_offset: code.len() - body.len(),
    })
}
