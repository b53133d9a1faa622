//! Offset to line/column conversion for reporting.

use text_size::TextSize;

/// A 1-based line/column position. Columns count bytes within the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineCol {
    pub line: u32,
    pub column: u32,
}

/// Start offsets of every line in a source file.
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<u32>,
    len: u32,
}

impl LineIndex {
    /// Indexes `text`. `\r\n` counts as a single line break.
    pub fn new(text: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(
                text.match_indices('\n')
                    .map(|(offset, _)| (offset + 1) as u32),
            )
            .collect();
        Self {
            starts,
            len: text.len() as u32,
        }
    }

    /// Number of lines, counting a trailing empty line after a final newline.
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Converts a byte offset; `None` past the end of the text.
    pub fn line_col(&self, offset: TextSize) -> Option<LineCol> {
        let offset = u32::from(offset);
        if offset > self.len {
            return None;
        }
        let line = self.starts.partition_point(|&start| start <= offset) - 1;
        Some(LineCol {
            line: line as u32 + 1,
            column: offset - self.starts[line] + 1,
        })
    }

    /// Byte offset where the given 1-based line begins.
    pub fn line_start(&self, line: u32) -> Option<TextSize> {
        let index = usize::try_from(line.checked_sub(1)?).ok()?;
        self.starts.get(index).map(|&start| TextSize::from(start))
    }
}
