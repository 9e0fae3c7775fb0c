//! Fixed-width column tables.
//!
//! UVF and WEL lay fields out by character position. Each layout is a
//! handful of [`Column`] constants; slicing is done on characters so that
//! umlauts in titles do not shift the following fields.

/// A character range within a fixed-width line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Column {
    start: usize,
    end: Option<usize>,
}

impl Column {
    /// A field of `width` characters starting at `start`.
    pub(crate) const fn fixed(start: usize, width: usize) -> Self {
        Self {
            start,
            end: Some(start + width),
        }
    }

    /// Everything from `start` to the end of the line.
    pub(crate) const fn open(start: usize) -> Self {
        Self { start, end: None }
    }

    /// Width in characters, `None` for open columns.
    pub(crate) fn width(self) -> Option<usize> {
        self.end.map(|end| end - self.start)
    }

    /// Returns the field's text, or the part of it that exists when the line
    /// is short. Lines ending before `start` yield `""`.
    pub(crate) fn slice(self, line: &str) -> &str {
        let from = char_offset(line, self.start);
        let to = match self.end {
            Some(end) => char_offset(line, end),
            None => line.len(),
        };
        &line[from..to]
    }

    /// Trimmed field text.
    pub(crate) fn field(self, line: &str) -> &str {
        self.slice(line).trim()
    }

    /// Left-justifies `text` in this column, truncating it to the width.
    pub(crate) fn fit(self, text: &str) -> String {
        match self.width() {
            Some(width) => {
                let truncated: String = text.chars().take(width).collect();
                format!("{truncated:<width$}")
            }
            None => text.to_string(),
        }
    }
}

/// Byte offset of the `n`th character, or the string length past the end.
fn char_offset(line: &str, n: usize) -> usize {
    line.char_indices().nth(n).map_or(line.len(), |(i, _)| i)
}
