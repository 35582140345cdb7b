//! Content blob assembly for fetched file excerpts.

/// Maximum number of characters kept per fetched file.
pub const EXCERPT_LIMIT: usize = 3000;

/// Accumulated character count past which a branch is considered to have
/// enough usable content.
pub const ENOUGH_CONTENT: usize = 500;

/// Accumulator for labeled, truncated file excerpts.
///
/// The blob has no structure beyond concatenation; rules treat it as flat
/// text.
#[derive(Debug, Default, Clone)]
pub struct ContentBlob {
    text: String,
}

impl ContentBlob {
    /// Create an empty blob.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a labeled excerpt of `contents`, truncated to
    /// [`EXCERPT_LIMIT`] characters.
    pub fn append_file(&mut self, name: &str, contents: &str) {
        let excerpt = truncate_chars(contents, EXCERPT_LIMIT);
        self.text.push_str("\n--- ");
        self.text.push_str(name);
        self.text.push_str(" ---\n");
        self.text.push_str(excerpt);
        self.text.push('\n');
    }

    /// Accumulated length in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether enough content has accumulated to stop probing further
    /// branches. Counts characters, like the per-file excerpt limit.
    pub fn has_enough(&self) -> bool {
        self.text.chars().nth(ENOUGH_CONTENT).is_some()
    }

    /// The accumulated text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
