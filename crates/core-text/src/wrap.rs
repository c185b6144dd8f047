//! Soft wrapping with a two-way offset mapping.
//!
//! `wrap` lays logical text out for a given column budget and records, for
//! every byte offset, where it landed in the wrapped string (and back). Hosts
//! re-run it after each buffer change or terminal resize and project the
//! logical cursor through `WrapMap::to_wrapped` / `WrapMap::cursor_cell`.
//!
//! Layout rules:
//! * Hard `\n` characters start a new paragraph and map 1:1.
//! * Words keep their trailing blanks, so rejoining the pieces reproduces the
//!   text exactly.
//! * A word is placed on the current row while `row_width + word_width <
//!   budget` (strict: the last cell stays free for the cursor). Otherwise a
//!   soft `\n` is emitted first.
//! * A word at least as wide as the budget is broken per grapheme with the
//!   same test; a row always takes at least one grapheme.
//! * The budget starts at `first_line_width` (when given) and becomes `width`
//!   after the first break of either kind.

use unicode_segmentation::UnicodeSegmentation;

use crate::{egc_width, grapheme};

/// Wrapped text plus offset mappings in both directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapMap {
    pub wrapped: String,
    /// `original_to_wrapped[p]` for every byte offset `p` in `0..=text.len()`.
    pub original_to_wrapped: Vec<usize>,
    /// `wrapped_to_original[q]` for every byte offset `q` in
    /// `0..=wrapped.len()`; `None` marks an inserted soft break.
    pub wrapped_to_original: Vec<Option<usize>>,
}

impl WrapMap {
    /// Wrapped offset of a logical offset (clamped to the end sentinel).
    pub fn to_wrapped(&self, offset: usize) -> usize {
        let last = self.original_to_wrapped.len() - 1;
        self.original_to_wrapped[offset.min(last)]
    }

    /// Logical offset of a wrapped offset. A soft break resolves forward to
    /// the first real character after it.
    pub fn to_original(&self, offset: usize) -> usize {
        let last = self.wrapped_to_original.len() - 1;
        self.wrapped_to_original[offset.min(last)..]
            .iter()
            .find_map(|mapped| *mapped)
            .unwrap_or(self.original_to_wrapped.len() - 1)
    }

    /// Number of rendered rows.
    pub fn line_count(&self) -> usize {
        self.wrapped.matches('\n').count() + 1
    }

    /// Rendered (row, display column) of a logical offset.
    pub fn cursor_cell(&self, offset: usize) -> (usize, usize) {
        let at = self.to_wrapped(offset);
        let before = &self.wrapped[..at];
        let row_start = before.rfind('\n').map(|idx| idx + 1).unwrap_or(0);
        let row = before.matches('\n').count();
        let col = grapheme::iter(&before[row_start..]).map(egc_width).sum();
        (row, col)
    }
}

struct Layout {
    wrapped: String,
    original_to_wrapped: Vec<usize>,
    wrapped_to_original: Vec<Option<usize>>,
    row_width: usize,
    budget: usize,
    width: usize,
}

impl Layout {
    fn push_original(&mut self, offset: usize, piece: &str) {
        for i in 0..piece.len() {
            self.original_to_wrapped.push(self.wrapped.len() + i);
            self.wrapped_to_original.push(Some(offset + i));
        }
        self.wrapped.push_str(piece);
    }

    fn soft_break(&mut self) {
        self.wrapped.push('\n');
        self.wrapped_to_original.push(None);
        self.row_width = 0;
        self.budget = self.width;
    }

    fn hard_break(&mut self, offset: usize) {
        self.push_original(offset, "\n");
        self.row_width = 0;
        self.budget = self.width;
    }

    fn place_word(&mut self, offset: usize, word: &str) {
        let word_width: usize = grapheme::iter(word).map(egc_width).sum();
        if self.row_width + word_width < self.budget {
            self.push_original(offset, word);
            self.row_width += word_width;
            return;
        }
        if self.row_width > 0 && word_width < self.width {
            // Fits on a fresh row, which always gets the full width.
            self.soft_break();
            self.push_original(offset, word);
            self.row_width = word_width;
            return;
        }
        for (idx, g) in word.grapheme_indices(true) {
            let w = egc_width(g);
            if self.row_width + w >= self.budget && self.row_width > 0 {
                self.soft_break();
            }
            self.push_original(offset + idx, g);
            self.row_width += w;
        }
    }
}

/// Split a paragraph into words, each carrying its trailing blanks. Leading
/// blanks form their own piece.
fn words(paragraph: &str) -> Vec<(usize, &str)> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_blank = false;
    for (idx, c) in paragraph.char_indices() {
        let blank = c.is_whitespace();
        if !blank && in_blank && idx > start {
            out.push((start, &paragraph[start..idx]));
            start = idx;
        }
        in_blank = blank;
    }
    if start < paragraph.len() {
        out.push((start, &paragraph[start..]));
    }
    out
}

/// Wrap `text` to `width` columns, optionally giving the first row a narrower
/// `first_line_width`. Widths below 1 are treated as 1.
pub fn wrap(text: &str, width: usize, first_line_width: Option<usize>) -> WrapMap {
    let width = width.max(1);
    let budget = first_line_width.map(|w| w.max(1)).unwrap_or(width);
    let mut layout = Layout {
        wrapped: String::with_capacity(text.len() + text.len() / width.max(8)),
        original_to_wrapped: Vec::with_capacity(text.len() + 1),
        wrapped_to_original: Vec::with_capacity(text.len() + 1),
        row_width: 0,
        budget,
        width,
    };

    let mut paragraph_start = 0;
    for (idx, paragraph) in text.split('\n').enumerate() {
        if idx > 0 {
            layout.hard_break(paragraph_start - 1);
        }
        for (word_start, word) in words(paragraph) {
            layout.place_word(paragraph_start + word_start, word);
        }
        paragraph_start += paragraph.len() + 1;
    }

    // End-of-text sentinel.
    layout.original_to_wrapped.push(layout.wrapped.len());
    layout.wrapped_to_original.push(Some(text.len()));

    tracing::trace!(
        target: "text.wrap",
        width,
        budget,
        text_len = text.len(),
        rows = layout.wrapped.matches('\n').count() + 1,
        "wrap"
    );

    WrapMap {
        wrapped: layout.wrapped,
        original_to_wrapped: layout.original_to_wrapped,
        wrapped_to_original: layout.wrapped_to_original,
    }
}
