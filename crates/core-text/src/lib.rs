//! Text primitives for the prompt editor: grapheme helpers, display width,
//! the line table, the motion table and the soft-wrapping layout.
//!
//! Everything here is pure and operates on `&str` snapshots plus UTF-8 byte
//! offsets. Offsets handed out by this crate always fall on grapheme cluster
//! boundaries; callers keep that property by only moving through the helpers
//! in `grapheme`.

pub mod lines;
pub mod motion;
pub mod width;
pub mod wrap;

pub use lines::LineTable;
pub use motion::{Motion, WordKind};
pub use width::{egc_width, str_width};
pub use wrap::{WrapMap, wrap};

/// A position expressed as (line index, byte offset within that line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub byte: usize,
}

impl Position {
    pub fn new(line: usize, byte: usize) -> Self {
        Self { line, byte }
    }
}

/// Character class used by word motions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// Spaces, tabs and line terminators.
    Blank,
    /// Alphanumerics and underscore.
    Word,
    /// Everything else (operators, brackets, quotes...).
    Punct,
}

/// Grapheme helpers. These are pure functions over a single `&str`; callers
/// pass either a whole buffer or one line's content.
pub mod grapheme {
    use crate::{CharClass, egc_width};
    use unicode_segmentation::UnicodeSegmentation;

    /// Iterate grapheme clusters.
    pub fn iter(s: &str) -> impl Iterator<Item = &str> {
        s.graphemes(true)
    }

    /// Previous grapheme boundary (0 if already at or before the first boundary).
    pub fn prev_boundary(s: &str, byte: usize) -> usize {
        if byte == 0 || byte > s.len() {
            return 0;
        }
        let mut last = 0;
        for (idx, _) in s.grapheme_indices(true) {
            if idx >= byte {
                break;
            }
            last = idx;
        }
        last
    }

    /// Next grapheme boundary (`s.len()` if at or beyond the end).
    pub fn next_boundary(s: &str, byte: usize) -> usize {
        if byte >= s.len() {
            return s.len();
        }
        for (idx, _) in s.grapheme_indices(true) {
            if idx > byte {
                return idx;
            }
        }
        s.len()
    }

    /// Visual column (terminal cells) up to (but not including) `byte`.
    pub fn visual_col(s: &str, byte: usize) -> usize {
        let mut col = 0;
        for (idx, g) in s.grapheme_indices(true) {
            if idx >= byte {
                break;
            }
            col += egc_width(g);
        }
        col
    }

    /// Byte offset of the cluster covering display column `target`, or
    /// `s.len()` when the column lies past the end.
    pub fn byte_for_visual_col(s: &str, target: usize) -> usize {
        let mut col = 0;
        for (idx, g) in s.grapheme_indices(true) {
            let w = egc_width(g);
            if col + w > target {
                return idx;
            }
            col += w;
        }
        s.len()
    }

    /// Classify a cluster by its first character.
    pub fn class_of(g: &str) -> CharClass {
        match g.chars().next() {
            Some(c) if c.is_whitespace() => CharClass::Blank,
            Some(c) if c == '_' || c.is_alphanumeric() => CharClass::Word,
            Some(_) => CharClass::Punct,
            None => CharClass::Blank,
        }
    }
}
