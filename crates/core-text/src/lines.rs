//! Line table: line boundaries and (line, column) decomposition for a text snapshot.
//!
//! Built once per dispatch from the current buffer text; every motion and
//! operator consults the same table rather than re-splitting per character.
//! Only `\n` terminates a line. Offsets are UTF-8 byte offsets.

use crate::{Position, grapheme};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTable {
    /// Byte offset of the first character of each line. Always non-empty.
    starts: Vec<usize>,
    len: usize,
}

impl LineTable {
    pub fn new(text: &str) -> Self {
        let mut starts = Vec::with_capacity(text.len() / 32 + 1);
        starts.push(0);
        starts.extend(text.match_indices('\n').map(|(idx, _)| idx + 1));
        Self {
            starts,
            len: text.len(),
        }
    }

    /// Number of lines. A trailing `\n` opens a final empty line.
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Index of the line containing `offset` (clamped to the text length).
    pub fn line_of(&self, offset: usize) -> usize {
        let offset = offset.min(self.len);
        match self.starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        }
    }

    /// Byte offset where `line` begins. Lines past the end clamp to the last line.
    pub fn line_start(&self, line: usize) -> usize {
        self.starts[line.min(self.starts.len() - 1)]
    }

    /// Insertion end of `line`: the offset of its terminating `\n`, or the text
    /// length for the last line. Excludes the newline itself.
    pub fn line_end(&self, line: usize) -> usize {
        let line = line.min(self.starts.len() - 1);
        match self.starts.get(line + 1) {
            Some(next) => next - 1,
            None => self.len,
        }
    }

    /// True when `line` has no characters before its terminator.
    pub fn is_line_empty(&self, line: usize) -> bool {
        self.line_start(line) == self.line_end(line)
    }

    /// True when `line` is terminated by a `\n`.
    pub fn has_newline(&self, line: usize) -> bool {
        line + 1 < self.starts.len()
    }

    /// Content of `line` without its terminator.
    pub fn line_str<'a>(&self, text: &'a str, line: usize) -> &'a str {
        &text[self.line_start(line)..self.line_end(line)]
    }

    /// Decompose an offset into (line, byte column).
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.len);
        let line = self.line_of(offset);
        Position::new(line, offset - self.starts[line])
    }

    /// Compose (line, byte column) back into an offset, clamping the column to
    /// the line's insertion end.
    pub fn offset(&self, pos: Position) -> usize {
        let start = self.line_start(pos.line);
        let end = self.line_end(pos.line);
        (start + pos.byte).min(end)
    }

    /// Offset of the first non-blank character of `line`. A blank line yields
    /// its insertion end.
    pub fn first_non_blank(&self, text: &str, line: usize) -> usize {
        let start = self.line_start(line);
        let content = self.line_str(text, line);
        let skipped = content
            .char_indices()
            .find(|(_, c)| *c != ' ' && *c != '\t')
            .map(|(idx, _)| idx)
            .unwrap_or(content.len());
        start + skipped
    }

    /// Display column of `offset` within its line.
    pub fn visual_col(&self, text: &str, offset: usize) -> usize {
        let pos = self.position(offset);
        let content = self.line_str(text, pos.line);
        grapheme::visual_col(content, pos.byte.min(content.len()))
    }

    /// Offset on `line` whose cluster covers display column `col`, clamped to
    /// the line's insertion end.
    pub fn offset_for_visual_col(&self, text: &str, line: usize, col: usize) -> usize {
        let content = self.line_str(text, line);
        self.line_start(line) + grapheme::byte_for_visual_col(content, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_newlines_only() {
        let t = LineTable::new("ab\ncd\r\nef");
        assert_eq!(t.line_count(), 3);
        assert_eq!(t.line_start(1), 3);
        assert_eq!(t.line_end(1), 6); // '\r' belongs to the line content
        assert_eq!(t.line_end(2), 9);
    }

    #[test]
    fn empty_text_has_one_empty_line() {
        let t = LineTable::new("");
        assert_eq!(t.line_count(), 1);
        assert!(t.is_line_empty(0));
        assert_eq!(t.line_of(0), 0);
        assert_eq!(t.position(5), Position::new(0, 0));
    }

    #[test]
    fn trailing_newline_opens_final_line() {
        let text = "abc\n";
        let t = LineTable::new(text);
        assert_eq!(t.line_count(), 2);
        assert_eq!(t.line_start(1), 4);
        assert!(t.is_line_empty(1));
        assert!(!t.has_newline(1));
        assert!(t.has_newline(0));
        assert_eq!(t.line_of(3), 0, "newline belongs to the line it ends");
        assert_eq!(t.line_of(4), 1);
    }

    #[test]
    fn position_round_trip() {
        let text = "a\nbcd\n\nef";
        let t = LineTable::new(text);
        for offset in 0..=text.len() {
            let pos = t.position(offset);
            assert_eq!(t.offset(pos), offset, "offset {offset}");
        }
        assert_eq!(t.position(3), Position::new(1, 1));
        assert_eq!(t.offset(Position::new(1, 99)), 5);
    }

    #[test]
    fn first_non_blank_skips_indent() {
        let text = "  \tfoo\n   \nbar";
        let t = LineTable::new(text);
        assert_eq!(t.first_non_blank(text, 0), 3);
        assert_eq!(t.first_non_blank(text, 1), t.line_end(1));
        assert_eq!(t.first_non_blank(text, 2), t.line_start(2));
    }

    #[test]
    fn visual_columns_follow_cluster_widths() {
        let text = "界x\nabc";
        let t = LineTable::new(text);
        assert_eq!(t.visual_col(text, "界".len()), 2);
        assert_eq!(t.offset_for_visual_col(text, 0, 1), 0);
        assert_eq!(t.offset_for_visual_col(text, 0, 2), "界".len());
        assert_eq!(t.offset_for_visual_col(text, 1, 10), text.len());
    }
}
