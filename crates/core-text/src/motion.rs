//! Motion table and cursor movement helpers.
//!
//! A `Motion` answers "what range would this key select" for a text snapshot
//! and a cursor (`Motion::range`), and where a Normal-mode cursor lands when
//! the motion is used on its own (`Motion::destination`). Ranges are half-open
//! byte ranges on grapheme boundaries. Both are pure: no editor state, no
//! allocation beyond a transient cluster index.
//!
//! Word motions early-exit at buffer boundaries and report "no movement"
//! instead of failing.

use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;

use crate::{CharClass, LineTable, grapheme};

/// Granularity of word motions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordKind {
    /// Alphanumeric/underscore runs and punctuation runs are separate words
    /// (`foo-bar` is three words).
    Word,
    /// Any maximal run of non-blank characters is one WORD.
    BigWord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Motion {
    /// `w` / `W`
    WordForward(WordKind),
    /// `b` / `B`
    WordBackward(WordKind),
    /// `e` / `E`
    WordEnd(WordKind),
    /// `0`
    LineStart,
    /// `$`
    LineEnd,
    /// `^`
    FirstNonBlank,
}

impl Motion {
    /// Map a motion key. WORD keys (`W`, `B`, `E`) are only recognized when
    /// `big_words` is enabled.
    pub fn from_key(c: char, big_words: bool) -> Option<Self> {
        let motion = match c {
            'w' => Motion::WordForward(WordKind::Word),
            'b' => Motion::WordBackward(WordKind::Word),
            'e' => Motion::WordEnd(WordKind::Word),
            'W' if big_words => Motion::WordForward(WordKind::BigWord),
            'B' if big_words => Motion::WordBackward(WordKind::BigWord),
            'E' if big_words => Motion::WordEnd(WordKind::BigWord),
            '0' => Motion::LineStart,
            '$' => Motion::LineEnd,
            '^' => Motion::FirstNonBlank,
            _ => return None,
        };
        Some(motion)
    }

    pub fn key(self) -> char {
        match self {
            Motion::WordForward(WordKind::Word) => 'w',
            Motion::WordForward(WordKind::BigWord) => 'W',
            Motion::WordBackward(WordKind::Word) => 'b',
            Motion::WordBackward(WordKind::BigWord) => 'B',
            Motion::WordEnd(WordKind::Word) => 'e',
            Motion::WordEnd(WordKind::BigWord) => 'E',
            Motion::LineStart => '0',
            Motion::LineEnd => '$',
            Motion::FirstNonBlank => '^',
        }
    }

    /// Forward word motions whose ranges end after a word (`w`, `e` and WORD
    /// forms). The change operator trims trailing blanks for these.
    pub fn ends_after_word(self) -> bool {
        matches!(self, Motion::WordForward(_) | Motion::WordEnd(_))
    }

    /// Range selected by the motion from `cursor`. Always `start <= end`.
    pub fn range(self, text: &str, lines: &LineTable, cursor: usize) -> Range<usize> {
        let cursor = cursor.min(text.len());
        match self {
            Motion::WordForward(kind) => word_forward(text, cursor, kind),
            Motion::WordBackward(kind) => word_backward(text, cursor, kind),
            Motion::WordEnd(kind) => word_end(text, cursor, kind),
            Motion::LineStart => lines.line_start(lines.line_of(cursor))..cursor,
            Motion::LineEnd => {
                let line = lines.line_of(cursor);
                // One past the line's last character: includes the terminator.
                let end = (lines.line_end(line) + 1).min(text.len());
                cursor..end.max(cursor)
            }
            Motion::FirstNonBlank => {
                let target = lines.first_non_blank(text, lines.line_of(cursor));
                cursor.min(target)..cursor.max(target)
            }
        }
    }

    /// Offset a standalone motion moves the cursor to. Not yet clamped to
    /// Normal-mode validity; see [`clamp_normal`].
    pub fn destination(self, text: &str, lines: &LineTable, cursor: usize) -> usize {
        let range = self.range(text, lines, cursor);
        match self {
            Motion::WordForward(_) => range.end,
            Motion::WordBackward(_) => range.start,
            Motion::WordEnd(_) => {
                if range.is_empty() {
                    cursor
                } else {
                    grapheme::prev_boundary(text, range.end)
                }
            }
            Motion::LineStart => range.start,
            Motion::LineEnd => lines.line_end(lines.line_of(cursor)),
            Motion::FirstNonBlank => lines.first_non_blank(text, lines.line_of(cursor)),
        }
    }
}

/// Cluster index over a text snapshot.
struct Clusters<'a> {
    items: Vec<(usize, &'a str)>,
    len: usize,
    kind: WordKind,
}

impl<'a> Clusters<'a> {
    fn new(text: &'a str, kind: WordKind) -> Self {
        Self {
            items: text.grapheme_indices(true).collect(),
            len: text.len(),
            kind,
        }
    }

    fn count(&self) -> usize {
        self.items.len()
    }

    /// Index of the cluster containing `offset`; `count()` at the end of text.
    fn index_at(&self, offset: usize) -> usize {
        match self.items.binary_search_by_key(&offset, |(start, _)| *start) {
            Ok(idx) => idx,
            Err(0) => 0,
            Err(next) if offset >= self.len => next,
            Err(next) => next - 1,
        }
    }

    fn offset(&self, idx: usize) -> usize {
        self.items.get(idx).map(|(start, _)| *start).unwrap_or(self.len)
    }

    fn class(&self, idx: usize) -> CharClass {
        let class = grapheme::class_of(self.items[idx].1);
        match (self.kind, class) {
            (WordKind::BigWord, CharClass::Punct) => CharClass::Word,
            _ => class,
        }
    }
}

fn word_forward(text: &str, cursor: usize, kind: WordKind) -> Range<usize> {
    let cl = Clusters::new(text, kind);
    let n = cl.count();
    let mut i = cl.index_at(cursor);
    if i >= n {
        return cursor..cursor;
    }
    let start_class = cl.class(i);
    if start_class != CharClass::Blank {
        while i < n && cl.class(i) == start_class {
            i += 1;
        }
    }
    while i < n && cl.class(i) == CharClass::Blank {
        i += 1;
    }
    cursor..cl.offset(i)
}

fn word_backward(text: &str, cursor: usize, kind: WordKind) -> Range<usize> {
    if cursor == 0 {
        return 0..0;
    }
    let cl = Clusters::new(text, kind);
    let mut i = cl.index_at(cursor);
    while i > 0 && cl.class(i - 1) == CharClass::Blank {
        i -= 1;
    }
    if i > 0 {
        let class = cl.class(i - 1);
        while i > 0 && cl.class(i - 1) == class {
            i -= 1;
        }
    }
    cl.offset(i)..cursor
}

fn word_end(text: &str, cursor: usize, kind: WordKind) -> Range<usize> {
    let cl = Clusters::new(text, kind);
    let n = cl.count();
    let mut i = cl.index_at(cursor);
    if i >= n {
        return cursor..cursor;
    }
    let class = cl.class(i);
    let at_word_end = class == CharClass::Blank || i + 1 >= n || cl.class(i + 1) != class;
    if at_word_end {
        let mut j = i + 1;
        while j < n && cl.class(j) == CharClass::Blank {
            j += 1;
        }
        if j >= n {
            // No following word: select only the cluster under the cursor.
            return cursor..cl.offset(i + 1);
        }
        i = j;
    }
    let class = cl.class(i);
    while i + 1 < n && cl.class(i + 1) == class {
        i += 1;
    }
    cursor..cl.offset(i + 1)
}

/// Clamp an offset to a legal Normal-mode cursor: on an existing character,
/// and never on a line terminator unless the line is empty. Empty text clamps
/// to 0.
pub fn clamp_normal(text: &str, lines: &LineTable, offset: usize) -> usize {
    if text.is_empty() {
        return 0;
    }
    let mut off = offset.min(text.len());
    if off == text.len() {
        off = grapheme::prev_boundary(text, off);
    }
    if text.as_bytes()[off] == b'\n' {
        let line = lines.line_of(off);
        if !lines.is_line_empty(line) {
            off = grapheme::prev_boundary(text, off);
        }
    }
    off
}

/// One cluster left, without leaving the current line.
pub fn left(text: &str, lines: &LineTable, cursor: usize) -> usize {
    let line = lines.line_of(cursor);
    let start = lines.line_start(line);
    if cursor <= start {
        return cursor;
    }
    let content = lines.line_str(text, line);
    start + grapheme::prev_boundary(content, cursor - start)
}

/// One cluster right, stopping on the line's last character.
pub fn right(text: &str, lines: &LineTable, cursor: usize) -> usize {
    let line = lines.line_of(cursor);
    let start = lines.line_start(line);
    let content = lines.line_str(text, line);
    let next = start + grapheme::next_boundary(content, cursor - start);
    if next < lines.line_end(line) {
        next
    } else {
        cursor
    }
}

/// Same display column on the previous line, clamped to that line ("ragged"
/// vertical movement, no sticky column).
pub fn up(text: &str, lines: &LineTable, cursor: usize) -> usize {
    let line = lines.line_of(cursor);
    if line == 0 {
        return cursor;
    }
    vertical(text, lines, cursor, line - 1)
}

/// Same display column on the next line. The empty line opened by a trailing
/// `\n` holds no character and is not a Normal-mode target.
pub fn down(text: &str, lines: &LineTable, cursor: usize) -> usize {
    let line = lines.line_of(cursor);
    if line + 1 >= lines.line_count() || lines.line_start(line + 1) >= text.len() {
        return cursor;
    }
    vertical(text, lines, cursor, line + 1)
}

fn vertical(text: &str, lines: &LineTable, cursor: usize, target_line: usize) -> usize {
    let col = lines.visual_col(text, cursor);
    let target = lines.offset_for_visual_col(text, target_line, col);
    clamp_normal(text, lines, target)
}
