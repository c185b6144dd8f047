//! Operator table: `d` and `c` applied to a resolved range.
//!
//! Range resolution and application are split so callers (and tests) can
//! inspect exactly which bytes an operator would touch.
//!
//! Newline rules:
//! * Line scope (`dd`) is the only way to remove a line terminator. The last
//!   line, having none, takes the preceding `\n` with it instead.
//! * Motion scope cuts the range at the first `\n` it contains, so `dw` at the
//!   end of a line never joins lines.
//! * `cc` clears the line's content and keeps its terminator.

use std::ops::Range;

use core_text::{LineTable, Motion, motion::clamp_normal};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Delete,
    Change,
}

impl Operator {
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            'd' => Some(Operator::Delete),
            'c' => Some(Operator::Change),
            _ => None,
        }
    }

    pub fn key(self) -> char {
        match self {
            Operator::Delete => 'd',
            Operator::Change => 'c',
        }
    }

    /// Bytes the operator removes for `scope` at `cursor`.
    pub fn range(
        self,
        text: &str,
        lines: &LineTable,
        cursor: usize,
        scope: OperatorScope,
    ) -> Range<usize> {
        let cursor = cursor.min(text.len());
        match scope {
            OperatorScope::Line => {
                let line = lines.line_of(cursor);
                let start = lines.line_start(line);
                let end = lines.line_end(line);
                match self {
                    Operator::Change => start..end,
                    Operator::Delete if lines.has_newline(line) => start..end + 1,
                    Operator::Delete if line > 0 => start - 1..end,
                    Operator::Delete => start..end,
                }
            }
            OperatorScope::Motion(motion) => {
                let raw = motion.range(text, lines, cursor);
                let start = raw.start.min(raw.end).min(text.len());
                let mut end = raw.end.max(raw.start).min(text.len());
                if let Some(nl) = text[start..end].find('\n') {
                    end = start + nl;
                }
                if self == Operator::Change && motion.ends_after_word() {
                    end = trim_trailing_blanks(text, start, end);
                }
                start..end
            }
        }
    }

    /// Remove `range` from `text`. Delete leaves a Normal-valid cursor; change
    /// leaves the cursor at the deletion point and asks for Insert.
    pub fn apply(self, text: &str, range: Range<usize>) -> OperatorOutcome {
        let start = range.start.min(text.len());
        let end = range.end.clamp(start, text.len());
        let mut new_text = String::with_capacity(text.len() - (end - start));
        new_text.push_str(&text[..start]);
        new_text.push_str(&text[end..]);
        match self {
            Operator::Delete => {
                let lines = LineTable::new(&new_text);
                let cursor = clamp_normal(&new_text, &lines, start);
                OperatorOutcome {
                    text: new_text,
                    cursor,
                    enters_insert: false,
                }
            }
            Operator::Change => OperatorOutcome {
                cursor: start.min(new_text.len()),
                text: new_text,
                enters_insert: true,
            },
        }
    }
}

/// What an operator acts on: the whole line (operator key doubled) or the
/// range of a motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorScope {
    Line,
    Motion(Motion),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorOutcome {
    pub text: String,
    pub cursor: usize,
    pub enters_insert: bool,
}

/// Pull `end` back over spaces and tabs when the change starts inside a word.
/// Started on a blank, the change covers the blanks the way `dw` would.
fn trim_trailing_blanks(text: &str, start: usize, end: usize) -> usize {
    if text[start..end].starts_with([' ', '\t']) {
        return end;
    }
    start + text[start..end].trim_end_matches([' ', '\t']).len()
}
