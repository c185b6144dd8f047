//! Editing state carried between keystrokes: the modal state and undo history.
//!
//! The host owns the text and cursor; the engine only ever sees a
//! `BufferSnapshot` of them. Undo entries are whole-text snapshots, which keeps
//! restore trivially correct for the short buffers a prompt line holds.
//!
//! Insert sessions:
//! - One session (entering Insert until leaving it) becomes at most one undo
//!   entry.
//! - Commands that change the text on the way in (`c`, `o`, `O`) hand the
//!   engine their pre-mutation snapshot as the anchor.
//! - Plain entries (`i`, `a`, `I`, `A`) capture the anchor on the first key
//!   typed, since the host applies the keystroke after the engine passes it
//!   through.
//! - Leaving Insert commits the anchor only when the text differs from it.

pub mod undo;

pub use undo::{InsertRun, UNDO_HISTORY_MAX, UndoEngine};

/// Current modal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Keys are commands: motions, operators, undo.
    #[default]
    Normal,
    /// Keys (other than the ones the engine intercepts) go to the host as text.
    Insert,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::Insert => "insert",
        }
    }
}

/// Text plus cursor byte offset, as stored in undo history.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BufferSnapshot {
    pub text: String,
    pub cursor: usize,
}

impl BufferSnapshot {
    pub fn new(text: impl Into<String>, cursor: usize) -> Self {
        Self {
            text: text.into(),
            cursor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mode_is_normal() {
        assert_eq!(Mode::default(), Mode::Normal);
        assert_eq!(Mode::Insert.as_str(), "insert");
    }

    #[test]
    fn snapshot_holds_owned_text() {
        let src = String::from("abc");
        let snap = BufferSnapshot::new(src.as_str(), 2);
        drop(src);
        assert_eq!(snap.text, "abc");
        assert_eq!(snap.cursor, 2);
    }
}
