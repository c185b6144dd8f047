use std::collections::VecDeque;

use tracing::trace;

use crate::BufferSnapshot;

/// Default number of snapshots retained in undo history.
pub const UNDO_HISTORY_MAX: usize = 200;

/// Insert session tracking. One session (from entering Insert until leaving
/// it) commits at most one undo entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertRun {
    Inactive,
    /// Insert was entered without a buffer change; the anchor is captured on
    /// the first keystroke of the session.
    Pending,
    /// Anchor captured (either lazily, or eagerly by a command such as `cw`
    /// that changed the buffer on the way into Insert).
    Anchored(BufferSnapshot),
}

pub struct UndoEngine {
    undo_stack: VecDeque<BufferSnapshot>,
    redo_stack: Vec<BufferSnapshot>,
    insert_run: InsertRun,
    max_history: usize,
    /// Pushes skipped because the text matched the top of the undo stack.
    snapshots_skipped: u64,
}

impl Default for UndoEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoEngine {
    pub fn new() -> Self {
        Self::with_max_history(UNDO_HISTORY_MAX)
    }

    pub fn with_max_history(max_history: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            insert_run: InsertRun::Inactive,
            max_history: max_history.max(1),
            snapshots_skipped: 0,
        }
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
    pub fn insert_run(&self) -> &InsertRun {
        &self.insert_run
    }
    pub fn snapshots_skipped(&self) -> u64 {
        self.snapshots_skipped
    }
    pub fn max_history(&self) -> usize {
        self.max_history
    }

    /// Record the pre-mutation state of a committed edit. Clears redo history.
    pub fn push_snapshot(&mut self, snapshot: BufferSnapshot) {
        if self
            .undo_stack
            .back()
            .is_some_and(|last| last.text == snapshot.text)
        {
            self.snapshots_skipped += 1;
            trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "snapshot_dedupe_skip");
            self.clear_redo();
            return;
        }
        let text_len = snapshot.text.len();
        self.undo_stack.push_back(snapshot);
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), text_len, "push_snapshot");
        if self.undo_stack.len() > self.max_history
            && let Some(dropped) = self.undo_stack.pop_front()
        {
            trace!(target: "state.undo", dropped_len = dropped.text.len(), "undo_stack_trimmed");
        }
        self.clear_redo();
    }

    fn clear_redo(&mut self) {
        if !self.redo_stack.is_empty() {
            self.redo_stack.clear();
            trace!(target: "state.undo", "redo_stack_cleared_on_new_edit");
        }
    }

    /// Start an Insert session. `anchor` is the pre-mutation snapshot when the
    /// command entering Insert already changed the buffer.
    pub fn begin_insert(&mut self, anchor: Option<BufferSnapshot>) {
        self.insert_run = match anchor {
            Some(snapshot) => InsertRun::Anchored(snapshot),
            None => InsertRun::Pending,
        };
    }

    /// Called for every keystroke seen while in Insert; captures the anchor on
    /// the first one.
    pub fn note_insert_key(&mut self, text: &str, cursor: usize) {
        if matches!(self.insert_run, InsertRun::Pending) {
            self.insert_run = InsertRun::Anchored(BufferSnapshot::new(text, cursor));
            trace!(target: "state.undo", cursor, "insert_anchor_captured");
        }
    }

    /// Finish the Insert session, committing its anchor as one undo entry when
    /// the text actually changed. Returns true when an entry was pushed.
    pub fn end_insert(&mut self, current_text: &str) -> bool {
        match std::mem::replace(&mut self.insert_run, InsertRun::Inactive) {
            InsertRun::Anchored(anchor) if anchor.text != current_text => {
                self.push_snapshot(anchor);
                true
            }
            _ => false,
        }
    }

    /// Pop the most recent snapshot, moving `current` onto the redo stack.
    pub fn undo(&mut self, current: BufferSnapshot) -> Option<BufferSnapshot> {
        let last = self.undo_stack.pop_back()?;
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "undo_pop");
        self.redo_stack.push(current);
        trace!(target: "state.undo", redo_depth = self.redo_stack.len(), "redo_push_from_undo");
        Some(last)
    }

    /// Mirror of [`UndoEngine::undo`].
    pub fn redo(&mut self, current: BufferSnapshot) -> Option<BufferSnapshot> {
        let next = self.redo_stack.pop()?;
        trace!(target: "state.undo", redo_depth = self.redo_stack.len(), undo_depth = self.undo_stack.len(), "redo_pop");
        self.undo_stack.push_back(current);
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), "undo_push_from_redo");
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn snap(text: &str, cursor: usize) -> BufferSnapshot {
        BufferSnapshot::new(text, cursor)
    }

    #[test]
    fn undo_then_redo_restores_both_states() {
        let mut u = UndoEngine::new();
        u.push_snapshot(snap("abc", 1));
        let restored = u.undo(snap("ac", 1)).unwrap();
        assert_eq!(restored, snap("abc", 1));
        assert_eq!(u.redo_depth(), 1);
        let again = u.redo(restored).unwrap();
        assert_eq!(again, snap("ac", 1));
        assert_eq!(u.undo_depth(), 1);
    }

    #[test]
    fn empty_stacks_are_noops() {
        let mut u = UndoEngine::new();
        assert!(u.undo(snap("x", 0)).is_none());
        assert!(u.redo(snap("x", 0)).is_none());
        assert_eq!(u.redo_depth(), 0);
    }

    #[test]
    fn new_edit_clears_redo() {
        let mut u = UndoEngine::new();
        u.push_snapshot(snap("a", 0));
        let _ = u.undo(snap("ab", 1));
        assert_eq!(u.redo_depth(), 1);
        u.push_snapshot(snap("a", 0));
        assert_eq!(u.redo_depth(), 0);
    }

    #[test]
    fn identical_text_is_deduplicated() {
        let mut u = UndoEngine::new();
        u.push_snapshot(snap("same", 0));
        u.push_snapshot(snap("same", 2));
        assert_eq!(u.undo_depth(), 1);
        assert_eq!(u.snapshots_skipped(), 1);
    }

    #[test]
    fn history_is_capped() {
        let mut u = UndoEngine::with_max_history(3);
        for i in 0..5 {
            u.push_snapshot(snap(&i.to_string(), 0));
        }
        assert_eq!(u.undo_depth(), 3);
        // Oldest entries were dropped.
        let mut seen = Vec::new();
        while let Some(s) = u.undo(snap("cur", 0)) {
            seen.push(s.text);
        }
        assert_eq!(seen, vec!["4", "3", "2"]);
    }

    #[test]
    fn long_history_stays_at_cap_and_keeps_newest() {
        let mut u = UndoEngine::new();
        for i in 0..UNDO_HISTORY_MAX * 5 {
            u.push_snapshot(snap(&i.to_string(), 0));
        }
        assert_eq!(u.undo_depth(), UNDO_HISTORY_MAX);
        let newest = u.undo(snap("cur", 0)).unwrap();
        assert_eq!(newest.text, (UNDO_HISTORY_MAX * 5 - 1).to_string());
        let mut oldest = newest;
        while let Some(s) = u.undo(snap("cur", 0)) {
            oldest = s;
        }
        assert_eq!(oldest.text, (UNDO_HISTORY_MAX * 4).to_string());
    }

    #[test]
    fn lazy_anchor_commits_once_per_session() {
        let mut u = UndoEngine::new();
        u.begin_insert(None);
        assert_eq!(u.insert_run(), &InsertRun::Pending);
        u.note_insert_key("ab", 1);
        u.note_insert_key("aXb", 2);
        assert_eq!(u.insert_run(), &InsertRun::Anchored(snap("ab", 1)));
        assert!(u.end_insert("aXYb"));
        assert_eq!(u.undo_depth(), 1);
        assert_eq!(u.insert_run(), &InsertRun::Inactive);
    }

    #[test]
    fn unchanged_session_commits_nothing() {
        let mut u = UndoEngine::new();
        u.begin_insert(None);
        assert!(!u.end_insert("text"));
        u.begin_insert(None);
        u.note_insert_key("text", 0);
        assert!(!u.end_insert("text"));
        assert_eq!(u.undo_depth(), 0);
    }

    #[test]
    fn eager_anchor_survives_first_key() {
        let mut u = UndoEngine::new();
        u.begin_insert(Some(snap("hello world", 0)));
        u.note_insert_key(" world", 0);
        assert!(u.end_insert("hi world"));
        let restored = u.undo(snap("hi world", 1)).unwrap();
        assert_eq!(restored, snap("hello world", 0));
    }
}
