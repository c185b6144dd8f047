//! Mode transition handling (Normal <-> Insert).
//!
//! Entering Insert opens an undo session on the engine's `UndoEngine`;
//! leaving it commits the session. `o`/`O` change the text on the way in, so
//! they hand their pre-mutation snapshot over as the session anchor.

use super::{DispatchOutcome, EngineState};
use crate::{InsertEntry, ModeChange};
use core_state::{BufferSnapshot, Mode};
use core_text::{LineTable, grapheme, motion};

pub(crate) fn handle_mode_change(
    mc: ModeChange,
    state: &mut EngineState,
    text: &str,
    cursor: usize,
) -> DispatchOutcome {
    match mc {
        ModeChange::EnterInsert(entry) => enter_insert(entry, state, text, cursor),
        ModeChange::LeaveInsert => {
            let lines = LineTable::new(text);
            let left = motion::left(text, &lines, cursor);
            let to = motion::clamp_normal(text, &lines, left);
            let committed = state.undo.end_insert(text);
            state.mode = Mode::Normal;
            tracing::trace!(target: "actions.dispatch", op="leave_insert", from=cursor, to, committed, "mode");
            DispatchOutcome::cursor(to)
        }
    }
}

fn enter_insert(
    entry: InsertEntry,
    state: &mut EngineState,
    text: &str,
    cursor: usize,
) -> DispatchOutcome {
    let lines = LineTable::new(text);
    let line = lines.line_of(cursor);
    let outcome = match entry {
        InsertEntry::AtCursor => DispatchOutcome::cursor(cursor),
        InsertEntry::AfterCursor => {
            let end = lines.line_end(line);
            DispatchOutcome::cursor(grapheme::next_boundary(text, cursor).min(end).max(cursor))
        }
        InsertEntry::FirstNonBlank => DispatchOutcome::cursor(lines.first_non_blank(text, line)),
        InsertEntry::LineEnd => DispatchOutcome::cursor(lines.line_end(line)),
        InsertEntry::OpenBelow => open_line(text, lines.line_end(line), 1),
        InsertEntry::OpenAbove => open_line(text, lines.line_start(line), 0),
    };
    let anchor = outcome
        .new_text
        .is_some()
        .then(|| BufferSnapshot::new(text, cursor));
    state.undo.begin_insert(anchor);
    state.mode = Mode::Insert;
    tracing::trace!(target: "actions.dispatch", op="enter_insert", entry=?entry, from=cursor, to=?outcome.new_cursor, "mode");
    outcome
}

/// Insert a `\n` at `at`; the cursor lands `advance` bytes after it.
fn open_line(text: &str, at: usize, advance: usize) -> DispatchOutcome {
    let mut new_text = String::with_capacity(text.len() + 1);
    new_text.push_str(&text[..at]);
    new_text.push('\n');
    new_text.push_str(&text[at..]);
    DispatchOutcome::edit(new_text, at + advance)
}
