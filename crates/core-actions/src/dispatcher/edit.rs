//! Text edits: direct commands (`x`, Return in Insert) and operator
//! application.
//!
//! Normal-mode edits push their pre-mutation snapshot immediately so each one
//! undoes on its own. Edits that end in Insert (the change operator) and the
//! Return key inside Insert belong to the Insert session instead and are
//! committed when it ends.

use super::{DispatchOutcome, EngineState};
use crate::{Command, Operator, OperatorScope};
use core_state::{BufferSnapshot, Mode};
use core_text::{LineTable, grapheme, motion};

pub(crate) fn handle_command(
    cmd: Command,
    state: &mut EngineState,
    text: &str,
    cursor: usize,
) -> DispatchOutcome {
    match cmd {
        Command::DeleteUnder => {
            // Nothing under the cursor, or only an empty line's terminator.
            if cursor >= text.len() || text.as_bytes()[cursor] == b'\n' {
                return DispatchOutcome::consumed();
            }
            // `\r\n` is one cluster; the `\n` stays with the line.
            let lines = LineTable::new(text);
            let end = grapheme::next_boundary(text, cursor)
                .min(lines.line_end(lines.line_of(cursor)));
            let mut new_text = String::with_capacity(text.len());
            new_text.push_str(&text[..cursor]);
            new_text.push_str(&text[end..]);
            state.undo.push_snapshot(BufferSnapshot::new(text, cursor));
            let lines = LineTable::new(&new_text);
            let to = motion::clamp_normal(&new_text, &lines, cursor);
            tracing::trace!(target: "actions.dispatch", op="delete_under", from=cursor, removed=end - cursor, to, "edit");
            DispatchOutcome::edit(new_text, to)
        }
        Command::InsertNewline => {
            let mut new_text = String::with_capacity(text.len() + 1);
            new_text.push_str(&text[..cursor]);
            new_text.push('\n');
            new_text.push_str(&text[cursor..]);
            tracing::trace!(target: "actions.dispatch", op="insert_newline", from=cursor, to=cursor + 1, "edit");
            DispatchOutcome::edit(new_text, cursor + 1)
        }
    }
}

pub(crate) fn handle_operator(
    op: Operator,
    scope: OperatorScope,
    state: &mut EngineState,
    text: &str,
    cursor: usize,
) -> DispatchOutcome {
    let lines = LineTable::new(text);
    let range = op.range(text, &lines, cursor, scope);
    let (start, end) = (range.start, range.end);
    let outcome = op.apply(text, range);
    tracing::trace!(target: "actions.dispatch", op=?op, scope=?scope, start, end, from=cursor, to=outcome.cursor, "operator");
    let changed = outcome.text != text;
    if outcome.enters_insert {
        state
            .undo
            .begin_insert(Some(BufferSnapshot::new(text, cursor)));
        state.mode = Mode::Insert;
    } else if changed {
        state.undo.push_snapshot(BufferSnapshot::new(text, cursor));
    }
    if changed {
        DispatchOutcome::edit(outcome.text, outcome.cursor)
    } else {
        DispatchOutcome::cursor(outcome.cursor)
    }
}
