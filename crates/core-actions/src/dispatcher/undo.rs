//! Undo / Redo handling.
//!
//! Both keys are consumed even when there is nothing to restore. A restored
//! cursor is clamped to Normal-mode validity, since Insert-session anchors may
//! have been captured at an Insert-only position.

use super::{DispatchOutcome, EngineState};
use core_state::BufferSnapshot;
use core_text::{LineTable, motion};

pub(crate) fn handle_undo(state: &mut EngineState, text: &str, cursor: usize) -> DispatchOutcome {
    let restored = state.undo.undo(BufferSnapshot::new(text, cursor));
    tracing::trace!(target: "actions.dispatch", op="undo", applied=restored.is_some(), "undo");
    restore(restored)
}

pub(crate) fn handle_redo(state: &mut EngineState, text: &str, cursor: usize) -> DispatchOutcome {
    let restored = state.undo.redo(BufferSnapshot::new(text, cursor));
    tracing::trace!(target: "actions.dispatch", op="redo", applied=restored.is_some(), "redo");
    restore(restored)
}

fn restore(snapshot: Option<BufferSnapshot>) -> DispatchOutcome {
    match snapshot {
        Some(BufferSnapshot { text, cursor }) => {
            let lines = LineTable::new(&text);
            let cursor = motion::clamp_normal(&text, &lines, cursor);
            DispatchOutcome::edit(text, cursor)
        }
        None => DispatchOutcome::consumed(),
    }
}
