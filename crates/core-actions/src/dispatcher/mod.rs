//! Dispatcher applying `Action` to a text snapshot and engine state.
//!
//! Sub-modules:
//! * `motion` - cursor movement
//! * `mode`   - Normal <-> Insert transitions (including `o`/`O`)
//! * `edit`   - direct edits and operator application
//! * `undo`   - undo / redo
//!
//! Every handler is total. Handlers never see the host's buffer directly;
//! they return a `DispatchOutcome` describing what the host should apply.

use crate::Action;
use core_state::{Mode, UndoEngine};

mod edit;
mod mode;
mod motion;
mod undo;

/// Per-widget state the dispatcher mutates.
#[derive(Default)]
pub struct EngineState {
    pub mode: Mode,
    pub undo: UndoEngine,
}

impl EngineState {
    /// Starting in Insert opens an undo session straight away, as if the
    /// widget had been entered with `i`.
    pub fn new(mode: Mode, max_history: usize) -> Self {
        let mut undo = UndoEngine::with_max_history(max_history);
        if mode == Mode::Insert {
            undo.begin_insert(None);
        }
        Self { mode, undo }
    }
}

/// Result of dispatching one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// False means the host should handle the key itself.
    pub consumed: bool,
    pub new_text: Option<String>,
    pub new_cursor: Option<usize>,
}

impl DispatchOutcome {
    /// Consumed with no buffer or cursor change.
    pub fn consumed() -> Self {
        Self {
            consumed: true,
            new_text: None,
            new_cursor: None,
        }
    }
    pub fn passthrough() -> Self {
        Self {
            consumed: false,
            new_text: None,
            new_cursor: None,
        }
    }
    pub fn cursor(cursor: usize) -> Self {
        Self {
            consumed: true,
            new_text: None,
            new_cursor: Some(cursor),
        }
    }
    pub fn edit(text: String, cursor: usize) -> Self {
        Self {
            consumed: true,
            new_text: Some(text),
            new_cursor: Some(cursor),
        }
    }
}

/// Apply an action. `cursor` must be on a grapheme boundary of `text`.
pub fn dispatch(
    action: Action,
    state: &mut EngineState,
    text: &str,
    cursor: usize,
) -> DispatchOutcome {
    match action {
        Action::Motion(kind) => motion::handle_motion(kind, text, cursor),
        Action::ModeChange(mc) => mode::handle_mode_change(mc, state, text, cursor),
        Action::Command(cmd) => edit::handle_command(cmd, state, text, cursor),
        Action::ApplyOperator { op, scope } => {
            edit::handle_operator(op, scope, state, text, cursor)
        }
        Action::Undo => undo::handle_undo(state, text, cursor),
        Action::Redo => undo::handle_redo(state, text, cursor),
        Action::BeginOperator(_) | Action::Ignore => DispatchOutcome::consumed(),
        Action::Passthrough => DispatchOutcome::passthrough(),
    }
}
