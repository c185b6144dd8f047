//! Modal (Vim-style) key handling for a multi-line prompt widget.
//!
//! Keys flow through two stages:
//! * `KeyTranslator` turns a `KeyEvent` into an `Action`, holding the
//!   pending-operator slot between an operator key and the key after it.
//! * `dispatcher::dispatch` applies the `Action` to a text snapshot and the
//!   engine state, producing a `DispatchOutcome` for the host.
//!
//! `VimEngine` wires both together per widget. The host owns the buffer: it
//! hands the engine the current text and cursor with every key and applies
//! whatever the outcome carries.

pub mod dispatcher;
mod engine;
pub mod key_translator;
pub mod operator;

pub use core_config::EngineOptions;
pub use dispatcher::{DispatchOutcome, EngineState, dispatch};
pub use engine::{VimEngine, mode_indicator};
pub use key_translator::KeyTranslator;
pub use operator::{Operator, OperatorOutcome, OperatorScope};

use core_text::Motion;

/// Cursor movements available in Normal mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionKind {
    Left,
    Right,
    Up,
    Down,
    /// A motion-table entry (`w`, `b`, `e`, `0`, `$`, `^`, WORD forms).
    Text(Motion),
}

/// How Insert mode is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsertEntry {
    /// `i`
    AtCursor,
    /// `a`
    AfterCursor,
    /// `I`
    FirstNonBlank,
    /// `A`
    LineEnd,
    /// `o`
    OpenBelow,
    /// `O`
    OpenAbove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeChange {
    EnterInsert(InsertEntry),
    /// Escape or Ctrl-C in Insert.
    LeaveInsert,
}

/// Direct edits that do not go through the operator table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// `x`
    DeleteUnder,
    /// Return in Insert.
    InsertNewline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Motion(MotionKind),
    ModeChange(ModeChange),
    Command(Command),
    Undo,
    Redo,
    /// Operator key seen; the translator now waits for its target.
    BeginOperator(Operator),
    ApplyOperator {
        op: Operator,
        scope: OperatorScope,
    },
    /// Not handled here; the host performs its default editing.
    Passthrough,
    /// Consumed without effect.
    Ignore,
}
