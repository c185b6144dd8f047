//! KeyTranslator: stateful key->Action translation.
//!
//! State machine:
//! * Idle: each Normal key maps straight to an `Action`.
//! * OperatorPending(op): set by `d`/`c`. The next key decides the scope:
//!   the same operator key selects the line, a motion-table key selects that
//!   motion's range. Anything else cancels the operator; under
//!   `strict_pending_motion` the cancelling key is swallowed, otherwise it is
//!   translated again from Idle.
//!
//! The pending slot is cleared after the key following the operator no matter
//! what that key was.
//!
//! Arrow/Home/End keys (and Ctrl-Left/Ctrl-Right) are redirected to their
//! Normal-mode letters before any of the above, so `d<End>` behaves as `d$`.

use crate::{Action, Command, InsertEntry, ModeChange, MotionKind, Operator, OperatorScope};
use core_events::{KeyCode, KeyEvent};
use core_state::Mode;
use core_text::Motion;

#[derive(Debug)]
pub struct KeyTranslator {
    pending_operator: Option<Operator>,
    strict_pending_motion: bool,
    big_word_motions: bool,
}

impl KeyTranslator {
    pub fn new(strict_pending_motion: bool, big_word_motions: bool) -> Self {
        Self {
            pending_operator: None,
            strict_pending_motion,
            big_word_motions,
        }
    }

    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending_operator
    }

    /// Drop any pending operator.
    pub fn reset(&mut self) {
        self.pending_operator = None;
    }

    pub fn translate(&mut self, mode: Mode, key: &KeyEvent) -> Action {
        tracing::trace!(target: "actions.translate", mode=?mode, key=?key.code, ctrl=key.is_ctrl(), pending=?self.pending_operator, "translate_key_attempt");
        match mode {
            Mode::Insert => {
                self.reset();
                insert_map(key)
            }
            Mode::Normal => {
                let key = redirect(key);
                if let Some(op) = self.pending_operator.take() {
                    if let Some(scope) = self.operator_scope(op, &key) {
                        return Action::ApplyOperator { op, scope };
                    }
                    tracing::trace!(target: "actions.translate", op=?op, key=?key.code, strict=self.strict_pending_motion, "pending_operator_cancel");
                    if self.strict_pending_motion {
                        return Action::Ignore;
                    }
                }
                self.normal_map(&key)
            }
        }
    }

    fn operator_scope(&self, op: Operator, key: &KeyEvent) -> Option<OperatorScope> {
        let c = key.literal()?;
        if c == op.key() {
            return Some(OperatorScope::Line);
        }
        Motion::from_key(c, self.big_word_motions).map(OperatorScope::Motion)
    }

    fn normal_map(&mut self, key: &KeyEvent) -> Action {
        if key.is_ctrl() {
            return match key.code {
                KeyCode::Char('r') => Action::Redo,
                _ => Action::Ignore,
            };
        }
        let Some(c) = key.literal() else {
            return Action::Ignore;
        };
        if let Some(op) = Operator::from_key(c) {
            self.pending_operator = Some(op);
            tracing::trace!(target: "actions.translate", op=?op, "pending_operator_start");
            return Action::BeginOperator(op);
        }
        if let Some(m) = Motion::from_key(c, self.big_word_motions) {
            return Action::Motion(MotionKind::Text(m));
        }
        match c {
            'h' => Action::Motion(MotionKind::Left),
            'l' => Action::Motion(MotionKind::Right),
            'j' => Action::Motion(MotionKind::Down),
            'k' => Action::Motion(MotionKind::Up),
            'i' => Action::ModeChange(ModeChange::EnterInsert(InsertEntry::AtCursor)),
            'a' => Action::ModeChange(ModeChange::EnterInsert(InsertEntry::AfterCursor)),
            'I' => Action::ModeChange(ModeChange::EnterInsert(InsertEntry::FirstNonBlank)),
            'A' => Action::ModeChange(ModeChange::EnterInsert(InsertEntry::LineEnd)),
            'o' => Action::ModeChange(ModeChange::EnterInsert(InsertEntry::OpenBelow)),
            'O' => Action::ModeChange(ModeChange::EnterInsert(InsertEntry::OpenAbove)),
            'x' => Action::Command(Command::DeleteUnder),
            'D' => Action::ApplyOperator {
                op: Operator::Delete,
                scope: OperatorScope::Motion(Motion::LineEnd),
            },
            'u' => Action::Undo,
            _ => Action::Ignore,
        }
    }
}

fn insert_map(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::ModeChange(ModeChange::LeaveInsert),
        KeyCode::Char('c') if key.is_ctrl() => Action::ModeChange(ModeChange::LeaveInsert),
        KeyCode::Enter => Action::Command(Command::InsertNewline),
        _ => Action::Passthrough,
    }
}

/// Map navigation keys onto the Normal-mode letters they stand for.
fn redirect(key: &KeyEvent) -> KeyEvent {
    let letter = match (key.code, key.is_ctrl()) {
        (KeyCode::Left, false) => 'h',
        (KeyCode::Right, false) => 'l',
        (KeyCode::Up, _) => 'k',
        (KeyCode::Down, _) => 'j',
        (KeyCode::Home, _) => '0',
        (KeyCode::End, _) => '$',
        (KeyCode::Left, true) => 'b',
        (KeyCode::Right, true) => 'e',
        _ => return *key,
    };
    KeyEvent::char(letter)
}
