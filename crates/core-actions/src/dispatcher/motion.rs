//! Motion sub-dispatch (cursor movement).
//!
//! Pure: computes the destination from the text snapshot and reports it as a
//! cursor-only outcome. Every destination is clamped to Normal-mode validity.

use super::DispatchOutcome;
use crate::MotionKind;
use core_text::{LineTable, motion};

pub(crate) fn handle_motion(kind: MotionKind, text: &str, cursor: usize) -> DispatchOutcome {
    let lines = LineTable::new(text);
    let to = match kind {
        MotionKind::Left => motion::left(text, &lines, cursor),
        MotionKind::Right => motion::right(text, &lines, cursor),
        MotionKind::Up => motion::up(text, &lines, cursor),
        MotionKind::Down => motion::down(text, &lines, cursor),
        MotionKind::Text(m) => m.destination(text, &lines, cursor),
    };
    let to = motion::clamp_normal(text, &lines, to);
    tracing::trace!(target: "actions.dispatch", op="motion", kind=?kind, from=cursor, to, "motion");
    DispatchOutcome::cursor(to)
}
