use crate::{DispatchOutcome, EngineOptions, EngineState, KeyTranslator, dispatch};
use core_events::KeyEvent;
use core_state::Mode;
use core_text::{LineTable, grapheme, motion};

/// Modal editing engine for one input widget.
///
/// Holds everything that outlives a single key: the mode, the pending
/// operator, and undo history. Text and cursor stay with the host and are
/// passed in on every call.
pub struct VimEngine {
    options: EngineOptions,
    translator: KeyTranslator,
    state: EngineState,
}

impl Default for VimEngine {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}

impl VimEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self {
            translator: KeyTranslator::new(
                options.strict_pending_motion,
                options.big_word_motions,
            ),
            state: EngineState::new(options.start_mode, options.max_history),
            options,
        }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn undo_depth(&self) -> usize {
        self.state.undo.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.state.undo.redo_depth()
    }

    /// Status-line label for the current mode.
    pub fn mode_indicator(&self) -> Option<&'static str> {
        mode_indicator(self.options.enabled, self.state.mode)
    }

    /// Handle one keystroke against the host's current `text` and `cursor`.
    pub fn handle_key(&mut self, key: &KeyEvent, text: &str, cursor: usize) -> DispatchOutcome {
        if !self.options.enabled {
            return DispatchOutcome::passthrough();
        }
        let mut cursor = snap_to_cluster(text, cursor);
        match self.state.mode {
            Mode::Normal => cursor = motion::clamp_normal(text, &LineTable::new(text), cursor),
            Mode::Insert => self.state.undo.note_insert_key(text, cursor),
        }
        let action = self.translator.translate(self.state.mode, key);
        tracing::trace!(target: "actions.dispatch", key=%key, action=?action, mode=self.state.mode.as_str(), cursor, "handle_key");
        dispatch(action, &mut self.state, text, cursor)
    }
}

/// Label shown while vim mode is enabled; `None` hides the indicator.
pub fn mode_indicator(vim_enabled: bool, mode: Mode) -> Option<&'static str> {
    if !vim_enabled {
        return None;
    }
    Some(match mode {
        Mode::Normal => "-- NORMAL --",
        Mode::Insert => "-- INSERT --",
    })
}

/// Clamp a host cursor into the text and back onto a cluster start.
fn snap_to_cluster(text: &str, cursor: usize) -> usize {
    if cursor >= text.len() {
        return text.len();
    }
    grapheme::prev_boundary(text, grapheme::next_boundary(text, cursor))
}
