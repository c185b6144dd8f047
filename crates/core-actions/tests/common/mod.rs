//! Scenario harness: a `VimEngine` plus a stand-in host that owns the buffer
//! and types passthrough keys into it.
#![allow(dead_code)]

use core_actions::{EngineOptions, VimEngine};
use core_events::{KeyCode, KeyEvent};
use core_input::parse_keys;
use core_state::Mode;
use core_text::grapheme;

pub struct Harness {
    pub engine: VimEngine,
    pub text: String,
    pub cursor: usize,
}

impl Harness {
    pub fn new(text: &str, cursor: usize) -> Self {
        Self::with_options(EngineOptions::default(), text, cursor)
    }

    pub fn with_options(options: EngineOptions, text: &str, cursor: usize) -> Self {
        Self {
            engine: VimEngine::new(options),
            text: text.to_string(),
            cursor,
        }
    }

    pub fn mode(&self) -> Mode {
        self.engine.mode()
    }

    pub fn key(&mut self, key: KeyEvent) -> bool {
        let out = self.engine.handle_key(&key, &self.text, self.cursor);
        if !out.consumed {
            self.host_edit(&key);
            return false;
        }
        if let Some(text) = out.new_text {
            self.text = text;
        }
        if let Some(cursor) = out.new_cursor {
            self.cursor = cursor;
        }
        true
    }

    /// Feed a key script in Vim notation.
    pub fn keys(&mut self, script: &str) -> &mut Self {
        for key in parse_keys(script).expect("valid key script") {
            self.key(key);
        }
        self
    }

    fn host_edit(&mut self, key: &KeyEvent) {
        if let Some(c) = key.literal() {
            self.text.insert(self.cursor, c);
            self.cursor += c.len_utf8();
            return;
        }
        match key.code {
            KeyCode::Enter => {
                self.text.insert(self.cursor, '\n');
                self.cursor += 1;
            }
            KeyCode::Backspace => {
                let start = grapheme::prev_boundary(&self.text, self.cursor);
                self.text.replace_range(start..self.cursor, "");
                self.cursor = start;
            }
            _ => {}
        }
    }
}
