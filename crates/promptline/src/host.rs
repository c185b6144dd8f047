//! Minimal prompt widget: owns the buffer and cursor, feeds keys to the
//! engine, and performs plain text editing for keys the engine passes through.

use core_actions::{DispatchOutcome, EngineOptions, VimEngine};
use core_events::{KeyCode, KeyEvent};
use core_text::{LineTable, grapheme};

pub struct PromptHost {
    engine: VimEngine,
    text: String,
    cursor: usize,
}

impl PromptHost {
    /// Start with `text` and the cursor at its end, as a freshly restored
    /// prompt would be.
    pub fn new(options: EngineOptions, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            cursor: text.len(),
            engine: VimEngine::new(options),
            text,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn engine(&self) -> &VimEngine {
        &self.engine
    }

    pub fn press(&mut self, key: &KeyEvent) {
        let outcome = self.engine.handle_key(key, &self.text, self.cursor);
        if outcome.consumed {
            self.apply(outcome);
        } else {
            self.default_edit(key);
        }
    }

    pub fn press_all<'a>(&mut self, keys: impl IntoIterator<Item = &'a KeyEvent>) {
        for key in keys {
            self.press(key);
        }
    }

    fn apply(&mut self, outcome: DispatchOutcome) {
        if let Some(text) = outcome.new_text {
            self.text = text;
        }
        if let Some(cursor) = outcome.new_cursor {
            self.cursor = cursor;
        }
        self.cursor = self.cursor.min(self.text.len());
    }

    fn default_edit(&mut self, key: &KeyEvent) {
        if let Some(c) = key.literal() {
            self.insert(c);
            return;
        }
        if key.is_ctrl() {
            return;
        }
        match key.code {
            KeyCode::Enter => self.insert('\n'),
            KeyCode::Tab => self.insert('\t'),
            KeyCode::Backspace => {
                let start = grapheme::prev_boundary(&self.text, self.cursor);
                self.text.replace_range(start..self.cursor, "");
                self.cursor = start;
            }
            KeyCode::Delete => {
                let end = grapheme::next_boundary(&self.text, self.cursor);
                self.text.replace_range(self.cursor..end, "");
            }
            KeyCode::Left => self.cursor = grapheme::prev_boundary(&self.text, self.cursor),
            KeyCode::Right => self.cursor = grapheme::next_boundary(&self.text, self.cursor),
            KeyCode::Home | KeyCode::End => {
                let lines = LineTable::new(&self.text);
                let line = lines.line_of(self.cursor);
                self.cursor = if key.code == KeyCode::Home {
                    lines.line_start(line)
                } else {
                    lines.line_end(line)
                };
            }
            // History navigation belongs to the surrounding prompt.
            KeyCode::Up | KeyCode::Down | KeyCode::Esc | KeyCode::Char(_) => {}
        }
    }

    fn insert(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_input::parse_keys;
    use core_state::Mode;
    use pretty_assertions::assert_eq;

    fn run(options: EngineOptions, text: &str, keys: &str) -> PromptHost {
        let mut host = PromptHost::new(options, text);
        host.press_all(&parse_keys(keys).unwrap());
        host
    }

    #[test]
    fn change_word_then_type() {
        let host = run(EngineOptions::default(), "hello world", "0cwhi<Esc>");
        assert_eq!(host.text(), "hi world");
        assert_eq!(host.cursor(), 1);
        assert_eq!(host.engine().mode(), Mode::Normal);
    }

    #[test]
    fn insert_editing_keys_pass_through() {
        let host = run(EngineOptions::default(), "ac", "0abx<BS><Left><Right>");
        assert_eq!(host.text(), "abc");
        assert_eq!(host.cursor(), 2);
        assert_eq!(host.engine().mode(), Mode::Insert);
    }

    #[test]
    fn disabled_engine_types_everything() {
        let options = EngineOptions {
            enabled: false,
            ..EngineOptions::default()
        };
        let host = run(options, "", "dd<CR>x");
        assert_eq!(host.text(), "dd\nx");
        assert_eq!(host.engine().mode_indicator(), None);
    }
}
