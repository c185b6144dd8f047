//! Vim-style key notation: `"dw"`, `"cwhi<Esc>"`, `"<C-r>"`.
//!
//! Plain characters stand for themselves. Angle brackets name a key:
//! `<Esc> <CR> <Enter> <BS> <Tab> <Del> <Left> <Right> <Up> <Down> <Home>
//! <End>`, a Ctrl chord `<C-x>` / `<C-Left>`, or a literal `<` as `<lt>`.
//! Names are case-insensitive; the character in `<C-x>` keeps its case.

use anyhow::{Result, bail};
use core_events::{KeyCode, KeyEvent, KeyModifiers};

pub fn parse_keys(script: &str) -> Result<Vec<KeyEvent>> {
    let mut keys = Vec::with_capacity(script.len());
    let mut rest = script;
    while let Some(c) = rest.chars().next() {
        if c != '<' {
            keys.push(KeyEvent::char(c));
            rest = &rest[c.len_utf8()..];
            continue;
        }
        let Some(close) = rest.find('>') else {
            bail!("unterminated key name in {script:?}");
        };
        keys.push(parse_name(&rest[1..close])?);
        rest = &rest[close + 1..];
    }
    Ok(keys)
}

fn parse_name(name: &str) -> Result<KeyEvent> {
    if let Some(chord) = name.strip_prefix("C-").or_else(|| name.strip_prefix("c-")) {
        let mut chars = chord.chars();
        let code = match (chars.next(), chars.next()) {
            (Some(c), None) => KeyCode::Char(c),
            _ => match named(chord) {
                Some(code) => code,
                None => bail!("unknown key name <{name}>"),
            },
        };
        return Ok(KeyEvent::new(code, KeyModifiers::CTRL));
    }
    if name.eq_ignore_ascii_case("lt") {
        return Ok(KeyEvent::char('<'));
    }
    match named(name) {
        Some(code) => Ok(KeyEvent::plain(code)),
        None => bail!("unknown key name <{name}>"),
    }
}

fn named(name: &str) -> Option<KeyCode> {
    let code = match name.to_ascii_lowercase().as_str() {
        "esc" => KeyCode::Esc,
        "cr" | "enter" | "return" => KeyCode::Enter,
        "bs" => KeyCode::Backspace,
        "tab" => KeyCode::Tab,
        "del" => KeyCode::Delete,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        _ => return None,
    };
    Some(code)
}

/// Render keys back into notation accepted by [`parse_keys`].
pub fn format_keys(keys: &[KeyEvent]) -> String {
    let mut out = String::new();
    for key in keys {
        let name = match key.code {
            KeyCode::Char('<') if !key.is_ctrl() => {
                out.push_str("<lt>");
                continue;
            }
            KeyCode::Char(c) if !key.is_ctrl() => {
                out.push(c);
                continue;
            }
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "CR".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Backspace => "BS".to_string(),
            KeyCode::Delete => "Del".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
        };
        let prefix = if key.is_ctrl() { "C-" } else { "" };
        out.push_str(&format!("<{prefix}{name}>"));
    }
    out
}
