//! Key input adapters: terminal events and textual key notation, both
//! producing `core_events::KeyEvent`.

mod key_token;
mod notation;

pub use key_token::{map_key_code, map_key_event, map_mods};
pub use notation::{format_keys, parse_keys};
