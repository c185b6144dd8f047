//! Configuration loading and parsing.
//!
//! Reads `promptline.toml` (or an override path provided by the binary). Every
//! section and field is optional; absent values take the defaults below and
//! unknown fields are ignored so older binaries tolerate newer files.
//!
//! ```toml
//! [vim]
//! enabled = true
//! start_mode = "normal"
//! strict_pending_motion = true
//! big_word_motions = false
//! [undo]
//! max_history = 200
//! [wrap]
//! width = 80
//! first_line_reserve = 2
//! ```
//!
//! A missing file yields defaults. A file that fails to parse is logged on the
//! `config` target and also yields defaults; a broken config never prevents
//! the widget from working.

use anyhow::{Context, Result};
use core_state::{Mode, UNDO_HISTORY_MAX};
use serde::Deserialize;
use std::{fs, io, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "promptline.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StartMode {
    #[default]
    Normal,
    Insert,
}

impl From<StartMode> for Mode {
    fn from(value: StartMode) -> Self {
        match value {
            StartMode::Normal => Mode::Normal,
            StartMode::Insert => Mode::Insert,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct VimConfig {
    #[serde(default = "VimConfig::default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub start_mode: StartMode,
    /// Swallow the key that cancels a pending operator (Vim behavior).
    #[serde(default = "VimConfig::default_strict_pending_motion")]
    pub strict_pending_motion: bool,
    /// Recognize `W`/`B`/`E`.
    #[serde(default)]
    pub big_word_motions: bool,
}

impl Default for VimConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            start_mode: StartMode::default(),
            strict_pending_motion: Self::default_strict_pending_motion(),
            big_word_motions: false,
        }
    }
}

impl VimConfig {
    const fn default_enabled() -> bool {
        true
    }
    const fn default_strict_pending_motion() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct UndoConfig {
    #[serde(default = "UndoConfig::default_max_history")]
    pub max_history: usize,
}

impl Default for UndoConfig {
    fn default() -> Self {
        Self {
            max_history: Self::default_max_history(),
        }
    }
}

impl UndoConfig {
    const fn default_max_history() -> usize {
        UNDO_HISTORY_MAX
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct WrapConfig {
    /// Used when the host cannot query a terminal size.
    #[serde(default = "WrapConfig::default_width")]
    pub width: usize,
    /// Columns taken from the first row by prompt decoration.
    #[serde(default = "WrapConfig::default_first_line_reserve")]
    pub first_line_reserve: usize,
}

impl Default for WrapConfig {
    fn default() -> Self {
        Self {
            width: Self::default_width(),
            first_line_reserve: Self::default_first_line_reserve(),
        }
    }
}

impl WrapConfig {
    const fn default_width() -> usize {
        80
    }
    const fn default_first_line_reserve() -> usize {
        2
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub vim: VimConfig,
    #[serde(default)]
    pub undo: UndoConfig,
    #[serde(default)]
    pub wrap: WrapConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
    pub source: Option<PathBuf>,
}

/// Options the modal engine is constructed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    pub enabled: bool,
    pub start_mode: Mode,
    pub strict_pending_motion: bool,
    pub big_word_motions: bool,
    pub max_history: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        ConfigFile::default().engine_options()
    }
}

impl ConfigFile {
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            enabled: self.vim.enabled,
            start_mode: self.vim.start_mode.into(),
            strict_pending_motion: self.vim.strict_pending_motion,
            big_word_motions: self.vim.big_word_motions,
            max_history: self.undo.max_history,
        }
    }
}

/// Local `promptline.toml` first, then the platform config dir
/// (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("promptline").join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!(target: "config", path = %path.display(), "config_missing_using_defaults");
            return Ok(Config::default());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("reading config {}", path.display()));
        }
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                raw: Some(content),
                file,
                source: Some(path),
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}

impl Config {
    pub fn engine_options(&self) -> EngineOptions {
        self.file.engine_options()
    }

    /// `(width, first_line_width)` for the wrapper. `columns` is the host's
    /// terminal width when known; otherwise the configured width is used.
    pub fn wrap_widths(&self, columns: Option<usize>) -> (usize, Option<usize>) {
        let width = columns.unwrap_or(self.file.wrap.width).max(1);
        let reserve = self.file.wrap.first_line_reserve;
        let first = (reserve > 0).then(|| width.saturating_sub(reserve).max(1));
        (width, first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    impl BufferWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buf = Arc::new(Mutex::new(Vec::new()));
            (Self { inner: buf.clone() }, buf)
        }
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl<'a> Write for LockedWriter<'a> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
        }
    }

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), body).unwrap();
        tmp
    }

    #[test]
    fn default_config_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        assert_eq!(cfg.file, ConfigFile::default());
        assert!(cfg.source.is_none());
        let opts = cfg.engine_options();
        assert!(opts.enabled);
        assert!(opts.strict_pending_motion);
        assert!(!opts.big_word_motions);
        assert_eq!(opts.start_mode, Mode::Normal);
        assert_eq!(opts.max_history, 200);
    }

    #[test]
    fn parses_all_sections() {
        let tmp = write_config(
            "[vim]\nenabled = false\nstart_mode = \"insert\"\nstrict_pending_motion = false\nbig_word_motions = true\n[undo]\nmax_history = 7\n[wrap]\nwidth = 40\nfirst_line_reserve = 0\n",
        );
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        let opts = cfg.engine_options();
        assert_eq!(
            opts,
            EngineOptions {
                enabled: false,
                start_mode: Mode::Insert,
                strict_pending_motion: false,
                big_word_motions: true,
                max_history: 7,
            }
        );
        assert_eq!(cfg.wrap_widths(None), (40, None));
        assert!(cfg.raw.is_some());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let tmp = write_config("[vim]\nbig_word_motions = true\n");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert!(cfg.file.vim.big_word_motions);
        assert!(cfg.file.vim.strict_pending_motion);
        assert_eq!(cfg.file.undo.max_history, UNDO_HISTORY_MAX);
        assert_eq!(cfg.file.wrap, WrapConfig::default());
    }

    #[test]
    fn wrap_widths_reserve_first_row() {
        let cfg = Config::default();
        assert_eq!(cfg.wrap_widths(None), (80, Some(78)));
        assert_eq!(cfg.wrap_widths(Some(30)), (30, Some(28)));
        // Reserve never drives the first row below one column.
        assert_eq!(cfg.wrap_widths(Some(1)), (1, Some(1)));
        assert_eq!(cfg.wrap_widths(Some(0)), (1, Some(1)));
    }

    #[test]
    fn parse_error_falls_back_and_logs_on_config_target() {
        let tmp = write_config("[vim\nenabled = ");
        let (writer, buffer) = BufferWriter::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();

        let cfg = with_default(subscriber, || {
            load_from(Some(tmp.path().to_path_buf())).unwrap()
        });

        let log_output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(log_output.contains("WARN config:"));
        assert!(log_output.contains("config_parse_failed_using_defaults"));
        assert_eq!(cfg.file, ConfigFile::default());
    }

    #[test]
    fn invalid_start_mode_is_a_parse_failure() {
        let tmp = write_config("[vim]\nstart_mode = \"visual\"\n");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.file.vim.start_mode, StartMode::Normal);
        assert!(cfg.raw.is_none());
    }
}
