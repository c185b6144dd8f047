//! promptline entrypoint: replay a key script against a prompt buffer and
//! print the result.
use anyhow::{Context, Result};
use clap::Parser;
use core_actions::EngineOptions;
use core_config::{Config, load_from};
use core_input::{format_keys, parse_keys};
use core_state::Mode;
use core_text::wrap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

mod host;

use host::PromptHost;

const LOG_FILE_NAME: &str = "promptline.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "promptline", version, about = "Replay Vim keys against a prompt buffer")]
struct Args {
    /// Keys in Vim notation, e.g. `0cwhi<Esc>` or `dd<C-r>`.
    keys: String,
    /// Configuration file path (overrides discovery of `promptline.toml`).
    #[arg(long = "config")]
    config: Option<PathBuf>,
    /// Rendering width in columns. Defaults to the terminal width, then the
    /// configured width.
    #[arg(long = "width")]
    width: Option<usize>,
    /// Initial buffer contents. The cursor starts at the end.
    #[arg(long = "text", default_value = "")]
    text: String,
    /// Start in Insert mode regardless of configuration.
    #[arg(long = "insert")]
    insert: bool,
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join(LOG_FILE_NAME);
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }
    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .with_ansi(false)
        .try_init()
        .ok()
        .map(|_| guard)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn engine_options(config: &Config, args: &Args) -> EngineOptions {
    let mut options = config.engine_options();
    if args.insert {
        options.start_mode = Mode::Insert;
    }
    options
}

fn terminal_columns() -> Option<usize> {
    crossterm::terminal::size()
        .ok()
        .map(|(cols, _)| cols as usize)
        .filter(|cols| *cols > 0)
}

/// Human-readable summary of the buffer after replay.
fn report(host: &PromptHost, width: usize, first_line_width: Option<usize>) -> String {
    let map = wrap(host.text(), width, first_line_width);
    let (row, col) = map.cursor_cell(host.cursor());
    let mut out = String::new();
    out.push_str(&format!("text: {:?}\n", host.text()));
    out.push_str(&format!("cursor: {}\n", host.cursor()));
    out.push_str(&format!(
        "mode: {}\n",
        host.engine().mode_indicator().unwrap_or("(vim disabled)")
    ));
    out.push_str(&format!("cell: {row}:{col}\n"));
    out.push_str(&format!("--- wrapped ({} rows) ---\n", map.line_count()));
    out.push_str(&map.wrapped);
    out.push('\n');
    out
}

fn run(args: Args) -> Result<()> {
    let config = load_from(args.config.clone())?;
    let options = engine_options(&config, &args);
    let keys = parse_keys(&args.keys).with_context(|| format!("parsing keys {:?}", args.keys))?;
    info!(
        target: "runtime",
        keys = %format_keys(&keys),
        key_count = keys.len(),
        text_len = args.text.len(),
        config = config.source.as_ref().map(|p| p.display().to_string()).as_deref(),
        "replay_start"
    );

    let mut host = PromptHost::new(options, args.text.as_str());
    host.press_all(&keys);

    let columns = args.width.or_else(terminal_columns);
    let (width, first_line_width) = config.wrap_widths(columns);
    info!(
        target: "runtime",
        cursor = host.cursor(),
        mode = host.engine().mode().as_str(),
        undo_depth = host.engine().undo_depth(),
        width,
        "replay_complete"
    );

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(report(&host, width, first_line_width).as_bytes())
        .context("writing report to stdout")?;
    Ok(())
}

fn main() -> Result<()> {
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", "startup");
    let result = run(Args::parse());
    info!(target: "runtime", ok = result.is_ok(), "shutdown");
    result
}
