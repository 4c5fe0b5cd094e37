use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;

use nutty::terminal::{probe_size, restore_terminal, CrosstermTerminal, ResizeWatcher};
use nutty::{app, logging, EditorConfig, EditorSession, Terminal};

/// A minimal vim-like terminal text editor
#[derive(Parser, Debug)]
#[command(name = "nutty", version, about)]
struct Cli {
    /// File to open (created on first save if it doesn't exist)
    file: PathBuf,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(_) => {
            eprintln!("Usage: nutty <filename>");
            process::exit(1);
        }
    };

    if let Err(e) = run(cli) {
        restore_terminal();
        eprintln!("nutty: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = EditorConfig::default();
    if let Err(e) = logging::init(&config.log_file) {
        eprintln!("nutty: logging disabled: {:#}", e);
    }

    // Set up panic hook to restore terminal
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        default_panic(info);
    }));

    let mut terminal = CrosstermTerminal::new().context("cannot enable raw mode")?;
    let size = terminal.size().context("cannot query terminal size")?;

    let mut session = EditorSession::open(&cli.file, config.clone(), size);
    let watcher = ResizeWatcher::spawn(size, config.resize_poll_interval, probe_size);

    let result = app::run(&mut session, &mut terminal, Some(&watcher));

    watcher.shutdown();
    terminal.restore().context("cannot restore terminal")?;
    result.context("editor loop failed")
}
