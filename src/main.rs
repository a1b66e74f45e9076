use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use faux_desk::config::WindowConfig;
use faux_desk::desk::{DeskApp, DeskOptions};
use faux_desk::drivers::OutputDriver;
use faux_desk::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use faux_desk::log_buffer::{self, LogHandle};
use faux_desk::runner::run_desk;
use faux_desk::settings::FileStore;
use faux_desk::tracing_sub;

#[derive(Debug, Parser)]
#[command(name = "faux-desk", version, about)]
struct Cli {
    /// JSON file holding desktop preferences.
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Write tracing output to this file instead of the system-log panel.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Milliseconds between animation frames.
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,

    /// Present fullscreen panels inside the desktop area instead of over
    /// the whole terminal.
    #[arg(long)]
    no_native_fullscreen: bool,

    /// Smallest panel width, in cells.
    #[arg(long)]
    min_width: Option<u32>,

    /// Smallest panel height, in cells.
    #[arg(long)]
    min_height: Option<u32>,

    /// Cells kept free around a panel resized to its largest size.
    #[arg(long)]
    margin: Option<u32>,
}

impl Cli {
    fn window_config(&self) -> WindowConfig {
        let defaults = WindowConfig::terminal();
        WindowConfig {
            min_width: self.min_width.unwrap_or(defaults.min_width),
            min_height: self.min_height.unwrap_or(defaults.min_height),
            viewport_margin: self.margin.unwrap_or(defaults.viewport_margin),
        }
    }

    fn settings_path(&self) -> PathBuf {
        if let Some(path) = &self.settings {
            return path.clone();
        }
        match std::env::var_os("HOME") {
            Some(home) => PathBuf::from(home)
                .join(".config")
                .join("faux-desk")
                .join("settings.json"),
            None => PathBuf::from("faux-desk-settings.json"),
        }
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let log = LogHandle::default();
    log_buffer::set_global_log(log.clone());
    log_buffer::install_panic_hook();
    match &cli.log_file {
        Some(path) => tracing_sub::init_with_file(path)?,
        None => tracing_sub::init_default(),
    }

    let store = FileStore::new(cli.settings_path());
    tracing::info!(path = %store.path().display(), "loading settings");
    let options = DeskOptions {
        config: cli.window_config(),
        native_fullscreen: !cli.no_native_fullscreen,
        log: Some(log),
    };
    let mut app = DeskApp::new(Box::new(store), options);

    let mut output = ConsoleOutputDriver::new()?;
    output.enter()?;
    let result = run_desk(
        &mut app,
        ConsoleInputDriver::new(),
        &mut output,
        Duration::from_millis(cli.tick_ms.max(1)),
    );
    output.exit()?;
    result
}
