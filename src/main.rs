//! Wheel Deal - rent and buy motorcycles from the terminal
//!
//! A terminal UI marketplace for renting and selling motorcycles, backed by
//! an embedded mock catalogue.

use std::error::Error;
use std::io;
use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use wheeldeal::app::App;
use wheeldeal::cli::{Cli, StartupConfig};
use wheeldeal::config::{AppConfig, AppDirs, LOG_FILE_NAME};
use wheeldeal::data::MockData;
use wheeldeal::{logging, ui};

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Log file from the command line, else the data directory, else the temp dir
fn resolve_log_file(startup: &StartupConfig) -> PathBuf {
    startup
        .log_file
        .clone()
        .or_else(|| AppDirs::new().map(|dirs| dirs.log_file()))
        .unwrap_or_else(|| std::env::temp_dir().join(LOG_FILE_NAME))
}

/// Validates arguments and loads everything the TUI needs.
///
/// Runs before the terminal is taken over so errors reach stderr.
fn prepare(cli: &Cli) -> Result<App, Box<dyn Error>> {
    let startup = StartupConfig::from_cli(cli)?;
    let config = AppConfig::load(startup.config_path.as_deref())?;

    let log_file = resolve_log_file(&startup);
    if let Err(err) = logging::init(&log_file, &config.log_filter) {
        eprintln!("warning: logging disabled: {}", err);
    }

    let data = MockData::load()?;
    startup.check_listing(&data.catalog)?;

    let theme = startup.theme.unwrap_or(config.theme);
    info!(
        screen = ?startup.screen,
        listing = ?startup.listing,
        theme = theme.label(),
        listings = data.catalog.len(),
        "starting wheeldeal"
    );
    Ok(App::with_startup_config(data, theme, &startup))
}

/// Runs the event loop until the user quits
fn run_tui(app: &mut App) -> Result<(), Box<dyn Error>> {
    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main event loop
    let result = loop {
        if app.theme_watcher.take_change() {
            // Every cell changes colour; repaint from scratch
            if let Err(err) = terminal.clear() {
                break Err(err);
            }
        }

        // Render UI
        if let Err(err) = terminal.draw(|f| ui::render(f, app)) {
            break Err(err);
        }

        // Poll for keyboard events with 100ms timeout
        match event::poll(Duration::from_millis(100)) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Ok(_) => {}
                Err(err) => break Err(err),
            },
            Ok(false) => {}
            Err(err) => break Err(err),
        }

        app.tick();

        // Check if we should quit
        if app.should_quit {
            break Ok(());
        }
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    if let Err(err) = &result {
        warn!(error = %err, "terminal error");
    }
    info!("exiting");
    Ok(result?)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut app = match prepare(&cli) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    match run_tui(&mut app) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
