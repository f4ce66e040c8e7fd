//! casa - real-estate listings browser and scrape console for the terminal.

mod ticker;
mod watcher;

use camino::Utf8Path;
use casa_cli::{Args, ThemeChoice};
use casa_core::load_listings;
use casa_monitor::{App, Theme};
use casa_scrape::{LogExporter, load_processes};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use miette::{IntoDiagnostic, Result};
use ratatui::prelude::*;
use std::fs::OpenOptions;
use std::io::{self, Stdout};
use std::sync::Mutex;
use std::time::Duration;
use ticker::{DriverConfig, DriverEvent, TickDriver};
use tracing_subscriber::EnvFilter;
use watcher::{ListingsWatcher, WatcherEvent};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    // Seed data
    let listings = load_listings(&args.listings).into_diagnostic()?;
    let processes = load_processes(&args.processes).into_diagnostic()?;
    tracing::info!(
        listings = listings.len(),
        processes = processes.len(),
        "loaded seed data"
    );

    let theme = match args.theme {
        ThemeChoice::Dark => Theme::dark(),
        ThemeChoice::Light => Theme::light(),
    };
    let mut app =
        App::new(listings, processes, LogExporter::new(args.export_dir.clone())).with_theme(theme);

    let watcher = if args.no_watch {
        None
    } else {
        match ListingsWatcher::new(&args.listings) {
            Ok(w) => Some(w),
            Err(e) => {
                tracing::warn!(error = %e, "listings watcher unavailable");
                None
            }
        }
    };

    // Driver runs on the tokio runtime; the UI stays on this thread
    let runtime = tokio::runtime::Runtime::new().into_diagnostic()?;
    let _guard = runtime.enter();
    let mut driver = TickDriver::start(DriverConfig {
        tick_period: args.tick_period(),
        loading_delay: args.loading_delay(),
    });

    // Setup terminal
    enable_raw_mode().into_diagnostic()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture).into_diagnostic()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).into_diagnostic()?;

    // Run the main loop
    let res = run_app(&mut terminal, &mut app, &mut driver, watcher.as_ref());

    driver.stop();

    // Restore terminal
    disable_raw_mode().into_diagnostic()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .into_diagnostic()?;
    terminal.show_cursor().into_diagnostic()?;

    res.into_diagnostic()
}

/// Install the tracing subscriber.
///
/// The alternate screen owns stdout, so output goes to `log_file` when given
/// and is discarded otherwise.
fn init_logging(log_file: Option<&Utf8Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .into_diagnostic()?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::sink)
                .try_init();
        }
    }
    Ok(())
}

/// Main application loop.
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    driver: &mut TickDriver,
    watcher: Option<&ListingsWatcher>,
) -> io::Result<()> {
    let frame_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|frame| app.render(frame))?;

        app.poll_events(frame_rate)?;

        if app.should_quit {
            return Ok(());
        }

        while let Some(event) = driver.try_recv() {
            match event {
                DriverEvent::Loaded => app.finish_loading(),
                DriverEvent::Tick => {
                    app.on_tick();
                }
            }
        }

        if let Some(watcher) = watcher {
            let mut changed = false;
            while let Some(event) = watcher.try_recv_nonblocking() {
                match event {
                    WatcherEvent::ListingsChanged => changed = true,
                    WatcherEvent::Error(e) => tracing::warn!(error = %e, "listings watcher error"),
                }
            }
            if changed {
                reload(app, watcher.path());
            }
        }
    }
}

/// Reload listings after a change on disk, keeping the old set on failure.
fn reload(app: &mut App, path: &Utf8Path) {
    match load_listings(path) {
        Ok(listings) => {
            tracing::info!(count = listings.len(), %path, "reloaded listings");
            app.reload_listings(listings);
        }
        Err(e) => tracing::warn!(error = %e, %path, "listings reload failed, keeping previous set"),
    }
}
