//! City Weather CLI - Look up current weather conditions for any city
//!
//! A terminal UI application where you type a city name and see the current
//! temperature, conditions, humidity, and wind from OpenWeatherMap.

use std::io;
use std::panic;
use std::process;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use cityweather::app::App;
use cityweather::cli::{Cli, StartupConfig};
use cityweather::config::Config;
use cityweather::{logging, ui};

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

/// Renders the main view plus any overlays
fn render_ui(frame: &mut ratatui::Frame, app: &App) {
    ui::render_search(frame, app);

    if let Some(notification) = &app.notification {
        ui::render_notification(frame, notification);
    }

    if app.show_help {
        ui::render_help_overlay(frame);
    }
}

/// Runs the event loop until the user quits
fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        // Render UI
        terminal.draw(|f| render_ui(f, app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        // Pick up finished lookups and expire old notifications
        app.poll_lookups();
        app.tick(Instant::now());

        if app.should_quit {
            return Ok(());
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let startup = StartupConfig::from_cli(&cli).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(2);
    });
    let config = Config::from_cli(&cli).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    if let Some(path) = logging::init() {
        info!(log_file = %path.display(), endpoint = %config.endpoint, lang = %config.lang, "starting cityweather");
    }

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::with_startup_config(&config, startup);
    let result = run(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    info!("exiting");
    result?;
    Ok(())
}
