// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard and mouse input, timer ticks)
// - Rendering the UI

pub mod app;
pub mod clipboard;
pub mod components;
pub mod confirm;
pub mod scroll;
pub mod traits;
pub mod ui;

use crate::config::Config;
use crate::docs::Page;
use crate::highlight::Highlighter;
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::App;
use clipboard::SystemClipboard;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;

/// Run the TUI
///
/// This function sets up the terminal, runs the event loop, and cleans up
/// when done.
pub async fn run_tui(
    pages: Vec<Page>,
    config: Config,
    log_buffer: LogBuffer,
    initial_route: Option<String>,
) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    if config.mouse {
        execute!(stdout, EnableMouseCapture).context("Failed to enable mouse capture")?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(
        pages,
        &config,
        log_buffer,
        Arc::new(Highlighter::new()),
        Arc::new(SystemClipboard),
        initial_route.as_deref(),
    );

    let result = run_event_loop(&mut terminal, &mut app, config.tick()).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    if config.mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)
            .context("Failed to disable mouse capture")?;
    }
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on input and a redraw tick with `tokio::select!`. Deferred work
/// (confirmation resets, anchor lookups) runs on its own tasks and shows
/// up on the next draw.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick: Duration,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(tick);

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard or mouse input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => app.handle_key(key_event),
                        Ok(Event::Mouse(mouse_event)) => app.handle_mouse(mouse_event),
                        Ok(_) => {}
                        Err(e) => tracing::warn!("Failed to read terminal event: {}", e),
                    }
                }
            } => {}

            // Periodic tick: smooth scrolling and confirmation timeouts
            _ = tick_interval.tick() => app.tick(),
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
