//! polychat - terminal multi-AI chat.
//!
//! Entry point for the application.

use std::time::Duration;

use clap::Parser;
use ratatui::crossterm::event::{self, Event, KeyEventKind};

use polychat::app::App;
use polychat::cli::Args;
use polychat::fs::StoragePaths;
use polychat::tui::TerminalEventGuard;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    // Initialize the terminal with crossterm backend
    let mut terminal = ratatui::init();

    // Run the application
    let result = run_app(&mut terminal, args);

    // Restore the terminal
    ratatui::restore();

    result
}

fn run_app(terminal: &mut ratatui::DefaultTerminal, args: Args) -> std::io::Result<()> {
    // Enable terminal event modes (bracketed paste, keyboard enhancement).
    // The guard ensures cleanup even if the application panics.
    //
    // IMPORTANT: This must be initialized inside run_app (after ratatui
    // sets up the terminal) because ratatui's terminal initialization can
    // reset terminal flags.
    let _event_guard = TerminalEventGuard::new();

    let paths = args
        .dir
        .map_or_else(StoragePaths::from_cwd, |dir| StoragePaths::new(&dir));
    let mut app = App::new(paths);

    // Main event loop
    loop {
        // Render the UI
        // IMPORTANT: Layout calculation must happen inside the draw closure
        // to ensure it uses the exact same area as rendering
        terminal.draw(|frame| {
            app.update_layout(frame.area());
            app.render(frame);
        })?;

        // Poll for events with a short timeout so chat events keep draining
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                // Handle key presses
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key);
                }
                // Handle bracketed paste events (multi-line paste)
                Event::Paste(text) => {
                    app.handle_paste(&text);
                }
                _ => {}
            }
        }

        // Merge any settled reply batches into their threads
        app.process_events();

        // Check if we should quit
        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
