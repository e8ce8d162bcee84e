//! Application controller.
//!
//! This module orchestrates the main application loop:
//! - Terminal initialization and cleanup
//! - Event polling and handling
//! - State updates and rendering

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::debug;

use crate::event::{apply_action, handle_event, poll_event, Action};
use crate::model::AppState;
use crate::ui::{calculate_results_dimensions, render};

/// The main application controller.
pub struct App {
    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application state
    state: AppState,
    /// Event poll timeout
    tick_rate: Duration,
}

impl App {
    /// Creates a new application with the given state.
    pub fn new(state: AppState) -> Result<Self> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            state,
            tick_rate: Duration::from_millis(50),
        })
    }

    /// Runs the main application loop.
    pub fn run(&mut self) -> Result<()> {
        // Initial results area setup
        self.update_viewport_size()?;

        loop {
            // Render
            self.terminal.draw(|frame| {
                render(frame, &self.state);
            })?;

            // Handle events
            if let Some(event) = poll_event(self.tick_rate) {
                let action = handle_event(event, self.state.focus);

                // Resize needs the real terminal size, not the event payload
                if let Action::Resize(_, _) = action {
                    self.update_viewport_size()?;
                }

                // apply_action returns false once the form should close
                if !apply_action(&mut self.state, action) {
                    break;
                }
            }
        }

        debug!("form closed");
        Ok(())
    }

    /// Updates the results area size based on terminal dimensions.
    fn update_viewport_size(&mut self) -> Result<()> {
        let size = self.terminal.size()?;
        let (rows, cols) = calculate_results_dimensions(size.width, size.height);
        self.state.update_viewport_size(rows, cols);
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Runs the form with the given initial state.
///
/// If the path field is pre-filled, the file is analyzed before the first
/// frame is drawn.
pub fn run_app(mut state: AppState) -> Result<()> {
    if !state.path_input.trim().is_empty() {
        state.analyze();
    }
    let mut app = App::new(state)?;
    app.run()
}
