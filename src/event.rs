//! Keyboard event handling.
//!
//! Keys depend on which part of the form has the focus.
//!
//! Path field:
//! - characters: edit the path
//! - `Backspace`: delete the last character
//! - `Ctrl+U`: clear the field
//! - `Enter`: analyze the file
//! - `Tab` or `Esc`: move to the results area
//!
//! Results area:
//! - `j`/`k` or arrows: scroll one line
//! - `PageUp`/`PageDown`: scroll one page
//! - `g`/`G` or `Home`/`End`: jump to top/bottom
//! - `Tab` or `i`: back to the path field
//! - `Enter`: analyze again
//! - `q` or `Esc`: quit
//!
//! `Ctrl+C` quits from anywhere.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::model::{AppState, Focus};

/// Actions that can be triggered by keyboard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action (key not recognized)
    None,
    /// Quit the application
    Quit,
    /// Add character to the path field
    InputChar(char),
    /// Backspace in the path field
    InputBackspace,
    /// Clear the path field
    ClearInput,
    /// Analyze the file named in the path field
    Analyze,
    /// Switch focus between path field and results
    ToggleFocus,
    /// Scroll results up one line
    ScrollUp,
    /// Scroll results down one line
    ScrollDown,
    /// Scroll results up one page
    PageUp,
    /// Scroll results down one page
    PageDown,
    /// Jump to the top of the results
    ScrollTop,
    /// Jump to the bottom of the results
    ScrollBottom,
    /// Resize event (terminal resized)
    Resize(u16, u16),
}

/// Polls for keyboard events with a timeout.
///
/// Returns `None` if no event occurred within the timeout.
pub fn poll_event(timeout: Duration) -> Option<Event> {
    if event::poll(timeout).ok()? {
        event::read().ok()
    } else {
        None
    }
}

/// Converts a crossterm event to an Action based on the current focus.
pub fn handle_event(event: Event, focus: Focus) -> Action {
    match event {
        Event::Key(key_event) => handle_key_event(key_event, focus),
        Event::Resize(width, height) => Action::Resize(width, height),
        _ => Action::None,
    }
}

/// Handles a key event based on the current focus.
fn handle_key_event(key: KeyEvent, focus: Focus) -> Action {
    // Ignore key releases (reported on Windows)
    if key.kind != KeyEventKind::Press {
        return Action::None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match focus {
        Focus::Input => handle_input_focus(key),
        Focus::Results => handle_results_focus(key),
    }
}

/// Handles key events while the path field has the focus.
fn handle_input_focus(key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('u') => Action::ClearInput,
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Enter => Action::Analyze,
        KeyCode::Backspace => Action::InputBackspace,
        KeyCode::Tab | KeyCode::Esc => Action::ToggleFocus,
        KeyCode::Char(c) => Action::InputChar(c),
        _ => Action::None,
    }
}

/// Handles key events while the results area has the focus.
fn handle_results_focus(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
        KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown | KeyCode::Char(' ') => Action::PageDown,
        KeyCode::Char('g') | KeyCode::Home => Action::ScrollTop,
        KeyCode::Char('G') | KeyCode::End => Action::ScrollBottom,
        KeyCode::Tab | KeyCode::Char('i') => Action::ToggleFocus,
        KeyCode::Enter => Action::Analyze,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => Action::None,
    }
}

/// Applies an action to the application state.
///
/// Returns `true` if the application should continue, `false` if it should quit.
pub fn apply_action(state: &mut AppState, action: Action) -> bool {
    match action {
        Action::None => {}
        Action::Quit => {
            state.should_quit = true;
        }
        Action::InputChar(c) => {
            state.input_char(c);
        }
        Action::InputBackspace => {
            state.input_backspace();
        }
        Action::ClearInput => {
            state.clear_input();
        }
        Action::Analyze => {
            state.analyze();
        }
        Action::ToggleFocus => {
            state.toggle_focus();
        }
        Action::ScrollUp => {
            state.scroll_up(1);
        }
        Action::ScrollDown => {
            state.scroll_down(1);
        }
        Action::PageUp => {
            state.page_up();
        }
        Action::PageDown => {
            state.page_down();
        }
        Action::ScrollTop => {
            state.scroll_to_top();
        }
        Action::ScrollBottom => {
            state.scroll_to_bottom();
        }
        Action::Resize(_, _) => {
            // Resize is handled in the main loop with actual terminal dimensions
        }
    }

    !state.should_quit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NO_FILE_SELECTED;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_input_focus_editing() {
        let focus = Focus::Input;
        assert_eq!(handle_key_event(key(KeyCode::Char('a')), focus), Action::InputChar('a'));
        // Letters that scroll in the results area are plain input here
        assert_eq!(handle_key_event(key(KeyCode::Char('j')), focus), Action::InputChar('j'));
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), focus), Action::InputChar('q'));
        assert_eq!(handle_key_event(key(KeyCode::Backspace), focus), Action::InputBackspace);
        assert_eq!(handle_key_event(key(KeyCode::Enter), focus), Action::Analyze);
        assert_eq!(handle_key_event(key(KeyCode::Tab), focus), Action::ToggleFocus);
        assert_eq!(handle_key_event(key(KeyCode::Esc), focus), Action::ToggleFocus);
    }

    #[test]
    fn test_ctrl_u_clears_input() {
        let ctrl_u = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_u, Focus::Input), Action::ClearInput);
    }

    #[test]
    fn test_results_focus_navigation() {
        let focus = Focus::Results;
        assert_eq!(handle_key_event(key(KeyCode::Char('j')), focus), Action::ScrollDown);
        assert_eq!(handle_key_event(key(KeyCode::Char('k')), focus), Action::ScrollUp);
        assert_eq!(handle_key_event(key(KeyCode::Down), focus), Action::ScrollDown);
        assert_eq!(handle_key_event(key(KeyCode::Up), focus), Action::ScrollUp);
        assert_eq!(handle_key_event(key(KeyCode::PageDown), focus), Action::PageDown);
        assert_eq!(handle_key_event(key(KeyCode::PageUp), focus), Action::PageUp);
        assert_eq!(handle_key_event(key(KeyCode::Char('g')), focus), Action::ScrollTop);
        assert_eq!(handle_key_event(key(KeyCode::Char('G')), focus), Action::ScrollBottom);
        assert_eq!(handle_key_event(key(KeyCode::Char('i')), focus), Action::ToggleFocus);
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), focus), Action::Quit);
        assert_eq!(handle_key_event(key(KeyCode::Esc), focus), Action::Quit);
    }

    #[test]
    fn test_ctrl_c_quit() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_c, Focus::Input), Action::Quit);
        assert_eq!(handle_key_event(ctrl_c, Focus::Results), Action::Quit);
    }

    #[test]
    fn test_key_release_ignored() {
        let mut release = key(KeyCode::Char('a'));
        release.kind = KeyEventKind::Release;
        assert_eq!(handle_key_event(release, Focus::Input), Action::None);
    }

    #[test]
    fn test_resize_event() {
        assert_eq!(handle_event(Event::Resize(80, 24), Focus::Input), Action::Resize(80, 24));
    }

    #[test]
    fn test_apply_actions() {
        let mut state = AppState::new();
        assert!(apply_action(&mut state, Action::InputChar('x')));
        assert_eq!(state.path_input, "x");
        apply_action(&mut state, Action::ClearInput);
        apply_action(&mut state, Action::Analyze);
        assert_eq!(state.results, NO_FILE_SELECTED);
        apply_action(&mut state, Action::ToggleFocus);
        assert_eq!(state.focus, Focus::Results);
        assert!(!apply_action(&mut state, Action::Quit));
        assert!(state.should_quit);
    }
}
