//! TUI rendering module.
//!
//! This module handles all visual rendering using ratatui:
//! - File path field at the top
//! - Scrollable results area with the report or error text
//! - Status bar with focus, message and key hints

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::{AppState, Focus};

/// Height of the path field (one line plus borders).
const INPUT_HEIGHT: u16 = 3;
/// Minimum height for the results area.
const MIN_RESULTS_HEIGHT: u16 = 3;
/// Height of the status bar.
const STATUS_BAR_HEIGHT: u16 = 1;

/// Returns the border style for a widget, highlighted when focused.
fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Renders the complete UI.
pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Min(MIN_RESULTS_HEIGHT),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);

    render_input(frame, state, main_layout[0]);
    render_results(frame, state, main_layout[1]);
    render_status_bar(frame, state, main_layout[2]);
}

/// Renders the file path field.
fn render_input(frame: &mut Frame, state: &AppState, area: Rect) {
    let focused = state.focus == Focus::Input;
    let inner_width = area.width.saturating_sub(2) as usize;

    // Keep the end of a long path visible
    let chars: Vec<char> = state.path_input.chars().collect();
    let skip = (chars.len() + 1).saturating_sub(inner_width);
    let visible: String = chars[skip.min(chars.len())..].iter().collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(focused))
        .title("File");

    let paragraph = Paragraph::new(Line::from(visible.clone())).block(block);
    frame.render_widget(paragraph, area);

    if focused {
        let x = area.x + 1 + visible.chars().count() as u16;
        frame.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

/// Renders the results area.
fn render_results(frame: &mut Frame, state: &AppState, area: Rect) {
    let focused = state.focus == Focus::Results;
    let visible_rows = area.height.saturating_sub(2) as usize;

    let wrapped = state.wrapped_results();
    let total = wrapped.len();
    let start = state.scroll.min(total);
    let end = (start + visible_rows).min(total);

    let lines: Vec<Line> = wrapped[start..end]
        .iter()
        .map(|line| {
            if line.starts_with("ERROR:") {
                Line::from(Span::styled(
                    line.clone(),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(line.clone())
            }
        })
        .collect();

    let title = if total > visible_rows && visible_rows > 0 {
        format!("Results [Lines {}-{}/{}]", start + 1, end, total)
    } else {
        "Results".to_string()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(focused))
        .title(title);

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

/// Renders the status bar at the bottom.
fn render_status_bar(frame: &mut Frame, state: &AppState, area: Rect) {
    let (mode_str, hints) = match state.focus {
        Focus::Input => ("EDIT", "Enter: analyze | Tab: results | Ctrl+C: quit "),
        Focus::Results => ("VIEW", "j/k: scroll | Tab: edit | q: quit "),
    };

    let message = state.status_message.as_deref().unwrap_or("");
    let left_content = format!(" {} | {} ", mode_str, message);

    let left_len = left_content.chars().count();
    let status_line = Line::from(vec![
        Span::styled(
            left_content,
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ),
        Span::styled(
            " ".repeat((area.width as usize).saturating_sub(left_len + hints.len())),
            Style::default().bg(Color::Cyan),
        ),
        Span::styled(
            hints,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let paragraph = Paragraph::new(status_line);
    frame.render_widget(paragraph, area);
}

/// Calculates the visible dimensions (rows, cols) of the results text.
pub fn calculate_results_dimensions(terminal_width: u16, terminal_height: u16) -> (usize, usize) {
    // Account for the path field, the status bar and the results borders
    let visible_rows = terminal_height.saturating_sub(INPUT_HEIGHT + STATUS_BAR_HEIGHT + 2) as usize;
    let visible_cols = terminal_width.saturating_sub(2) as usize;
    (visible_rows, visible_cols)
}
