//! Toast notification rendering
//!
//! Draws the current notification as a small bordered box in the top-right
//! corner, on top of whatever view is underneath.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::Notification;

/// Width of the toast box, including borders
const TOAST_WIDTH: u16 = 44;

/// Renders a notification toast
pub fn render(frame: &mut Frame, notification: &Notification) {
    let area = toast_rect(frame.area(), TOAST_WIDTH, toast_height(notification));

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", notification.title),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let lines = vec![
        Line::from(notification.description.clone()),
        Line::from(Span::styled(
            "Esc to dismiss",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

/// Rows needed for the description at the toast's inner width, plus hint and borders
fn toast_height(notification: &Notification) -> u16 {
    let inner_width = TOAST_WIDTH.saturating_sub(2) as usize;
    let description_rows = wrapped_rows(&notification.description, inner_width);
    u16::try_from(description_rows)
        .unwrap_or(u16::MAX)
        .saturating_add(1 + 2)
}

/// Counts the rows `text` occupies when word-wrapped (with trimming) at `width`.
///
/// Words move to the next row when they don't fit; a word wider than a row is
/// broken across rows.
fn wrapped_rows(text: &str, width: usize) -> usize {
    let width = width.max(1);
    let mut rows = 1;
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if line_len > 0 && line_len + 1 + word_len <= width {
            line_len += 1 + word_len;
            continue;
        }
        if line_len > 0 {
            rows += 1;
        }

        // Place the word at the start of a row, spilling over as needed
        let spill = (word_len - 1) / width;
        rows += spill;
        line_len = word_len - spill * width;
    }

    rows
}

/// Places a box of the given size in the top-right corner, clamped to the area
fn toast_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + area.width - width,
        y: area.y,
        width,
        height,
    }
}
