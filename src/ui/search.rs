//! Search screen rendering
//!
//! Renders the single main view: a title, the city input box, and below it
//! either the result panel, a loading line, or the empty-state prompt.

use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::format::{capitalize_words, format_humidity, format_temperature, format_wind};
use super::icon::icon_for;
use crate::app::{App, RequestState};
use crate::data::WeatherSnapshot;

/// Braille spinner frames shown while a lookup is in flight
const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Widest the content column is allowed to grow
const MAX_WIDTH: u16 = 64;

/// Renders the search screen
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let column = centered_column(area, MAX_WIDTH);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Input box
            Constraint::Length(1), // Spacer
            Constraint::Min(3),    // Result / prompt
            Constraint::Length(1), // Help text
        ])
        .split(column);

    render_title(frame, chunks[0]);
    render_input(frame, app, chunks[1]);

    match &app.state {
        RequestState::Success(snapshot) => render_result(frame, snapshot, chunks[3]),
        RequestState::Loading(query) => render_loading(frame, query.as_str(), chunks[3]),
        RequestState::Idle | RequestState::Failed(_) => render_prompt(frame, chunks[3]),
    }

    render_help(frame, chunks[4]);
}

/// Horizontally centers a column of at most `max_width` cells
fn centered_column(area: Rect, max_width: u16) -> Rect {
    let width = area.width.min(max_width);
    let margin = (area.width - width) / 2;
    Rect {
        x: area.x + margin,
        y: area.y,
        width,
        height: area.height,
    }
}

fn render_title(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "City Weather",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Check the weather in any city in the world",
            Style::default().fg(Color::Gray),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Renders the input box; dimmed with a spinner while loading
fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let loading = app.is_loading();

    let border_color = if loading { Color::DarkGray } else { Color::Cyan };
    let block = Block::default()
        .title(" City ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let mut spans = Vec::new();
    if app.input.is_empty() {
        spans.push(Span::styled(
            "Type a city name...",
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        let input_style = if loading {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(app.input.clone(), input_style));
    }

    if loading {
        let frame_glyph = SPINNER[app.spinner_frame % SPINNER.len()];
        spans.push(Span::styled(
            format!("  {} Searching...", frame_glyph),
            Style::default().fg(Color::Yellow),
        ));
    } else {
        spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Renders the result panel for a successful lookup
fn render_result(frame: &mut Frame, snapshot: &WeatherSnapshot, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            format!(" {} ", snapshot.location),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Icon + temperature + description
            Constraint::Length(1), // Divider
            Constraint::Length(2), // Details row
            Constraint::Min(0),
            Constraint::Length(1), // Updated at
        ])
        .split(inner);

    let icon = icon_for(snapshot.condition.as_str());
    let headline = vec![
        Line::from(Span::styled(
            snapshot.location.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(format!("{}  ", icon.glyph()), Style::default().fg(icon.color())),
            Span::styled(
                format_temperature(snapshot.temperature),
                Style::default()
                    .fg(temperature_color(snapshot.temperature))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            capitalize_words(&snapshot.description),
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(
        Paragraph::new(headline).alignment(Alignment::Center),
        chunks[0],
    );

    let divider = "─".repeat(chunks[1].width as usize);
    frame.render_widget(
        Paragraph::new(divider).style(Style::default().fg(Color::DarkGray)),
        chunks[1],
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(chunks[2]);

    render_detail(frame, columns[0], "Feels like", format_temperature(snapshot.feels_like));
    render_detail(frame, columns[1], "Humidity", format_humidity(snapshot.humidity));
    render_detail(frame, columns[2], "Wind", format_wind(snapshot.wind_kmh));

    let updated = snapshot.fetched_at.with_timezone(&Local).format("%H:%M");
    frame.render_widget(
        Paragraph::new(format!("Updated {}", updated))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Right),
        chunks[4],
    );
}

/// Renders one label/value cell of the details row
fn render_detail(frame: &mut Frame, area: Rect, label: &str, value: String) {
    let lines = vec![
        Line::from(Span::styled(
            label.to_string(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            value,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_loading(frame: &mut Frame, city: &str, area: Rect) {
    let text = Paragraph::new(format!("Fetching weather for {}...", city))
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);
    frame.render_widget(text, area);
}

/// Renders the empty-state prompt
fn render_prompt(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("\u{2601}", Style::default().fg(Color::DarkGray))),
        Line::from(Span::styled(
            "Type a city above to see the weather",
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let help_text = Line::from(vec![
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" Search  "),
        Span::styled("Ctrl+U", Style::default().fg(Color::Yellow)),
        Span::raw(" Clear  "),
        Span::styled("F1", Style::default().fg(Color::Yellow)),
        Span::raw(" Help  "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(" Quit"),
    ]);
    let paragraph = Paragraph::new(help_text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Color for temperature (warmer = more red, cooler = more blue)
fn temperature_color(temp: f64) -> Color {
    if temp >= 30.0 {
        Color::Red
    } else if temp >= 25.0 {
        Color::LightRed
    } else if temp >= 20.0 {
        Color::Yellow
    } else if temp >= 15.0 {
        Color::Green
    } else if temp >= 10.0 {
        Color::Cyan
    } else {
        Color::Blue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ConditionCategory, FetchError, Query, WeatherClient};
    use chrono::Utc;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn create_test_app() -> App {
        App::new(WeatherClient::new("KEY"), Duration::from_secs(5))
    }

    /// The snapshot from the Paris lookup scenario
    fn paris_snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            location: "Paris".to_string(),
            temperature: 18.2,
            feels_like: 17.5,
            humidity: 60,
            wind_kmh: 3.0 * 3.6,
            condition: ConditionCategory::Clear,
            description: "céu limpo".to_string(),
            icon_code: Some("01d".to_string()),
            fetched_at: Utc::now(),
        }
    }

    fn render_to_string(app: &App) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|frame| {
                render(frame, app);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_idle_shows_prompt() {
        let app = create_test_app();
        let content = render_to_string(&app);

        assert!(content.contains("City Weather"), "Should render title");
        assert!(content.contains("Type a city name..."), "Should show placeholder");
        assert!(content.contains("Type a city above to see the weather"));
    }

    #[test]
    fn test_typed_input_is_rendered() {
        let mut app = create_test_app();
        app.input = "Lisboa".to_string();
        let content = render_to_string(&app);

        assert!(content.contains("Lisboa"));
        assert!(!content.contains("Type a city name..."));
    }

    #[test]
    fn test_paris_result_panel() {
        let mut app = create_test_app();
        app.state = RequestState::Success(paris_snapshot());
        let content = render_to_string(&app);

        assert!(content.contains("Paris"));
        assert!(content.contains("\u{2600}"), "Should show sun icon");
        assert!(content.contains("18°C"));
        assert!(content.contains("Céu Limpo"));
        assert!(content.contains("Feels like"));
        assert!(content.contains("60%"));
        assert!(content.contains("11 km/h"));
        assert!(!content.contains("Type a city above"));
    }

    #[test]
    fn test_loading_shows_spinner() {
        let mut app = create_test_app();
        app.input = "Paris".to_string();
        app.state = RequestState::Loading(Query::parse("Paris").unwrap());
        let content = render_to_string(&app);

        assert!(content.contains("Searching..."));
        assert!(content.contains("Fetching weather for Paris..."));
    }

    #[test]
    fn test_failed_shows_prompt_without_result() {
        let mut app = create_test_app();
        app.state = RequestState::Failed(FetchError::NotFound("Atlantis".to_string()));
        let content = render_to_string(&app);

        assert!(content.contains("Type a city above to see the weather"));
        assert!(!content.contains("Feels like"));
    }

    #[test]
    fn test_help_text_is_rendered() {
        let app = create_test_app();
        let content = render_to_string(&app);
        assert!(content.contains("Search"));
        assert!(content.contains("Quit"));
    }

    #[test]
    fn test_centered_column() {
        let area = Rect::new(0, 0, 100, 20);
        let column = centered_column(area, 64);
        assert_eq!(column.width, 64);
        assert_eq!(column.x, 18);

        let narrow = Rect::new(0, 0, 40, 20);
        assert_eq!(centered_column(narrow, 64), narrow);
    }

    #[test]
    fn test_temperature_colors() {
        assert_eq!(temperature_color(35.0), Color::Red);
        assert_eq!(temperature_color(18.0), Color::Green);
        assert_eq!(temperature_color(-5.0), Color::Blue);
    }
}
