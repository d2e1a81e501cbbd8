mod breed_list;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::App;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    breed_list::render(frame, app, chunks[1]);
    breed_list::render_pager(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "Dog Breed List",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", app.source_name()),
            Style::default().fg(Color::Gray),
        ),
    ]))
    .style(Style::default().bg(Color::DarkGray));

    frame.render_widget(header, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (text, color) = status_text(app);
    let status = Line::from(vec![Span::styled(text, Style::default().fg(color))]);

    let status_bar = Paragraph::new(status).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status_bar, area);
}

/// Only fetch errors can be retried with `r`.
fn status_text(app: &App) -> (String, Color) {
    if let Some(error) = &app.error {
        (format!("Error: {}", error), Color::Red)
    } else if let Some(error) = app.loader.error() {
        (format!("Error: {} (r: retry)", error), Color::Red)
    } else if let Some(notice) = &app.notice {
        (notice.clone(), Color::Green)
    } else if app.loader.is_loading() {
        (
            format!("{} Loading...", SPINNER[app.spinner % SPINNER.len()]),
            Color::Yellow,
        )
    } else {
        (
            "h/l: page | j/k/g/G: nav | o: open image | y: copy url | q: quit".to_string(),
            Color::Gray,
        )
    }
}
