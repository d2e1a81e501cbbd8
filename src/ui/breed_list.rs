use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::loader::BreedLoader;
use crate::types::PageStatus;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!("Breeds - page {}", app.loader.page());
    let block = Block::default().borders(Borders::ALL).title(title);

    let rows = match app.loader.status() {
        PageStatus::Ready(rows) => rows,
        PageStatus::Pending => {
            let placeholder = Paragraph::new("Loading breeds...")
                .block(block)
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(placeholder, area);
            return;
        }
        PageStatus::Error(message) => {
            let failed = Paragraph::new(format!("Could not load breeds: {}", message))
                .block(block)
                .style(Style::default().fg(Color::Red));
            frame.render_widget(failed, area);
            return;
        }
    };

    if rows.is_empty() {
        let empty = Paragraph::new("No breeds found")
            .block(block)
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(empty, area);
        return;
    }

    let name_width = 28;
    let first_index = (app.loader.page() as usize - 1) * app.loader.config().display_page_size;

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .map(|(i, breed)| {
            let style = if i == app.selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let name = if breed.name.chars().count() > name_width {
                let cut: String = breed.name.chars().take(name_width - 3).collect();
                format!("{}...", cut)
            } else {
                breed.name.clone()
            };

            let image = match &breed.image_url {
                Some(url) => Span::styled(url.clone(), Style::default().fg(Color::Gray)),
                None => Span::styled("(no image)", Style::default().fg(Color::DarkGray)),
            };

            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>4} ", first_index + i + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(format!("{:<width$}", name, width = name_width), style),
                Span::raw("  "),
                image,
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    state.select(Some(app.selected));

    frame.render_stateful_widget(list, area, &mut state);
}

pub fn render_pager(frame: &mut Frame, app: &App, area: Rect) {
    let loader = &app.loader;
    let enabled = Style::default().fg(Color::Cyan);
    let disabled = Style::default().fg(Color::DarkGray);

    let line = Line::from(vec![
        Span::styled(
            "< prev",
            if loader.can_prev() { enabled } else { disabled },
        ),
        Span::raw("   "),
        Span::raw(page_label(loader.page(), loader.last_page())),
        Span::raw("   "),
        Span::styled(
            "next >",
            if loader.can_next() { enabled } else { disabled },
        ),
        Span::styled(
            format!("   ({})", progress(loader)),
            Style::default().fg(Color::Gray),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn progress(loader: &BreedLoader) -> String {
    let loaded = loader.buffer().len();
    if loader.exhausted_at().is_some() {
        format!("{} breeds, end of list", loaded)
    } else if loader.is_capped() {
        format!(
            "{} breeds, stopped after {} upstream pages",
            loaded,
            loader.cursor() - 1
        )
    } else {
        format!("{} breeds loaded", loaded)
    }
}

/// "Page 2 of 5" once the last page is known, "Page 2 of ?" before.
fn page_label(page: u32, last: Option<u32>) -> String {
    match last {
        Some(last) => format!("Page {} of {}", page, last),
        None => format!("Page {} of ?", page),
    }
}
