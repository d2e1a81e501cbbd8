mod action;
mod app;
mod cli;
mod config;
mod error;
mod event;
mod loader;
mod retry;
mod source;
mod tui;
mod types;
mod ui;

use std::io::Write;
use std::panic;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::action::Action;
use crate::app::App;
use crate::cli::Cli;
use crate::config::Config;
use crate::event::Event;
use crate::loader::{fill_to, BreedLoader};
use crate::source::{BreedSource, HttpSource};
use crate::tui::EventHandler;
use crate::types::PageStatus;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::load(cli.config.as_deref());
    if let Some(base_url) = cli.base_url {
        config.upstream.base_url = base_url;
    }
    config.validate()?;

    let source = HttpSource::new(config.upstream.base_url.clone(), config.timeout())?;

    if cli.print {
        return print_page(&config, &source, cli.page).await;
    }

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::restore();
        original_hook(panic_info);
    }));

    let result = run(&config, Arc::new(source)).await;

    // Restore terminal
    tui::restore()?;

    result
}

async fn print_page(
    config: &Config,
    source: &dyn BreedSource,
    page: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut loader = BreedLoader::new(config.loader_config());
    fill_to(&mut loader, page, source, &config.retry_policy()).await?;

    let mut out = std::io::stdout().lock();
    if let PageStatus::Ready(rows) = loader.status() {
        for breed in rows {
            writeln!(
                out,
                "{}\t{}",
                breed.name,
                breed.image_url.as_deref().unwrap_or("-")
            )?;
        }
    }
    Ok(())
}

async fn run(config: &Config, source: Arc<dyn BreedSource>) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize terminal
    let mut terminal = tui::init()?;

    // Create action channel
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    // Create app state
    let mut app = App::new(
        source,
        config.loader_config(),
        config.retry_policy(),
        action_tx.clone(),
    );

    // Create event handler
    let tick_rate = Duration::from_millis(250);
    let render_rate = Duration::from_millis(16); // ~60fps
    let mut events = EventHandler::new(tick_rate, render_rate);

    // Main loop
    loop {
        tokio::select! {
            Some(event) = events.next() => {
                if event.is_quit() {
                    break;
                }

                match event {
                    Event::Render => {
                        terminal.draw(|frame| ui::render(frame, &app))?;
                    }
                    _ => {
                        let action = app.handle_event(event);
                        if !matches!(action, Action::None) {
                            action_tx.send(action)?;
                        }
                    }
                }
            }
            Some(action) = action_rx.recv() => {
                app.update(action);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
