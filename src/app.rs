use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use crate::action::Action;
use crate::event::Event;
use crate::loader::{BreedLoader, LoaderConfig};
use crate::retry::{retry, RetryPolicy};
use crate::source::BreedSource;
use crate::types::{BreedRecord, PageStatus};

pub struct App {
    pub loader: BreedLoader,
    pub selected: usize,
    /// UI-level failures (browser, clipboard); fetch errors live on the loader.
    pub error: Option<String>,
    pub notice: Option<String>,
    pub spinner: usize,
    pub should_quit: bool,
    source: Arc<dyn BreedSource>,
    retry_policy: RetryPolicy,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl App {
    pub fn new(
        source: Arc<dyn BreedSource>,
        loader_config: LoaderConfig,
        retry_policy: RetryPolicy,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        Self {
            loader: BreedLoader::new(loader_config),
            selected: 0,
            error: None,
            notice: None,
            spinner: 0,
            should_quit: false,
            source,
            retry_policy,
            action_tx,
        }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Rows of the current display page, empty until it is ready.
    pub fn rows(&self) -> &[BreedRecord] {
        match self.loader.status() {
            PageStatus::Ready(rows) => rows,
            _ => &[],
        }
    }

    pub fn selected_record(&self) -> Option<&BreedRecord> {
        self.rows().get(self.selected)
    }

    pub fn handle_event(&self, event: Event) -> Action {
        match event {
            Event::Init => Action::Load,
            Event::Tick => Action::Tick,
            Event::Key(key) => self.handle_key(key),
            Event::Render => Action::None,
        }
    }

    fn handle_key(&self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::None;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('l') | KeyCode::Char('n') | KeyCode::Right => Action::NextPage,
            KeyCode::Char('h') | KeyCode::Char('p') | KeyCode::Left => Action::PrevPage,
            KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
            KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
            KeyCode::Char('g') | KeyCode::Home => Action::GoToTop,
            KeyCode::Char('G') | KeyCode::End => Action::GoToBottom,
            KeyCode::Char('r') => Action::Retry,
            KeyCode::Char('o') | KeyCode::Enter => Action::OpenInBrowser,
            KeyCode::Char('y') => Action::YankUrl,
            _ => Action::None,
        }
    }

    pub fn update(&mut self, action: Action) {
        if !matches!(action, Action::Tick | Action::None | Action::PageFetched { .. }) {
            self.error = None;
            self.notice = None;
        }

        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Load | Action::None => {}
            Action::Tick => {
                self.spinner = self.spinner.wrapping_add(1);
            }
            Action::NextPage => {
                if self.loader.next_page() {
                    self.selected = 0;
                }
            }
            Action::PrevPage => {
                if self.loader.prev_page() {
                    self.selected = 0;
                }
            }
            Action::ScrollUp => {
                self.selected = self.selected.saturating_sub(1);
            }
            Action::ScrollDown => {
                let len = self.rows().len();
                if len > 0 && self.selected < len - 1 {
                    self.selected += 1;
                }
            }
            Action::GoToTop => {
                self.selected = 0;
            }
            Action::GoToBottom => {
                self.selected = self.rows().len().saturating_sub(1);
            }
            Action::Retry => {
                self.loader.retry();
            }
            Action::OpenInBrowser => {
                if let Some(url) = self.selected_image_url() {
                    match open::that(&url) {
                        Ok(()) => self.notice = Some(format!("Opened {}", url)),
                        Err(e) => self.error = Some(format!("Failed to open browser: {}", e)),
                    }
                }
            }
            Action::YankUrl => {
                if let Some(url) = self.selected_image_url() {
                    match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(url.clone())) {
                        Ok(()) => self.notice = Some(format!("Copied {}", url)),
                        Err(e) => self.error = Some(format!("Clipboard error: {}", e)),
                    }
                }
            }
            Action::PageFetched { cursor, result } => {
                match result {
                    Ok(records) => self.loader.complete_fetch(cursor, records),
                    Err(message) => self.loader.fail_fetch(cursor, message),
                }
                self.selected = self.selected.min(self.rows().len().saturating_sub(1));
            }
        }

        self.maybe_fetch();
    }

    /// Image URL of the selected breed; sets an error when it has none.
    fn selected_image_url(&mut self) -> Option<String> {
        let record = self.selected_record()?;
        if let Some(url) = &record.image_url {
            return Some(url.clone());
        }
        self.error = Some(format!("No image for {}", record.name));
        None
    }

    fn maybe_fetch(&mut self) {
        if let Some(cursor) = self.loader.begin_fetch() {
            self.spawn_fetch(cursor);
        }
    }

    fn spawn_fetch(&self, cursor: u32) {
        let tx = self.action_tx.clone();
        let source = Arc::clone(&self.source);
        let policy = self.retry_policy;
        tokio::spawn(async move {
            let result = retry(&policy, || source.fetch_page(cursor))
                .await
                .map_err(|e| e.to_string());
            tx.send(Action::PageFetched { cursor, result }).ok();
        });
    }
}
