//! Breed list loader: accumulates upstream pages into a buffer and carves that
//! buffer into fixed-size display pages.
//!
//! Upstream pages and display pages have independent sizes. The loader asks for
//! another upstream page whenever the buffer is too short for the display page
//! the user is on, and stops for good once the upstream returns a short page or
//! the page cap is hit.

use crate::error::{BreedError, Result};
use crate::retry::{retry, RetryPolicy};
use crate::source::BreedSource;
use crate::types::{BreedRecord, PageStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderConfig {
    pub upstream_page_size: usize,
    pub display_page_size: usize,
    pub max_upstream_pages: u32,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            upstream_page_size: 7,
            display_page_size: 15,
            max_upstream_pages: 20,
        }
    }
}

/// Records for display page `page` (1-based). Short or empty past the end.
pub fn slice(buffer: &[BreedRecord], page: u32, size: usize) -> &[BreedRecord] {
    let start = (page.saturating_sub(1) as usize).saturating_mul(size);
    if start >= buffer.len() {
        return &[];
    }
    let end = start.saturating_add(size).min(buffer.len());
    &buffer[start..end]
}

#[derive(Debug)]
pub struct BreedLoader {
    config: LoaderConfig,
    buffer: Vec<BreedRecord>,
    cursor: u32,
    page: u32,
    exhausted_at: Option<u32>,
    in_flight: bool,
    error: Option<String>,
}

impl BreedLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config,
            buffer: Vec::new(),
            cursor: 1,
            page: 1,
            exhausted_at: None,
            in_flight: false,
            error: None,
        }
    }

    pub fn buffer(&self) -> &[BreedRecord] {
        &self.buffer
    }

    /// Next upstream page to request.
    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn exhausted_at(&self) -> Option<u32> {
        self.exhausted_at
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    fn wanted(&self) -> usize {
        (self.page as usize).saturating_mul(self.config.display_page_size)
    }

    pub fn is_capped(&self) -> bool {
        self.cursor > self.config.max_upstream_pages
    }

    /// No more data will ever arrive this session.
    pub fn is_terminal(&self) -> bool {
        self.exhausted_at.is_some() || self.is_capped()
    }

    pub fn should_fetch(&self) -> bool {
        !self.in_flight
            && self.error.is_none()
            && self.exhausted_at.is_none()
            && !self.is_capped()
            && self.buffer.len() < self.wanted()
    }

    /// Claim the next fetch. Returns the cursor to request, or `None` when no
    /// fetch is due or one is already running.
    pub fn begin_fetch(&mut self) -> Option<u32> {
        if !self.should_fetch() {
            return None;
        }
        self.in_flight = true;
        Some(self.cursor)
    }

    pub fn complete_fetch(&mut self, cursor: u32, records: Vec<BreedRecord>) {
        if !self.accept(cursor) {
            return;
        }

        let short = records.len() < self.config.upstream_page_size;
        self.buffer.extend(records);

        if short {
            tracing::info!(
                cursor,
                page = self.page,
                total = self.buffer.len(),
                "upstream exhausted"
            );
            self.exhausted_at = Some(self.page);
        } else {
            self.cursor += 1;
        }
    }

    /// Record a failed fetch. Buffer and cursor stay as they were; fetching
    /// halts until the user navigates or retries.
    pub fn fail_fetch(&mut self, cursor: u32, message: impl Into<String>) {
        if !self.accept(cursor) {
            return;
        }
        let message = message.into();
        tracing::warn!(cursor, "fetch failed: {}", message);
        self.error = Some(message);
    }

    fn accept(&mut self, cursor: u32) -> bool {
        self.in_flight = false;
        if cursor != self.cursor {
            tracing::warn!(cursor, expected = self.cursor, "dropping stale fetch result");
            return false;
        }
        true
    }

    /// Last display page, once it is known.
    pub fn last_page(&self) -> Option<u32> {
        if !self.is_terminal() {
            return None;
        }
        let filled = self.buffer.len().div_ceil(self.config.display_page_size) as u32;
        Some(filled.max(self.exhausted_at.unwrap_or(1)).max(1))
    }

    /// Derived from the buffer and the current page on every call.
    pub fn status(&self) -> PageStatus<'_> {
        let size = self.config.display_page_size;
        let chunk = slice(&self.buffer, self.page, size);
        if chunk.len() == size || self.is_terminal() {
            return PageStatus::Ready(chunk);
        }
        match &self.error {
            Some(message) => PageStatus::Error(message),
            None => PageStatus::Pending,
        }
    }

    pub fn can_prev(&self) -> bool {
        self.page > 1
    }

    /// Only from a page that is on screen, and never past the last page.
    pub fn can_next(&self) -> bool {
        matches!(self.status(), PageStatus::Ready(_))
            && self.last_page().map_or(true, |last| self.page < last)
    }

    pub fn next_page(&mut self) -> bool {
        if !self.can_next() {
            return false;
        }
        self.page += 1;
        self.error = None;
        true
    }

    pub fn prev_page(&mut self) -> bool {
        if !self.can_prev() {
            return false;
        }
        self.page -= 1;
        self.error = None;
        true
    }

    /// Clear a surfaced error so the next `begin_fetch` can try again.
    pub fn retry(&mut self) -> bool {
        self.error.take().is_some()
    }
}

/// Fetch until the current display page is ready, the loader is terminal, or a
/// fetch fails. A failure is recorded on the loader and returned.
pub async fn fill(
    loader: &mut BreedLoader,
    source: &dyn BreedSource,
    policy: &RetryPolicy,
) -> Result<()> {
    while let Some(cursor) = loader.begin_fetch() {
        match retry(policy, || source.fetch_page(cursor)).await {
            Ok(records) => loader.complete_fetch(cursor, records),
            Err(e) => {
                loader.fail_fetch(cursor, e.to_string());
                return Err(e);
            }
        }
    }
    Ok(())
}

/// Walk forward to `page`, filling each page on the way.
pub async fn fill_to(
    loader: &mut BreedLoader,
    page: u32,
    source: &dyn BreedSource,
    policy: &RetryPolicy,
) -> Result<()> {
    fill(loader, source, policy).await?;
    while loader.page() < page {
        if !loader.next_page() {
            return Err(BreedError::PageOutOfRange {
                page,
                last: loader.page(),
            });
        }
        fill(loader, source, policy).await?;
    }
    Ok(())
}
