//! Single-document extraction pipeline.
//!
//! Wires the stages together: load, page walk, heading detection,
//! hierarchy assignment. Each stage is pure given its inputs, so the
//! same bytes always produce the same outline.

use std::time::Instant;

use crate::error::{Error, Result};
use crate::model::{DocumentOutline, FontStats, Span};

use super::detector::detect_candidates;
use super::hierarchy::assign_hierarchy;
use super::options::ExtractOptions;
use super::spans::SpanExtractor;

/// Extracts a structured outline from one PDF document.
#[derive(Debug, Clone, Default)]
pub struct OutlineExtractor {
    options: ExtractOptions,
}

impl OutlineExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ExtractOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract a title and heading outline from raw PDF bytes.
    pub fn extract(&self, bytes: &[u8]) -> Result<DocumentOutline> {
        let deadline = Instant::now() + self.options.time_budget;
        self.extract_named(bytes, "document", deadline)
    }

    /// Extraction with a caller-supplied name and deadline. The batch
    /// layer uses this so timeouts carry the offending file name.
    pub(crate) fn extract_named(
        &self,
        bytes: &[u8],
        name: &str,
        deadline: Instant,
    ) -> Result<DocumentOutline> {
        let extractor = SpanExtractor::load(bytes)?;

        let pages = extractor.page_count();
        if pages > self.options.max_pages {
            return Err(Error::PageLimitExceeded {
                pages,
                limit: self.options.max_pages,
            });
        }

        let spans = self.collect_spans(&extractor, name, deadline)?;
        log::debug!("{}: {} spans across {} pages", name, spans.len(), pages);

        let stats = FontStats::from_spans(&spans);
        let candidates = detect_candidates(&spans, &stats, &self.options);
        Ok(assign_hierarchy(&spans, &candidates, &stats))
    }

    /// Walk every page in order, checking the deadline between pages.
    /// A page that fails to parse is skipped; a document with no text
    /// at all falls back to plain extraction.
    fn collect_spans(
        &self,
        extractor: &SpanExtractor,
        name: &str,
        deadline: Instant,
    ) -> Result<Vec<Span>> {
        let mut spans = Vec::new();

        for page_num in extractor.page_numbers() {
            if Instant::now() > deadline {
                return Err(self.timeout(name));
            }
            match extractor.extract_page(page_num) {
                Ok(page_spans) => spans.extend(page_spans),
                Err(err) => {
                    log::warn!("{}: skipping page {}: {}", name, page_num, err);
                }
            }
        }

        if spans.iter().all(|s| s.text.trim().is_empty()) {
            log::debug!("{}: no positioned text, using plain fallback", name);
            spans = extractor.extract_plain_fallback()?;
        }

        Ok(spans)
    }

    fn timeout(&self, name: &str) -> Error {
        Error::PerDocumentTimeout {
            document: name.to_string(),
            budget_secs: self.options.time_budget.as_secs_f64(),
        }
    }
}
