//! Positioned text spans and per-document font statistics.

use std::collections::HashMap;

/// A positioned run of text extracted from a PDF page.
///
/// Immutable once extracted. One span per visual line: spans sharing a
/// baseline are merged by the extractor before heading detection runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    /// The text content
    pub text: String,
    /// Page number (1-based)
    pub page: u32,
    /// Font size in points
    pub font_size: f32,
    /// Whether the font appears to be bold
    pub bold: bool,
    /// Whether the font appears to be italic
    pub italic: bool,
    /// X position (left edge)
    pub x: f32,
    /// Y position (baseline)
    pub y: f32,
    /// Width of the text
    pub width: f32,
    /// Height of the text (approximate, from font size)
    pub height: f32,
    /// False when the span came from the plain-text fallback and carries
    /// default font metadata only.
    pub layout_known: bool,
}

impl Span {
    /// Create a span from a decoded text run, inferring style flags from
    /// the base font name.
    pub fn new(text: String, page: u32, x: f32, y: f32, font_size: f32, font_name: &str) -> Self {
        let lower = font_name.to_lowercase();
        let bold = lower.contains("bold") || lower.contains("black") || lower.contains("heavy");
        let italic = lower.contains("italic") || lower.contains("oblique");

        // Width estimate: average glyph ~half the em size.
        let width = text.chars().count() as f32 * font_size * 0.5;

        Self {
            text,
            page,
            font_size,
            bold,
            italic,
            x,
            y,
            width,
            height: font_size,
            layout_known: true,
        }
    }

    /// Create a layout-unknown span from plain-text fallback extraction.
    /// Reading order is carried by slice position, so the caller pushes
    /// these in line order.
    pub fn plain(text: String, page: u32) -> Self {
        Self {
            text,
            page,
            font_size: 12.0,
            bold: false,
            italic: false,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 12.0,
            layout_known: false,
        }
    }

    /// Number of whitespace-separated words.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Whether all alphabetic characters are uppercase.
    pub fn is_uppercase(&self) -> bool {
        let letters: Vec<char> = self.text.chars().filter(|c| c.is_alphabetic()).collect();
        !letters.is_empty() && letters.iter().all(|c| c.is_uppercase())
    }
}

/// Font-size statistics for one document, used by the layout signal and
/// the hierarchy assigner.
#[derive(Debug, Clone, Default)]
pub struct FontStats {
    /// Body text font size (most frequent across all spans)
    pub body_size: f32,
    /// Distinct sizes larger than body, descending
    pub heading_sizes: Vec<f32>,
    /// Observed sizes with frequency, keyed at 0.1pt precision
    size_histogram: HashMap<i32, usize>,
}

impl FontStats {
    /// Build statistics from a set of spans. Layout-unknown spans are
    /// excluded so the fallback default size never skews the mode.
    pub fn from_spans(spans: &[Span]) -> Self {
        let mut stats = Self::default();
        for span in spans.iter().filter(|s| s.layout_known) {
            stats.add_size(span.font_size);
        }
        stats.analyze();
        stats
    }

    /// Add a font size observation.
    pub fn add_size(&mut self, size: f32) {
        let key = (size * 10.0).round() as i32;
        *self.size_histogram.entry(key).or_insert(0) += 1;
    }

    /// Compute body size and the descending heading-size list.
    pub fn analyze(&mut self) {
        if self.size_histogram.is_empty() {
            self.body_size = 12.0;
            return;
        }

        // Modal size is the body text; ties resolve to the smaller size
        // so sparse large headings never win the mode.
        if let Some((body_key, _)) = self
            .size_histogram
            .iter()
            .max_by(|(ka, ca), (kb, cb)| ca.cmp(cb).then(kb.cmp(ka)))
        {
            self.body_size = *body_key as f32 / 10.0;
        }

        let mut larger: Vec<f32> = self
            .size_histogram
            .keys()
            .map(|k| *k as f32 / 10.0)
            .filter(|s| *s > self.body_size + 0.5)
            .collect();
        larger.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
        self.heading_sizes = larger;
    }

    /// Largest observed font size in the document.
    pub fn max_size(&self) -> f32 {
        self.heading_sizes.first().copied().unwrap_or(self.body_size)
    }
}
