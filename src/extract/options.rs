//! Extraction options and tuning constants.

use std::time::Duration;

/// Options for single-document outline extraction.
///
/// The signal weights and thresholds are empirical; they are exposed
/// here as configurable defaults rather than hard-coded at use sites.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Maximum page count accepted in single-document mode
    pub max_pages: u32,

    /// Wall-clock budget for one document
    pub time_budget: Duration,

    /// Minimum pattern-or-layout signal for a span to become a candidate
    pub signal_threshold: f32,

    /// Minimum semantic score below which a candidate is vetoed
    pub veto_threshold: f32,

    /// Fusion weight for the pattern signal
    pub pattern_weight: f32,

    /// Fusion weight for the layout signal
    pub layout_weight: f32,

    /// Fusion weight for the semantic signal
    pub semantic_weight: f32,

    /// Word-count ceiling for the Title-Case pattern
    pub title_case_max_words: usize,
}

impl ExtractOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page limit.
    pub fn with_max_pages(mut self, pages: u32) -> Self {
        self.max_pages = pages;
        self
    }

    /// Set the per-document wall-clock budget.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }

    /// Set the candidate signal threshold.
    pub fn with_signal_threshold(mut self, threshold: f32) -> Self {
        self.signal_threshold = threshold;
        self
    }

    /// Set the semantic veto threshold.
    pub fn with_veto_threshold(mut self, threshold: f32) -> Self {
        self.veto_threshold = threshold;
        self
    }

    /// Set the three fusion weights at once.
    pub fn with_fusion_weights(mut self, pattern: f32, layout: f32, semantic: f32) -> Self {
        self.pattern_weight = pattern;
        self.layout_weight = layout;
        self.semantic_weight = semantic;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_pages: 50,
            time_budget: Duration::from_secs(10),
            signal_threshold: 0.5,
            veto_threshold: 0.35,
            pattern_weight: 0.4,
            layout_weight: 0.4,
            semantic_weight: 0.2,
            title_case_max_words: 12,
        }
    }
}
