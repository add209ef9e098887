//! Heading candidate detection.
//!
//! Three independent signals score each span; fusion demands that the
//! pattern-or-layout signal clears its threshold and that the semantic
//! signal does not veto. Each signal sits behind [`SignalScorer`] so the
//! weights and behavior stay auditable and replaceable signal-by-signal.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{FontStats, OutlineLevel, Span};

use super::options::ExtractOptions;

static NUMBERED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+(?:\.\d+)*[.)]?\s+\S").unwrap());
static ROMAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[IVXLCDM]+[.)]\s+\S").unwrap());
static SECTION_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(chapter|section|part|appendix)\s+[A-Z0-9]").unwrap());
static TITLE_CASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][a-z]*(?:\s+(?:[A-Z][a-z]*|of|the|and|in|for|to|a|an))*$").unwrap());
static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\d+(?:\.\d+)*)").unwrap());

const STOPWORDS: &[&str] = &[
    "the", "a", "an", "is", "are", "was", "were", "has", "have", "had", "this", "that", "these",
    "those", "it", "its", "with", "from", "which", "when", "where", "while", "been", "being",
];

/// A span proposed as a heading, with fused confidence and an optional
/// level hint from numbered-pattern depth. Derived per run, never
/// persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingCandidate {
    /// Index into the document's span list
    pub span_idx: usize,
    /// Fused confidence in [0,1]
    pub confidence: f32,
    /// Level implied by numbering depth ("1.2.3" → H3), if any
    pub level_hint: Option<OutlineLevel>,
}

/// Shared read-only context handed to every signal.
pub struct SignalContext<'a> {
    pub stats: &'a FontStats,
    pub options: &'a ExtractOptions,
    /// Vertical whitespace above and below each span, in points,
    /// parallel to the span list. `f32::INFINITY` at page edges.
    pub gaps: &'a [(f32, f32)],
}

/// A single heading signal: maps a span to a strength in [0,1].
pub trait SignalScorer {
    fn name(&self) -> &'static str;
    fn score(&self, idx: usize, span: &Span, ctx: &SignalContext<'_>) -> f32;
}

/// Regex-family pattern signal: numbered headings, roman numerals,
/// "Chapter N", ALL-CAPS short lines, Title-Case short lines.
pub struct PatternSignal;

impl SignalScorer for PatternSignal {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn score(&self, _idx: usize, span: &Span, ctx: &SignalContext<'_>) -> f32 {
        let text = span.text.trim();
        if text.len() < 3 {
            return 0.0;
        }

        if NUMBERED.is_match(text) || ROMAN.is_match(text) || SECTION_WORD.is_match(text) {
            return 1.0;
        }

        let words = span.word_count();
        if span.is_uppercase() && words <= 8 {
            return 0.9;
        }

        if words <= ctx.options.title_case_max_words && TITLE_CASE.is_match(text) {
            return 0.7;
        }

        0.0
    }
}

/// Layout signal: font size and weight relative to the document's body
/// mode, plus vertical isolation. Layout-unknown spans score zero.
pub struct LayoutSignal;

impl SignalScorer for LayoutSignal {
    fn name(&self) -> &'static str {
        "layout"
    }

    fn score(&self, idx: usize, span: &Span, ctx: &SignalContext<'_>) -> f32 {
        if !span.layout_known {
            return 0.0;
        }

        let body = ctx.stats.body_size.max(1.0);
        let ratio = span.font_size / body;

        let mut score: f32 = if ratio >= 1.5 {
            0.9
        } else if ratio >= 1.15 {
            0.6
        } else if ratio >= 1.05 {
            0.3
        } else {
            0.0
        };

        if span.bold {
            score += 0.3;
        }

        // Isolated lines (clear whitespace above and below) read as
        // headings even at modest sizes.
        if let Some((above, below)) = ctx.gaps.get(idx) {
            if *above > span.font_size * 1.2 && *below > span.font_size * 1.2 {
                score += 0.2;
            }
        }

        score.clamp(0.0, 1.0)
    }
}

/// Semantic signal: does the text read as a heading rather than a body
/// sentence? Used to suppress false positives like bold body emphasis.
pub struct SemanticSignal;

impl SignalScorer for SemanticSignal {
    fn name(&self) -> &'static str {
        "semantic"
    }

    fn score(&self, _idx: usize, span: &Span, _ctx: &SignalContext<'_>) -> f32 {
        let text = span.text.trim();
        if text.is_empty() {
            return 0.0;
        }

        let mut score: f32 = 0.5;
        let words = span.word_count();

        if words <= 12 {
            score += 0.25;
        } else if words > 20 {
            score -= 0.4;
        }

        // Sentences end with terminal punctuation; headings rarely do.
        if text.ends_with('.') || text.ends_with('!') || text.ends_with('?') || text.ends_with(',')
        {
            score -= 0.4;
        }
        if text.ends_with(':') {
            score += 0.1;
        }

        if text.chars().next().is_some_and(|c| c.is_lowercase()) {
            score -= 0.3;
        }

        // Noun phrases carry few function words.
        let lower = text.to_lowercase();
        let total = words.max(1);
        let stopwords = lower
            .split_whitespace()
            .filter(|w| STOPWORDS.contains(&w.trim_matches(|c: char| !c.is_alphanumeric())))
            .count();
        if stopwords as f32 / total as f32 > 0.4 {
            score -= 0.25;
        }

        let digits = text.chars().filter(|c| c.is_ascii_digit()).count();
        if digits as f32 / text.len() as f32 > 0.5 {
            score -= 0.3;
        }

        score.clamp(0.0, 1.0)
    }
}

/// Depth of a leading numbered pattern: "1." → 1, "1.2" → 2, "1.2.3" → 3.
pub fn numbered_depth(text: &str) -> Option<u8> {
    if !NUMBERED.is_match(text) {
        return None;
    }
    let caps = LEADING_NUMBER.captures(text)?;
    let depth = caps.get(1)?.as_str().split('.').count() as u8;
    Some(depth)
}

/// Detect heading candidates among a document's spans.
///
/// Spans must be in reading order. Same-visual-line duplicates resolve
/// by reading order: the first occurrence of a (page, text) pair wins.
pub fn detect_candidates(
    spans: &[Span],
    stats: &FontStats,
    options: &ExtractOptions,
) -> Vec<HeadingCandidate> {
    let gaps = vertical_gaps(spans);
    let ctx = SignalContext {
        stats,
        options,
        gaps: &gaps,
    };

    let pattern = PatternSignal;
    let layout = LayoutSignal;
    let semantic = SemanticSignal;

    let mut seen: std::collections::HashSet<(u32, String)> = std::collections::HashSet::new();
    let mut candidates = Vec::new();

    for (idx, span) in spans.iter().enumerate() {
        let text = span.text.trim();
        if text.len() < 3 {
            continue;
        }

        let p = pattern.score(idx, span, &ctx);
        let l = layout.score(idx, span, &ctx);
        let s = semantic.score(idx, span, &ctx);

        if p.max(l) < options.signal_threshold || s < options.veto_threshold {
            continue;
        }

        if !seen.insert((span.page, text.to_string())) {
            continue;
        }

        let confidence = (options.pattern_weight * p
            + options.layout_weight * l
            + options.semantic_weight * s)
            .clamp(0.0, 1.0);

        log::debug!(
            "candidate p{} '{}': pattern={:.2} layout={:.2} semantic={:.2} conf={:.2}",
            span.page,
            text,
            p,
            l,
            s,
            confidence
        );

        candidates.push(HeadingCandidate {
            span_idx: idx,
            confidence,
            level_hint: numbered_depth(text).map(OutlineLevel::from_depth),
        });
    }

    candidates
}

/// Vertical whitespace above and below each span, within its page.
/// Assumes spans are in reading order (page asc, y desc).
fn vertical_gaps(spans: &[Span]) -> Vec<(f32, f32)> {
    let mut gaps = vec![(f32::INFINITY, f32::INFINITY); spans.len()];
    for i in 0..spans.len() {
        if i > 0 && spans[i - 1].page == spans[i].page {
            gaps[i].0 = (spans[i - 1].y - spans[i].y).abs();
        }
        if i + 1 < spans.len() && spans[i + 1].page == spans[i].page {
            gaps[i].1 = (spans[i].y - spans[i + 1].y).abs();
        }
    }
    gaps
}
