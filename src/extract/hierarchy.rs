//! Hierarchy assignment: flat scored candidates to a leveled tree.
//!
//! Levels come from font-size clusters (at most three buckets, largest
//! first), overridden by numbered-pattern depth where present. The tree
//! itself is built with an arena of nodes and a stack of currently open
//! ancestor indices, keyed by level depth.

use std::collections::BTreeSet;

use crate::model::{DocumentOutline, FontStats, OutlineLevel, OutlineNode, Span};

use super::detector::HeadingCandidate;

/// Assign levels and build the outline tree for one document.
///
/// Candidates must be in reading order. Produces exactly one title
/// (possibly empty) and a tree where children are strictly deeper than
/// their parents.
pub fn assign_hierarchy(
    spans: &[Span],
    candidates: &[HeadingCandidate],
    stats: &FontStats,
) -> DocumentOutline {
    let (title, rest) = split_title(spans, candidates, stats);

    let clusters = size_clusters(spans, rest);

    let mut arena: Vec<OutlineNode> = Vec::with_capacity(rest.len());
    let mut child_lists: Vec<Vec<usize>> = Vec::with_capacity(rest.len());
    let mut roots: Vec<usize> = Vec::new();
    // Open ancestors, shallowest first.
    let mut open: Vec<usize> = Vec::new();

    for candidate in rest {
        let span = &spans[candidate.span_idx];
        let level = candidate
            .level_hint
            .unwrap_or_else(|| cluster_level(&clusters, span.font_size));

        let idx = arena.len();
        arena.push(OutlineNode::new(level, span.text.trim(), span.page));
        child_lists.push(Vec::new());

        // A shallower-or-equal level closes every open node at or below it.
        while let Some(&top) = open.last() {
            if arena[top].level.depth() >= level.depth() {
                open.pop();
            } else {
                break;
            }
        }

        match open.last() {
            Some(&parent) => child_lists[parent].push(idx),
            None => roots.push(idx),
        }
        open.push(idx);
    }

    let outline = roots
        .iter()
        .map(|&r| materialize(r, &arena, &child_lists))
        .collect();

    DocumentOutline { title, outline }
}

/// Title selection: among first-page candidates set in the document's
/// maximum font size, take the highest-confidence one, but only if it
/// precedes every other candidate. Returns the title text and the
/// remaining candidates.
fn split_title<'a>(
    spans: &[Span],
    candidates: &'a [HeadingCandidate],
    stats: &FontStats,
) -> (String, &'a [HeadingCandidate]) {
    let Some(first) = candidates.first() else {
        return (String::new(), candidates);
    };

    let best_max_size = candidates
        .iter()
        .filter(|c| {
            // Numbered headings are sections, never the title.
            let span = &spans[c.span_idx];
            c.level_hint.is_none() && span.page == 1 && span.font_size >= stats.max_size() - 0.1
        })
        .max_by(|a, b| {
            a.confidence
                .partial_cmp(&b.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    if let Some(best) = best_max_size {
        if best.span_idx == first.span_idx {
            let span = &spans[best.span_idx];
            return (span.text.trim().to_string(), &candidates[1..]);
        }
    }

    (String::new(), candidates)
}

/// Cluster candidate font sizes into at most three descending buckets.
/// Returns the bucket boundaries (distinct sizes, largest first).
fn size_clusters(spans: &[Span], candidates: &[HeadingCandidate]) -> Vec<f32> {
    let distinct: BTreeSet<i32> = candidates
        .iter()
        .map(|c| (spans[c.span_idx].font_size * 10.0).round() as i32)
        .collect();

    distinct
        .into_iter()
        .rev()
        .take(3)
        .map(|k| k as f32 / 10.0)
        .collect()
}

/// Map a font size to H1/H2/H3 by cluster rank; sizes below the third
/// bucket collapse into H3.
fn cluster_level(clusters: &[f32], font_size: f32) -> OutlineLevel {
    for (rank, &size) in clusters.iter().enumerate() {
        if font_size >= size - 0.05 {
            return OutlineLevel::from_depth(rank as u8 + 1);
        }
    }
    OutlineLevel::H3
}

fn materialize(idx: usize, arena: &[OutlineNode], child_lists: &[Vec<usize>]) -> OutlineNode {
    let mut node = arena[idx].clone();
    node.children = child_lists[idx]
        .iter()
        .map(|&c| materialize(c, arena, child_lists))
        .collect();
    node
}
