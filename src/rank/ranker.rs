//! Cross-document section ranking against a persona query.

use std::cmp::Ordering;

use crate::model::{DocumentOutline, OutlineLevel, RankedSection};

use super::embedding::{clip_unit, cosine_similarity, Embedder};

/// Weight applied to a section's similarity by its structural level.
/// Top-level headings summarize more content, so they outrank deeper
/// headings at equal similarity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelMultipliers {
    pub h1: f32,
    pub h2: f32,
    pub h3: f32,
}

impl Default for LevelMultipliers {
    fn default() -> Self {
        Self {
            h1: 1.2,
            h2: 1.0,
            h3: 0.8,
        }
    }
}

impl LevelMultipliers {
    pub fn for_level(&self, level: OutlineLevel) -> f32 {
        match level {
            OutlineLevel::Title | OutlineLevel::H1 => self.h1,
            OutlineLevel::H2 => self.h2,
            OutlineLevel::H3 => self.h3,
        }
    }
}

/// Pool every heading from every outline, score each against the query
/// vector, and sort the result.
///
/// `documents` must be in upload order; that order is the second-level
/// tie break, so ranking the same batch twice gives identical output.
/// Sections with similarity below `min_similarity` are dropped.
pub fn rank_sections(
    documents: &[(String, DocumentOutline)],
    query: &[f32],
    embedder: &dyn Embedder,
    multipliers: &LevelMultipliers,
    min_similarity: f32,
) -> Vec<RankedSection> {
    let mut scored: Vec<(RankedSection, usize)> = Vec::new();

    for (doc_index, (name, outline)) in documents.iter().enumerate() {
        outline.walk(|n| {
            let vector = embedder.embed(&n.text);
            let similarity = clip_unit(cosine_similarity(query, &vector));
            if similarity < min_similarity {
                return;
            }
            scored.push((
                RankedSection {
                    document: name.clone(),
                    page: n.page,
                    section_title: n.text.clone(),
                    level: n.level,
                    similarity_score: similarity,
                    importance_rank: similarity * multipliers.for_level(n.level),
                },
                doc_index,
            ));
        });
    }

    scored.sort_by(|(a, a_doc), (b, b_doc)| {
        b.importance_rank
            .partial_cmp(&a.importance_rank)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                b.similarity_score
                    .partial_cmp(&a.similarity_score)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| a_doc.cmp(b_doc))
            .then_with(|| a.page.cmp(&b.page))
    });

    scored.into_iter().map(|(section, _)| section).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OutlineNode;
    use crate::rank::embedding::HashEmbedder;

    fn outline(headings: &[(&str, OutlineLevel, u32)]) -> DocumentOutline {
        DocumentOutline {
            title: String::new(),
            outline: headings
                .iter()
                .map(|(text, level, page)| OutlineNode::new(*level, *text, *page))
                .collect(),
        }
    }

    #[test]
    fn test_importance_is_similarity_times_multiplier() {
        let embedder = HashEmbedder::default();
        let query = embedder.embed("revenue growth analysis");
        let docs = vec![(
            "a.pdf".to_string(),
            outline(&[
                ("Revenue Growth", OutlineLevel::H1, 1),
                ("Revenue Growth Detail", OutlineLevel::H3, 2),
            ]),
        )];

        let ranked = rank_sections(&docs, &query, &embedder, &LevelMultipliers::default(), 0.0);

        for section in &ranked {
            let mult = LevelMultipliers::default().for_level(section.level);
            assert_eq!(section.importance_rank, section.similarity_score * mult);
        }
    }

    #[test]
    fn test_level_multiplier_breaks_similarity_ties() {
        let embedder = HashEmbedder::default();
        let query = embedder.embed("annual budget");
        // Same heading text at two levels: identical similarity, so the
        // H1 copy must outrank the H3 copy.
        let docs = vec![(
            "a.pdf".to_string(),
            outline(&[
                ("Annual Budget", OutlineLevel::H3, 1),
                ("Annual Budget", OutlineLevel::H1, 2),
            ]),
        )];

        let ranked = rank_sections(&docs, &query, &embedder, &LevelMultipliers::default(), 0.0);
        assert_eq!(ranked[0].level, OutlineLevel::H1);
        assert_eq!(ranked[1].level, OutlineLevel::H3);
    }

    #[test]
    fn test_upload_order_breaks_full_ties() {
        let embedder = HashEmbedder::default();
        let query = embedder.embed("methods");
        let heading = [("Methods", OutlineLevel::H1, 4)];
        let docs = vec![
            ("second.pdf".to_string(), outline(&heading)),
            ("first.pdf".to_string(), outline(&heading)),
        ];

        let ranked = rank_sections(&docs, &query, &embedder, &LevelMultipliers::default(), 0.0);
        // Identical text and level in both docs; the earlier upload wins.
        assert_eq!(ranked[0].document, "second.pdf");
        assert_eq!(ranked[1].document, "first.pdf");
    }

    #[test]
    fn test_min_similarity_filters_sections() {
        let embedder = HashEmbedder::default();
        let query = embedder.embed("protein folding simulation");
        let docs = vec![(
            "a.pdf".to_string(),
            outline(&[
                ("Protein Folding", OutlineLevel::H1, 1),
                ("Office Seating Chart", OutlineLevel::H1, 2),
            ]),
        )];

        let all = rank_sections(&docs, &query, &embedder, &LevelMultipliers::default(), 0.0);
        assert_eq!(all.len(), 2);

        let cutoff = all[0].similarity_score;
        let filtered =
            rank_sections(&docs, &query, &embedder, &LevelMultipliers::default(), cutoff);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].section_title, "Protein Folding");
    }

    #[test]
    fn test_nested_children_are_pooled() {
        let embedder = HashEmbedder::default();
        let query = embedder.embed("background");
        let mut root = OutlineNode::new(OutlineLevel::H1, "1. Overview", 1);
        root.children
            .push(OutlineNode::new(OutlineLevel::H2, "1.1 Background", 1));
        let docs = vec![(
            "a.pdf".to_string(),
            DocumentOutline {
                title: "T".into(),
                outline: vec![root],
            },
        )];

        let ranked = rank_sections(&docs, &query, &embedder, &LevelMultipliers::default(), 0.0);
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().any(|s| s.section_title == "1.1 Background"));
    }

    #[test]
    fn test_ranking_is_deterministic() {
        let embedder = HashEmbedder::default();
        let query = embedder.embed("travel planning for students");
        let docs = vec![
            (
                "cities.pdf".to_string(),
                outline(&[
                    ("Student Travel Tips", OutlineLevel::H1, 1),
                    ("Packing List", OutlineLevel::H2, 3),
                ]),
            ),
            (
                "food.pdf".to_string(),
                outline(&[("Budget Dining", OutlineLevel::H1, 2)]),
            ),
        ];

        let first = rank_sections(&docs, &query, &embedder, &LevelMultipliers::default(), 0.0);
        let second = rank_sections(&docs, &query, &embedder, &LevelMultipliers::default(), 0.0);
        assert_eq!(first, second);
    }
}
