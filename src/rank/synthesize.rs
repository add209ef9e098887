//! Templated explanations for the top-ranked sections.
//!
//! No generative model here: the explanation is assembled from the
//! persona, the job, and the similarity band, so the output is stable
//! across runs for the same ranking.

use crate::model::{JobToBeDone, Persona, RankedSection, SubsectionAnalysis};

/// How many top sections get a synthesized analysis by default.
pub const DEFAULT_TOP_N: usize = 5;

/// Qualitative relevance band derived from a section's importance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelevanceBand {
    High,
    Moderate,
    Low,
}

impl RelevanceBand {
    pub fn from_importance(importance: f32) -> Self {
        if importance >= 0.85 {
            RelevanceBand::High
        } else if importance >= 0.6 {
            RelevanceBand::Moderate
        } else {
            RelevanceBand::Low
        }
    }

    fn phrase(self) -> &'static str {
        match self {
            RelevanceBand::High => "directly addresses",
            RelevanceBand::Moderate => "provides useful supporting material for",
            RelevanceBand::Low => "offers background context for",
        }
    }
}

/// Build analyses for the first `top_n` sections of an already-sorted
/// ranking.
pub fn synthesize(
    sections: &[RankedSection],
    persona: &Persona,
    job: &JobToBeDone,
    top_n: usize,
) -> Vec<SubsectionAnalysis> {
    sections
        .iter()
        .take(top_n)
        .map(|section| {
            let band = RelevanceBand::from_importance(section.importance_rank);
            SubsectionAnalysis {
                document: section.document.clone(),
                page: section.page,
                original_title: section.section_title.clone(),
                refined_text: format!(
                    "{} section '{}' on page {} of {}.",
                    section.level, section.section_title, section.page, section.document
                ),
                relevance_explanation: format!(
                    "This section {} the persona '{}' working on: {} (similarity {:.2}).",
                    band.phrase(),
                    persona.0,
                    job.0,
                    section.similarity_score
                ),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OutlineLevel;

    fn section(title: &str, similarity: f32) -> RankedSection {
        RankedSection {
            document: "guide.pdf".into(),
            page: 7,
            section_title: title.into(),
            level: OutlineLevel::H1,
            similarity_score: similarity,
            importance_rank: similarity * 1.2,
        }
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(RelevanceBand::from_importance(0.85), RelevanceBand::High);
        assert_eq!(RelevanceBand::from_importance(0.849), RelevanceBand::Moderate);
        assert_eq!(RelevanceBand::from_importance(0.6), RelevanceBand::Moderate);
        assert_eq!(RelevanceBand::from_importance(0.59), RelevanceBand::Low);
        assert_eq!(RelevanceBand::from_importance(0.0), RelevanceBand::Low);
    }

    #[test]
    fn test_top_n_truncation() {
        let sections: Vec<_> = (0..8).map(|i| section(&format!("S{}", i), 0.9)).collect();
        let persona = Persona("Travel planner".into());
        let job = JobToBeDone("Plan a 4-day trip".into());

        let analyses = synthesize(&sections, &persona, &job, 5);
        assert_eq!(analyses.len(), 5);
        assert_eq!(analyses[0].original_title, "S0");
    }

    #[test]
    fn test_explanation_mentions_persona_and_band() {
        let sections = vec![section("Nightlife Guide", 0.91)];
        let persona = Persona("Travel planner".into());
        let job = JobToBeDone("Plan a 4-day trip".into());

        let analyses = synthesize(&sections, &persona, &job, 5);
        let explanation = &analyses[0].relevance_explanation;
        assert!(explanation.contains("directly addresses"));
        assert!(explanation.contains("Travel planner"));
        assert!(explanation.contains("Plan a 4-day trip"));
        assert!(explanation.contains("0.91"));
    }

    #[test]
    fn test_refined_text_names_source() {
        let sections = vec![section("Nightlife Guide", 0.5)];
        let persona = Persona("p".into());
        let job = JobToBeDone("j".into());

        let analyses = synthesize(&sections, &persona, &job, 1);
        assert_eq!(
            analyses[0].refined_text,
            "H1 section 'Nightlife Guide' on page 7 of guide.pdf."
        );
    }

    #[test]
    fn test_fewer_sections_than_top_n() {
        let sections = vec![section("Only One", 0.7)];
        let persona = Persona("p".into());
        let job = JobToBeDone("j".into());
        assert_eq!(synthesize(&sections, &persona, &job, 5).len(), 1);
    }
}
