//! Serialized output models for persona analysis.
//!
//! Field names follow the JSON contract consumed by the serving layer,
//! so renames here are breaking changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::OutlineLevel;

/// Free-text description of the user's role and background.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona(pub String);

/// Free-text description of the task the persona wants to accomplish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobToBeDone(pub String);

/// One section scored against the persona query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSection {
    /// Source document name
    pub document: String,
    /// Page the heading appears on (1-based)
    pub page: u32,
    /// Heading text
    pub section_title: String,
    /// Structural level of the heading
    pub level: OutlineLevel,
    /// Cosine similarity to the persona query, clipped to [0,1]
    pub similarity_score: f32,
    /// similarity_score × level multiplier
    pub importance_rank: f32,
}

/// Synthesized explanation for a top-ranked section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    pub document: String,
    pub page: u32,
    pub original_title: String,
    pub refined_text: String,
    pub relevance_explanation: String,
}

/// A per-document failure captured during a batch, reported inline
/// instead of aborting peer documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentError {
    /// Document name as supplied in the request
    pub document: String,
    /// Machine-readable error name, e.g. "UnreadablePdf"
    pub error: String,
    /// Human-readable detail
    pub detail: String,
}

/// Request-level metadata echoed back on the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Document names in upload order
    pub documents: Vec<String>,
    pub persona: String,
    pub job: String,
    /// Wall-clock seconds from validated input to result
    pub processing_time_seconds: f64,
    /// When the analysis finished
    pub timestamp: DateTime<Utc>,
}

/// Final result of a persona analysis over a document batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub metadata: ReportMetadata,
    /// All sections pooled across documents, sorted by importance
    pub extracted_sections: Vec<RankedSection>,
    /// Explanations for the top-N sections
    pub sub_section_analyses: Vec<SubsectionAnalysis>,
    /// Documents that failed extraction, with reasons
    pub document_errors: Vec<DocumentError>,
    /// True when the report was cut short by the batch budget
    pub incomplete: bool,
}
