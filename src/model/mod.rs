//! Data model for extraction and ranking.
//!
//! Spans are the immutable per-page extraction output; the outline tree
//! is the per-document structure result; report types are the serialized
//! batch-analysis output consumed by the serving layer.

mod outline;
mod report;
mod span;

pub use outline::{DocumentOutline, OutlineLevel, OutlineNode};
pub use report::{
    AnalysisReport, DocumentError, JobToBeDone, Persona, RankedSection, ReportMetadata,
    SubsectionAnalysis,
};
pub use span::{FontStats, Span};
