//! # pdfsieve
//!
//! Document structure extraction and persona-driven relevance ranking.
//!
//! This library turns a PDF into a title plus a nested H1/H2/H3 outline,
//! and ranks sections across a batch of documents against a persona and
//! the job they are trying to get done.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfsieve::{extract_outline_file, PdfSieve};
//!
//! fn main() -> pdfsieve::Result<()> {
//!     // Outline a single document
//!     let outline = extract_outline_file("report.pdf")?;
//!     println!("{}: {} headings", outline.title, outline.node_count());
//!
//!     // Rank a batch against a persona
//!     let report = PdfSieve::new()
//!         .with_top_n(5)
//!         .analyze_files(
//!             &["a.pdf", "b.pdf", "c.pdf"],
//!             "Investment analyst",
//!             "Review revenue trends across portfolio companies",
//!         )?;
//!     for section in &report.extracted_sections {
//!         println!("{}  {}", section.importance_rank, section.section_title);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Structure extraction**: Title and three heading depths from layout,
//!   numbering patterns, and font statistics
//! - **Persona ranking**: Deterministic embeddings and cosine similarity,
//!   weighted by heading level
//! - **Batch processing**: Parallel extraction with per-document failure
//!   isolation and wall-clock budgets
//! - **Templated synthesis**: Stable explanations for the top sections

pub mod batch;
pub mod detect;
pub mod error;
pub mod extract;
pub mod model;
pub mod rank;

// Re-export commonly used types
pub use batch::{BatchAnalyzer, BatchDocument, BatchOptions, BatchState};
pub use detect::{detect_version, is_pdf_bytes};
pub use error::{Error, Result};
pub use extract::{ExtractOptions, OutlineExtractor};
pub use model::{
    AnalysisReport, DocumentError, DocumentOutline, JobToBeDone, OutlineLevel, OutlineNode,
    Persona, RankedSection, ReportMetadata, Span, SubsectionAnalysis,
};
pub use rank::{cosine_similarity, Embedder, HashEmbedder, LevelMultipliers};

use std::path::Path;
use std::time::Duration;

/// Extract a document outline from PDF bytes.
///
/// # Example
///
/// ```no_run
/// use pdfsieve::extract_outline;
///
/// let data = std::fs::read("report.pdf").unwrap();
/// let outline = extract_outline(&data).unwrap();
/// println!("title: {}", outline.title);
/// ```
pub fn extract_outline(data: &[u8]) -> Result<DocumentOutline> {
    OutlineExtractor::new().extract(data)
}

/// Extract a document outline with custom options.
pub fn extract_outline_with_options(
    data: &[u8],
    options: ExtractOptions,
) -> Result<DocumentOutline> {
    OutlineExtractor::with_options(options).extract(data)
}

/// Extract a document outline from a file on disk.
pub fn extract_outline_file<P: AsRef<Path>>(path: P) -> Result<DocumentOutline> {
    let data = std::fs::read(path)?;
    extract_outline(&data)
}

/// Analyze a batch of in-memory documents against a persona and job,
/// with default options.
///
/// # Example
///
/// ```no_run
/// use pdfsieve::{analyze, BatchDocument};
///
/// let docs: Vec<BatchDocument> = vec![
///     BatchDocument::from_path("a.pdf").unwrap(),
///     BatchDocument::from_path("b.pdf").unwrap(),
///     BatchDocument::from_path("c.pdf").unwrap(),
/// ];
/// let report = analyze(&docs, "HR professional", "Create fillable onboarding forms").unwrap();
/// assert!(report.sub_section_analyses.len() <= 5);
/// ```
pub fn analyze(
    documents: &[BatchDocument],
    persona: &str,
    job: &str,
) -> Result<AnalysisReport> {
    BatchAnalyzer::default().analyze(
        documents,
        &Persona(persona.to_string()),
        &JobToBeDone(job.to_string()),
    )
}

/// Builder for configuring extraction and batch analysis.
///
/// # Example
///
/// ```no_run
/// use pdfsieve::PdfSieve;
/// use std::time::Duration;
///
/// let report = PdfSieve::new()
///     .with_max_pages(30)
///     .with_batch_budget(Duration::from_secs(45))
///     .with_top_n(3)
///     .analyze_files(
///         &["a.pdf", "b.pdf", "c.pdf"],
///         "Travel planner",
///         "Plan a 4-day trip for college friends",
///     )?;
/// # Ok::<(), pdfsieve::Error>(())
/// ```
pub struct PdfSieve {
    options: BatchOptions,
    embedder: Option<Box<dyn Embedder>>,
}

impl PdfSieve {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            options: BatchOptions::default(),
            embedder: None,
        }
    }

    /// Cap the number of pages processed per document.
    pub fn with_max_pages(mut self, pages: u32) -> Self {
        self.options.extract = self.options.extract.with_max_pages(pages);
        self
    }

    /// Set the per-document processing budget.
    pub fn with_document_budget(mut self, budget: Duration) -> Self {
        self.options.extract = self.options.extract.with_time_budget(budget);
        self
    }

    /// Set the whole-batch wall-clock budget.
    pub fn with_batch_budget(mut self, budget: Duration) -> Self {
        self.options = self.options.with_batch_budget(budget);
        self
    }

    /// Number of top sections to synthesize analyses for.
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.options = self.options.with_top_n(top_n);
        self
    }

    /// Drop sections below this similarity from the report.
    pub fn with_min_similarity(mut self, min_similarity: f32) -> Self {
        self.options = self.options.with_min_similarity(min_similarity);
        self
    }

    /// Override the heading level weights used during ranking.
    pub fn with_multipliers(mut self, multipliers: LevelMultipliers) -> Self {
        self.options = self.options.with_multipliers(multipliers);
        self
    }

    /// Cap the extraction worker pool.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.options = self.options.with_workers(workers);
        self
    }

    /// Use a custom embedding backend instead of the default hashed one.
    pub fn with_embedder(mut self, embedder: Box<dyn Embedder>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Analyze in-memory documents.
    pub fn analyze(
        self,
        documents: &[BatchDocument],
        persona: &str,
        job: &str,
    ) -> Result<AnalysisReport> {
        let mut analyzer = BatchAnalyzer::new(self.options);
        if let Some(embedder) = self.embedder {
            analyzer = analyzer.with_embedder(embedder);
        }
        analyzer.analyze(
            documents,
            &Persona(persona.to_string()),
            &JobToBeDone(job.to_string()),
        )
    }

    /// Read documents from disk and analyze them.
    pub fn analyze_files<P: AsRef<Path>>(
        self,
        paths: &[P],
        persona: &str,
        job: &str,
    ) -> Result<AnalysisReport> {
        let documents = paths
            .iter()
            .map(BatchDocument::from_path)
            .collect::<Result<Vec<_>>>()?;
        self.analyze(&documents, persona, job)
    }
}

impl Default for PdfSieve {
    fn default() -> Self {
        Self::new()
    }
}
