//! Batch orchestration: validate, extract in parallel, rank, synthesize.
//!
//! A batch moves through a fixed sequence of states. Validation errors
//! reject the request before any document is touched; a document that
//! fails extraction is recorded on the report while its peers continue;
//! only the batch-level wall-clock budget aborts the run as a whole.

use std::path::Path;
use std::time::{Duration, Instant};

use chrono::Utc;
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::extract::{ExtractOptions, OutlineExtractor};
use crate::model::{
    AnalysisReport, DocumentError, DocumentOutline, JobToBeDone, Persona, ReportMetadata,
};
use crate::rank::{rank_sections, synthesize, Embedder, HashEmbedder, LevelMultipliers};

/// Accepted batch size range, inclusive.
pub const MIN_BATCH_SIZE: usize = 3;
pub const MAX_BATCH_SIZE: usize = 10;

/// One uploaded document: a display name and its raw bytes.
#[derive(Debug, Clone)]
pub struct BatchDocument {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl BatchDocument {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read a document from disk, using the file name as its name.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let bytes = std::fs::read(path)?;
        Ok(Self { name, bytes })
    }
}

/// Processing stage of a batch, used for logging and budget checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Received,
    Validating,
    Extracting,
    Embedding,
    Ranking,
    Synthesizing,
    Completed,
    Failed,
}

impl std::fmt::Display for BatchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BatchState::Received => "received",
            BatchState::Validating => "validating",
            BatchState::Extracting => "extracting",
            BatchState::Embedding => "embedding",
            BatchState::Ranking => "ranking",
            BatchState::Synthesizing => "synthesizing",
            BatchState::Completed => "completed",
            BatchState::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

/// Tuning knobs for a batch run.
#[derive(Clone, Debug)]
pub struct BatchOptions {
    /// Per-document extraction settings
    pub extract: ExtractOptions,
    /// Wall-clock budget for the whole batch
    pub batch_budget: Duration,
    /// Number of top sections to synthesize analyses for
    pub top_n: usize,
    /// Sections below this similarity are dropped from the report
    pub min_similarity: f32,
    /// Level weights applied during ranking
    pub multipliers: LevelMultipliers,
    /// Worker cap; defaults to the machine's parallelism
    pub workers: Option<usize>,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            extract: ExtractOptions::default(),
            batch_budget: Duration::from_secs(60),
            top_n: crate::rank::DEFAULT_TOP_N,
            min_similarity: 0.0,
            multipliers: LevelMultipliers::default(),
            workers: None,
        }
    }
}

impl BatchOptions {
    pub fn with_extract(mut self, extract: ExtractOptions) -> Self {
        self.extract = extract;
        self
    }

    pub fn with_batch_budget(mut self, budget: Duration) -> Self {
        self.batch_budget = budget;
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_min_similarity(mut self, min_similarity: f32) -> Self {
        self.min_similarity = min_similarity;
        self
    }

    pub fn with_multipliers(mut self, multipliers: LevelMultipliers) -> Self {
        self.multipliers = multipliers;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers.max(1));
        self
    }
}

/// Runs persona analysis over a batch of documents.
pub struct BatchAnalyzer {
    options: BatchOptions,
    embedder: Box<dyn Embedder>,
}

impl Default for BatchAnalyzer {
    fn default() -> Self {
        Self::new(BatchOptions::default())
    }
}

impl BatchAnalyzer {
    pub fn new(options: BatchOptions) -> Self {
        Self {
            options,
            embedder: Box::new(HashEmbedder::default()),
        }
    }

    /// Swap in a different embedding backend.
    pub fn with_embedder(mut self, embedder: Box<dyn Embedder>) -> Self {
        self.embedder = embedder;
        self
    }

    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// Analyze a batch of documents against a persona and job.
    ///
    /// Validation failures and batch budget overruns return an error;
    /// everything else, including per-document failures, lands on the
    /// report.
    pub fn analyze(
        &self,
        documents: &[BatchDocument],
        persona: &Persona,
        job: &JobToBeDone,
    ) -> Result<AnalysisReport> {
        let result = self.run(documents, persona, job);
        if let Err(err) = &result {
            transition(BatchState::Failed);
            log::warn!("batch failed: {}", err);
        }
        result
    }

    fn run(
        &self,
        documents: &[BatchDocument],
        persona: &Persona,
        job: &JobToBeDone,
    ) -> Result<AnalysisReport> {
        transition(BatchState::Received);
        let start = Instant::now();
        let batch_deadline = start + self.options.batch_budget;

        transition(BatchState::Validating);
        self.validate(documents, persona, job)?;

        transition(BatchState::Extracting);
        let names: Vec<String> = documents.iter().map(|d| d.name.clone()).collect();
        let (outlines, errors) = self.extract_all(documents, batch_deadline);

        // The query vector is computed once and shared read-only by
        // every similarity comparison in the batch.
        transition(BatchState::Embedding);
        self.check_budget(batch_deadline, || {
            self.build_report(&names, persona, job, &outlines, &errors, start, true)
        })?;
        let query = self
            .embedder
            .embed(&format!("{}. {}", persona.0, job.0));

        transition(BatchState::Ranking);
        self.check_budget(batch_deadline, || {
            self.build_report(&names, persona, job, &outlines, &errors, start, true)
        })?;
        let sections = rank_sections(
            &outlines,
            &query,
            self.embedder.as_ref(),
            &self.options.multipliers,
            self.options.min_similarity,
        );

        transition(BatchState::Synthesizing);
        let analyses = synthesize(&sections, persona, job, self.options.top_n);

        let report = AnalysisReport {
            metadata: self.metadata(&names, persona, job, start),
            extracted_sections: sections,
            sub_section_analyses: analyses,
            document_errors: errors,
            incomplete: false,
        };

        transition(BatchState::Completed);
        log::info!(
            "batch completed: {} documents, {} sections, {} errors in {:.2}s",
            names.len(),
            report.extracted_sections.len(),
            report.document_errors.len(),
            report.metadata.processing_time_seconds
        );
        Ok(report)
    }

    fn validate(
        &self,
        documents: &[BatchDocument],
        persona: &Persona,
        job: &JobToBeDone,
    ) -> Result<()> {
        let count = documents.len();
        if !(MIN_BATCH_SIZE..=MAX_BATCH_SIZE).contains(&count) {
            return Err(Error::InvalidBatchSize(count));
        }
        if persona.0.trim().is_empty() || job.0.trim().is_empty() {
            return Err(Error::MissingPersonaInput);
        }
        Ok(())
    }

    /// Extract every document on a bounded worker pool. Failures become
    /// `DocumentError` entries; successes keep their upload order.
    fn extract_all(
        &self,
        documents: &[BatchDocument],
        batch_deadline: Instant,
    ) -> (Vec<(String, DocumentOutline)>, Vec<DocumentError>) {
        let extractor = OutlineExtractor::with_options(self.options.extract.clone());

        let extract_one = |doc: &BatchDocument| {
            let doc_deadline =
                (Instant::now() + self.options.extract.time_budget).min(batch_deadline);
            let result = extractor.extract_named(&doc.bytes, &doc.name, doc_deadline);
            (doc.name.clone(), result)
        };

        let results: Vec<(String, Result<DocumentOutline>)> = match self.worker_pool(documents.len())
        {
            Some(pool) => pool.install(|| documents.par_iter().map(extract_one).collect()),
            None => documents.iter().map(extract_one).collect(),
        };

        let mut outlines = Vec::new();
        let mut errors = Vec::new();
        for (name, result) in results {
            match result {
                Ok(outline) => outlines.push((name, outline)),
                Err(err) => {
                    log::warn!("document '{}' failed: {}", name, err);
                    errors.push(DocumentError {
                        document: name,
                        error: err.kind().to_string(),
                        detail: err.to_string(),
                    });
                }
            }
        }
        (outlines, errors)
    }

    /// Pool sized to min(documents, configured workers or machine
    /// parallelism). Falls back to the global pool if the build fails.
    fn worker_pool(&self, documents: usize) -> Option<rayon::ThreadPool> {
        let available = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let workers = self.options.workers.unwrap_or(available).min(documents).max(1);

        match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
            Ok(pool) => Some(pool),
            Err(err) => {
                log::warn!("falling back to global worker pool: {}", err);
                None
            }
        }
    }

    fn check_budget(
        &self,
        batch_deadline: Instant,
        partial: impl FnOnce() -> AnalysisReport,
    ) -> Result<()> {
        if Instant::now() > batch_deadline {
            return Err(Error::BudgetExceeded {
                budget_secs: self.options.batch_budget.as_secs_f64(),
                partial: Some(Box::new(partial())),
            });
        }
        Ok(())
    }

    /// Partial report attached to a budget overrun: whatever outlines
    /// finished, ranked and synthesized, flagged incomplete.
    #[allow(clippy::too_many_arguments)]
    fn build_report(
        &self,
        names: &[String],
        persona: &Persona,
        job: &JobToBeDone,
        outlines: &[(String, DocumentOutline)],
        errors: &[DocumentError],
        start: Instant,
        incomplete: bool,
    ) -> AnalysisReport {
        let query = self
            .embedder
            .embed(&format!("{}. {}", persona.0, job.0));
        let sections = rank_sections(
            outlines,
            &query,
            self.embedder.as_ref(),
            &self.options.multipliers,
            self.options.min_similarity,
        );
        let analyses = synthesize(&sections, persona, job, self.options.top_n);
        AnalysisReport {
            metadata: self.metadata(names, persona, job, start),
            extracted_sections: sections,
            sub_section_analyses: analyses,
            document_errors: errors.to_vec(),
            incomplete,
        }
    }

    fn metadata(
        &self,
        names: &[String],
        persona: &Persona,
        job: &JobToBeDone,
        start: Instant,
    ) -> ReportMetadata {
        ReportMetadata {
            documents: names.to_vec(),
            persona: persona.0.clone(),
            job: job.0.clone(),
            processing_time_seconds: start.elapsed().as_secs_f64(),
            timestamp: Utc::now(),
        }
    }
}

fn transition(state: BatchState) {
    log::info!("batch state: {}", state);
}
