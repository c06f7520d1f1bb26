//! Analysis orchestrator.
//!
//! Drives one request through the pipeline:
//! gate → extract → segment → classify → resolve → report.
//!
//! Extraction and classification sit behind traits, so the processor is
//! testable with stub engines. Segments are produced lazily and processed
//! one at a time; the caller may cancel between any two segments.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::pipeline::cancel::CancelFlag;
use crate::pipeline::classify::{
    ClassifierEnsemble, ClassifierModels, ConsensusResolver, ResolvedSegment,
};
use crate::pipeline::extraction::{ExtractionError, ExtractionMethod, ExtractionResult, TextExtractor};
use crate::pipeline::ingest::{IngestError, IngestionGate, Upload};
use crate::pipeline::report::{Report, ReportBuilder};
use crate::pipeline::segmentation::{
    SegmentationConfig, SegmentationError, SegmentationStrategy, Segmenter, Segments,
};

pub const DEFAULT_MAX_SEGMENTS: usize = 20_000;
pub const DEFAULT_MAX_RUN_DURATION: Duration = Duration::from_secs(120);

/// Stand-in deadline when `max_duration` is too large to add to a clock.
const FAR_DEADLINE: Duration = Duration::from_secs(24 * 60 * 60);

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("Corrupt document: {0}")]
    CorruptDocument(String),

    #[error("No text could be extracted from the document")]
    ExtractionEmpty,

    #[error("Analysis cancelled")]
    Cancelled,

    #[error("Run budget exceeded: {0}")]
    BudgetExceeded(String),

    #[error(transparent)]
    Segmentation(#[from] SegmentationError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ExtractionError> for AnalysisError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::PdfParsing(msg) => Self::CorruptDocument(msg),
            // OCR trouble means there is no text to analyse.
            ExtractionError::Ocr(_) => Self::ExtractionEmpty,
        }
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// What the caller learns about the uploaded file.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummary {
    pub filename: String,
    pub size_bytes: u64,
    pub content_hash: String,
    pub has_text_layer: bool,
    pub page_count: usize,
    pub extraction_method: ExtractionMethod,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutcome {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub document: DocumentSummary,
    pub strategy: SegmentationStrategy,
    pub group_size: usize,
    pub report: Report,
    /// `report` in its plain-text layout.
    pub rendered: String,
}

/// Per-run resource budgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunLimits {
    pub max_segments: usize,
    pub max_duration: Duration,
}

impl Default for RunLimits {
    fn default() -> Self {
        Self {
            max_segments: DEFAULT_MAX_SEGMENTS,
            max_duration: DEFAULT_MAX_RUN_DURATION,
        }
    }
}

/// An accepted, extracted document ready for segmentation. The staged
/// upload has already been released.
#[derive(Debug)]
pub struct PreparedDocument {
    pub summary: DocumentSummary,
    pub extraction: ExtractionResult,
    /// When the upload entered the pipeline; the run budget counts from here.
    pub received_at: Instant,
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

pub struct AnalysisPipeline {
    gate: IngestionGate,
    extractor: Arc<dyn TextExtractor + Send + Sync>,
    ensemble: ClassifierEnsemble,
    resolver: ConsensusResolver,
    segmentation: SegmentationConfig,
    limits: RunLimits,
}

impl AnalysisPipeline {
    pub fn new(
        gate: IngestionGate,
        extractor: Arc<dyn TextExtractor + Send + Sync>,
        models: &ClassifierModels,
        classifier_timeout: Duration,
    ) -> Self {
        Self {
            gate,
            extractor,
            ensemble: models.ensemble(classifier_timeout),
            resolver: models.resolver(),
            segmentation: SegmentationConfig::default(),
            limits: RunLimits::default(),
        }
    }

    /// Segmentation used when a request does not choose its own.
    pub fn with_segmentation(mut self, segmentation: SegmentationConfig) -> Self {
        self.segmentation = segmentation;
        self
    }

    pub fn with_limits(mut self, limits: RunLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn gate(&self) -> &IngestionGate {
        &self.gate
    }

    pub fn default_segmentation(&self) -> SegmentationConfig {
        self.segmentation
    }

    pub fn classifier_ids(&self) -> Vec<String> {
        self.ensemble.ids()
    }

    /// Full pipeline for one upload.
    pub async fn analyze(
        &self,
        upload: Upload,
        segmentation: Option<SegmentationConfig>,
        cancel: &CancelFlag,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        let prepared = self.prepare(upload).await?;
        if cancel.is_cancelled() {
            return Err(AnalysisError::Cancelled);
        }
        self.run(&prepared, segmentation, cancel).complete().await
    }

    /// Gate and extract. No parser sees the bytes unless the gate accepts
    /// them. On success the staged copy is released before this returns.
    ///
    /// Both blocking steps count against `max_duration`. On expiry the
    /// request fails with `BudgetExceeded`; the detached task still drops
    /// its staged copy when it finishes.
    pub async fn prepare(&self, upload: Upload) -> Result<PreparedDocument, AnalysisError> {
        let received_at = Instant::now();
        let deadline = tokio::time::Instant::from_std(received_at)
            .checked_add(self.limits.max_duration)
            .unwrap_or_else(|| tokio::time::Instant::from_std(received_at) + FAR_DEADLINE);

        let gate = self.gate.clone();
        let gate_task = tokio::task::spawn_blocking(move || gate.admit(upload));
        let accepted = tokio::time::timeout_at(deadline, gate_task)
            .await
            .map_err(|_| self.duration_exceeded("ingestion"))?
            .map_err(|e| AnalysisError::Internal(format!("gate task failed: {e}")))??;

        let extractor = Arc::clone(&self.extractor);
        let content_hash = accepted.content_hash().to_string();
        let extract_task = tokio::task::spawn_blocking(move || {
            let extraction = extractor.extract(&accepted)?;
            let summary = DocumentSummary {
                filename: accepted.filename().to_string(),
                size_bytes: accepted.size(),
                content_hash: accepted.content_hash().to_string(),
                has_text_layer: extraction.has_text_layer,
                page_count: extraction.page_count(),
                extraction_method: extraction.method,
            };
            Ok::<_, ExtractionError>((summary, extraction))
        });
        let (summary, extraction) = tokio::time::timeout_at(deadline, extract_task)
            .await
            .map_err(|_| {
                tracing::warn!(content_hash = %content_hash, "Text extraction overran the run budget");
                self.duration_exceeded("text extraction")
            })?
            .map_err(|e| {
                tracing::warn!(content_hash = %content_hash, "Extractor aborted: {e}");
                AnalysisError::CorruptDocument("text extraction aborted".to_string())
            })??;

        if extraction.is_empty() {
            tracing::warn!(
                content_hash = %summary.content_hash,
                method = ?extraction.method,
                "No extractable text"
            );
            return Err(AnalysisError::ExtractionEmpty);
        }

        Ok(PreparedDocument {
            summary,
            extraction,
            received_at,
        })
    }

    fn duration_exceeded(&self, stage: &str) -> AnalysisError {
        AnalysisError::BudgetExceeded(format!(
            "run exceeded {} ms during {stage}",
            self.limits.max_duration.as_millis()
        ))
    }

    /// Start a caller-driven run over a prepared document.
    pub fn run<'a>(
        &'a self,
        prepared: &'a PreparedDocument,
        segmentation: Option<SegmentationConfig>,
        cancel: &CancelFlag,
    ) -> AnalysisRun<'a> {
        let config = segmentation.unwrap_or(self.segmentation);
        tracing::info!(
            content_hash = %prepared.summary.content_hash,
            strategy = %config.strategy(),
            group_size = config.group_size(),
            "Starting analysis run"
        );

        AnalysisRun {
            pipeline: self,
            prepared,
            config,
            segments: Segmenter::new(config).segments(&prepared.extraction.full_text),
            cancel: cancel.clone(),
            started: prepared.received_at,
            report: ReportBuilder::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// One in-flight analysis. Pull results with [`AnalysisRun::next_result`];
/// dropping the run discards everything produced so far.
pub struct AnalysisRun<'a> {
    pipeline: &'a AnalysisPipeline,
    prepared: &'a PreparedDocument,
    config: SegmentationConfig,
    segments: Segments<'a>,
    cancel: CancelFlag,
    started: Instant,
    report: ReportBuilder,
}

impl AnalysisRun<'_> {
    /// Fraction of the text segmented so far.
    pub fn progress(&self) -> f64 {
        self.segments.progress()
    }

    pub fn processed(&self) -> usize {
        self.report.len()
    }

    /// Classify and resolve the next segment. `Ok(None)` when the text is
    /// exhausted.
    pub async fn next_result(&mut self) -> Result<Option<ResolvedSegment>, AnalysisError> {
        if self.cancel.is_cancelled() {
            tracing::info!(processed = self.processed(), "Analysis cancelled");
            return Err(AnalysisError::Cancelled);
        }

        let limits = self.pipeline.limits;
        if self.started.elapsed() > limits.max_duration {
            return Err(self.pipeline.duration_exceeded("classification"));
        }

        let Some(segment) = self.segments.next() else {
            return Ok(None);
        };
        if self.report.len() >= limits.max_segments {
            return Err(AnalysisError::BudgetExceeded(format!(
                "document has more than {} segments",
                limits.max_segments
            )));
        }

        let votes = self.pipeline.ensemble.vote(&segment).await;
        let consensus = self.pipeline.resolver.resolve(segment.index, &votes);
        tracing::debug!(
            segment_index = segment.index,
            label = %consensus.label,
            confidence = consensus.confidence.value(),
            "Segment resolved"
        );

        let resolved = ResolvedSegment {
            segment,
            votes,
            consensus,
        };
        self.report.push(&resolved);
        Ok(Some(resolved))
    }

    /// Drain the remaining segments and build the outcome.
    pub async fn complete(mut self) -> Result<AnalysisOutcome, AnalysisError> {
        while self.next_result().await?.is_some() {}

        if self.report.is_empty() {
            tracing::warn!(
                content_hash = %self.prepared.summary.content_hash,
                "Text produced no segments"
            );
            return Err(AnalysisError::ExtractionEmpty);
        }

        let report = self.report.finish();
        tracing::info!(
            content_hash = %self.prepared.summary.content_hash,
            segments = report.total_segments,
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            "Analysis complete"
        );

        Ok(AnalysisOutcome {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            document: self.prepared.summary.clone(),
            strategy: self.config.strategy(),
            group_size: self.config.group_size(),
            rendered: report.render(),
            report,
        })
    }
}
