//! Summarization service coordinating extraction, segmentation, batching, and merging.

use crate::{
    config::Config,
    extraction::{self, RawInput},
    metrics::{MetricsSnapshot, SummaryMetrics},
    processing::{
        batch::BatchScheduler,
        chunking::segment,
        merge::merge_summaries,
        types::{SummarizeError, SummarizeInput, SummaryResult, count_words},
    },
    summarization::{
        SummarizationClient, SummarizationClientError, build_summarization_client,
        prompts::SUMMARY_PROMPT,
    },
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// Runs the full pipeline for one submission at a time.
///
/// The service owns the summarization client and metrics registry. Construct it once near
/// process start and share it through an `Arc`.
pub struct SummarizationService {
    scheduler: BatchScheduler,
    chunk_words: usize,
    max_upload_bytes: usize,
    metrics: Arc<SummaryMetrics>,
}

/// Abstraction over the pipeline used by external surfaces (HTTP, CLI).
#[async_trait]
pub trait SummarizeApi: Send + Sync {
    /// Summarize pasted text or an uploaded document.
    async fn summarize(&self, input: SummarizeInput) -> Result<SummaryResult, SummarizeError>;

    /// Retrieve the current metrics snapshot for diagnostics.
    fn metrics_snapshot(&self) -> MetricsSnapshot;

    /// Largest accepted upload in bytes.
    fn max_upload_bytes(&self) -> usize;

    /// Count a request turned away before it reached [`SummarizeApi::summarize`].
    fn record_rejection(&self);
}

impl SummarizationService {
    /// Build a service from configuration, selecting live or fallback summaries.
    pub fn new(config: &Config) -> Result<Self, SummarizationClientError> {
        let client = build_summarization_client(&config.backend())?;
        Ok(Self::with_client(client, config))
    }

    /// Build a service around an explicit summarization client.
    pub fn with_client(client: Arc<dyn SummarizationClient>, config: &Config) -> Self {
        Self {
            scheduler: BatchScheduler::new(client, config.batch_concurrency),
            chunk_words: config.chunk_words,
            max_upload_bytes: config.max_upload_bytes,
            metrics: Arc::new(SummaryMetrics::new()),
        }
    }

    /// Extract, segment, summarize, and merge a submission.
    pub async fn summarize(&self, input: SummarizeInput) -> Result<SummaryResult, SummarizeError> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("summarize", %request_id);
        let outcome = self.run_pipeline(input).instrument(span.clone()).await;

        span.in_scope(|| match &outcome {
            Ok(result) => tracing::info!(
                words = result.word_count,
                bullets = result.bullets.len(),
                processing_time_ms = result.processing_time_ms,
                "Summary completed"
            ),
            Err(error) if error.status_code().is_client_error() => {
                self.metrics.record_rejection();
                tracing::warn!(error = %error, "Summary request rejected");
            }
            Err(error) => {
                self.metrics.record_failure();
                tracing::error!(error = %error, "Summary request failed");
            }
        });
        outcome
    }

    async fn run_pipeline(&self, input: SummarizeInput) -> Result<SummaryResult, SummarizeError> {
        let raw = input.into_raw_input()?;
        let started = Instant::now();

        if let RawInput::File(file) = &raw {
            tracing::info!(file_name = %file.file_name, bytes = file.bytes.len(), "Processing upload");
        } else {
            tracing::info!("Processing pasted text");
        }

        let extracted = extraction::extract(raw, self.max_upload_bytes).await?;
        let text = extracted.trim();
        if text.is_empty() {
            return Err(SummarizeError::EmptyContent);
        }
        let word_count = count_words(text);

        let chunks = segment(text, self.chunk_words)?;
        tracing::debug!(words = word_count, chunks = chunks.len(), "Segmented document");

        let parts = self.scheduler.run(&chunks, SUMMARY_PROMPT).await?;
        let merged = merge_summaries(&parts);

        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.metrics.record_success(chunks.len() as u64, elapsed_ms);
        Ok(SummaryResult::from_merged(merged, word_count, elapsed_ms))
    }

    /// Backend in use: `"chat-completions"` or `"fallback"`.
    pub fn provider(&self) -> &'static str {
        self.scheduler.provider()
    }

    /// Current metrics counters.
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

#[async_trait]
impl SummarizeApi for SummarizationService {
    async fn summarize(&self, input: SummarizeInput) -> Result<SummaryResult, SummarizeError> {
        SummarizationService::summarize(self, input).await
    }

    fn metrics_snapshot(&self) -> MetricsSnapshot {
        SummarizationService::metrics_snapshot(self)
    }

    fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    fn record_rejection(&self) {
        self.metrics.record_rejection();
    }
}
