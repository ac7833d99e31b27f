use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide counters for the summarization pipeline.
///
/// Requests end in exactly one of three buckets: summarized, rejected (the caller sent something
/// unusable), or failed (the backend or the server broke).
#[derive(Default)]
pub struct SummaryMetrics {
    documents_summarized: AtomicU64,
    chunks_summarized: AtomicU64,
    rejected_requests: AtomicU64,
    failed_requests: AtomicU64,
    processing_ms_total: AtomicU64,
}

impl SummaryMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished summary with its chunk count and pipeline duration.
    pub fn record_success(&self, chunk_count: u64, elapsed_ms: u64) {
        self.documents_summarized.fetch_add(1, Ordering::Relaxed);
        self.chunks_summarized
            .fetch_add(chunk_count, Ordering::Relaxed);
        self.processing_ms_total
            .fetch_add(elapsed_ms, Ordering::Relaxed);
    }

    /// Record a request turned away for bad input.
    pub fn record_rejection(&self) {
        self.rejected_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a request that failed after its input was accepted.
    pub fn record_failure(&self) {
        self.failed_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let documents = self.documents_summarized.load(Ordering::Relaxed);
        let total_ms = self.processing_ms_total.load(Ordering::Relaxed);
        MetricsSnapshot {
            documents_summarized: documents,
            chunks_summarized: self.chunks_summarized.load(Ordering::Relaxed),
            rejected_requests: self.rejected_requests.load(Ordering::Relaxed),
            failed_requests: self.failed_requests.load(Ordering::Relaxed),
            average_processing_ms: total_ms.checked_div(documents),
        }
    }
}

/// Immutable view of summarization counters, serialized as the `/metrics` body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    /// Number of documents summarized since startup.
    pub documents_summarized: u64,
    /// Total chunk count summarized across all documents.
    pub chunks_summarized: u64,
    /// Requests answered with a 4xx status.
    pub rejected_requests: u64,
    /// Requests answered with a 5xx status.
    pub failed_requests: u64,
    /// Mean pipeline duration of successful requests; `None` before the first one.
    pub average_processing_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcomes_land_in_separate_buckets() {
        let metrics = SummaryMetrics::new();
        metrics.record_success(2, 30);
        metrics.record_success(3, 10);
        metrics.record_rejection();
        metrics.record_failure();
        metrics.record_failure();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.documents_summarized, 2);
        assert_eq!(snapshot.chunks_summarized, 5);
        assert_eq!(snapshot.rejected_requests, 1);
        assert_eq!(snapshot.failed_requests, 2);
        assert_eq!(snapshot.average_processing_ms, Some(20));
    }

    #[test]
    fn average_is_absent_until_first_success() {
        let metrics = SummaryMetrics::new();
        metrics.record_rejection();
        assert_eq!(metrics.snapshot().average_processing_ms, None);
        assert_eq!(metrics.snapshot().documents_summarized, 0);
    }
}
