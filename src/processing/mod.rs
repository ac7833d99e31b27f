//! Document summarization pipeline: segmentation, windowed summarization, and merging.

pub mod batch;
pub mod chunking;
pub mod merge;
mod service;
pub mod types;

pub use service::{SummarizationService, SummarizeApi};
pub use types::{
    Chunk, ChunkingError, MergedSummary, SummarizeError, SummarizeInput, SummaryResult,
};
