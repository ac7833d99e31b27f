//! Fixed-width windowed fan-out over the chunk sequence.
//!
//! Windows run strictly one after another; every item inside a window runs concurrently. The
//! first failure ends the run: its in-flight siblings are dropped, later windows never start,
//! and results from completed windows are discarded.

use futures_util::future::try_join_all;
use std::future::Future;
use std::sync::Arc;

use crate::summarization::{SummarizationClient, SummarizationClientError};

use super::types::Chunk;

/// Apply `f` to every item in windows of `width`, preserving input order in the output.
///
/// `width` of zero is treated as one.
pub async fn run_windows<'a, T, F, Fut, R, E>(
    items: &'a [T],
    width: usize,
    mut f: F,
) -> Result<Vec<R>, E>
where
    F: FnMut(&'a T) -> Fut,
    Fut: Future<Output = Result<R, E>>,
{
    let width = width.max(1);
    let mut results = Vec::with_capacity(items.len());
    for (window_index, window) in items.chunks(width).enumerate() {
        tracing::trace!(window = window_index, size = window.len(), "Starting window");
        let window_results = try_join_all(window.iter().map(&mut f)).await?;
        results.extend(window_results);
    }
    Ok(results)
}

/// Number of windows needed to cover `items` with the given width.
pub fn window_count(items: usize, width: usize) -> usize {
    items.div_ceil(width.max(1))
}

/// Drives a summarization client over chunks in bounded concurrency windows.
pub struct BatchScheduler {
    client: Arc<dyn SummarizationClient>,
    width: usize,
}

impl BatchScheduler {
    /// Build a scheduler over `client` with the given window width.
    pub fn new(client: Arc<dyn SummarizationClient>, width: usize) -> Self {
        Self {
            client,
            width: width.max(1),
        }
    }

    /// Name of the backend the chunks are sent to.
    pub fn provider(&self) -> &'static str {
        self.client.provider()
    }

    /// Summarize every chunk, returning one partial summary per chunk in input order.
    pub async fn run(
        &self,
        chunks: &[Chunk],
        prompt: &str,
    ) -> Result<Vec<String>, SummarizationClientError> {
        tracing::debug!(
            chunks = chunks.len(),
            width = self.width,
            windows = window_count(chunks.len(), self.width),
            provider = self.client.provider(),
            "Summarizing chunks"
        );
        let client = self.client.as_ref();
        run_windows(chunks, self.width, |chunk| async move {
            client.summarize(prompt, &chunk.text).await.inspect_err(|error| {
                tracing::warn!(chunk = chunk.index, error = %error, "Chunk summarization failed");
            })
        })
        .await
    }
}
