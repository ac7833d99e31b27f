//! Word-bounded chunk segmentation.
//!
//! Text is tokenized on runs of whitespace and regrouped into consecutive windows of
//! `words_per_chunk` tokens. Each chunk re-joins its tokens with single spaces, so the
//! concatenated chunk tokens always reproduce the original token sequence.

use super::types::{Chunk, ChunkingError};

/// Split text into ordered chunks of at most `words_per_chunk` words.
///
/// Returns an empty vector when the input text is all whitespace.
pub fn segment(text: &str, words_per_chunk: usize) -> Result<Vec<Chunk>, ChunkingError> {
    if words_per_chunk == 0 {
        return Err(ChunkingError::InvalidChunkSize);
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    let chunks = words
        .chunks(words_per_chunk)
        .enumerate()
        .map(|(index, window)| Chunk {
            index,
            text: window.join(" "),
        })
        .collect::<Vec<_>>();

    tracing::trace!(
        words = words.len(),
        words_per_chunk,
        chunks = chunks.len(),
        "Segmented text"
    );
    Ok(chunks)
}
