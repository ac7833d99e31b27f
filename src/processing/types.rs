//! Core data types and error definitions for the summarization pipeline.

use crate::extraction::{ExtractionError, RawInput, UploadedFile};
use crate::summarization::SummarizationClientError;
use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

/// Errors produced while segmenting text into chunks.
#[derive(Debug, Error)]
pub enum ChunkingError {
    /// Configured word budget is impossible.
    #[error("chunk size must be greater than zero")]
    InvalidChunkSize,
}

/// Errors emitted by the summarization pipeline.
#[derive(Debug, Error)]
pub enum SummarizeError {
    /// Neither usable text nor a file was submitted.
    #[error("please upload a file or paste some text")]
    NoInputProvided,
    /// Uploaded file exceeds the configured ceiling.
    #[error("file exceeds the maximum allowed size of {limit} bytes")]
    PayloadTooLarge {
        /// Configured ceiling in bytes.
        limit: usize,
    },
    /// Whole multipart body exceeds the router's limit, whatever field caused it.
    #[error("request body exceeds the maximum allowed size of {limit} bytes")]
    BodyTooLarge {
        /// Body limit in bytes.
        limit: usize,
    },
    /// Uploaded file is not a PDF, DOCX, or TXT document.
    #[error("unsupported file type '{0}'; please upload a PDF, DOCX, or TXT file")]
    UnsupportedFileType(String),
    /// Extraction produced no text.
    #[error("could not extract any text from the input")]
    EmptyContent,
    /// Multipart submission could not be read.
    #[error("malformed request: {0}")]
    MalformedRequest(String),
    /// Chunking step rejected the configured budget.
    #[error("Failed to chunk document: {0}")]
    Chunking(#[from] ChunkingError),
    /// Summarization backend failed for one of the chunks.
    #[error("{0}")]
    Backend(#[from] SummarizationClientError),
    /// Anything else, including unreadable PDF or DOCX files.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl SummarizeError {
    /// HTTP status used when reporting this error to a caller.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NoInputProvided
            | Self::PayloadTooLarge { .. }
            | Self::BodyTooLarge { .. }
            | Self::UnsupportedFileType(_)
            | Self::EmptyContent
            | Self::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            Self::Chunking(_) | Self::Backend(_) | Self::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<ExtractionError> for SummarizeError {
    fn from(error: ExtractionError) -> Self {
        match error {
            ExtractionError::TooLarge { limit, .. } => Self::PayloadTooLarge { limit },
            ExtractionError::UnsupportedFileType { file_name } => {
                Self::UnsupportedFileType(file_name)
            }
            other => Self::Unexpected(other.to_string()),
        }
    }
}

/// Unvalidated submission as received from a caller.
#[derive(Debug, Clone, Default)]
pub struct SummarizeInput {
    /// Pasted text, if any.
    pub text: Option<String>,
    /// Uploaded file, if any.
    pub file: Option<UploadedFile>,
}

impl SummarizeInput {
    /// Submission consisting of pasted text only.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            file: None,
        }
    }

    /// Submission consisting of an uploaded file only.
    pub fn from_file(file: UploadedFile) -> Self {
        Self {
            text: None,
            file: Some(file),
        }
    }

    /// Pick the input to summarize: non-blank text first, then a present file.
    pub fn into_raw_input(self) -> Result<RawInput, SummarizeError> {
        if let Some(text) = self.text {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                return Ok(RawInput::Text(trimmed.to_string()));
            }
        }
        match self.file {
            Some(file) if file.is_present() => Ok(RawInput::File(file)),
            _ => Err(SummarizeError::NoInputProvided),
        }
    }
}

/// Contiguous slice of the document's word sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Position of the chunk within the document.
    pub index: usize,
    /// Words of the chunk joined by single spaces.
    pub text: String,
}

impl Chunk {
    /// Number of whitespace-separated words in the chunk.
    pub fn word_count(&self) -> usize {
        count_words(&self.text)
    }
}

/// Title, outline, bullets, and keywords derived from the partial summaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedSummary {
    /// Fixed document title.
    pub title: String,
    /// Sub-headings; not derived yet and always empty.
    pub outline: Vec<String>,
    /// Leading non-empty lines across all partial summaries.
    pub bullets: Vec<String>,
    /// Keywords; not derived yet and always empty.
    pub keywords: Vec<String>,
}

/// Final structured output returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryResult {
    /// Document title.
    pub title: String,
    /// Sub-headings (currently always empty).
    pub outline: Vec<String>,
    /// Bullet points, at most fifteen.
    pub bullets: Vec<String>,
    /// Keywords (currently always empty).
    pub keywords: Vec<String>,
    /// Word count of the extracted text.
    pub word_count: usize,
    /// Wall-clock duration of the pipeline in milliseconds.
    pub processing_time_ms: u64,
}

impl SummaryResult {
    /// Attach request metadata to a merged summary.
    pub fn from_merged(merged: MergedSummary, word_count: usize, processing_time_ms: u64) -> Self {
        let MergedSummary {
            title,
            outline,
            bullets,
            keywords,
        } = merged;
        Self {
            title,
            outline,
            bullets,
            keywords,
            word_count,
            processing_time_ms,
        }
    }
}

/// Count whitespace-separated words.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_takes_precedence_over_file() {
        let input = SummarizeInput {
            text: Some("  pasted  ".into()),
            file: Some(UploadedFile::new("a.txt", b"file".to_vec())),
        };
        assert!(matches!(input.into_raw_input(), Ok(RawInput::Text(text)) if text == "pasted"));
    }

    #[test]
    fn blank_text_falls_back_to_file() {
        let input = SummarizeInput {
            text: Some("   ".into()),
            file: Some(UploadedFile::new("a.txt", b"file".to_vec())),
        };
        assert!(matches!(input.into_raw_input(), Ok(RawInput::File(_))));
    }

    #[test]
    fn nothing_usable_is_rejected() {
        let input = SummarizeInput {
            text: Some(" ".into()),
            file: Some(UploadedFile::default()),
        };
        assert!(matches!(
            input.into_raw_input(),
            Err(SummarizeError::NoInputProvided)
        ));
        assert!(matches!(
            SummarizeInput::default().into_raw_input(),
            Err(SummarizeError::NoInputProvided)
        ));
    }

    #[test]
    fn extraction_errors_map_to_taxonomy() {
        let too_large: SummarizeError = ExtractionError::TooLarge { size: 5, limit: 4 }.into();
        assert!(matches!(too_large, SummarizeError::PayloadTooLarge { limit: 4 }));
        assert_eq!(too_large.status_code(), StatusCode::BAD_REQUEST);

        let pdf: SummarizeError = ExtractionError::Pdf("bad xref".into()).into();
        assert!(matches!(pdf, SummarizeError::Unexpected(_)));
        assert_eq!(pdf.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn backend_errors_are_server_errors() {
        let error = SummarizeError::from(SummarizationClientError::InvalidResponse("x".into()));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            SummarizeError::EmptyContent.status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
