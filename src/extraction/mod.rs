//! Text extraction for uploaded documents.
//!
//! Uploads are resolved once into a [`DocumentKind`] using the filename extension and the
//! binary signature (either is sufficient), then dispatched to the matching [`TextExtractor`].
//! PDF and DOCX parsing is CPU-bound and runs on Tokio's blocking pool.

mod docx;
mod sniff;

use async_trait::async_trait;
use thiserror::Error;

pub use sniff::{looks_like_docx, looks_like_pdf};

/// Errors produced while turning an uploaded payload into plain text.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Payload exceeds the configured upload ceiling.
    #[error("file is {size} bytes, larger than the {limit} byte limit")]
    TooLarge {
        /// Size of the rejected payload.
        size: usize,
        /// Configured ceiling.
        limit: usize,
    },
    /// Neither the extension nor the signature identify a supported format.
    #[error("unsupported file type for '{file_name}'; upload a PDF, DOCX, or TXT file")]
    UnsupportedFileType {
        /// Name supplied with the upload.
        file_name: String,
    },
    /// PDF parser rejected the document.
    #[error("failed to extract PDF text: {0}")]
    Pdf(String),
    /// DOCX container or XML could not be read.
    #[error("failed to extract DOCX text: {0}")]
    Docx(String),
    /// Blocking extraction task panicked or was cancelled.
    #[error("extraction task failed: {0}")]
    Task(String),
}

/// File payload received from a caller.
#[derive(Debug, Clone, Default)]
pub struct UploadedFile {
    /// Declared filename, used for extension matching.
    pub file_name: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Create an upload from a name and its contents.
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Whether the upload carries anything at all; browsers post an empty unnamed part for an
    /// untouched file input.
    pub fn is_present(&self) -> bool {
        !self.file_name.trim().is_empty() || !self.bytes.is_empty()
    }
}

/// Validated pipeline input: exactly one of pasted text or an uploaded file.
#[derive(Debug, Clone)]
pub enum RawInput {
    /// Already-decoded text.
    Text(String),
    /// Binary upload that still needs extraction.
    File(UploadedFile),
}

/// Document formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// UTF-8 plain text.
    Text,
    /// Portable Document Format.
    Pdf,
    /// Office Open XML word-processing document.
    Docx,
}

impl DocumentKind {
    /// Resolve the format of an upload.
    ///
    /// A `.txt` extension wins outright. PDF and DOCX match on either their extension or their
    /// binary signature.
    pub fn resolve(file_name: &str, bytes: &[u8]) -> Option<Self> {
        let name = file_name.trim().to_lowercase();
        if name.ends_with(".txt") {
            return Some(Self::Text);
        }
        if name.ends_with(".pdf") || looks_like_pdf(bytes) {
            return Some(Self::Pdf);
        }
        if name.ends_with(".docx") || looks_like_docx(bytes) {
            return Some(Self::Docx);
        }
        None
    }

    /// Short label used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }
}

/// Interface implemented by per-format extractors.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Convert the raw bytes into plain text.
    async fn extract(&self, bytes: Vec<u8>) -> Result<String, ExtractionError>;
}

/// Decodes UTF-8 text, replacing invalid sequences and dropping a leading byte-order mark.
pub struct PlainTextExtractor;

const UTF8_BOM: char = '\u{FEFF}';

#[async_trait]
impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, bytes: Vec<u8>) -> Result<String, ExtractionError> {
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(error) => String::from_utf8_lossy(error.as_bytes()).into_owned(),
        };
        Ok(text
            .strip_prefix(UTF8_BOM)
            .map(str::to_string)
            .unwrap_or(text))
    }
}

/// Extracts the text layer of a PDF via `pdf-extract`.
pub struct PdfExtractor;

#[async_trait]
impl TextExtractor for PdfExtractor {
    async fn extract(&self, bytes: Vec<u8>) -> Result<String, ExtractionError> {
        tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes)
                .map_err(|error| ExtractionError::Pdf(error.to_string()))
        })
        .await
        .map_err(|error| ExtractionError::Task(error.to_string()))?
    }
}

/// Extracts raw paragraph text from a DOCX container.
pub struct DocxExtractor;

#[async_trait]
impl TextExtractor for DocxExtractor {
    async fn extract(&self, bytes: Vec<u8>) -> Result<String, ExtractionError> {
        tokio::task::spawn_blocking(move || docx::extract_docx_text(&bytes))
            .await
            .map_err(|error| ExtractionError::Task(error.to_string()))?
    }
}

/// Return the extractor responsible for a document kind.
pub fn extractor_for(kind: DocumentKind) -> Box<dyn TextExtractor> {
    match kind {
        DocumentKind::Text => Box::new(PlainTextExtractor),
        DocumentKind::Pdf => Box::new(PdfExtractor),
        DocumentKind::Docx => Box::new(DocxExtractor),
    }
}

/// Produce plain text for a validated input, enforcing the upload ceiling for files.
///
/// Text input is returned unchanged. The caller is responsible for trimming and rejecting empty
/// results.
pub async fn extract(input: RawInput, max_bytes: usize) -> Result<String, ExtractionError> {
    let file = match input {
        RawInput::Text(text) => return Ok(text),
        RawInput::File(file) => file,
    };

    let size = file.bytes.len();
    if size > max_bytes {
        return Err(ExtractionError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let kind = DocumentKind::resolve(&file.file_name, &file.bytes).ok_or_else(|| {
        ExtractionError::UnsupportedFileType {
            file_name: file.file_name.clone(),
        }
    })?;
    tracing::debug!(
        file_name = %file.file_name,
        kind = kind.as_str(),
        bytes = size,
        "Extracting document text"
    );

    extractor_for(kind).extract(file.bytes).await
}
