//! Binary signature checks for supported document formats.

use std::io::Cursor;
use zip::ZipArchive;

const PDF_MAGIC: &[u8] = b"%PDF-";
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const DOCX_MAIN_PART: &str = "word/document.xml";

/// Whether the payload starts with the PDF header.
pub fn looks_like_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(PDF_MAGIC)
}

/// Whether the payload is a ZIP container holding a word-processing main part.
pub fn looks_like_docx(bytes: &[u8]) -> bool {
    if !bytes.starts_with(ZIP_MAGIC) {
        return false;
    }
    match ZipArchive::new(Cursor::new(bytes)) {
        Ok(mut archive) => archive.by_name(DOCX_MAIN_PART).is_ok(),
        Err(error) => {
            tracing::trace!(error = %error, "ZIP signature present but archive unreadable");
            false
        }
    }
}
