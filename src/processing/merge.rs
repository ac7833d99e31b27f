//! Merging of per-chunk summaries into one bullet list.

use super::types::MergedSummary;

/// Fixed title of every summary ("Document Summary").
pub const DOCUMENT_TITLE: &str = "ملخص المستند";

/// Upper bound on bullets kept from the partial summaries.
pub const MAX_BULLETS: usize = 15;

/// Merge per-chunk summaries into the final outline.
///
/// Parts are joined with a blank line and the first fifteen non-empty trimmed lines become the
/// bullets. Outline and keywords are not parsed out of model responses and stay empty.
pub fn merge_summaries(parts: &[String]) -> MergedSummary {
    let joined = parts.join("\n\n");
    let bullets = joined
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(MAX_BULLETS)
        .map(str::to_string)
        .collect();

    MergedSummary {
        title: DOCUMENT_TITLE.to_string(),
        outline: Vec::new(),
        bullets,
        keywords: Vec::new(),
    }
}
