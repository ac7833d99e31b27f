use async_trait::async_trait;

use super::{SummarizationClient, SummarizationClientError, prompts::FALLBACK_MARKER};

const MAX_FALLBACK_SENTENCES: usize = 3;

/// Network-free summarizer used when no backend credential is configured.
///
/// Keeps the first three sentences of the chunk as a bullet list under a fixed marker.
pub struct FallbackSummarizer;

impl FallbackSummarizer {
    /// Build the extractive summary for a chunk.
    pub fn summarize_chunk(chunk: &str) -> String {
        let sentences: Vec<&str> = split_sentences(chunk)
            .into_iter()
            .take(MAX_FALLBACK_SENTENCES)
            .collect();
        format!("{FALLBACK_MARKER}\n- {}", sentences.join("\n- "))
    }
}

#[async_trait]
impl SummarizationClient for FallbackSummarizer {
    async fn summarize(
        &self,
        _prompt: &str,
        chunk: &str,
    ) -> Result<String, SummarizationClientError> {
        Ok(Self::summarize_chunk(chunk))
    }

    fn provider(&self) -> &'static str {
        "fallback"
    }
}

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '؟' | '\n')
}

/// Split text into trimmed, non-empty sentences.
///
/// A break happens at a whitespace run whose preceding character is a terminator
/// (`.`, `!`, `?`, `؟`, newline). A newline inside a longer whitespace run also counts.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut previous: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((index, c)) = chars.next() {
        if !c.is_whitespace() {
            previous = Some(c);
            continue;
        }

        let run_start = index;
        let mut run_end = index + c.len_utf8();
        let mut break_at = previous.filter(|p| is_terminator(*p)).map(|_| run_start);
        let mut last = c;
        while let Some(&(next_index, next)) = chars.peek() {
            if !next.is_whitespace() {
                break;
            }
            if break_at.is_none() && last == '\n' {
                break_at = Some(next_index);
            }
            last = next;
            run_end = next_index + next.len_utf8();
            chars.next();
        }

        if let Some(cut) = break_at {
            push_trimmed(&mut sentences, &text[start..cut]);
            start = run_end;
        }
        previous = Some(last);
    }

    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, candidate: &'a str) {
    let trimmed = candidate.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed);
    }
}
