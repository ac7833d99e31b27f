//! Fixed Arabic prompt template and labels.

/// System instruction sent with every completion request.
pub const SYSTEM_INSTRUCTION: &str = "أنت مساعد يلخص نصوصاً بالعربية بشكل منظم. أعد: عنوان موجز، عناوين فرعية مختصرة، نقاط رئيسية، وكلمات مفتاحية.";

/// Instruction prompt prepended to every chunk.
pub const SUMMARY_PROMPT: &str = "لخّص النص التالي بالعربية في صيغة منظمة: عنوان موجز، عناوين فرعية، نقاط رئيسية قصيرة، وكلمات مفتاحية عربية. لا تكرر النص حرفياً.";

/// Label introducing the chunk text inside the user message.
pub const TEXT_LABEL: &str = "النص:";

/// Heading of summaries produced without a model.
pub const FALLBACK_MARKER: &str = "ملخص تجريبي (بدون نموذج):";

/// Compose the user message for one chunk.
pub fn user_message(prompt: &str, chunk: &str) -> String {
    format!("{prompt}\n\n{TEXT_LABEL}\n{chunk}")
}
