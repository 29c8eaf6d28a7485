//! Coarse token estimation.

/// Estimates the token count of a piece of text as `char_count / 4`.
///
/// This is a rough proxy for LLM tokenizers, not a real one; consistency
/// across calls matters more than precision. Total and deterministic:
/// never fails, returns zero for empty input.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4
}
