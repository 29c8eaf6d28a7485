//! Key-term extraction from section content.
//!
//! A heuristic scan for salient terms, not a markdown-aware extractor: it
//! does not handle nested emphasis, escaped markers, or code fences.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Bold spans: `**term**` or `__term__`.
static BOLD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*|__([^_]+)__").unwrap());

/// Inline code spans: `` `term` ``.
static CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new("`([^`]+)`").unwrap());

/// At most this many terms are kept per section.
const MAX_TERMS: usize = 5;

/// Bold terms at or above this many characters are discarded.
const MAX_BOLD_LEN: usize = 50;

/// Code terms at or above this many characters are discarded.
const MAX_CODE_LEN: usize = 40;

/// Only this many code spans are examined per section, guarding against
/// pathological inputs full of stray backticks.
const MAX_CODE_MATCHES: usize = 10;

/// Extracts up to 5 key terms from a block of text.
///
/// Bold spans are collected first, then inline code spans (first 10
/// matches only), each in left-to-right order. Terms are trimmed,
/// deduplicated case-sensitively, and dropped when empty or too long.
pub fn extract_key_terms(content: &str) -> Vec<String> {
    let mut terms = Vec::new();
    let mut seen = HashSet::new();

    for caps in BOLD_RE.captures_iter(content) {
        // The alternation binds either group 1 (**) or group 2 (__).
        let raw = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
        record(raw, MAX_BOLD_LEN, &mut terms, &mut seen);
    }

    for caps in CODE_RE.captures_iter(content).take(MAX_CODE_MATCHES) {
        record(&caps[1], MAX_CODE_LEN, &mut terms, &mut seen);
    }

    terms.truncate(MAX_TERMS);
    terms
}

/// Records a candidate term unless it is empty, too long, or already seen.
fn record(raw: &str, max_len: usize, terms: &mut Vec<String>, seen: &mut HashSet<String>) {
    let term = raw.trim();
    if term.is_empty() || term.chars().count() >= max_len {
        return;
    }
    if seen.insert(term.to_string()) {
        terms.push(term.to_string());
    }
}
