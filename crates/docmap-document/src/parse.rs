//! Markdown structural parsing.
//!
//! A line-by-line scan recognizing ATX headings and `[text](target.md)`
//! links. Parsing is total: malformed or empty input degrades to fewer or
//! no sections, never an error.

use std::{fs, path::Path};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    Document, DocumentError, Reference, Section, build_tree, estimate_tokens, extract_key_terms,
    own_token_sum,
};

/// ATX headings: one to six `#` at line start, then whitespace, then the
/// title.
static HEADING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap());

/// Inline links to markdown files: `[text](path.md)` or
/// `[text](path.md#anchor)`.
static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+\.md(?:#[^)]*)?)\)").unwrap());

/// Parses markdown content into a [`Document`].
///
/// Lines before the first heading are discarded (no implicit preamble
/// section), but references found anywhere are collected. A document with
/// no headings yields an empty section forest and zero total tokens.
pub fn parse_markdown(content: &str) -> Document {
    let lines: Vec<&str> = content.split('\n').collect();

    let mut references = Vec::new();
    let mut flat: Vec<Section> = Vec::new();
    let mut buffer = String::new();

    for (index, line) in lines.iter().enumerate() {
        let line_number = index + 1;

        for caps in LINK_RE.captures_iter(line) {
            let target = &caps[2];
            // Strip any anchor suffix from the target.
            let target = match target.find('#') {
                Some(hash) => &target[..hash],
                None => target,
            };
            references.push(Reference {
                text: caps[1].to_string(),
                target: target.to_string(),
                line: line_number,
            });
        }

        if let Some(caps) = HEADING_RE.captures(line) {
            if let Some(open) = flat.last_mut() {
                finalize(open, &mut buffer, line_number - 1);
            }
            let mut section = Section::new(caps[1].len() as u8, caps[2].trim());
            section.line_start = line_number;
            flat.push(section);
        } else if !flat.is_empty() {
            buffer.push_str(line);
            buffer.push('\n');
        }
    }

    if let Some(open) = flat.last_mut() {
        finalize(open, &mut buffer, lines.len());
    }

    let total_tokens = own_token_sum(&flat);
    let sections = build_tree(flat);

    Document {
        filename: String::new(),
        total_tokens,
        sections,
        references,
    }
}

/// Closes the currently open section: trims its accumulated content,
/// computes the own-token estimate and key terms, and records `line_end`.
fn finalize(section: &mut Section, buffer: &mut String, line_end: usize) {
    section.content = buffer.trim().to_string();
    section.tokens = estimate_tokens(&section.content);
    section.key_terms = extract_key_terms(&section.content);
    section.line_end = line_end;
    buffer.clear();
}

/// Reads and parses a markdown file from disk.
///
/// The document's `filename` is left empty; callers assign their own
/// label (typically a path relative to the scan root).
pub fn parse_file(path: &Path) -> Result<Document, DocumentError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown") => {}
        _ => {
            return Err(DocumentError::UnsupportedFileType {
                path: path.to_path_buf(),
            });
        }
    }

    let content = fs::read_to_string(path).map_err(|source| DocumentError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(parse_markdown(&content))
}
