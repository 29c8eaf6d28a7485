//! Document structure derivation for docmap.
//!
//! This crate turns raw markdown text into a `Document`: a forest of
//! token-annotated `Section` trees plus the cross-document references found
//! along the way. It supports:
//! - ATX (`#`) heading recognition with stack-based tree reconstruction
//! - Coarse token estimation (~4 chars per token) with cumulative rollup
//! - Key-term extraction from bold and inline-code spans
//! - Discovery of `[text](target.md)` links as cross-document references
//!
//! Only ATX headings and one narrow link syntax are recognized. This is a
//! fixed, documented grammar, not an attempt at CommonMark compliance.

#![warn(missing_docs)]

mod error;
mod parse;
mod terms;
mod tokens;
mod tree;

pub use error::DocumentError;
pub use parse::{parse_file, parse_markdown};
pub use terms::extract_key_terms;
pub use tokens::estimate_tokens;
pub use tree::{assign_positions, build_tree, own_token_sum, rollup_tokens};

/// A parsed document: a forest of section trees plus references.
///
/// Produced once per parse call by [`parse_markdown`] (or by the PDF
/// deriver) and immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Opaque label assigned by the caller (typically a relative path).
    /// Not used by any core logic.
    pub filename: String,
    /// Sum of all sections' own-content token estimates, captured before
    /// the cumulative rollup (so subtree totals are not double-counted).
    pub total_tokens: usize,
    /// Root sections in document order. A document may have several
    /// level-1 headings, or none at all.
    pub sections: Vec<Section>,
    /// Links to other markdown files, in first-appearance order.
    pub references: Vec<Reference>,
}

/// A heading and the content/subheadings it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Heading depth: 1-6 for markdown, 1..depth for PDF outlines.
    pub level: u8,
    /// Trimmed heading text.
    pub title: String,
    /// Raw text between this heading and the next heading of any level.
    /// Empty for sections derived from a PDF outline.
    pub content: String,
    /// Own-content token estimate before rollup; cumulative
    /// (own + all descendants) after rollup.
    pub tokens: usize,
    /// Up to 5 extracted terms, insertion order, no duplicates.
    pub key_terms: Vec<String>,
    /// Child sections in document order. Every child's `level` is strictly
    /// greater than this section's.
    pub children: Vec<Self>,
    /// Document order index (0-based), assigned via pre-order traversal.
    pub position: usize,
    /// The parent's pre-order `position`, or `None` for roots. A weak
    /// lookup used only by traversal utilities, never for ownership.
    pub parent: Option<usize>,
    /// 1-based line where the heading appears, or the page number for
    /// PDF page-fallback sections. Zero when unset (outline sections).
    pub line_start: usize,
    /// 1-based last line of the section's content, or the page number for
    /// PDF page-fallback sections. Zero when unset (outline sections).
    pub line_end: usize,
}

impl Section {
    /// Creates a bare section with the given level and title.
    ///
    /// Content, tokens, key terms, and line range start empty; positions
    /// and parent links are assigned later during tree construction.
    pub fn new(level: u8, title: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            content: String::new(),
            tokens: 0,
            key_terms: Vec::new(),
            children: Vec::new(),
            position: 0,
            parent: None,
            line_start: 0,
            line_end: 0,
        }
    }
}

/// A link from this document to another markdown file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// The link label as written.
    pub text: String,
    /// The link destination with any `#anchor` suffix stripped.
    /// Always ends in `.md`; links to other targets are never recorded.
    pub target: String,
    /// 1-based line number where the link appears.
    pub line: usize,
}

impl Document {
    /// Finds the first section whose title contains `name` as a
    /// case-insensitive substring, searching in pre-order.
    ///
    /// First-match, not best-match: callers relying on specificity must
    /// pass a sufficiently unique fragment.
    pub fn get_section(&self, name: &str) -> Option<&Section> {
        let needle = name.to_lowercase();
        find_section(&self.sections, &needle)
    }

    /// Returns all sections flattened in pre-order (parent before
    /// children, left to right).
    pub fn get_all_sections(&self) -> Vec<&Section> {
        let mut all = Vec::new();
        collect_sections(&self.sections, &mut all);
        all
    }

    /// Resolves a section's weak parent link, or `None` for roots.
    pub fn parent_of(&self, section: &Section) -> Option<&Section> {
        // Positions are pre-order indices, so the flattening indexes them.
        let parent = section.parent?;
        self.get_all_sections().get(parent).copied()
    }
}

/// Depth-first first-match search over a section forest.
fn find_section<'a>(sections: &'a [Section], needle: &str) -> Option<&'a Section> {
    for section in sections {
        if section.title.to_lowercase().contains(needle) {
            return Some(section);
        }
        if let Some(found) = find_section(&section.children, needle) {
            return Some(found);
        }
    }
    None
}

/// Appends sections to `all` in pre-order.
fn collect_sections<'a>(sections: &'a [Section], all: &mut Vec<&'a Section>) {
    for section in sections {
        all.push(section);
        collect_sections(&section.children, all);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> Document {
        parse_markdown(
            "# Guide\n\nIntro.\n\n## Install\n\nSteps.\n\n## Usage\n\nRun it.\n\n### Flags\n\nAll flags.\n",
        )
    }

    #[test]
    fn test_get_section_case_insensitive() {
        let doc = sample_document();
        let section = doc.get_section("install").unwrap();
        assert_eq!(section.title, "Install");
        assert_eq!(section.level, 2);
    }

    #[test]
    fn test_get_section_first_match_preorder() {
        let doc = sample_document();
        // "u" appears in "Guide" before "Install"/"Usage" in pre-order.
        let section = doc.get_section("u").unwrap();
        assert_eq!(section.title, "Guide");
    }

    #[test]
    fn test_get_section_miss() {
        let doc = sample_document();
        assert!(doc.get_section("nonexistent").is_none());
    }

    #[test]
    fn test_get_all_sections_preorder() {
        let doc = sample_document();
        let titles: Vec<&str> = doc
            .get_all_sections()
            .iter()
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Guide", "Install", "Usage", "Flags"]);
    }

    #[test]
    fn test_positions_match_preorder_index() {
        let doc = sample_document();
        for (index, section) in doc.get_all_sections().iter().enumerate() {
            assert_eq!(section.position, index);
        }
    }

    #[test]
    fn test_parent_of() {
        let doc = sample_document();
        let flags = doc.get_section("Flags").unwrap();
        let usage = doc.parent_of(flags).unwrap();
        assert_eq!(usage.title, "Usage");

        let guide = doc.parent_of(usage).unwrap();
        assert_eq!(guide.title, "Guide");
        assert!(doc.parent_of(guide).is_none());
    }
}
