//! The two-tier PDF structure deriver.

use docmap_document::{
    Document, Section, assign_positions, estimate_tokens, own_token_sum, rollup_tokens,
};

use crate::{
    PdfError,
    outline::{OutlineNode, outline_to_section},
};

/// Supplies plain text for an already-opened PDF's pages.
///
/// Pages are numbered from 1. An `Err` from [`PageSource::page_text`]
/// marks that single page as unreadable; the deriver skips it and moves
/// on, so implementations should not treat per-page failures as fatal.
pub trait PageSource {
    /// The number of pages in the document.
    fn page_count(&self) -> usize;

    /// Extracts the plain text of a 1-based page.
    fn page_text(&mut self, page: usize) -> Result<String, PdfError>;
}

/// Derives a [`Document`] from a decoded outline and page text.
///
/// If the outline has at least one top-level child, its tree becomes the
/// section forest and the aggregate token estimate over all readable page
/// text is distributed across it. Otherwise each page with non-blank
/// extractable text becomes one level-1 section.
///
/// `total_tokens` is the sum of per-section own estimates before rollup,
/// the same definition the markdown path uses. Truncating division during
/// distribution means the total can undershoot the page-text aggregate.
pub fn derive_document(outline: &OutlineNode, pages: &mut dyn PageSource) -> Document {
    let mut sections = if outline.has_children() {
        derive_from_outline(outline, pages)
    } else {
        derive_by_page(pages)
    };

    let total_tokens = own_token_sum(&sections);
    for section in &mut sections {
        rollup_tokens(section);
    }
    assign_positions(&mut sections);

    Document {
        filename: String::new(),
        total_tokens,
        sections,
        references: Vec::new(),
    }
}

/// Outline path: convert the bookmark tree, then spread the aggregate
/// token estimate across it.
fn derive_from_outline(outline: &OutlineNode, pages: &mut dyn PageSource) -> Vec<Section> {
    let mut roots: Vec<Section> = outline
        .children
        .iter()
        .map(|child| outline_to_section(child, 1))
        .collect();

    let mut full_text = String::new();
    for page in 1..=pages.page_count() {
        // Unreadable pages are skipped, not fatal.
        if let Ok(text) = pages.page_text(page) {
            full_text.push_str(&text);
        }
    }

    let aggregate = estimate_tokens(&full_text);
    if !roots.is_empty() && aggregate > 0 {
        let per_root = aggregate / roots.len();
        for root in &mut roots {
            distribute_tokens(root, per_root);
        }
    }

    roots
}

/// Recursively assigns an allotment of tokens to a subtree.
///
/// A leaf absorbs its whole allotment. An inner node keeps one share of
/// `allotment / (children + 1)` and passes the same share to each child.
/// Integer division truncates at every level.
fn distribute_tokens(section: &mut Section, allotment: usize) {
    if section.children.is_empty() {
        section.tokens = allotment;
        return;
    }

    let share = allotment / (section.children.len() + 1);
    section.tokens = share;
    for child in &mut section.children {
        distribute_tokens(child, share);
    }
}

/// Page-fallback path: one section per page with usable text.
fn derive_by_page(pages: &mut dyn PageSource) -> Vec<Section> {
    let count = pages.page_count();
    if count == 0 {
        return Vec::new();
    }

    let mut sections = Vec::new();
    for page in 1..=count {
        let Ok(text) = pages.page_text(page) else {
            continue;
        };
        let text = text.trim();
        if text.is_empty() {
            continue;
        }

        let mut section = Section::new(1, format!("Page {page}"));
        section.content = text.to_string();
        section.tokens = estimate_tokens(text);
        section.line_start = page;
        section.line_end = page;
        sections.push(section);
    }

    if sections.is_empty() {
        // Keep the result non-empty so downstream rendering does not
        // treat the document as unparseable.
        let mut sentinel = Section::new(1, format!("({count} pages - no extractable text)"));
        sentinel.line_start = 1;
        sentinel.line_end = count;
        return vec![sentinel];
    }

    sections
}
