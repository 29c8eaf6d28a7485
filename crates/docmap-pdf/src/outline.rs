//! Decoded PDF outline (bookmark) trees.

use docmap_document::Section;

/// One node of a PDF's decoded outline.
///
/// The root node represents the outline dictionary itself: its `title` is
/// ignored and only its `children` matter. An outline with no top-level
/// children is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutlineNode {
    /// The bookmark title as decoded from the container.
    pub title: String,
    /// Child bookmarks in outline order.
    pub children: Vec<Self>,
}

impl OutlineNode {
    /// Creates an outline node with the given title and no children.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            children: Vec::new(),
        }
    }

    /// Whether this outline has any top-level entries.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Converts an outline node into a [`Section`] at the given depth.
///
/// Titles are trimmed; content and line ranges stay empty since outline
/// entries carry neither.
pub(crate) fn outline_to_section(node: &OutlineNode, level: u8) -> Section {
    let mut section = Section::new(level, node.title.trim());
    for child in &node.children {
        section
            .children
            .push(outline_to_section(child, level.saturating_add(1)));
    }
    section
}
