//! `lopdf`-backed PDF reading.
//!
//! Decodes the container, walks the outline (bookmark) dictionaries into
//! an [`OutlineNode`] tree, and exposes per-page plain text through the
//! [`PageSource`] seam so the deriver never touches `lopdf` directly.

use std::{collections::HashSet, path::Path};

use lopdf::{Dictionary, Object, ObjectId};

use docmap_document::Document;

use crate::{OutlineNode, PageSource, PdfError, derive_document};

/// Outline recursion cap. Bounds malformed self-nesting alongside the
/// visited-set cycle guard.
const MAX_OUTLINE_DEPTH: usize = 32;

/// Opens a PDF file and derives its structural [`Document`].
///
/// Fails only if the container cannot be opened or decoded. Missing
/// outlines and unreadable pages degrade per the two-tier strategy in
/// [`derive_document`].
pub fn parse_pdf(path: &Path) -> Result<Document, PdfError> {
    let doc = lopdf::Document::load(path).map_err(|source| PdfError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let outline = read_outline(&doc);
    let mut pages = LopdfPages::new(&doc);
    Ok(derive_document(&outline, &mut pages))
}

/// [`PageSource`] over an opened `lopdf` document.
struct LopdfPages<'a> {
    /// The decoded container.
    doc: &'a lopdf::Document,
    /// Page numbers in document order, as reported by the page tree.
    numbers: Vec<u32>,
}

impl<'a> LopdfPages<'a> {
    /// Captures the page numbering of an opened document.
    fn new(doc: &'a lopdf::Document) -> Self {
        let numbers = doc.get_pages().keys().copied().collect();
        Self { doc, numbers }
    }
}

impl PageSource for LopdfPages<'_> {
    fn page_count(&self) -> usize {
        self.numbers.len()
    }

    fn page_text(&mut self, page: usize) -> Result<String, PdfError> {
        let number = self
            .numbers
            .get(page.wrapping_sub(1))
            .ok_or(PdfError::PageOutOfRange { page })?;
        self.doc
            .extract_text(&[*number])
            .map_err(|source| PdfError::PageText { page, source })
    }
}

/// Walks the catalog's outline dictionaries into an [`OutlineNode`] tree.
///
/// Absent or malformed outlines yield a childless root, which routes the
/// deriver onto the page-fallback path.
fn read_outline(doc: &lopdf::Document) -> OutlineNode {
    let mut root = OutlineNode::default();

    let Ok(catalog) = doc.catalog() else {
        return root;
    };
    let Some(outlines) = catalog
        .get(b"Outlines")
        .ok()
        .and_then(|obj| resolve_dict(doc, obj))
    else {
        return root;
    };

    let mut visited = HashSet::new();
    root.children = read_children(doc, outlines, &mut visited, 0);
    root
}

/// Follows the `First`/`Next` sibling chain under one outline dictionary.
fn read_children(
    doc: &lopdf::Document,
    parent: &Dictionary,
    visited: &mut HashSet<ObjectId>,
    depth: usize,
) -> Vec<OutlineNode> {
    let mut nodes = Vec::new();
    if depth >= MAX_OUTLINE_DEPTH {
        return nodes;
    }

    let mut current = parent
        .get(b"First")
        .ok()
        .and_then(|obj| obj.as_reference().ok());

    while let Some(id) = current {
        // A repeated id means the sibling chain loops.
        if !visited.insert(id) {
            break;
        }
        let Ok(dict) = doc.get_object(id).and_then(Object::as_dict) else {
            break;
        };

        let title = dict
            .get(b"Title")
            .ok()
            .and_then(|obj| obj.as_str().ok())
            .map(decode_text)
            .unwrap_or_default();

        let children = read_children(doc, dict, visited, depth + 1);
        nodes.push(OutlineNode { title, children });

        current = dict
            .get(b"Next")
            .ok()
            .and_then(|obj| obj.as_reference().ok());
    }

    nodes
}

/// Resolves an object to a dictionary, following one level of indirection.
fn resolve_dict<'a>(doc: &'a lopdf::Document, obj: &'a Object) -> Option<&'a Dictionary> {
    match obj.as_reference() {
        Ok(id) => doc.get_object(id).and_then(Object::as_dict).ok(),
        Err(_) => obj.as_dict().ok(),
    }
}

/// Decodes a PDF text string: UTF-16BE when BOM-prefixed, otherwise a
/// lossy byte decode.
fn decode_text(bytes: &[u8]) -> String {
    if let [0xFE, 0xFF, rest @ ..] = bytes {
        let utf16: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&utf16)
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    }
}
