//! JSON output for machine consumers.

use docmap_document::{Document, Reference, Section};
use serde::Serialize;

/// Top-level JSON payload.
#[derive(Debug, Serialize)]
pub struct JsonOutput {
    /// The target path as given on the command line.
    pub root: String,
    /// Sum of all documents' token totals.
    pub total_tokens: usize,
    /// Number of documents mapped.
    pub total_docs: usize,
    /// Per-document maps.
    pub documents: Vec<JsonDocument>,
}

/// One document in the JSON payload.
#[derive(Debug, Serialize)]
pub struct JsonDocument {
    /// Path relative to the scan root, or the file path in single-file mode.
    pub filename: String,
    /// Total own-content token estimate for the document.
    pub tokens: usize,
    /// Root sections.
    pub sections: Vec<JsonSection>,
    /// Outgoing markdown links.
    pub references: Vec<JsonRef>,
}

/// One section subtree in the JSON payload.
#[derive(Debug, Serialize)]
pub struct JsonSection {
    /// Heading depth.
    pub level: u8,
    /// Heading text.
    pub title: String,
    /// Cumulative token estimate (own content plus descendants).
    pub tokens: usize,
    /// Extracted key terms.
    pub key_terms: Vec<String>,
    /// Child sections.
    pub children: Vec<JsonSection>,
}

/// One cross-reference in the JSON payload.
#[derive(Debug, Serialize)]
pub struct JsonRef {
    /// Link label.
    pub text: String,
    /// Link target with anchors stripped.
    pub target: String,
    /// 1-based source line.
    pub line: usize,
}

impl JsonOutput {
    /// Builds the payload for a set of documents.
    pub fn new(root: &str, docs: &[Document]) -> Self {
        Self {
            root: root.to_string(),
            total_tokens: docs.iter().map(|d| d.total_tokens).sum(),
            total_docs: docs.len(),
            documents: docs.iter().map(JsonDocument::from_document).collect(),
        }
    }

    /// Serializes the payload as pretty-printed JSON.
    pub fn to_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl JsonDocument {
    /// Converts a parsed document into its JSON shape.
    fn from_document(doc: &Document) -> Self {
        Self {
            filename: doc.filename.clone(),
            tokens: doc.total_tokens,
            sections: doc.sections.iter().map(JsonSection::from_section).collect(),
            references: doc.references.iter().map(JsonRef::from_reference).collect(),
        }
    }
}

impl JsonSection {
    /// Converts a section subtree into its JSON shape.
    fn from_section(section: &Section) -> Self {
        Self {
            level: section.level,
            title: section.title.clone(),
            tokens: section.tokens,
            key_terms: section.key_terms.clone(),
            children: section
                .children
                .iter()
                .map(Self::from_section)
                .collect(),
        }
    }
}

impl JsonRef {
    /// Converts a reference into its JSON shape.
    fn from_reference(reference: &Reference) -> Self {
        Self {
            text: reference.text.clone(),
            target: reference.target.clone(),
            line: reference.line,
        }
    }
}
