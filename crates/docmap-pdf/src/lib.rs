//! PDF structure derivation for docmap.
//!
//! PDFs carry no heading markers, so structure is derived with a two-tier
//! strategy: when the container has a usable outline (bookmarks), the
//! outline tree becomes the section forest and an aggregate token estimate
//! over the page text is distributed proportionally across it; otherwise
//! each page with extractable text becomes one level-1 section.
//!
//! The deriver itself ([`derive_document`]) is pure: it consumes a decoded
//! [`OutlineNode`] and a [`PageSource`] and performs no I/O. The
//! `lopdf`-backed adapter ([`parse_pdf`]) is the only place a PDF
//! container is actually opened.

#![warn(missing_docs)]

mod derive;
mod error;
mod outline;
mod reader;

pub use derive::{PageSource, derive_document};
pub use error::PdfError;
pub use outline::OutlineNode;
pub use reader::parse_pdf;
