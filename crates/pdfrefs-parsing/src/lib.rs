use std::path::Path;

use thiserror::Error;

pub mod config;
pub mod document;
pub mod extractor;
pub mod lines;
pub mod paragraphs;
pub mod section;
pub mod text_processing;

pub use config::{LayoutConfig, LayoutConfigBuilder, ListOverride};
pub use document::DocumentParagraphs;
pub use extractor::ReferenceExtractor;
pub use lines::{Line, LineGrouper};
pub use paragraphs::{Paragraph, ParagraphGrouper};
pub use section::{HeadingMatcher, ReferenceSection, find_reference_section};
pub use text_processing::{Unwrapper, unwrap_paragraph};
// Re-export domain types from core (canonical definitions live there)
pub use pdfrefs_core::{
    BackendError, BoundingBox, MemoryDocument, Page, PdfBackend, PdfDocument, TextBox,
};

#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
    #[error("malformed paragraph: line {line} has no tokens")]
    MalformedParagraph { line: usize },
    #[error("no references section found")]
    NoReferencesSection,
}

/// Extract the references section of a PDF file using the given backend.
///
/// Pipeline:
/// 1. Load the document and its per-page text boxes via `backend`
/// 2. Group text boxes into lines, lines into paragraphs
/// 3. Skip everything before the "References" heading
/// 4. Rejoin words hyphenated across line breaks
pub fn extract_references(
    pdf_path: &Path,
    backend: &dyn PdfBackend,
) -> Result<Vec<String>, ParsingError> {
    ReferenceExtractor::new().extract_from_path(pdf_path, backend)
}
