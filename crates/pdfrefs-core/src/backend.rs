use std::path::Path;

use thiserror::Error;

use crate::Page;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A document whose pages have already been laid out into positioned text boxes.
///
/// This is the only boundary between the paragraph pipeline and a PDF library;
/// anything that can report a page count and hand out [`Page`]s by index fits.
pub trait PdfDocument {
    /// Number of pages in the document.
    fn num_pages(&self) -> usize;

    /// Text boxes of page `index` (0-based) in natural reading order.
    fn page(&self, index: usize) -> Result<Page, BackendError>;
}

/// Trait for PDF loading backends.
///
/// Implementors turn raw PDF bytes into a [`PdfDocument`]; line and paragraph
/// reconstruction lives in `pdfrefs_parsing::ReferenceExtractor`.
pub trait PdfBackend: Send + Sync {
    /// Parse an in-memory PDF.
    fn load_document(&self, data: &[u8]) -> Result<Box<dyn PdfDocument>, BackendError>;

    /// Open a PDF from disk.
    fn open_document(&self, path: &Path) -> Result<Box<dyn PdfDocument>, BackendError> {
        let data = std::fs::read(path)?;
        self.load_document(&data)
    }
}
