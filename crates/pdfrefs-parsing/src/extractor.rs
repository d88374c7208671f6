use std::path::Path;

use pdfrefs_core::{PdfBackend, PdfDocument};

use crate::ParsingError;
use crate::config::LayoutConfig;
use crate::document::DocumentParagraphs;
use crate::section::ReferenceSection;
use crate::text_processing::Unwrapper;

/// Configurable reference-section extractor.
///
/// Wraps a [`LayoutConfig`] and runs the full pipeline: lines, paragraphs,
/// the references boundary, then hyphen repair. Each returned string is one
/// paragraph with tokens joined by single spaces.
#[derive(Debug, Clone, Default)]
pub struct ReferenceExtractor {
    config: LayoutConfig,
}

impl ReferenceExtractor {
    /// Create an extractor with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with a custom configuration.
    pub fn with_config(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// All non-empty paragraphs of the document, page by page.
    pub fn paragraphs<'a, D>(&'a self, document: &'a D) -> DocumentParagraphs<'a, D>
    where
        D: PdfDocument + ?Sized,
    {
        DocumentParagraphs::new(document, &self.config)
    }

    /// Paragraphs from the references heading onwards, still line-wrapped.
    pub fn reference_paragraphs<'a, D>(
        &'a self,
        document: &'a D,
    ) -> ReferenceSection<DocumentParagraphs<'a, D>>
    where
        D: PdfDocument + ?Sized,
    {
        ReferenceSection::new(self.paragraphs(document), &self.config)
    }

    /// Extract the unwrapped reference paragraphs of a laid-out document.
    ///
    /// Nothing is returned on failure; the whole section is built first.
    pub fn extract_from_document<D>(&self, document: &D) -> Result<Vec<String>, ParsingError>
    where
        D: PdfDocument + ?Sized,
    {
        let unwrapper = Unwrapper::new(&self.config);
        let mut section = self.reference_paragraphs(document);

        let mut paragraphs = Vec::new();
        for paragraph in section.by_ref() {
            paragraphs.push(unwrapper.unwrap_to_string(&paragraph?)?);
        }

        if !section.heading_found() {
            if self.config.require_heading {
                return Err(ParsingError::NoReferencesSection);
            }
            tracing::warn!("no references heading found, output is empty");
        }

        tracing::debug!(paragraphs = paragraphs.len(), "reference section extracted");
        Ok(paragraphs)
    }

    /// Load an in-memory PDF through `backend` and extract its references.
    pub fn extract_from_bytes(
        &self,
        data: &[u8],
        backend: &dyn PdfBackend,
    ) -> Result<Vec<String>, ParsingError> {
        let document = backend.load_document(data)?;
        self.extract_from_document(document.as_ref())
    }

    /// Open a PDF on disk through `backend` and extract its references.
    pub fn extract_from_path(
        &self,
        pdf_path: &Path,
        backend: &dyn PdfBackend,
    ) -> Result<Vec<String>, ParsingError> {
        let document = backend.open_document(pdf_path)?;
        self.extract_from_document(document.as_ref())
    }
}
