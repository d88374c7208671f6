use mupdf::{Document, Quad, TextPageFlags};

use pdfrefs_core::{BackendError, BoundingBox, Page, PdfBackend, PdfDocument, TextBox};

/// MuPDF-based implementation of [`PdfBackend`].
///
/// The mupdf dependency (AGPL-3.0) lives only in this crate; the paragraph
/// pipeline never depends on it.
///
/// By default, text in the bottom 5% of each page (footers) and top 4%
/// (headers) is excluded so page numbers and running heads like
/// "References 13" never turn into paragraphs of their own.
pub struct MupdfBackend {
    /// Fraction of page height from bottom to exclude as footer (0.0–1.0).
    /// Default 0.05. `None` disables footer exclusion.
    footer_exclusion_ratio: Option<f32>,
    /// Fraction of page height from top to exclude as header (0.0–1.0).
    /// Default 0.04. `None` disables header exclusion.
    header_exclusion_ratio: Option<f32>,
}

impl Default for MupdfBackend {
    fn default() -> Self {
        Self {
            footer_exclusion_ratio: Some(0.05),
            header_exclusion_ratio: Some(0.04),
        }
    }
}

impl MupdfBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the footer exclusion ratio. Pass `0.0` to disable.
    pub fn with_footer_exclusion(mut self, ratio: f32) -> Self {
        self.footer_exclusion_ratio = if ratio > 0.0 { Some(ratio) } else { None };
        self
    }

    /// Set the header exclusion ratio. Pass `0.0` to disable.
    pub fn with_header_exclusion(mut self, ratio: f32) -> Self {
        self.header_exclusion_ratio = if ratio > 0.0 { Some(ratio) } else { None };
        self
    }
}

impl PdfBackend for MupdfBackend {
    fn load_document(&self, data: &[u8]) -> Result<Box<dyn PdfDocument>, BackendError> {
        let document = Document::from_bytes(data, "application/pdf")
            .map_err(|e| BackendError::OpenError(e.to_string()))?;
        let page_count = document
            .page_count()
            .map_err(|e| BackendError::OpenError(e.to_string()))?;
        tracing::debug!(pages = page_count, bytes = data.len(), "opened PDF");

        Ok(Box::new(MupdfDocument {
            document,
            num_pages: usize::try_from(page_count).unwrap_or(0),
            footer_exclusion_ratio: self.footer_exclusion_ratio,
            header_exclusion_ratio: self.header_exclusion_ratio,
        }))
    }
}

/// A MuPDF document whose pages are laid out into text boxes on demand.
pub struct MupdfDocument {
    document: Document,
    num_pages: usize,
    footer_exclusion_ratio: Option<f32>,
    header_exclusion_ratio: Option<f32>,
}

impl PdfDocument for MupdfDocument {
    fn num_pages(&self) -> usize {
        self.num_pages
    }

    fn page(&self, index: usize) -> Result<Page, BackendError> {
        let page_no = i32::try_from(index)
            .map_err(|_| BackendError::ExtractionError(format!("page {index} out of range")))?;
        let page = self
            .document
            .load_page(page_no)
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?;
        let text_page = page
            .to_text_page(TextPageFlags::empty())
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?;

        // Get page bounds for header/footer exclusion
        let page_bounds = page
            .bounds()
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?;
        let page_height = page_bounds.y1 - page_bounds.y0;

        let header_threshold = self
            .header_exclusion_ratio
            .map(|r| page_bounds.y0 + page_height * r);
        let footer_threshold = self
            .footer_exclusion_ratio
            .map(|r| page_bounds.y1 - page_height * r);

        let mut text_boxes = Vec::new();
        for block in text_page.blocks() {
            let block_bounds = block.bounds();

            // Skip blocks entirely within the header region
            if let Some(threshold) = header_threshold
                && block_bounds.y1 <= threshold
            {
                continue;
            }

            // Skip blocks whose top edge is in the footer region
            if let Some(threshold) = footer_threshold
                && block_bounds.y0 >= threshold
            {
                continue;
            }

            for line in block.lines() {
                let chars = line
                    .chars()
                    .map(|c| (c.char().unwrap_or('\u{FFFD}'), quad_bounds(&c.quad())));
                text_boxes.extend(words_from_chars(chars));
            }
        }

        tracing::debug!(page = index, boxes = text_boxes.len(), "laid out page");
        Ok(Page::new(index, text_boxes))
    }
}

fn quad_bounds(quad: &Quad) -> BoundingBox {
    let xs = [quad.ul.x, quad.ur.x, quad.ll.x, quad.lr.x];
    let ys = [quad.ul.y, quad.ur.y, quad.ll.y, quad.lr.y];
    let min = |v: [f32; 4]| v.into_iter().fold(f32::INFINITY, f32::min) as f64;
    let max = |v: [f32; 4]| v.into_iter().fold(f32::NEG_INFINITY, f32::max) as f64;
    BoundingBox::from_corners(min(xs), min(ys), max(xs), max(ys))
}

/// Split one rendered line of characters into word boxes.
///
/// Whitespace separates words and marks the preceding word as having a space
/// after it. The last word of the line never does, which is what the line
/// grouper keys on.
pub fn words_from_chars(chars: impl IntoIterator<Item = (char, BoundingBox)>) -> Vec<TextBox> {
    let mut words: Vec<TextBox> = Vec::new();
    let mut text = String::new();
    let mut bbox: Option<BoundingBox> = None;

    for (c, char_bbox) in chars {
        if c.is_whitespace() {
            if let Some(b) = bbox.take() {
                words.push(TextBox::new(expand_ligatures(&text), b, true));
                text.clear();
            }
            continue;
        }
        text.push(c);
        bbox = Some(match bbox {
            Some(b) => b.union(&char_bbox),
            None => char_bbox,
        });
    }

    if let Some(b) = bbox {
        words.push(TextBox::new(expand_ligatures(&text), b, false));
    }
    if let Some(last) = words.last_mut() {
        last.has_space_after = false;
    }
    words
}

/// Expand common typographic ligatures found in PDFs.
pub fn expand_ligatures(text: &str) -> String {
    text.replace('\u{FB00}', "ff")
        .replace('\u{FB01}', "fi")
        .replace('\u{FB02}', "fl")
        .replace('\u{FB03}', "ffi")
        .replace('\u{FB04}', "ffl")
        .replace(['\u{FB05}', '\u{FB06}'], "st")
}
