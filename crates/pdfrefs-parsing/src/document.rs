use pdfrefs_core::{Page, PdfDocument, TextBox};

use crate::ParsingError;
use crate::config::LayoutConfig;
use crate::lines::LineGrouper;
use crate::paragraphs::{Paragraph, ParagraphGrouper};

/// Paragraph iterator for a single page.
pub type PageParagraphs = ParagraphGrouper<LineGrouper<std::vec::IntoIter<TextBox>>>;

/// Run the line and paragraph groupers over one page.
pub fn page_paragraphs(page: Page, config: &LayoutConfig) -> PageParagraphs {
    let lines = LineGrouper::new(page.text_boxes.into_iter(), config.flush_trailing);
    ParagraphGrouper::new(lines, config)
}

/// Walks every page of a document and yields its non-empty paragraphs in
/// page order.
///
/// Paragraphs never span pages. A page that fails to load is reported once as
/// an error and ends the walk.
pub struct DocumentParagraphs<'a, D: ?Sized> {
    document: &'a D,
    config: &'a LayoutConfig,
    num_pages: usize,
    next_page: usize,
    current: Option<PageParagraphs>,
    failed: bool,
}

impl<'a, D> DocumentParagraphs<'a, D>
where
    D: PdfDocument + ?Sized,
{
    pub fn new(document: &'a D, config: &'a LayoutConfig) -> Self {
        Self {
            document,
            config,
            num_pages: document.num_pages(),
            next_page: 0,
            current: None,
            failed: false,
        }
    }
}

impl<D> Iterator for DocumentParagraphs<'_, D>
where
    D: PdfDocument + ?Sized,
{
    type Item = Result<Paragraph, ParsingError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(paragraphs) = &mut self.current {
                for paragraph in paragraphs.by_ref() {
                    if !paragraph.is_empty() {
                        return Some(Ok(paragraph));
                    }
                }
                self.current = None;
            }

            if self.failed || self.next_page >= self.num_pages {
                return None;
            }

            let index = self.next_page;
            self.next_page += 1;
            match self.document.page(index) {
                Ok(page) => {
                    tracing::debug!(page = index, boxes = page.text_boxes.len(), "grouping page");
                    self.current = Some(page_paragraphs(page, self.config));
                }
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e.into()));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfrefs_core::{BackendError, BoundingBox, MemoryDocument};

    fn single_word_line(text: &str, y: f64) -> TextBox {
        TextBox::new(text, BoundingBox::new(72.0, y, 50.0, 10.0), false)
    }

    fn collect(doc: &dyn PdfDocument) -> Vec<Result<Paragraph, ParsingError>> {
        let config = LayoutConfig::default();
        DocumentParagraphs::new(doc, &config).collect()
    }

    #[test]
    fn test_pages_in_order_without_empties() {
        let doc = MemoryDocument::new(vec![
            Page::new(
                0,
                vec![
                    single_word_line("one", 100.0),
                    single_word_line("two", 110.0),
                    single_word_line("three", 200.0),
                ],
            ),
            Page::new(1, vec![]),
            Page::new(2, vec![single_word_line("four", 100.0)]),
        ]);
        let paragraphs: Vec<Paragraph> = collect(&doc).into_iter().map(|p| p.unwrap()).collect();
        assert_eq!(
            paragraphs,
            vec![
                Paragraph::from(vec![vec!["one"], vec!["two"]]),
                Paragraph::from(vec![vec!["three"]]),
                Paragraph::from(vec![vec!["four"]]),
            ]
        );
    }

    #[test]
    fn test_no_merge_across_pages() {
        // Page 2 continues exactly where page 1 left off, geometrically.
        let doc = MemoryDocument::new(vec![
            Page::new(0, vec![single_word_line("end", 100.0)]),
            Page::new(1, vec![single_word_line("start", 110.0)]),
        ]);
        assert_eq!(collect(&doc).len(), 2);
    }

    struct FailingDocument;

    impl PdfDocument for FailingDocument {
        fn num_pages(&self) -> usize {
            3
        }

        fn page(&self, index: usize) -> Result<Page, BackendError> {
            if index == 0 {
                Ok(Page::new(0, vec![single_word_line("ok", 100.0)]))
            } else {
                Err(BackendError::ExtractionError(format!("page {index} is broken")))
            }
        }
    }

    #[test]
    fn test_page_error_ends_walk() {
        let items = collect(&FailingDocument);
        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert!(matches!(
            items[1],
            Err(ParsingError::Backend(BackendError::ExtractionError(_)))
        ));
    }
}
