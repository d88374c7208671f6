use serde::{Deserialize, Serialize};

pub mod backend;

// Re-export for convenience
pub use backend::{BackendError, PdfBackend, PdfDocument};

/// Axis-aligned rectangle in page coordinates (points, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build from corner coordinates; inverted corners give zero extent.
    pub fn from_corners(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            x: x0,
            y: y0,
            width: (x1 - x0).max(0.0),
            height: (y1 - y0).max(0.0),
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn union(&self, other: &Self) -> Self {
        Self::from_corners(
            self.x.min(other.x),
            self.y.min(other.y),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }
}

/// A positioned text fragment, usually one word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBox {
    pub text: String,
    pub bbox: BoundingBox,
    /// True when a visible space separates this fragment from the next one
    /// in reading order. False marks the end of a rendered line.
    pub has_space_after: bool,
}

impl TextBox {
    pub fn new(text: impl Into<String>, bbox: BoundingBox, has_space_after: bool) -> Self {
        Self {
            text: text.into(),
            bbox,
            has_space_after,
        }
    }
}

/// The text boxes of one page, in natural reading order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub index: usize,
    pub text_boxes: Vec<TextBox>,
}

impl Page {
    pub fn new(index: usize, text_boxes: Vec<TextBox>) -> Self {
        Self { index, text_boxes }
    }
}

/// A fully materialized document, handy for fixtures and for backends that
/// lay out every page up front.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryDocument {
    pub pages: Vec<Page>,
}

impl MemoryDocument {
    pub fn new(pages: Vec<Page>) -> Self {
        Self { pages }
    }
}

impl PdfDocument for MemoryDocument {
    fn num_pages(&self) -> usize {
        self.pages.len()
    }

    fn page(&self, index: usize) -> Result<Page, BackendError> {
        self.pages.get(index).cloned().ok_or_else(|| {
            BackendError::ExtractionError(format!(
                "page {} out of range (document has {} pages)",
                index,
                self.pages.len()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_union() {
        let a = BoundingBox::new(10.0, 20.0, 5.0, 8.0);
        let b = BoundingBox::new(12.0, 18.0, 10.0, 4.0);
        let u = a.union(&b);
        assert_eq!(u, BoundingBox::new(10.0, 18.0, 12.0, 10.0));
    }

    #[test]
    fn test_from_corners_clamps_inverted() {
        let bbox = BoundingBox::from_corners(5.0, 5.0, 1.0, 1.0);
        assert_eq!(bbox.width, 0.0);
        assert_eq!(bbox.height, 0.0);
    }

    #[test]
    fn test_memory_document_out_of_range() {
        let doc = MemoryDocument::new(vec![Page::new(0, vec![])]);
        assert_eq!(doc.num_pages(), 1);
        assert!(doc.page(0).is_ok());
        assert!(matches!(doc.page(1), Err(BackendError::ExtractionError(_))));
    }

    #[test]
    fn test_memory_document_from_json() {
        let json = r#"{
            "pages": [{
                "index": 0,
                "text_boxes": [
                    {"text": "References", "bbox": {"x": 72.0, "y": 90.0, "width": 60.0, "height": 11.0}, "has_space_after": false}
                ]
            }]
        }"#;
        let doc: MemoryDocument = serde_json::from_str(json).unwrap();
        let page = doc.page(0).unwrap();
        assert_eq!(page.text_boxes.len(), 1);
        assert_eq!(page.text_boxes[0].text, "References");
        assert!(!page.text_boxes[0].has_space_after);
    }
}
