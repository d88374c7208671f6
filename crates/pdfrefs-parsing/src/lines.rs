//! Grouping of text boxes into rendered lines.
//!
//! A box without a trailing space ends the line it belongs to. This relies on
//! the backend reporting `has_space_after == false` for the last word of every
//! rendered line, which both Poppler and the MuPDF backend do.

use pdfrefs_core::TextBox;

/// One rendered line: contiguous text boxes up to and including the first
/// box with no space after it.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    boxes: Vec<TextBox>,
}

impl Line {
    pub fn new(boxes: Vec<TextBox>) -> Self {
        Self { boxes }
    }

    /// Smallest x of any box on the line.
    pub fn leftmost_x(&self) -> f64 {
        self.boxes
            .iter()
            .map(|b| b.bbox.x)
            .fold(f64::INFINITY, f64::min)
    }

    /// Tallest box on the line.
    pub fn height(&self) -> f64 {
        self.boxes
            .iter()
            .map(|b| b.bbox.height)
            .fold(0.0, f64::max)
    }

    /// Top edge of the line (smallest y, since y grows downward).
    pub fn highest_y(&self) -> f64 {
        self.boxes
            .iter()
            .map(|b| b.bbox.y)
            .fold(f64::INFINITY, f64::min)
    }

    /// The text of each box, in order.
    pub fn tokens(&self) -> Vec<String> {
        self.boxes.iter().map(|b| b.text.clone()).collect()
    }
}

/// Lazily splits a page's text boxes into [`Line`]s.
pub struct LineGrouper<I> {
    boxes: I,
    pending: Vec<TextBox>,
    flush_trailing: bool,
    done: bool,
}

impl<I> LineGrouper<I>
where
    I: Iterator<Item = TextBox>,
{
    /// `flush_trailing` controls whether boxes left over after the last
    /// line break come out as a final line. When it is off they stay in the
    /// buffer and only [`finalize`](Self::finalize) returns them.
    pub fn new(boxes: I, flush_trailing: bool) -> Self {
        Self {
            boxes,
            pending: Vec::new(),
            flush_trailing,
            done: false,
        }
    }

    /// Consume the grouper and return whatever is still buffered.
    pub fn finalize(mut self) -> Option<Line> {
        self.take_pending()
    }

    fn take_pending(&mut self) -> Option<Line> {
        if self.pending.is_empty() {
            None
        } else {
            Some(Line::new(std::mem::take(&mut self.pending)))
        }
    }
}

impl<I> Iterator for LineGrouper<I>
where
    I: Iterator<Item = TextBox>,
{
    type Item = Line;

    fn next(&mut self) -> Option<Line> {
        if self.done {
            return None;
        }
        for text_box in self.boxes.by_ref() {
            let ends_line = !text_box.has_space_after;
            self.pending.push(text_box);
            if ends_line {
                return self.take_pending();
            }
        }

        self.done = true;
        if self.flush_trailing {
            self.take_pending()
        } else {
            if !self.pending.is_empty() {
                tracing::debug!(
                    boxes = self.pending.len(),
                    "unterminated trailing line left unflushed"
                );
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfrefs_core::BoundingBox;

    fn tb(text: &str, space_after: bool) -> TextBox {
        TextBox::new(text, BoundingBox::new(0.0, 0.0, 10.0, 10.0), space_after)
    }

    fn texts(lines: &[Line]) -> Vec<Vec<String>> {
        lines.iter().map(|l| l.tokens()).collect()
    }

    #[test]
    fn test_splits_on_missing_space() {
        let boxes = vec![
            tb("Deep", true),
            tb("learning", false),
            tb("for", true),
            tb("parsing.", false),
        ];
        let lines: Vec<Line> = LineGrouper::new(boxes.into_iter(), true).collect();
        assert_eq!(
            texts(&lines),
            vec![vec!["Deep", "learning"], vec!["for", "parsing."]]
        );
    }

    #[test]
    fn test_trailing_partial_line_flushed() {
        let boxes = vec![tb("one", false), tb("two", true), tb("three", true)];
        let lines: Vec<Line> = LineGrouper::new(boxes.into_iter(), true).collect();
        assert_eq!(texts(&lines), vec![vec!["one"], vec!["two", "three"]]);
    }

    #[test]
    fn test_trailing_partial_line_dropped_without_flush() {
        let boxes = vec![tb("one", false), tb("two", true), tb("three", true)];
        let lines: Vec<Line> = LineGrouper::new(boxes.into_iter(), false).collect();
        assert_eq!(texts(&lines), vec![vec!["one"]]);
    }

    #[test]
    fn test_finalize_returns_unflushed_line() {
        let boxes = vec![tb("one", false), tb("two", true), tb("three", true)];
        let mut grouper = LineGrouper::new(boxes.into_iter(), false);
        let lines: Vec<Line> = grouper.by_ref().collect();
        assert_eq!(texts(&lines), vec![vec!["one"]]);
        let rest = grouper.finalize().unwrap();
        assert_eq!(rest.tokens(), vec!["two", "three"]);
    }

    #[test]
    fn test_finalize_after_flush_is_empty() {
        let boxes = vec![tb("one", true), tb("two", true)];
        let mut grouper = LineGrouper::new(boxes.into_iter(), true);
        assert_eq!(grouper.by_ref().count(), 1);
        assert!(grouper.finalize().is_none());
    }

    #[test]
    fn test_empty_page() {
        let lines: Vec<Line> = LineGrouper::new(std::iter::empty::<TextBox>(), true).collect();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_partition_property() {
        let boxes: Vec<TextBox> = (0..23)
            .map(|i| tb(&format!("w{i}"), i % 4 != 3 && i % 7 != 0))
            .collect();
        let expected: Vec<String> = boxes.iter().map(|b| b.text.clone()).collect();
        let flat: Vec<String> = LineGrouper::new(boxes.into_iter(), true)
            .flat_map(|l| l.tokens())
            .collect();
        assert_eq!(flat, expected);
    }

    #[test]
    fn test_line_geometry() {
        let line = Line::new(vec![
            TextBox::new("a", BoundingBox::new(80.0, 101.0, 5.0, 9.0), true),
            TextBox::new("b", BoundingBox::new(72.0, 100.0, 5.0, 11.0), false),
        ]);
        assert_eq!(line.leftmost_x(), 72.0);
        assert_eq!(line.height(), 11.0);
        assert_eq!(line.highest_y(), 100.0);
    }
}
