//! Grouping of lines into paragraphs by vertical gap.

use crate::config::{INITIAL_LEFTMOST_X, LayoutConfig};
use crate::lines::Line;

/// Lines of tokens, in reading order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    lines: Vec<Vec<String>>,
}

impl Paragraph {
    pub fn new(lines: Vec<Vec<String>>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[Vec<String>] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<Vec<String>> {
        self.lines
    }

    pub fn push_line(&mut self, tokens: Vec<String>) {
        self.lines.push(tokens);
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// All tokens joined with single spaces, without any hyphen repair.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<S: Into<String>> From<Vec<Vec<S>>> for Paragraph {
    fn from(lines: Vec<Vec<S>>) -> Self {
        Self::new(
            lines
                .into_iter()
                .map(|line| line.into_iter().map(Into::into).collect())
                .collect(),
        )
    }
}

/// Lazily groups a page's [`Line`]s into [`Paragraph`]s.
///
/// A line opens a new paragraph when the distance between its top edge and
/// the bottom of the previous line exceeds the configured gap in either
/// direction. The accumulated paragraph is emitted as-is, which means the
/// first emission on a page is usually empty: the tracker starts far below
/// the page so the first line always breaks.
pub struct ParagraphGrouper<I> {
    lines: I,
    paragraph_gap: f64,
    flush_trailing: bool,
    previous_height: f64,
    // Kept for parity with the line metrics; not used in the break decision.
    previous_leftmost_x: f64,
    previous_highest_y: f64,
    current: Paragraph,
    done: bool,
}

impl<I> ParagraphGrouper<I>
where
    I: Iterator<Item = Line>,
{
    pub fn new(lines: I, config: &LayoutConfig) -> Self {
        Self {
            lines,
            paragraph_gap: config.paragraph_gap,
            flush_trailing: config.flush_trailing,
            previous_height: 0.0,
            previous_leftmost_x: INITIAL_LEFTMOST_X,
            previous_highest_y: config.initial_highest_y,
            current: Paragraph::default(),
            done: false,
        }
    }

    /// Left edge of the most recently consumed line.
    pub fn previous_leftmost_x(&self) -> f64 {
        self.previous_leftmost_x
    }

    /// Consume the grouper and return the paragraph still being built, if any.
    pub fn finalize(self) -> Option<Paragraph> {
        if self.current.is_empty() {
            None
        } else {
            Some(self.current)
        }
    }
}

impl<I> Iterator for ParagraphGrouper<I>
where
    I: Iterator<Item = Line>,
{
    type Item = Paragraph;

    fn next(&mut self) -> Option<Paragraph> {
        if self.done {
            return None;
        }
        for line in self.lines.by_ref() {
            let leftmost_x = line.leftmost_x();
            let height = line.height();
            let highest_y = line.highest_y();

            let skip = highest_y - (self.previous_highest_y + self.previous_height);
            let emitted = if skip.abs() > self.paragraph_gap {
                Some(std::mem::take(&mut self.current))
            } else {
                None
            };

            self.current.push_line(line.tokens());

            self.previous_height = height;
            self.previous_leftmost_x = leftmost_x;
            self.previous_highest_y = highest_y;

            if emitted.is_some() {
                return emitted;
            }
        }

        self.done = true;
        if self.flush_trailing && !self.current.is_empty() {
            Some(std::mem::take(&mut self.current))
        } else {
            if !self.current.is_empty() {
                tracing::debug!(
                    lines = self.current.len(),
                    "trailing paragraph left unflushed"
                );
            }
            None
        }
    }
}
