use std::convert::Infallible;

use regex::Regex;

use crate::config::LayoutConfig;
use crate::paragraphs::Paragraph;

/// Decides whether a line is the references heading.
///
/// A line qualifies when it is short (fewer than `max_tokens` tokens) and
/// either holds one of the heading tokens verbatim or, if a header regex is
/// configured, its space-joined text matches that regex.
#[derive(Debug, Clone)]
pub struct HeadingMatcher {
    tokens: Vec<String>,
    header_re: Option<Regex>,
    max_tokens: usize,
}

impl HeadingMatcher {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            tokens: config.resolved_heading_tokens(),
            header_re: config.section_header_re.clone(),
            max_tokens: config.max_heading_tokens,
        }
    }

    pub fn is_heading_line(&self, line: &[String]) -> bool {
        if line.len() >= self.max_tokens {
            return false;
        }
        if line.iter().any(|t| self.tokens.contains(t)) {
            return true;
        }
        self.header_re
            .as_ref()
            .is_some_and(|re| re.is_match(&line.join(" ")))
    }

    pub fn contains_heading(&self, paragraph: &Paragraph) -> bool {
        paragraph.lines().iter().any(|l| self.is_heading_line(l))
    }
}

/// Drops paragraphs until the references heading, then passes everything
/// through, the heading paragraph included.
///
/// Runs to the end of the stream; a later heading does not stop it. Errors
/// from upstream are forwarded untouched whether or not the heading has been
/// seen.
pub struct ReferenceSection<I> {
    paragraphs: I,
    matcher: HeadingMatcher,
    heading_found: bool,
}

impl<I, E> ReferenceSection<I>
where
    I: Iterator<Item = Result<Paragraph, E>>,
{
    pub fn new(paragraphs: I, config: &LayoutConfig) -> Self {
        Self {
            paragraphs,
            matcher: HeadingMatcher::new(config),
            heading_found: false,
        }
    }

    /// Whether the heading has been seen so far.
    pub fn heading_found(&self) -> bool {
        self.heading_found
    }
}

impl<I, E> Iterator for ReferenceSection<I>
where
    I: Iterator<Item = Result<Paragraph, E>>,
{
    type Item = Result<Paragraph, E>;

    fn next(&mut self) -> Option<Self::Item> {
        for item in self.paragraphs.by_ref() {
            let paragraph = match item {
                Ok(p) => p,
                Err(e) => return Some(Err(e)),
            };

            if !self.heading_found && self.matcher.contains_heading(&paragraph) {
                tracing::info!(lines = paragraph.len(), "references heading found");
                self.heading_found = true;
            }

            if self.heading_found {
                return Some(Ok(paragraph));
            }
        }
        None
    }
}

/// Eager form of [`ReferenceSection`] over already-built paragraphs.
pub fn find_reference_section(
    paragraphs: impl IntoIterator<Item = Paragraph>,
    config: &LayoutConfig,
) -> Vec<Paragraph> {
    let infallible = paragraphs.into_iter().map(Ok::<_, Infallible>);
    ReferenceSection::new(infallible, config)
        .map(|item| match item {
            Ok(p) => p,
            Err(never) => match never {},
        })
        .collect()
}
