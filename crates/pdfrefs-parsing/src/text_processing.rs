use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::ParsingError;
use crate::config::LayoutConfig;
use crate::paragraphs::Paragraph;

/// Common compound-word suffixes that should keep the hyphen.
pub(crate) static COMPOUND_SUFFIXES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "centered",
        "based",
        "driven",
        "aware",
        "oriented",
        "specific",
        "related",
        "dependent",
        "independent",
        "like",
        "free",
        "friendly",
        "rich",
        "poor",
        "scale",
        "level",
        "order",
        "class",
        "type",
        "style",
        "wise",
        "fold",
        "shot",
        "step",
        "time",
        "world",
        "source",
        "domain",
        "task",
        "modal",
        "intensive",
        "efficient",
        "agnostic",
        "invariant",
        "sensitive",
        "grained",
        "agent",
        "site",
    ]
    .into_iter()
    .collect()
});

/// Reflows paragraphs into flat token sequences, healing words that were
/// hyphenated across a line break.
#[derive(Debug, Clone)]
pub struct Unwrapper {
    join_inline_hyphens: bool,
    keep_numeric_ranges: bool,
    compound_suffixes: Option<HashSet<String>>,
}

impl Default for Unwrapper {
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}

impl Unwrapper {
    pub fn new(config: &LayoutConfig) -> Self {
        let compound_suffixes = config.preserve_compounds.then(|| {
            let defaults: Vec<String> =
                COMPOUND_SUFFIXES.iter().map(|s| s.to_string()).collect();
            config
                .compound_suffixes
                .resolve(&defaults)
                .into_iter()
                .collect()
        });
        Self {
            join_inline_hyphens: config.join_inline_hyphens,
            keep_numeric_ranges: config.keep_numeric_ranges,
            compound_suffixes,
        }
    }

    /// Lazily unwrap one paragraph.
    pub fn tokens<'a>(&'a self, paragraph: &'a Paragraph) -> UnwrappedTokens<'a> {
        UnwrappedTokens {
            unwrapper: self,
            lines: paragraph.lines(),
            line: 0,
            token: 0,
            carry: None,
            failed: false,
        }
    }

    pub fn unwrap(&self, paragraph: &Paragraph) -> Result<Vec<String>, ParsingError> {
        self.tokens(paragraph).collect()
    }

    /// Unwrapped tokens joined with single spaces.
    pub fn unwrap_to_string(&self, paragraph: &Paragraph) -> Result<String, ParsingError> {
        Ok(self.unwrap(paragraph)?.join(" "))
    }

    /// The part of `token` before a trailing word-break hyphen.
    ///
    /// With `keep_numeric_ranges`, only a hyphen directly after a letter or
    /// digit counts; a lone `-` is then punctuation, not a broken word.
    fn hyphen_stem<'t>(&self, token: &'t str) -> Option<&'t str> {
        let stem = token.strip_suffix('-')?;
        if !self.keep_numeric_ranges {
            return Some(stem);
        }
        stem.chars()
            .last()
            .is_some_and(char::is_alphanumeric)
            .then_some(stem)
    }

    /// Glue a held stem onto the token that continues it.
    fn join(&self, stem: String, next: &str) -> String {
        // Page ranges split over a line ("123-" / "130") keep the dash.
        if self.keep_numeric_ranges && stem.ends_with(|c: char| c.is_ascii_digit()) {
            return format!("{stem}-{next}");
        }

        if let Some(suffixes) = &self.compound_suffixes {
            let lower = next.to_lowercase();
            let bare = lower.trim_end_matches(['.', ',', ';', ':']);
            if suffixes.contains(bare) {
                return format!("{stem}-{next}");
            }
        }

        stem + next
    }
}

/// Token iterator produced by [`Unwrapper::tokens`].
///
/// Holds at most one pending stem. A hyphen-terminated token is held back when
/// it ends a line (or, with inline joining on, anywhere in a line) and glued
/// onto the next token. The paragraph's final token is always emitted as-is,
/// so a trailing hyphen there survives.
///
/// A line with no tokens yields [`ParsingError::MalformedParagraph`] once and
/// ends the iteration.
pub struct UnwrappedTokens<'a> {
    unwrapper: &'a Unwrapper,
    lines: &'a [Vec<String>],
    line: usize,
    token: usize,
    carry: Option<String>,
    failed: bool,
}

impl Iterator for UnwrappedTokens<'_> {
    type Item = Result<String, ParsingError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.failed {
                return None;
            }
            let tokens = self.lines.get(self.line)?;
            if tokens.is_empty() {
                self.failed = true;
                return Some(Err(ParsingError::MalformedParagraph { line: self.line }));
            }
            if self.token >= tokens.len() {
                self.line += 1;
                self.token = 0;
                continue;
            }

            let raw = &tokens[self.token];
            self.token += 1;
            let ends_line = self.token == tokens.len();
            let is_final = ends_line && self.line + 1 == self.lines.len();

            let token = match self.carry.take() {
                Some(stem) => self.unwrapper.join(stem, raw),
                None => raw.clone(),
            };

            let may_hold = !is_final && (ends_line || self.unwrapper.join_inline_hyphens);
            if may_hold && let Some(stem) = self.unwrapper.hyphen_stem(&token) {
                self.carry = Some(stem.to_string());
                continue;
            }
            return Some(Ok(token));
        }
    }
}

/// Unwrap a paragraph with the default settings.
pub fn unwrap_paragraph(paragraph: &Paragraph) -> Result<Vec<String>, ParsingError> {
    Unwrapper::default().unwrap(paragraph)
}
