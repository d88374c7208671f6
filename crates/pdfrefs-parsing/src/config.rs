use regex::Regex;

/// Vertical gap (points) above which a line opens a new paragraph.
///
/// Ordinary line spacing inside a paragraph leaves the top of one line within
/// a couple of points of the bottom of the previous one; blank lines and
/// section breaks leave much more.
pub const DEFAULT_PARAGRAPH_GAP: f64 = 5.0;

/// Starting value for the "previous line top" tracker on every page.
///
/// Larger than any real page coordinate, so the first line of a page always
/// opens a fresh paragraph instead of merging with a line from nowhere.
pub const INITIAL_HIGHEST_Y: f64 = 100_000.0;

/// Starting value for the "previous line left edge" tracker on every page.
pub const INITIAL_LEFTMOST_X: f64 = 100_000.0;

/// A heading line must have fewer tokens than this.
pub const DEFAULT_MAX_HEADING_TOKENS: usize = 20;

/// Token that marks the start of the references section.
pub const DEFAULT_HEADING_TOKENS: &[&str] = &["References"];

/// Controls how a list of patterns/values is overridden from its defaults.
#[derive(Debug, Clone, Default)]
pub enum ListOverride<T> {
    /// Use the built-in defaults.
    #[default]
    Default,
    /// Completely replace the defaults with these values.
    Replace(Vec<T>),
    /// Append these values to the defaults.
    Extend(Vec<T>),
}

impl<T: Clone> ListOverride<T> {
    /// Resolve this override against the given defaults.
    pub fn resolve(&self, defaults: &[T]) -> Vec<T> {
        match self {
            ListOverride::Default => defaults.to_vec(),
            ListOverride::Replace(v) => v.clone(),
            ListOverride::Extend(v) => {
                let mut result = defaults.to_vec();
                result.extend(v.iter().cloned());
                result
            }
        }
    }
}

/// Configuration for the paragraph reconstruction pipeline.
///
/// Use [`LayoutConfigBuilder`] to construct with string patterns.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    // ── paragraphs.rs ──
    /// Gap threshold in points (default: 5.0).
    pub(crate) paragraph_gap: f64,
    /// Sentinel for the previous-line tracker at the top of each page.
    pub(crate) initial_highest_y: f64,

    // ── lines.rs / paragraphs.rs ──
    /// Emit a trailing partial line / paragraph at end of page (default: true).
    pub(crate) flush_trailing: bool,

    // ── section.rs ──
    /// Tokens that identify the heading line.
    pub(crate) heading_tokens: ListOverride<String>,
    /// Optional regex matched against a candidate line's space-joined text.
    pub(crate) section_header_re: Option<Regex>,
    /// A heading line must have fewer tokens than this (default: 20).
    pub(crate) max_heading_tokens: usize,
    /// Treat a missing heading as an error rather than empty output.
    pub(crate) require_heading: bool,

    // ── text_processing.rs ──
    /// Also join hyphen-terminated tokens in the middle of a line.
    pub(crate) join_inline_hyphens: bool,
    /// Keep the dash in digit ranges and leave a lone `-` alone.
    pub(crate) keep_numeric_ranges: bool,
    /// Keep the hyphen when the continuation is a compound suffix.
    pub(crate) preserve_compounds: bool,
    /// Compound-word suffixes that keep the hyphen when `preserve_compounds` is set.
    pub(crate) compound_suffixes: ListOverride<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            paragraph_gap: DEFAULT_PARAGRAPH_GAP,
            initial_highest_y: INITIAL_HIGHEST_Y,
            flush_trailing: true,
            heading_tokens: ListOverride::Default,
            section_header_re: None,
            max_heading_tokens: DEFAULT_MAX_HEADING_TOKENS,
            require_heading: false,
            join_inline_hyphens: true,
            keep_numeric_ranges: false,
            preserve_compounds: false,
            compound_suffixes: ListOverride::Default,
        }
    }
}

impl LayoutConfig {
    pub fn paragraph_gap(&self) -> f64 {
        self.paragraph_gap
    }

    pub fn max_heading_tokens(&self) -> usize {
        self.max_heading_tokens
    }

    pub fn require_heading(&self) -> bool {
        self.require_heading
    }

    /// Heading tokens with overrides applied.
    pub(crate) fn resolved_heading_tokens(&self) -> Vec<String> {
        let defaults: Vec<String> = DEFAULT_HEADING_TOKENS.iter().map(|s| s.to_string()).collect();
        self.heading_tokens.resolve(&defaults)
    }
}

/// Builder for [`LayoutConfig`].
///
/// Accepts a string pattern for the header regex, compiled in [`build()`](Self::build).
/// Fails fast with `regex::Error` if the pattern is invalid.
#[derive(Debug, Clone, Default)]
pub struct LayoutConfigBuilder {
    paragraph_gap: Option<f64>,
    initial_highest_y: Option<f64>,
    flush_trailing: Option<bool>,
    heading_tokens: ListOverride<String>,
    section_header_re: Option<String>,
    max_heading_tokens: Option<usize>,
    require_heading: Option<bool>,
    join_inline_hyphens: Option<bool>,
    keep_numeric_ranges: Option<bool>,
    preserve_compounds: Option<bool>,
    compound_suffixes: ListOverride<String>,
}

impl LayoutConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Geometry ──

    pub fn paragraph_gap(mut self, points: f64) -> Self {
        self.paragraph_gap = Some(points);
        self
    }

    pub fn initial_highest_y(mut self, y: f64) -> Self {
        self.initial_highest_y = Some(y);
        self
    }

    pub fn flush_trailing(mut self, flush: bool) -> Self {
        self.flush_trailing = Some(flush);
        self
    }

    // ── Section heading ──

    pub fn set_heading_tokens(mut self, tokens: Vec<String>) -> Self {
        self.heading_tokens = ListOverride::Replace(tokens);
        self
    }

    pub fn add_heading_token(mut self, token: String) -> Self {
        match &mut self.heading_tokens {
            ListOverride::Extend(v) => v.push(token),
            _ => self.heading_tokens = ListOverride::Extend(vec![token]),
        }
        self
    }

    pub fn section_header_regex(mut self, pattern: &str) -> Self {
        self.section_header_re = Some(pattern.to_string());
        self
    }

    pub fn max_heading_tokens(mut self, n: usize) -> Self {
        self.max_heading_tokens = Some(n);
        self
    }

    pub fn require_heading(mut self, require: bool) -> Self {
        self.require_heading = Some(require);
        self
    }

    // ── Hyphenation ──

    pub fn join_inline_hyphens(mut self, join: bool) -> Self {
        self.join_inline_hyphens = Some(join);
        self
    }

    pub fn keep_numeric_ranges(mut self, keep: bool) -> Self {
        self.keep_numeric_ranges = Some(keep);
        self
    }

    pub fn preserve_compounds(mut self, preserve: bool) -> Self {
        self.preserve_compounds = Some(preserve);
        self
    }

    pub fn set_compound_suffixes(mut self, suffixes: Vec<String>) -> Self {
        self.compound_suffixes = ListOverride::Replace(suffixes);
        self
    }

    pub fn add_compound_suffix(mut self, suffix: String) -> Self {
        match &mut self.compound_suffixes {
            ListOverride::Extend(v) => v.push(suffix),
            _ => self.compound_suffixes = ListOverride::Extend(vec![suffix]),
        }
        self
    }

    /// Compile the header pattern and produce a [`LayoutConfig`].
    pub fn build(self) -> Result<LayoutConfig, regex::Error> {
        let section_header_re = self
            .section_header_re
            .map(|p| Regex::new(&p))
            .transpose()?;

        Ok(LayoutConfig {
            paragraph_gap: self.paragraph_gap.unwrap_or(DEFAULT_PARAGRAPH_GAP),
            initial_highest_y: self.initial_highest_y.unwrap_or(INITIAL_HIGHEST_Y),
            flush_trailing: self.flush_trailing.unwrap_or(true),
            heading_tokens: self.heading_tokens,
            section_header_re,
            max_heading_tokens: self
                .max_heading_tokens
                .unwrap_or(DEFAULT_MAX_HEADING_TOKENS),
            require_heading: self.require_heading.unwrap_or(false),
            join_inline_hyphens: self.join_inline_hyphens.unwrap_or(true),
            keep_numeric_ranges: self.keep_numeric_ranges.unwrap_or(false),
            preserve_compounds: self.preserve_compounds.unwrap_or(false),
            compound_suffixes: self.compound_suffixes,
        })
    }
}
