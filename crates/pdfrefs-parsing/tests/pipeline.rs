//! End-to-end tests for the paragraph pipeline over in-memory documents.
//!
//! Pages are laid out with a simple typesetter: each line is 10pt tall and
//! sits directly under the previous one; a blank line adds a 14pt gap.

use anyhow::Result;

use pdfrefs_parsing::{
    BoundingBox, LayoutConfigBuilder, MemoryDocument, Page, Paragraph, ParsingError,
    ReferenceExtractor, TextBox,
};

const LINE_HEIGHT: f64 = 10.0;
const BLANK_GAP: f64 = 14.0;

fn typeset(index: usize, text: &str) -> Page {
    let mut boxes = Vec::new();
    let mut y = 60.0;
    for line in text.lines() {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            y += BLANK_GAP;
            continue;
        }
        let mut x = 72.0;
        for (i, word) in words.iter().enumerate() {
            let width = 5.0 * word.chars().count() as f64;
            boxes.push(TextBox::new(
                *word,
                BoundingBox::new(x, y, width, LINE_HEIGHT),
                i + 1 < words.len(),
            ));
            x += width + 3.0;
        }
        y += LINE_HEIGHT;
    }
    Page::new(index, boxes)
}

fn two_page_paper() -> MemoryDocument {
    let page_one = "\
Deep Layout Models
for Scholarly PDFs

Abstract. We study hyphen-
ation in extracted text.

The References of a paper are discussed at length in this paragraph which is far too long to be a heading line at all.";

    let page_two = "\
Conclusion paragraph
with two lines.

Acknowledgments to
our funders.

References

[1] J. Smith. Auto-
matic extraction. 2020.

[2] K. Doe. Layout
heuristics. 2021.";

    MemoryDocument::new(vec![typeset(0, page_one), typeset(1, page_two)])
}

#[test]
fn two_page_document_starts_at_heading() -> Result<()> {
    let doc = two_page_paper();
    let refs = ReferenceExtractor::new().extract_from_document(&doc)?;
    assert_eq!(
        refs,
        vec![
            "References".to_string(),
            "[1] J. Smith. Automatic extraction. 2020.".to_string(),
            "[2] K. Doe. Layout heuristics. 2021.".to_string(),
        ]
    );
    assert!(refs.iter().all(|r| !r.contains("Abstract")));
    Ok(())
}

#[test]
fn heading_is_third_paragraph_of_page_two() -> Result<()> {
    let doc = two_page_paper();
    let extractor = ReferenceExtractor::new();
    let all: Vec<Paragraph> = extractor.paragraphs(&doc).collect::<Result<_, _>>()?;

    // Page one: title, abstract, long line. Page two: conclusion, acks, heading, refs.
    assert_eq!(all.len(), 8);
    assert_eq!(all[5], Paragraph::from(vec![vec!["References"]]));

    let section: Vec<Paragraph> = extractor
        .reference_paragraphs(&doc)
        .collect::<Result<_, _>>()?;
    assert_eq!(section, all[5..].to_vec());
    Ok(())
}

#[test]
fn paragraphs_partition_every_token() -> Result<()> {
    let doc = two_page_paper();
    let expected: Vec<String> = doc
        .pages
        .iter()
        .flat_map(|p| p.text_boxes.iter().map(|b| b.text.clone()))
        .collect();
    let actual: Vec<String> = ReferenceExtractor::new()
        .paragraphs(&doc)
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .flat_map(|p| p.into_lines().into_iter().flatten())
        .collect();
    assert_eq!(actual, expected);
    Ok(())
}

#[test]
fn last_paragraph_lost_without_trailing_flush() -> Result<()> {
    let config = LayoutConfigBuilder::new().flush_trailing(false).build()?;
    let doc = two_page_paper();
    let refs = ReferenceExtractor::with_config(config).extract_from_document(&doc)?;
    // The final paragraph of each page stays in the grouper's buffer.
    assert_eq!(
        refs,
        vec![
            "References".to_string(),
            "[1] J. Smith. Automatic extraction. 2020.".to_string(),
        ]
    );
    Ok(())
}

#[test]
fn no_heading_is_empty_unless_required() -> Result<()> {
    let doc = MemoryDocument::new(vec![typeset(0, "Only a body\nof text.")]);
    assert!(ReferenceExtractor::new().extract_from_document(&doc)?.is_empty());

    let strict = ReferenceExtractor::with_config(
        LayoutConfigBuilder::new().require_heading(true).build()?,
    );
    assert!(matches!(
        strict.extract_from_document(&doc),
        Err(ParsingError::NoReferencesSection)
    ));
    Ok(())
}

#[test]
fn json_fixture_document() -> Result<()> {
    let json = r#"{
        "pages": [
            {"index": 0, "text_boxes": [
                {"text": "References", "bbox": {"x": 72.0, "y": 80.0, "width": 60.0, "height": 11.0}, "has_space_after": false},
                {"text": "Lee,", "bbox": {"x": 72.0, "y": 100.0, "width": 20.0, "height": 10.0}, "has_space_after": true},
                {"text": "A.", "bbox": {"x": 95.0, "y": 100.0, "width": 10.0, "height": 10.0}, "has_space_after": true},
                {"text": "Struc-", "bbox": {"x": 108.0, "y": 100.0, "width": 30.0, "height": 10.0}, "has_space_after": false},
                {"text": "tured", "bbox": {"x": 72.0, "y": 110.0, "width": 25.0, "height": 10.0}, "has_space_after": true},
                {"text": "text.", "bbox": {"x": 100.0, "y": 110.0, "width": 20.0, "height": 10.0}, "has_space_after": false}
            ]}
        ]
    }"#;
    let doc: MemoryDocument = serde_json::from_str(json)?;
    let refs = ReferenceExtractor::new().extract_from_document(&doc)?;
    assert_eq!(refs, vec!["References", "Lee, A. Structured text."]);
    Ok(())
}
