//! Paragraph stream readers
//!
//! Two formats are accepted. A `.json` file holds an array of
//! `{ "text": ..., "style": ... }` objects. Anything else is plain text with
//! one paragraph per line, where a leading `#` marks a heading.

use anyhow::Result;
use serde::Deserialize;
use splitmark_core::{Document, Paragraph, StyleTag};
use std::path::Path;

use super::FileReader;
use crate::error::CliError;

#[derive(Debug, Deserialize)]
struct RawParagraph {
    text: String,
    #[serde(default)]
    style: String,
}

/// Read a document, choosing the format from the file extension
pub fn read_document(path: &Path) -> Result<Document> {
    let content = FileReader::read_text(path)?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        parse_json_document(&content).map_err(|reason| {
            CliError::InvalidInput {
                path: path.display().to_string(),
                reason,
            }
            .into()
        })
    } else {
        Ok(parse_text_document(&content))
    }
}

/// Parse a JSON paragraph array
///
/// Style names go through [`StyleTag::from_style_name`], so word-processor
/// names such as `Heading 1` work as well as `heading`/`body`/`other`.
pub fn parse_json_document(content: &str) -> std::result::Result<Document, String> {
    let raw: Vec<RawParagraph> = serde_json::from_str(content).map_err(|e| e.to_string())?;

    let paragraphs = raw
        .into_iter()
        .enumerate()
        .map(|(index, p)| paragraph(index, &p.text, StyleTag::from_style_name(&p.style)))
        .collect();

    Ok(Document::from_paragraphs(paragraphs))
}

/// Parse plain text, one paragraph per line
pub fn parse_text_document(content: &str) -> Document {
    let paragraphs = content
        .lines()
        .enumerate()
        .map(|(index, line)| match line.trim_start().strip_prefix('#') {
            Some(heading) => {
                let text = heading.trim_start_matches('#');
                paragraph(index, text, StyleTag::Heading).with_raw_length(line.chars().count())
            }
            None => paragraph(index, line, StyleTag::Body),
        })
        .collect();

    Document::from_paragraphs(paragraphs)
}

/// Trimmed paragraph that remembers its untrimmed length
fn paragraph(index: usize, raw: &str, style: StyleTag) -> Paragraph {
    Paragraph::new(index, raw.trim(), style).with_raw_length(raw.chars().count())
}
