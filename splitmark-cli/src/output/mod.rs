//! Output formatting module

use anyhow::Result;
use clap::ValueEnum;
use splitmark_core::{Document, Segmentation, StyleTag};
use std::io::Write;

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Write one segmented document
    fn format_document(
        &mut self,
        source: &str,
        document: &Document,
        segmentation: &Segmentation,
    ) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Paragraph lines with split markers
    Text,
    /// Decisions, diagnostics and segment texts as JSON
    Json,
    /// One section per segment
    Markdown,
}

impl OutputFormat {
    /// Every supported format
    pub const ALL: [OutputFormat; 3] = [Self::Text, Self::Json, Self::Markdown];

    /// File extension used for per-file output
    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json => "json",
            Self::Markdown => "md",
        }
    }

    /// Name accepted by `--format`
    pub fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Markdown => "markdown",
        }
    }

    /// One-line description for `list formats`
    pub fn description(self) -> &'static str {
        match self {
            Self::Text => "Paragraph lines with <!--split--> marker lines",
            Self::Json => "Decisions, diagnostics and segment texts as a JSON array",
            Self::Markdown => "One '## Segment N' section per segment",
        }
    }

    /// Create a formatter writing to `writer`
    pub fn formatter<W>(self, writer: W) -> Box<dyn OutputFormatter>
    where
        W: Write + Send + Sync + 'static,
    {
        match self {
            Self::Text => Box::new(TextFormatter::new(writer)),
            Self::Json => Box::new(JsonFormatter::new(writer)),
            Self::Markdown => Box::new(MarkdownFormatter::new(writer)),
        }
    }
}

/// One output line of a segmented document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Paragraph text, or the part of it between two splits
    Paragraph { text: String, style: StyleTag },
    /// Segment boundary
    Split,
}

/// Lay out a document as paragraph lines with split lines in between
///
/// A split in the middle of a paragraph breaks that paragraph's line. The
/// decision at the document end produces no line.
pub fn layout(document: &Document, segmentation: &Segmentation) -> Vec<Line> {
    let total = document.char_len();
    let mut cuts = segmentation
        .decisions
        .iter()
        .map(|d| d.offset)
        .filter(|&offset| offset < total)
        .peekable();

    let mut lines = Vec::with_capacity(document.len() + segmentation.decisions.len());
    let mut start = 0;
    for paragraph in document.paragraphs() {
        let end = start + paragraph.char_len();

        let mut split_before = false;
        while cuts.next_if(|&cut| cut <= start).is_some() {
            split_before = true;
        }
        if split_before {
            lines.push(Line::Split);
        }

        let chars: Vec<char> = paragraph.text.chars().collect();
        let mut piece_start = start;
        while let Some(cut) = cuts.next_if(|&cut| cut < end) {
            lines.push(Line::Paragraph {
                text: chars[piece_start - start..cut - start].iter().collect(),
                style: paragraph.style_tag,
            });
            lines.push(Line::Split);
            piece_start = cut;
        }
        lines.push(Line::Paragraph {
            text: chars[piece_start - start..].iter().collect(),
            style: paragraph.style_tag,
        });

        start = end;
    }
    lines
}

#[cfg(test)]
pub(crate) mod test_support {
    use splitmark_core::{segment, Document, SegmentConfig, Segmentation, StyleTag};

    /// Heading plus two bodies split after the first body
    pub fn sample() -> (Document, Segmentation) {
        let document = Document::new()
            .with_paragraph("Overview", StyleTag::Heading)
            .with_paragraph("The first part is long enough to stand alone.", StyleTag::Body)
            .with_paragraph("The second part follows it.", StyleTag::Body);
        let config = SegmentConfig::builder()
            .min_length(40)
            .max_length(80)
            .build()
            .unwrap();
        let segmentation = segment(&document, &config).unwrap();
        (document, segmentation)
    }
}
