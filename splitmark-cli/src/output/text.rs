//! Plain text output formatter

use super::{layout, Line, OutputFormatter};
use anyhow::Result;
use splitmark_core::{Document, Segmentation, StyleTag};
use std::io::Write;

/// Line written at every split
pub const SPLIT_MARKER: &str = "<!--split-->";

/// Plain text formatter - one paragraph per line, split markers in between
///
/// The output reads back as the same paragraph stream, with headings
/// prefixed by `# `. Consecutive documents are separated by a marker.
pub struct TextFormatter<W: Write> {
    writer: W,
    documents: usize,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            documents: 0,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_document(
        &mut self,
        _source: &str,
        document: &Document,
        segmentation: &Segmentation,
    ) -> Result<()> {
        if self.documents > 0 {
            writeln!(self.writer, "{}", SPLIT_MARKER)?;
        }
        self.documents += 1;

        for line in layout(document, segmentation) {
            match line {
                Line::Split => writeln!(self.writer, "{}", SPLIT_MARKER)?,
                Line::Paragraph {
                    text,
                    style: StyleTag::Heading,
                } => writeln!(self.writer, "# {}", text)?,
                Line::Paragraph { text, .. } => writeln!(self.writer, "{}", text)?,
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
