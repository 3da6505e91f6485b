//! Markdown output formatter

use super::{layout, Line, OutputFormatter};
use anyhow::Result;
use splitmark_core::{Document, Segmentation, SplitKind, StyleTag};
use std::io::Write;

/// Markdown formatter - outputs one section per segment
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    segment_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            segment_count: 0,
        }
    }
}

fn kind_label(kind: SplitKind) -> &'static str {
    match kind {
        SplitKind::Scored => "scored split",
        SplitKind::Forced => "forced split",
        SplitKind::Oversized => "oversized paragraph",
        SplitKind::Heading => "split before heading",
        SplitKind::DocumentEnd => "document end",
    }
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_document(
        &mut self,
        source: &str,
        document: &Document,
        segmentation: &Segmentation,
    ) -> Result<()> {
        writeln!(self.writer, "# {}", source)?;
        writeln!(self.writer)?;

        let lines = layout(document, segmentation);
        let groups = lines.split(|line| *line == Line::Split);

        let mut start = 0;
        for (number, (group, decision)) in groups.zip(&segmentation.decisions).enumerate() {
            self.segment_count += 1;
            writeln!(self.writer, "## Segment {}", number + 1)?;
            writeln!(self.writer)?;
            writeln!(
                self.writer,
                "*Characters {}..{}, {}*",
                start,
                decision.offset,
                kind_label(decision.kind)
            )?;
            writeln!(self.writer)?;

            for line in group {
                match line {
                    Line::Paragraph { text, .. } if text.is_empty() => {}
                    Line::Paragraph {
                        text,
                        style: StyleTag::Heading,
                    } => writeln!(self.writer, "### {}\n", text)?,
                    Line::Paragraph { text, .. } => writeln!(self.writer, "{}\n", text)?,
                    Line::Split => {}
                }
            }
            start = decision.offset;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer, "---")?;
        writeln!(self.writer, "*Total segments: {}*", self.segment_count)?;
        self.writer.flush()?;
        Ok(())
    }
}
