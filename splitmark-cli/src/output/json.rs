//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use splitmark_core::{Document, Segment, Segmentation};
use std::io::Write;

/// JSON formatter - outputs one report per document as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    reports: Vec<DocumentReport>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize)]
pub struct DocumentReport {
    /// Input the document was read from
    pub source: String,
    /// Text between consecutive decisions
    pub segments: Vec<Segment>,
    /// Decisions, diagnostics and, in debug mode, the trace
    #[serde(flatten)]
    pub segmentation: Segmentation,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            reports: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_document(
        &mut self,
        source: &str,
        document: &Document,
        segmentation: &Segmentation,
    ) -> Result<()> {
        self.reports.push(DocumentReport {
            source: source.to_string(),
            segments: segmentation.segments(document),
            segmentation: segmentation.clone(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.reports)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::sample;

    #[test]
    fn test_json_output() {
        let (document, segmentation) = sample();
        let mut formatter = JsonFormatter::new(Vec::new());

        formatter
            .format_document("sample.txt", &document, &segmentation)
            .unwrap();
        formatter.finish().unwrap();

        let value: serde_json::Value = serde_json::from_slice(&formatter.writer).unwrap();
        let report = &value[0];
        assert_eq!(report["source"], "sample.txt");
        assert_eq!(report["segments"][0]["end"], 53);
        assert_eq!(report["segments"][1]["text"], "The second part follows it.");
        assert_eq!(report["decisions"][1]["kind"], "document_end");
        assert_eq!(report["diagnostics"], serde_json::json!([]));
        assert!(report.get("trace").is_none());
    }

    #[test]
    fn test_empty_output_is_an_array() {
        let mut formatter = JsonFormatter::new(Vec::new());
        formatter.finish().unwrap();

        assert_eq!(String::from_utf8(formatter.writer).unwrap(), "[]\n");
    }
}
