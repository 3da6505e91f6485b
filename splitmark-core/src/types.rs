//! Data model shared by every pipeline stage
//!
//! Paragraphs and documents are produced once by the I/O layer and only
//! read by the engine. Offsets are character offsets into the *logical
//! text*: every paragraph's text concatenated without separators.

use serde::{Deserialize, Serialize};

/// Structural role of a paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleTag {
    /// Section or document heading
    Heading,
    /// Ordinary body text
    #[default]
    Body,
    /// Anything else (captions, table text, ...)
    Other,
}

impl StyleTag {
    /// Map a word-processor style name to a tag
    ///
    /// `Heading 1`, `heading2`, `Title` and the Chinese `标题 1` style
    /// names are headings, `Normal`/`Body Text` are body text.
    pub fn from_style_name(name: &str) -> Self {
        let name = name.trim();
        let lower = name.to_lowercase();
        if lower.starts_with("heading") || lower == "title" || name.starts_with("标题") {
            StyleTag::Heading
        } else if lower.is_empty() || lower == "normal" || lower.starts_with("body") {
            StyleTag::Body
        } else {
            StyleTag::Other
        }
    }
}

/// One paragraph of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Paragraph text as measured by the engine
    pub text: String,
    /// Structural role
    pub style_tag: StyleTag,
    /// Position in the document (0-based, contiguous)
    pub index: usize,
    /// Character count of the text as it appeared in the source
    pub raw_length: usize,
}

impl Paragraph {
    /// Create a paragraph whose raw length equals its text length
    pub fn new(index: usize, text: impl Into<String>, style_tag: StyleTag) -> Self {
        let text = text.into();
        let raw_length = text.chars().count();
        Self {
            text,
            style_tag,
            index,
            raw_length,
        }
    }

    /// Record the untrimmed source length
    pub fn with_raw_length(mut self, raw_length: usize) -> Self {
        self.raw_length = raw_length;
        self
    }

    /// Length of `text` in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Ordered paragraph sequence
///
/// Construction keeps paragraph indices contiguous and 0-based.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    paragraphs: Vec<Paragraph>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from paragraphs, renumbering them by position
    pub fn from_paragraphs(paragraphs: Vec<Paragraph>) -> Self {
        let paragraphs = paragraphs
            .into_iter()
            .enumerate()
            .map(|(index, paragraph)| Paragraph { index, ..paragraph })
            .collect();
        Self { paragraphs }
    }

    /// Append a paragraph and return its index
    pub fn push(&mut self, text: impl Into<String>, style_tag: StyleTag) -> usize {
        let index = self.paragraphs.len();
        self.paragraphs.push(Paragraph::new(index, text, style_tag));
        index
    }

    /// Builder-style variant of [`Document::push`]
    pub fn with_paragraph(mut self, text: impl Into<String>, style_tag: StyleTag) -> Self {
        self.push(text, style_tag);
        self
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Concatenated paragraph texts
    pub fn logical_text(&self) -> String {
        self.paragraphs.iter().map(|p| p.text.as_str()).collect()
    }

    /// Length of the logical text in characters
    pub fn char_len(&self) -> usize {
        self.paragraphs.iter().map(Paragraph::char_len).sum()
    }
}

/// Paragraph spans in the logical text
///
/// Paragraph `i` covers the half-open character range `start(i)..end(i)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphSpans {
    ends: Vec<usize>,
}

impl ParagraphSpans {
    /// Build from paragraph lengths in characters
    pub fn from_lengths(lengths: impl IntoIterator<Item = usize>) -> Self {
        let ends = lengths
            .into_iter()
            .scan(0usize, |acc, len| {
                *acc += len;
                Some(*acc)
            })
            .collect();
        Self { ends }
    }

    pub fn from_document(document: &Document) -> Self {
        Self::from_lengths(document.paragraphs().iter().map(Paragraph::char_len))
    }

    pub fn len(&self) -> usize {
        self.ends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }

    pub fn start(&self, index: usize) -> usize {
        index
            .checked_sub(1)
            .and_then(|prev| self.ends.get(prev).copied())
            .unwrap_or(0)
    }

    /// Offset of the boundary after paragraph `index`
    pub fn end(&self, index: usize) -> usize {
        self.ends.get(index).copied().unwrap_or_else(|| self.total())
    }

    /// Length of the logical text
    pub fn total(&self) -> usize {
        self.ends.last().copied().unwrap_or(0)
    }

    /// Paragraph whose span `(start, end]` contains `offset`
    ///
    /// Offset 0 maps to paragraph 0. Offsets past the end map to the
    /// last paragraph.
    pub fn paragraph_at(&self, offset: usize) -> usize {
        self.ends
            .partition_point(|&end| end < offset)
            .min(self.ends.len().saturating_sub(1))
    }

    /// Indices of the paragraphs intersecting the closed range `lo..=hi`
    pub fn overlapping(&self, lo: usize, hi: usize) -> std::ops::Range<usize> {
        let first = self.ends.partition_point(|&end| end < lo);
        let last = self.ends.partition_point(|&end| end < hi);
        first..(last + 1).min(self.ends.len())
    }
}

/// Dominant script of a paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageHint {
    /// Chinese, Japanese or Korean
    Cjk,
    /// Latin script
    Latin,
    /// Neither dominates
    Mixed,
}

/// Derived per-paragraph features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureRecord {
    pub is_heading: bool,
    pub ends_with_sentence_terminator: bool,
    pub char_length: usize,
    pub is_empty: bool,
    pub language_hint: LanguageHint,
    /// Bullet or numbered list opener
    pub is_list_item: bool,
}

/// A scored boundary after a paragraph
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SplitCandidate {
    pub after_paragraph_index: usize,
    pub score: f64,
    pub accumulated_length: usize,
}

/// Why a split was emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitKind {
    /// Best-scoring candidate of its window
    Scored,
    /// Closed early so the next paragraph fits under `max_length`
    Forced,
    /// After a paragraph that alone exceeds `max_length`
    Oversized,
    /// Right before a heading, when headings always start a segment
    Heading,
    /// End of the document
    DocumentEnd,
}

/// What the boundary corrector did with a split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum Correction {
    /// Already on a sentence boundary
    Exact,
    /// Moved to the nearest sentence boundary
    Snapped {
        /// Offset chosen by the selector
        from: usize,
    },
    /// No boundary inside the window; offset kept
    Uncorrected,
    /// Never moved (oversized, heading and document-end splits)
    Pinned,
}

/// Final output unit: a split at a logical-text offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SplitDecision {
    /// Character offset in the logical text
    pub offset: usize,
    /// Paragraph whose span `(start, end]` contains the offset
    pub source_paragraph_index: usize,
    pub kind: SplitKind,
    pub correction: Correction,
}

/// Non-fatal observations made while segmenting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Diagnostic {
    /// A split could not be moved onto a sentence boundary
    DegradedSplit {
        offset: usize,
        paragraph_index: usize,
    },
    /// A single paragraph is longer than `max_length`
    OversizedParagraph {
        paragraph_index: usize,
        length: usize,
        max_length: usize,
    },
    /// A segment was closed below `min_length` to respect `max_length`
    UndersizedSegment {
        start_offset: usize,
        end_offset: usize,
        min_length: usize,
    },
}
