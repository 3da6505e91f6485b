//! Sentence-aware paragraph segmentation for retrieval-sized chunking
//!
//! A [`Document`] is an ordered list of styled paragraphs. The engine picks
//! split points that keep every segment within `[min_length, max_length]`
//! characters, prefers boundaries before headings and after complete
//! sentences, and finally moves each split onto the nearest sentence
//! boundary. Chinese, Japanese, Korean and Latin-script text are handled
//! by data-driven rule tables, and mixed paragraphs use both.
//!
//! # Pipeline
//!
//! - **Feature extraction**: heading flag, terminator, list marker and
//!   dominant script per paragraph
//! - **Selection**: a state machine that scores paragraph boundaries and
//!   closes windows on the best one
//! - **Correction**: snaps splits to sentence boundaries inside a search
//!   window without breaking the length bounds
//!
//! # Example
//!
//! ```rust
//! use splitmark_core::{segment, Document, SegmentConfig, StyleTag};
//!
//! let document = Document::new()
//!     .with_paragraph("Overview", StyleTag::Heading)
//!     .with_paragraph("The first part is long enough to stand alone.", StyleTag::Body)
//!     .with_paragraph("The second part follows it.", StyleTag::Body);
//!
//! let config = SegmentConfig::builder()
//!     .min_length(40)
//!     .max_length(80)
//!     .build()?;
//! let segmentation = segment(&document, &config)?;
//!
//! assert_eq!(segmentation.offsets(), vec![53, 80]);
//! assert_eq!(segmentation.segments(&document).len(), 2);
//! # Ok::<(), splitmark_core::ConfigError>(())
//! ```

pub mod boundary;
pub mod config;
pub mod corrector;
pub mod engine;
pub mod error;
pub mod features;
pub mod language;
pub mod scorer;
pub mod selector;
pub mod trace;
pub mod types;

pub use boundary::{sentence_boundaries, SentenceBoundaries};
pub use config::{SegmentConfig, SegmentConfigBuilder};
pub use engine::{segment, Segment, Segmentation, SegmentationEngine};
pub use error::{ConfigError, Result, RuleTableError};
pub use features::extract_features;
pub use language::{standard_rules, RuleBook};
pub use scorer::ScoreBreakdown;
pub use trace::TraceEntry;
pub use types::{
    Correction, Diagnostic, Document, FeatureRecord, LanguageHint, Paragraph, ParagraphSpans,
    SplitCandidate, SplitDecision, SplitKind, StyleTag,
};

#[cfg(feature = "parallel")]
pub use engine::segment_all;
