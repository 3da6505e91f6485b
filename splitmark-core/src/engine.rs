//! Segmentation engine
//!
//! Runs the pipeline for one document: feature extraction, candidate
//! selection, then boundary correction. The engine owns a validated
//! configuration and the rule book built from it, and is shared freely
//! between threads.
//!
//! `sentence_integrity_weight` is applied in whole points. Selection and
//! correction run once per integrity level from 0 up to the configured
//! weight, and the level that leaves the fewest degraded splits wins, the
//! higher level on ties. Raising the weight therefore never adds a
//! degraded split.

use std::borrow::Cow;

use serde::Serialize;

use crate::boundary::ends_at_boundary;
use crate::config::SegmentConfig;
use crate::corrector::{correct, CorrectionContext, CorrectorOutput};
use crate::error::Result;
use crate::features::extract_features;
use crate::language::{standard_rules, RuleBook};
use crate::selector::{select, SelectorOutput};
use crate::trace::TraceEntry;
use crate::types::{Diagnostic, Document, FeatureRecord, ParagraphSpans, SplitDecision};

/// Result of segmenting one document
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Segmentation {
    /// Split decisions with strictly increasing offsets
    pub decisions: Vec<SplitDecision>,
    pub diagnostics: Vec<Diagnostic>,
    /// Scored candidates and corrections, present in debug mode only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Vec<TraceEntry>>,
}

/// Text between two consecutive decisions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl Segmentation {
    /// Decision offsets in order
    pub fn offsets(&self) -> Vec<usize> {
        self.decisions.iter().map(|d| d.offset).collect()
    }

    /// Slice the document's logical text at every decision
    ///
    /// `document` must be the document this segmentation was computed for.
    pub fn segments(&self, document: &Document) -> Vec<Segment> {
        let text = document.logical_text();
        let byte_at: Vec<usize> = text
            .char_indices()
            .map(|(byte, _)| byte)
            .chain(std::iter::once(text.len()))
            .collect();
        let last_char = byte_at.len() - 1;

        let mut start = 0;
        let mut segments = Vec::with_capacity(self.decisions.len());
        for decision in &self.decisions {
            let end = decision.offset.min(last_char);
            segments.push(Segment {
                start,
                end,
                text: text[byte_at[start]..byte_at[end]].to_string(),
            });
            start = end;
        }
        segments
    }

    /// Whether any split was degraded, oversized or undersized
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Reusable segmentation engine
#[derive(Debug, Clone)]
pub struct SegmentationEngine {
    config: SegmentConfig,
    rules: Cow<'static, RuleBook>,
}

impl SegmentationEngine {
    /// Validate `config` and prepare the rule book
    pub fn new(config: SegmentConfig) -> Result<Self> {
        config.validate()?;

        let standard = standard_rules()?;
        let rules = if config.abbreviations.is_empty() {
            Cow::Borrowed(standard)
        } else {
            log::debug!(
                "adding {} custom abbreviations to the Latin rules",
                config.abbreviations.len()
            );
            Cow::Owned(standard.with_abbreviations(&config.abbreviations))
        };

        Ok(Self { config, rules })
    }

    pub fn config(&self) -> &SegmentConfig {
        &self.config
    }

    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }

    /// Segment one document
    pub fn segment(&self, document: &Document) -> Segmentation {
        let config = &self.config;
        let rules: &RuleBook = &self.rules;
        let paragraphs = document.paragraphs();

        let features: Vec<FeatureRecord> = paragraphs
            .iter()
            .map(|p| extract_features(p, rules, config.dominance_threshold))
            .collect();
        let clean_ends: Vec<bool> = paragraphs
            .iter()
            .zip(&features)
            .map(|(p, f)| !f.is_empty && ends_at_boundary(&p.text, f.language_hint, rules))
            .collect();
        let breaks_sentence: Vec<bool> = clean_ends.iter().map(|clean| !clean).collect();
        let spans = ParagraphSpans::from_document(document);
        let context = CorrectionContext {
            paragraphs,
            features: &features,
            clean_ends: &clean_ends,
            spans: &spans,
            rules,
        };

        let run = |level: usize, previous: Option<&Pass>| {
            let level_config = SegmentConfig {
                sentence_integrity_weight: level as f64,
                ..config.clone()
            };
            let selected = select(&features, &breaks_sentence, &spans, &level_config);
            let corrected = match previous {
                Some(pass) if pass.selected.selections == selected.selections => {
                    pass.corrected.clone()
                }
                _ => correct(&selected.selections, &context, config),
            };
            Pass {
                level,
                selected,
                corrected,
            }
        };

        let top = integrity_level(config);
        let mut chosen = run(0, None);
        for level in 1..=top {
            let pass = run(level, Some(&chosen));
            if pass.degraded() <= chosen.degraded() {
                chosen = pass;
            }
        }
        if chosen.level < top {
            log::debug!(
                "integrity level {} leaves fewer degraded splits than {top}",
                chosen.level
            );
        }
        let Pass {
            selected,
            corrected,
            ..
        } = chosen;

        let mut diagnostics = selected.diagnostics;
        diagnostics.extend(corrected.diagnostics);

        let trace = config.debug_mode.then(|| {
            let mut trace = selected.trace;
            trace.extend(corrected.trace);
            for entry in &trace {
                log::debug!("{entry}");
            }
            trace
        });

        log::debug!(
            "segmented {} paragraphs ({} chars) into {} segments, {} diagnostics",
            paragraphs.len(),
            spans.total(),
            corrected.decisions.len(),
            diagnostics.len()
        );

        Segmentation {
            decisions: corrected.decisions,
            diagnostics,
            trace,
        }
    }

    /// Segment many documents on the rayon pool, keeping input order
    #[cfg(feature = "parallel")]
    pub fn segment_all(&self, documents: &[Document]) -> Vec<Segmentation> {
        use rayon::prelude::*;

        documents.par_iter().map(|d| self.segment(d)).collect()
    }
}

/// One selection and correction run at a fixed integrity weight
struct Pass {
    level: usize,
    selected: SelectorOutput,
    corrected: CorrectorOutput,
}

impl Pass {
    fn degraded(&self) -> usize {
        self.corrected
            .diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::DegradedSplit { .. }))
            .count()
    }
}

/// Highest integrity level worth running
///
/// Past twice the other weights plus `min_split_score` the penalty already
/// decides every comparison the selector makes, so higher levels repeat
/// the same run.
fn integrity_level(config: &SegmentConfig) -> usize {
    if config.sentence_integrity_weight < 1.0 {
        return 0;
    }
    let others = config.heading_score_bonus.abs()
        + config.sentence_end_score_bonus.abs()
        + config.length_score_factor.abs()
        + config.heading_after_penalty.abs()
        + config.list_transition_bonus.abs();
    let ceiling = (2.0 * others + config.min_split_score.abs()).ceil() + 1.0;
    config.sentence_integrity_weight.min(ceiling).floor() as usize
}

/// Validate `config` and segment `document`
///
/// Fails before reading any paragraph when the configuration is invalid.
pub fn segment(document: &Document, config: &SegmentConfig) -> Result<Segmentation> {
    let engine = SegmentationEngine::new(config.clone())?;
    Ok(engine.segment(document))
}

/// Segment several documents in parallel with one shared engine
#[cfg(feature = "parallel")]
pub fn segment_all(documents: &[Document], config: &SegmentConfig) -> Result<Vec<Segmentation>> {
    let engine = SegmentationEngine::new(config.clone())?;
    Ok(engine.segment_all(documents))
}
