//! Split candidate scoring
//!
//! The score of the boundary after paragraph `i` is a sum of independent
//! terms, each switched on by a paragraph feature or by the accumulated
//! segment length. Scoring is pure and never looks past paragraph `i + 1`.

use serde::Serialize;

use crate::config::SegmentConfig;
use crate::types::{FeatureRecord, SplitCandidate};

/// Per-term contributions of one candidate score
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub heading: f64,
    pub sentence_end: f64,
    pub length: f64,
    pub integrity: f64,
    pub heading_after: f64,
    pub list_transition: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.heading
            + self.sentence_end
            + self.length
            + self.integrity
            + self.heading_after
            + self.list_transition
    }
}

/// Scores boundaries between paragraphs
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'a> {
    config: &'a SegmentConfig,
}

impl<'a> Scorer<'a> {
    pub fn new(config: &'a SegmentConfig) -> Self {
        Self { config }
    }

    /// Length term shape: -1 outside `[min, max]`, rising 0..=1 inside
    pub fn length_fitness(&self, accumulated: usize) -> f64 {
        let (min, max) = (self.config.min_length, self.config.max_length);
        if accumulated < min || accumulated > max {
            -1.0
        } else if min == max {
            1.0
        } else {
            (accumulated - min) as f64 / (max - min) as f64
        }
    }

    /// Score the boundary after `features[index]`
    ///
    /// `accumulated` is the segment length including paragraph `index`.
    /// `breaks_sentence` is true when the detector reports no sentence
    /// boundary at the end of that paragraph. Returns `None` for the
    /// boundary after an empty paragraph, which is never a candidate.
    pub fn score(
        &self,
        features: &[FeatureRecord],
        index: usize,
        accumulated: usize,
        breaks_sentence: bool,
    ) -> Option<(SplitCandidate, ScoreBreakdown)> {
        let current = features.get(index)?;
        if current.is_empty {
            return None;
        }
        let next = features.get(index + 1);
        let config = self.config;

        let mut breakdown = ScoreBreakdown::default();

        if next.is_some_and(|f| f.is_heading) {
            breakdown.heading = config.heading_score_bonus;
        }
        if current.ends_with_sentence_terminator {
            breakdown.sentence_end = config.sentence_end_score_bonus;
        }
        breakdown.length = config.length_score_factor * self.length_fitness(accumulated);
        if breaks_sentence && config.sentence_integrity_weight > 0.0 {
            breakdown.integrity = -config.sentence_integrity_weight;
        }
        if current.is_heading {
            breakdown.heading_after = -config.heading_after_penalty;
        }

        let list_starts = next.is_some_and(|f| f.is_list_item) && !current.is_list_item;
        let list_ends = current.is_list_item
            && current.ends_with_sentence_terminator
            && next.is_some_and(|f| !f.is_list_item);
        if list_starts || list_ends {
            breakdown.list_transition = config.list_transition_bonus;
        }

        let candidate = SplitCandidate {
            after_paragraph_index: index,
            score: breakdown.total(),
            accumulated_length: accumulated,
        };
        Some((candidate, breakdown))
    }
}
