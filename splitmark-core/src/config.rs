//! Segmentation configuration

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default configuration constants
pub mod defaults {
    /// Upper bound of a segment in characters
    pub const MAX_LENGTH: usize = 1000;

    /// Lower bound of a segment in characters
    pub const MIN_LENGTH: usize = 300;

    /// Penalty for splitting inside a sentence
    pub const SENTENCE_INTEGRITY_WEIGHT: f64 = 8.0;

    /// Bonus for splitting right before a heading
    pub const HEADING_SCORE_BONUS: f64 = 10.0;

    /// Bonus for splitting after a terminated paragraph
    pub const SENTENCE_END_SCORE_BONUS: f64 = 6.0;

    /// Scale of the length term, which ranges over [-1, 1]
    pub const LENGTH_SCORE_FACTOR: f64 = 4.0;

    /// Score at which a window closes without waiting for `max_length`
    pub const MIN_SPLIT_SCORE: f64 = 7.0;

    /// Boundary correction reach in characters, each direction
    pub const SEARCH_WINDOW: usize = 100;

    /// Share of counted characters a script needs to dominate a paragraph
    pub const DOMINANCE_THRESHOLD: f64 = 0.7;

    /// Penalty for leaving a heading at the end of a segment
    pub const HEADING_AFTER_PENALTY: f64 = 12.0;

    /// Bonus for splitting where a list starts or ends
    pub const LIST_TRANSITION_BONUS: f64 = 3.0;
}

/// Engine configuration
///
/// Lengths are in characters of the logical text. Every weight is a plain
/// addend of the candidate score, see [`crate::scorer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentConfig {
    pub max_length: usize,
    pub min_length: usize,
    /// Zero or negative disables the mid-sentence penalty
    pub sentence_integrity_weight: f64,
    pub heading_score_bonus: f64,
    pub sentence_end_score_bonus: f64,
    pub length_score_factor: f64,
    pub min_split_score: f64,
    pub search_window: usize,
    /// Collect and log the scored-candidate trace
    pub debug_mode: bool,
    pub dominance_threshold: f64,
    pub heading_after_penalty: f64,
    pub list_transition_bonus: f64,
    /// Extra Latin abbreviations on top of the built-in list
    pub abbreviations: Vec<String>,
    /// Start a new segment at every heading that follows body text, even
    /// below `min_length`
    pub force_split_before_heading: bool,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            max_length: defaults::MAX_LENGTH,
            min_length: defaults::MIN_LENGTH,
            sentence_integrity_weight: defaults::SENTENCE_INTEGRITY_WEIGHT,
            heading_score_bonus: defaults::HEADING_SCORE_BONUS,
            sentence_end_score_bonus: defaults::SENTENCE_END_SCORE_BONUS,
            length_score_factor: defaults::LENGTH_SCORE_FACTOR,
            min_split_score: defaults::MIN_SPLIT_SCORE,
            search_window: defaults::SEARCH_WINDOW,
            debug_mode: false,
            dominance_threshold: defaults::DOMINANCE_THRESHOLD,
            heading_after_penalty: defaults::HEADING_AFTER_PENALTY,
            list_transition_bonus: defaults::LIST_TRANSITION_BONUS,
            abbreviations: Vec::new(),
            force_split_before_heading: false,
        }
    }
}

impl SegmentConfig {
    /// Create a configuration builder
    pub fn builder() -> SegmentConfigBuilder {
        SegmentConfigBuilder::default()
    }

    /// Check every value range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_length == 0 {
            return Err(ConfigError::ZeroMaxLength);
        }

        if self.min_length > self.max_length {
            return Err(ConfigError::LengthRange {
                min: self.min_length,
                max: self.max_length,
            });
        }

        if self.search_window == 0 {
            return Err(ConfigError::ZeroSearchWindow);
        }

        for (name, value) in [
            ("sentence_integrity_weight", self.sentence_integrity_weight),
            ("heading_score_bonus", self.heading_score_bonus),
            ("sentence_end_score_bonus", self.sentence_end_score_bonus),
            ("length_score_factor", self.length_score_factor),
            ("min_split_score", self.min_split_score),
            ("heading_after_penalty", self.heading_after_penalty),
            ("list_transition_bonus", self.list_transition_bonus),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }

        if !(self.dominance_threshold > 0.0 && self.dominance_threshold <= 1.0) {
            return Err(ConfigError::DominanceThreshold(self.dominance_threshold));
        }

        if self.abbreviations.iter().any(|a| a.trim().is_empty()) {
            return Err(ConfigError::EmptyAbbreviation);
        }

        Ok(())
    }
}

/// Fluent builder for [`SegmentConfig`]
#[derive(Debug, Default)]
pub struct SegmentConfigBuilder {
    config: SegmentConfig,
}

impl SegmentConfigBuilder {
    /// Create a builder starting from the defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_length(mut self, chars: usize) -> Self {
        self.config.max_length = chars;
        self
    }

    pub fn min_length(mut self, chars: usize) -> Self {
        self.config.min_length = chars;
        self
    }

    pub fn sentence_integrity_weight(mut self, weight: f64) -> Self {
        self.config.sentence_integrity_weight = weight;
        self
    }

    pub fn heading_score_bonus(mut self, bonus: f64) -> Self {
        self.config.heading_score_bonus = bonus;
        self
    }

    pub fn sentence_end_score_bonus(mut self, bonus: f64) -> Self {
        self.config.sentence_end_score_bonus = bonus;
        self
    }

    pub fn length_score_factor(mut self, factor: f64) -> Self {
        self.config.length_score_factor = factor;
        self
    }

    pub fn min_split_score(mut self, score: f64) -> Self {
        self.config.min_split_score = score;
        self
    }

    pub fn search_window(mut self, chars: usize) -> Self {
        self.config.search_window = chars;
        self
    }

    pub fn debug_mode(mut self, enabled: bool) -> Self {
        self.config.debug_mode = enabled;
        self
    }

    pub fn dominance_threshold(mut self, threshold: f64) -> Self {
        self.config.dominance_threshold = threshold;
        self
    }

    pub fn heading_after_penalty(mut self, penalty: f64) -> Self {
        self.config.heading_after_penalty = penalty;
        self
    }

    pub fn list_transition_bonus(mut self, bonus: f64) -> Self {
        self.config.list_transition_bonus = bonus;
        self
    }

    pub fn force_split_before_heading(mut self, enabled: bool) -> Self {
        self.config.force_split_before_heading = enabled;
        self
    }

    /// Add one extra abbreviation (without the final dot)
    pub fn abbreviation(mut self, abbreviation: impl Into<String>) -> Self {
        self.config.abbreviations.push(abbreviation.into());
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<SegmentConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
