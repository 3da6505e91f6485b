//! Configuration module
//!
//! The configuration file is TOML with four sections. Missing sections and
//! keys fall back to the engine defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use splitmark_core::config::defaults;
use splitmark_core::SegmentConfig;

use crate::error::CliError;

/// CLI configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Segment length bounds
    #[serde(default)]
    pub document: DocumentConfig,

    /// Processing behaviour
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// Scoring and correction tuning
    #[serde(default)]
    pub advanced: AdvancedConfig,

    /// Worker pool configuration
    #[serde(default)]
    pub performance: PerformanceConfig,
}

/// Segment length configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocumentConfig {
    /// Maximum segment length in characters
    pub max_length: usize,

    /// Minimum segment length in characters
    pub min_length: usize,

    /// Penalty for splitting inside a sentence
    pub sentence_integrity_weight: f64,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            max_length: defaults::MAX_LENGTH,
            min_length: defaults::MIN_LENGTH,
            sentence_integrity_weight: defaults::SENTENCE_INTEGRITY_WEIGHT,
        }
    }
}

/// Processing-related configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Record and log the candidate trace
    pub debug_mode: bool,

    /// Directory for per-file results (stdout when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_folder: Option<PathBuf>,

    /// Leave existing output files untouched
    pub skip_existing: bool,
}

/// Scoring and correction configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdvancedConfig {
    pub min_split_score: f64,
    pub heading_score_bonus: f64,
    pub sentence_end_score_bonus: f64,
    pub length_score_factor: f64,
    pub search_window: usize,
    pub heading_after_penalty: f64,
    pub list_transition_bonus: f64,
    pub dominance_threshold: f64,
    /// Extra abbreviations for Latin-script text
    pub abbreviations: Vec<String>,
    /// Start a segment at every heading that follows body text
    pub force_split_before_heading: bool,
}

impl Default for AdvancedConfig {
    fn default() -> Self {
        Self {
            min_split_score: defaults::MIN_SPLIT_SCORE,
            heading_score_bonus: defaults::HEADING_SCORE_BONUS,
            sentence_end_score_bonus: defaults::SENTENCE_END_SCORE_BONUS,
            length_score_factor: defaults::LENGTH_SCORE_FACTOR,
            search_window: defaults::SEARCH_WINDOW,
            heading_after_penalty: defaults::HEADING_AFTER_PENALTY,
            list_transition_bonus: defaults::LIST_TRANSITION_BONUS,
            dominance_threshold: defaults::DOMINANCE_THRESHOLD,
            abbreviations: Vec::new(),
            force_split_before_heading: false,
        }
    }
}

/// Performance-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PerformanceConfig {
    /// Process files on a thread pool
    pub parallel: bool,

    /// Number of worker threads (0 = auto)
    pub worker_threads: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            worker_threads: 0,
        }
    }
}

impl CliConfig {
    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(CliError::FileNotFound(path.display().to_string()).into());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to load config file: {}", path.display()))
    }

    /// Load `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::ConfigError(e.to_string()).into())
    }

    /// Serialize as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Engine configuration described by this file
    pub fn segment_config(&self) -> SegmentConfig {
        SegmentConfig {
            max_length: self.document.max_length,
            min_length: self.document.min_length,
            sentence_integrity_weight: self.document.sentence_integrity_weight,
            heading_score_bonus: self.advanced.heading_score_bonus,
            sentence_end_score_bonus: self.advanced.sentence_end_score_bonus,
            length_score_factor: self.advanced.length_score_factor,
            min_split_score: self.advanced.min_split_score,
            search_window: self.advanced.search_window,
            debug_mode: self.processing.debug_mode,
            dominance_threshold: self.advanced.dominance_threshold,
            heading_after_penalty: self.advanced.heading_after_penalty,
            list_transition_bonus: self.advanced.list_transition_bonus,
            abbreviations: self.advanced.abbreviations.clone(),
            force_split_before_heading: self.advanced.force_split_before_heading,
        }
    }

    /// Commented default configuration file
    pub fn template() -> String {
        let document = DocumentConfig::default();
        let advanced = AdvancedConfig::default();
        let performance = PerformanceConfig::default();

        format!(
            r#"# splitmark configuration

[document]
# Segment length bounds in characters
max_length = {max_length}
min_length = {min_length}
# Penalty for splitting inside a sentence, in whole points (below 1 disables it)
sentence_integrity_weight = {integrity:.1}

[processing]
# Record every scored candidate and correction
debug_mode = false
# Write one result file per input into this directory instead of stdout
# output_folder = "output"
# Leave existing result files untouched
skip_existing = false

[advanced]
# A window closes as soon as its best candidate reaches this score
min_split_score = {min_split_score:.1}
# Bonus for splitting right before a heading
heading_score_bonus = {heading:.1}
# Bonus for splitting after a paragraph that ends a sentence
sentence_end_score_bonus = {sentence_end:.1}
# Scale of the length term (-1 outside the bounds, 0 to 1 inside)
length_score_factor = {length:.1}
# How far a split may move to reach a sentence boundary
search_window = {search_window}
# Penalty for ending a segment on a heading
heading_after_penalty = {heading_after:.1}
# Bonus for splitting where a list starts or ends
list_transition_bonus = {list:.1}
# Share of CJK or Latin characters that makes a paragraph single-script
dominance_threshold = {dominance:.1}
# Extra abbreviations that never end a sentence, e.g. ["approx", "Blvd"]
abbreviations = []
# Start a new segment at every heading, even below min_length
force_split_before_heading = false

[performance]
# Process files on a thread pool
parallel = {parallel}
# Number of worker threads (0 = number of CPUs)
worker_threads = {worker_threads}
"#,
            max_length = document.max_length,
            min_length = document.min_length,
            integrity = document.sentence_integrity_weight,
            min_split_score = advanced.min_split_score,
            heading = advanced.heading_score_bonus,
            sentence_end = advanced.sentence_end_score_bonus,
            length = advanced.length_score_factor,
            search_window = advanced.search_window,
            heading_after = advanced.heading_after_penalty,
            list = advanced.list_transition_bonus,
            dominance = advanced.dominance_threshold,
            parallel = performance.parallel,
            worker_threads = performance.worker_threads,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_template_round_trips_to_defaults() {
        let config = CliConfig::from_toml(&CliConfig::template()).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.segment_config(), SegmentConfig::default());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = CliConfig::from_toml(
            r#"
[document]
max_length = 2000

[advanced]
abbreviations = ["approx"]
force_split_before_heading = true
"#,
        )
        .unwrap();

        assert_eq!(config.document.max_length, 2000);
        assert_eq!(config.document.min_length, defaults::MIN_LENGTH);
        assert!(config.performance.parallel);

        let segment = config.segment_config();
        assert_eq!(segment.max_length, 2000);
        assert_eq!(segment.abbreviations, vec!["approx".to_string()]);
        assert!(segment.force_split_before_heading);
    }

    #[test]
    fn test_negative_length_is_rejected() {
        let err = CliConfig::from_toml("[document]\nmin_length = -5\n").unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(CliConfig::from_toml("[document]\nmax_lenght = 10\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[processing]\ndebug_mode = true\nskip_existing = true\n").unwrap();

        let config = CliConfig::load(file.path()).unwrap();
        assert!(config.processing.debug_mode);
        assert!(config.processing.skip_existing);
        assert!(config.segment_config().debug_mode);
    }

    #[test]
    fn test_load_missing_file() {
        let err = CliConfig::load(Path::new("/nonexistent/splitmark.toml")).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_to_toml_is_parseable() {
        let mut config = CliConfig::default();
        config.processing.output_folder = Some(PathBuf::from("out"));

        let text = config.to_toml().unwrap();
        assert_eq!(CliConfig::from_toml(&text).unwrap(), config);
    }
}
