//! Error types for the segmentation engine
//!
//! Only configuration problems are errors. Degraded, oversized and
//! undersized splits are recorded as [`Diagnostic`](crate::Diagnostic)s.

use thiserror::Error;

/// Invalid segmentation configuration, reported before any paragraph is read
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// `min_length` is larger than `max_length`
    #[error("min_length ({min}) must not exceed max_length ({max})")]
    LengthRange {
        /// Configured minimum segment length
        min: usize,
        /// Configured maximum segment length
        max: usize,
    },

    /// `max_length` is zero
    #[error("max_length must be greater than 0")]
    ZeroMaxLength,

    /// `search_window` is zero
    #[error("search_window must be greater than 0")]
    ZeroSearchWindow,

    /// A weight or score is NaN or infinite
    #[error("{name} must be a finite number, got {value}")]
    NonFinite {
        /// Name of the offending field
        name: &'static str,
        /// The rejected value
        value: f64,
    },

    /// `dominance_threshold` is outside `(0, 1]`
    #[error("dominance_threshold must be in (0, 1], got {0}")]
    DominanceThreshold(f64),

    /// An abbreviation entry is blank
    #[error("abbreviation entries must not be empty")]
    EmptyAbbreviation,

    /// The embedded rule tables could not be loaded
    #[error("rule table error: {0}")]
    RuleTable(#[from] RuleTableError),
}

/// Failure to build a rule table from TOML
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleTableError {
    /// The table is not valid TOML for the schema
    #[error("failed to parse {code} rule table: {reason}")]
    Parse {
        /// Table code
        code: String,
        /// Parser message
        reason: String,
    },

    /// The table parsed but is unusable
    #[error("invalid {code} rule table: {reason}")]
    Invalid {
        /// Table code
        code: String,
        /// Validation message
        reason: String,
    },
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_range_display() {
        let err = ConfigError::LengthRange { min: 100, max: 50 };
        assert_eq!(
            err.to_string(),
            "min_length (100) must not exceed max_length (50)"
        );
    }

    #[test]
    fn test_rule_table_conversion() {
        let err: ConfigError = RuleTableError::Invalid {
            code: "latin".to_string(),
            reason: "No terminator characters defined".to_string(),
        }
        .into();
        assert!(err.to_string().starts_with("rule table error: invalid latin"));
    }
}
