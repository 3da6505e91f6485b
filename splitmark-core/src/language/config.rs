//! Configuration structures and validation
//!
//! This module defines the TOML schema for sentence rule tables.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Root rule table configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleTableConfig {
    pub metadata: Metadata,
    pub terminators: Terminators,
    #[serde(default)]
    pub closers: Closers,
    #[serde(default)]
    pub abbreviations: Abbreviations,
}

/// Table metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub code: String,
    pub name: String,
}

/// Terminator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Terminators {
    pub chars: Vec<char>,
    #[serde(default)]
    pub clause_stops: Vec<char>,
    #[serde(default)]
    pub require_following_space: bool,
}

/// Closing quotes and brackets that may trail a terminator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Closers {
    #[serde(default)]
    pub chars: Vec<char>,
}

/// Abbreviation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Abbreviations {
    #[serde(flatten)]
    pub categories: HashMap<String, Vec<String>>,
}

impl RuleTableConfig {
    /// Validate configuration
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.metadata.code.is_empty() {
            return Err("Rule table code must not be empty".to_string());
        }

        if self.terminators.chars.is_empty() {
            return Err("No terminator characters defined".to_string());
        }

        if let Some(ch) = self
            .closers
            .chars
            .iter()
            .find(|ch| self.terminators.chars.contains(ch))
        {
            return Err(format!("'{ch}' is both a terminator and a closer"));
        }

        Ok(())
    }
}
