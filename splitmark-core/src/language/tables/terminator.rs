//! Terminator character detection with O(1) lookup
//!
//! Optimized for hot-path performance with ASCII fast-path.

use std::collections::HashSet;

/// Fast terminator lookup table
#[derive(Debug, Clone)]
pub struct TermTable {
    /// ASCII lookup table for chars 0-127
    ascii_table: [bool; 128],
    /// HashSet for non-ASCII terminators (full-width forms)
    non_ascii: HashSet<char>,
}

impl TermTable {
    /// Create from list of terminator characters
    pub fn new(terminators: &[char]) -> Self {
        let mut ascii_table = [false; 128];
        let mut non_ascii = HashSet::new();

        for &ch in terminators {
            if ch.is_ascii() {
                ascii_table[ch as usize] = true;
            } else {
                non_ascii.insert(ch);
            }
        }

        Self {
            ascii_table,
            non_ascii,
        }
    }

    /// Check if character is a terminator - hot path
    #[inline]
    pub fn is_terminator(&self, ch: char) -> bool {
        if ch.is_ascii() {
            self.ascii_table[ch as usize]
        } else {
            self.non_ascii.contains(&ch)
        }
    }
}

/// Role of a half-width dot in context
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DotRole {
    /// Regular sentence-ending period
    Ordinary,
    /// Decimal point (3.14)
    DecimalDot,
    /// Inside a token such as a URL or version number (v1.2, example.com)
    Inline,
}

/// Dot context classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct DotTable;

impl DotTable {
    /// Classify a '.' from its neighbours
    #[inline]
    pub fn classify(&self, prev: Option<char>, next: Option<char>) -> DotRole {
        match (prev, next) {
            (Some(p), Some(n)) if p.is_ascii_digit() && n.is_ascii_digit() => DotRole::DecimalDot,
            (Some(p), Some(n)) if p.is_ascii_alphanumeric() && n.is_ascii_alphanumeric() => {
                DotRole::Inline
            }
            _ => DotRole::Ordinary,
        }
    }
}
