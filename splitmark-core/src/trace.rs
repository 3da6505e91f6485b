//! Debug trace of selector and corrector decisions

use std::fmt;

use serde::Serialize;

use crate::scorer::ScoreBreakdown;
use crate::types::{Correction, SplitKind};

/// One recorded step, collected only in debug mode
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum TraceEntry {
    /// A scored boundary after a paragraph
    Candidate {
        after_paragraph_index: usize,
        accumulated_length: usize,
        score: f64,
        breakdown: ScoreBreakdown,
        /// Emitted as a split
        selected: bool,
    },
    /// Outcome of boundary correction for one split
    Correction {
        kind: SplitKind,
        original_offset: usize,
        offset: usize,
        correction: Correction,
    },
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEntry::Candidate {
                after_paragraph_index,
                accumulated_length,
                score,
                breakdown: b,
                selected,
            } => {
                write!(
                    f,
                    "candidate after #{after_paragraph_index} (acc {accumulated_length}): \
                     {score:.2} [heading {:.1}, end {:.1}, length {:.2}, integrity {:.1}, \
                     heading-after {:.1}, list {:.1}]",
                    b.heading,
                    b.sentence_end,
                    b.length,
                    b.integrity,
                    b.heading_after,
                    b.list_transition
                )?;
                if *selected {
                    write!(f, " <- selected")?;
                }
                Ok(())
            }
            TraceEntry::Correction {
                kind,
                original_offset,
                offset,
                correction,
            } => write!(
                f,
                "{kind:?} split {original_offset} -> {offset} ({correction:?})"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let entry = TraceEntry::Correction {
            kind: SplitKind::Scored,
            original_offset: 40,
            offset: 37,
            correction: Correction::Snapped { from: 40 },
        };
        assert_eq!(entry.to_string(), "Scored split 40 -> 37 (Snapped { from: 40 })");

        let entry = TraceEntry::Candidate {
            after_paragraph_index: 1,
            accumulated_length: 920,
            score: 9.36,
            breakdown: ScoreBreakdown::default(),
            selected: true,
        };
        assert!(entry.to_string().starts_with("candidate after #1 (acc 920): 9.36"));
        assert!(entry.to_string().ends_with("<- selected"));
    }
}
