//! Boundary correction
//!
//! Moves scored and forced splits onto the nearest sentence boundary
//! within `search_window` characters. Oversized, heading and document-end
//! splits stay where the selector put them, but a pinned split that cuts a
//! sentence is still reported as degraded.

use crate::boundary::sentence_boundaries;
use crate::config::SegmentConfig;
use crate::language::RuleBook;
use crate::selector::Selection;
use crate::trace::TraceEntry;
use crate::types::{
    Correction, Diagnostic, FeatureRecord, Paragraph, ParagraphSpans, SplitDecision, SplitKind,
};

/// Read-only view of the document for boundary lookups
pub struct CorrectionContext<'a> {
    pub paragraphs: &'a [Paragraph],
    pub features: &'a [FeatureRecord],
    /// `true` where a paragraph ends on a sentence boundary
    pub clean_ends: &'a [bool],
    pub spans: &'a ParagraphSpans,
    pub rules: &'a RuleBook,
}

impl CorrectionContext<'_> {
    /// Sorted sentence boundaries within `lo..=hi`
    pub fn boundaries_in(&self, lo: usize, hi: usize) -> Vec<usize> {
        let mut found = Vec::new();
        for index in self.spans.overlapping(lo, hi) {
            let start = self.spans.start(index);
            let hint = self.features[index].language_hint;
            found.extend(
                sentence_boundaries(&self.paragraphs[index].text, hint, self.rules)
                    .map(|offset| start + offset)
                    .take_while(|&offset| offset <= hi)
                    .filter(|&offset| offset >= lo),
            );

            let end = self.spans.end(index);
            if self.clean_ends[index] && (lo..=hi).contains(&end) {
                found.push(end);
            }
        }
        found.sort_unstable();
        found.dedup();
        found
    }
}

/// Corrected decisions with their diagnostics and trace
#[derive(Debug, Clone, Default)]
pub struct CorrectorOutput {
    pub decisions: Vec<SplitDecision>,
    pub diagnostics: Vec<Diagnostic>,
    pub trace: Vec<TraceEntry>,
}

/// Correct every selection in order
///
/// Each candidate stays strictly between the previous corrected split and
/// the next uncorrected one, and may not push either neighbouring span
/// past a length bound that the selector's offset respected.
pub fn correct(
    selections: &[Selection],
    context: &CorrectionContext<'_>,
    config: &SegmentConfig,
) -> CorrectorOutput {
    let mut output = CorrectorOutput::default();
    let mut prev = 0usize;

    for (i, selection) in selections.iter().enumerate() {
        let original = selection.offset;
        let following = selections.get(i + 1);
        let next = following.map_or(context.spans.total(), |s| s.offset);
        let next_is_final = following.map_or(true, |_| i + 2 == selections.len());

        let (offset, correction) = match selection.kind {
            SplitKind::Oversized | SplitKind::Heading | SplitKind::DocumentEnd => {
                (original, Correction::Pinned)
            }
            SplitKind::Scored | SplitKind::Forced => {
                let window = Window {
                    prev,
                    next,
                    original,
                    next_is_final,
                    config,
                };
                window.resolve(context)
            }
        };

        let source_paragraph_index = context.spans.paragraph_at(offset);
        let degraded = match correction {
            Correction::Uncorrected => true,
            Correction::Pinned => {
                offset < context.spans.total() && !context.clean_ends[source_paragraph_index]
            }
            Correction::Exact | Correction::Snapped { .. } => false,
        };
        if degraded {
            log::debug!("{:?} split at {original} is not on a sentence boundary", selection.kind);
            output.diagnostics.push(Diagnostic::DegradedSplit {
                offset,
                paragraph_index: source_paragraph_index,
            });
        }
        if config.debug_mode {
            output.trace.push(TraceEntry::Correction {
                kind: selection.kind,
                original_offset: original,
                offset,
                correction,
            });
        }

        output.decisions.push(SplitDecision {
            offset,
            source_paragraph_index,
            kind: selection.kind,
            correction,
        });
        prev = offset;
    }

    output
}

/// Constraints on where one split may move
struct Window<'c> {
    prev: usize,
    next: usize,
    original: usize,
    next_is_final: bool,
    config: &'c SegmentConfig,
}

impl Window<'_> {
    fn resolve(&self, context: &CorrectionContext<'_>) -> (usize, Correction) {
        let lo = self.original.saturating_sub(self.config.search_window);
        let hi = self.original + self.config.search_window;
        let boundaries = context.boundaries_in(lo, hi);

        if boundaries.binary_search(&self.original).is_ok() {
            return (self.original, Correction::Exact);
        }

        // Ties go to the earlier offset: boundaries are sorted and min_by_key
        // keeps the first minimum
        boundaries
            .into_iter()
            .filter(|&candidate| self.admits(candidate))
            .min_by_key(|&candidate| candidate.abs_diff(self.original))
            .map_or((self.original, Correction::Uncorrected), |candidate| {
                (
                    candidate,
                    Correction::Snapped {
                        from: self.original,
                    },
                )
            })
    }

    fn admits(&self, candidate: usize) -> bool {
        if candidate <= self.prev || candidate >= self.next {
            return false;
        }

        let (max, min) = (self.config.max_length, self.config.min_length);
        let left_before = self.original - self.prev;
        let right_before = self.next - self.original;
        let left = candidate - self.prev;
        let right = self.next - candidate;

        let upper_ok = left <= max.max(left_before) && right <= max.max(right_before);
        let lower_ok = left >= min.min(left_before)
            && (self.next_is_final || right >= min.min(right_before));

        upper_ok && lower_ok
    }
}
