//! Segment selection
//!
//! Walks the paragraphs once, accumulating a segment until it can be
//! closed at a good boundary. A window closes when the best candidate
//! reaches `min_split_score` or when the next paragraph would push the
//! segment past `max_length`. When nothing in the window qualifies the
//! segment is closed before the overflowing paragraph, or right after it
//! if that paragraph alone is too long. With `force_split_before_heading`
//! every heading that follows body text starts a new segment.

use crate::config::SegmentConfig;
use crate::scorer::Scorer;
use crate::trace::TraceEntry;
use crate::types::{Diagnostic, FeatureRecord, ParagraphSpans, SplitCandidate, SplitKind};

/// A split chosen at a paragraph boundary, before correction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub after_paragraph_index: usize,
    pub offset: usize,
    pub kind: SplitKind,
}

/// Everything the selector produced for one document
#[derive(Debug, Default)]
pub struct SelectorOutput {
    pub selections: Vec<Selection>,
    pub diagnostics: Vec<Diagnostic>,
    pub trace: Vec<TraceEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Accumulating,
    ForcedSplit,
    Done,
}

struct Best {
    candidate: SplitCandidate,
    trace_index: Option<usize>,
}

struct Selector<'a> {
    features: &'a [FeatureRecord],
    breaks_sentence: &'a [bool],
    spans: &'a ParagraphSpans,
    config: &'a SegmentConfig,
    scorer: Scorer<'a>,
    cursor: usize,
    segment_start: usize,
    accumulated: usize,
    best: Option<Best>,
    output: SelectorOutput,
}

/// Choose split points for a document
///
/// `breaks_sentence[i]` is true when paragraph `i` does not end on a
/// sentence boundary. Selections come back with strictly increasing
/// offsets, the last one at the end of the document.
pub fn select(
    features: &[FeatureRecord],
    breaks_sentence: &[bool],
    spans: &ParagraphSpans,
    config: &SegmentConfig,
) -> SelectorOutput {
    debug_assert_eq!(features.len(), breaks_sentence.len());
    debug_assert_eq!(features.len(), spans.len());

    if features.is_empty() {
        return SelectorOutput::default();
    }

    Selector {
        features,
        breaks_sentence,
        spans,
        config,
        scorer: Scorer::new(config),
        cursor: 0,
        segment_start: 0,
        accumulated: 0,
        best: None,
        output: SelectorOutput::default(),
    }
    .run()
}

impl Selector<'_> {
    fn run(mut self) -> SelectorOutput {
        let mut state = State::Accumulating;
        loop {
            state = match state {
                State::Accumulating => self.accumulate(),
                State::ForcedSplit => self.force_split(),
                State::Done => {
                    self.finish();
                    return self.output;
                }
            };
        }
    }

    fn accumulate(&mut self) -> State {
        if self.cursor == self.features.len() {
            return State::Done;
        }

        if self.config.force_split_before_heading
            && self.features[self.cursor].is_heading
            && self.open_segment_has_body()
        {
            self.close_open_segment(SplitKind::Heading);
            return State::Accumulating;
        }

        let length = self.features[self.cursor].char_length;
        if self.accumulated + length > self.config.max_length {
            return match self.best.take() {
                Some(best) => {
                    self.emit_best(best);
                    State::Accumulating
                }
                None => State::ForcedSplit,
            };
        }

        self.accumulated += length;
        let index = self.cursor;
        self.cursor += 1;

        // The boundary at the very end belongs to the document-end split
        if self.accumulated >= self.config.min_length
            && self.spans.end(index) < self.spans.total()
        {
            self.consider(index);
        }

        if self
            .best
            .as_ref()
            .is_some_and(|best| best.candidate.score >= self.config.min_split_score)
        {
            if let Some(best) = self.best.take() {
                self.emit_best(best);
            }
        }

        State::Accumulating
    }

    fn consider(&mut self, index: usize) {
        let Some((candidate, breakdown)) = self.scorer.score(
            self.features,
            index,
            self.accumulated,
            self.breaks_sentence[index],
        ) else {
            return;
        };

        let trace_index = self.config.debug_mode.then(|| {
            self.output.trace.push(TraceEntry::Candidate {
                after_paragraph_index: index,
                accumulated_length: self.accumulated,
                score: candidate.score,
                breakdown,
                selected: false,
            });
            self.output.trace.len() - 1
        });

        let improves = self
            .best
            .as_ref()
            .map_or(true, |best| candidate.score > best.candidate.score);
        if improves {
            self.best = Some(Best {
                candidate,
                trace_index,
            });
        }
    }

    /// Emit the window's best candidate and restart right after it
    fn emit_best(&mut self, best: Best) {
        if let Some(TraceEntry::Candidate { selected, .. }) = best
            .trace_index
            .and_then(|i| self.output.trace.get_mut(i))
        {
            *selected = true;
        }

        let index = best.candidate.after_paragraph_index;
        self.emit(index, SplitKind::Scored);
        self.restart(index + 1);
    }

    fn open_segment_has_body(&self) -> bool {
        self.features[self.segment_start..self.cursor]
            .iter()
            .any(|f| !f.is_empty && !f.is_heading)
    }

    /// Close the open segment right before the paragraph at the cursor
    fn close_open_segment(&mut self, kind: SplitKind) {
        let index = self.cursor - 1;
        let start_offset = self.spans.start(self.segment_start);
        let end_offset = self.spans.end(index);
        self.emit(index, kind);

        if self.accumulated < self.config.min_length {
            log::debug!(
                "segment {start_offset}..{end_offset} closed below min_length {}",
                self.config.min_length
            );
            self.output.diagnostics.push(Diagnostic::UndersizedSegment {
                start_offset,
                end_offset,
                min_length: self.config.min_length,
            });
        }
        self.restart(self.cursor);
    }

    fn force_split(&mut self) -> State {
        if self.accumulated > 0 {
            self.close_open_segment(SplitKind::Forced);
        } else {
            let index = self.cursor;
            let length = self.features[index].char_length;
            log::warn!(
                "paragraph {index} has {length} characters, over max_length {}",
                self.config.max_length
            );
            self.output.diagnostics.push(Diagnostic::OversizedParagraph {
                paragraph_index: index,
                length,
                max_length: self.config.max_length,
            });
            self.emit(index, SplitKind::Oversized);
            self.restart(index + 1);
        }

        State::Accumulating
    }

    fn finish(&mut self) {
        let last = self.features.len() - 1;
        let end = self.spans.end(last);
        let already_closed = self
            .output
            .selections
            .last()
            .is_some_and(|selection| selection.offset == end);
        if !already_closed {
            self.emit(last, SplitKind::DocumentEnd);
        }
    }

    fn emit(&mut self, after_paragraph_index: usize, kind: SplitKind) {
        self.output.selections.push(Selection {
            after_paragraph_index,
            offset: self.spans.end(after_paragraph_index),
            kind,
        });
    }

    fn restart(&mut self, cursor: usize) {
        self.cursor = cursor;
        self.segment_start = cursor;
        self.accumulated = 0;
        self.best = None;
    }
}
