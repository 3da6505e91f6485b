//! Sentence boundary detection
//!
//! Boundaries are character offsets right after a sentence-ending
//! construct: a run of terminators plus any closing quotes or brackets.
//! Which constructs qualify depends on the [`LanguageHint`]; mixed text
//! accepts a position when either rule family does.

use crate::language::RuleBook;
use crate::types::LanguageHint;

/// Lazy ascending sequence of sentence boundary offsets in one text
///
/// Cloning before consumption restarts the scan from the same position.
#[derive(Debug, Clone)]
pub struct SentenceBoundaries<'r> {
    chars: Vec<char>,
    pos: usize,
    hint: LanguageHint,
    rules: &'r RuleBook,
}

impl Iterator for SentenceBoundaries<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.pos < self.chars.len() {
            let idx = self.pos;
            if self.rules.is_terminator(self.hint, self.chars[idx]) {
                if let Some(end) = self.rules.boundary_at(self.hint, &self.chars, idx) {
                    self.pos = end;
                    return Some(end);
                }
            }
            self.pos += 1;
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.chars.len() - self.pos))
    }
}

/// Sentence boundaries of `text` under the rule families for `hint`
pub fn sentence_boundaries<'r>(
    text: &str,
    hint: LanguageHint,
    rules: &'r RuleBook,
) -> SentenceBoundaries<'r> {
    SentenceBoundaries {
        chars: text.chars().collect(),
        pos: 0,
        hint,
        rules,
    }
}

/// Whether the last sentence of `text` ends exactly at its end
///
/// Trailing whitespace is ignored. Empty text counts as a boundary.
pub fn ends_at_boundary(text: &str, hint: LanguageHint, rules: &RuleBook) -> bool {
    let trimmed = text.trim_end();
    if trimmed.is_empty() {
        return true;
    }
    let len = trimmed.chars().count();
    sentence_boundaries(trimmed, hint, rules).any(|offset| offset == len)
}
