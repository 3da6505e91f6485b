//! Compiled sentence rules
//!
//! A [`RuleSet`] is one rule family (CJK or Latin) built from a
//! [`RuleTableConfig`]. A [`RuleBook`] holds both families and answers
//! per-hint questions for the boundary detector and the feature extractor.

use crate::language::config::RuleTableConfig;
use crate::language::tables::{CloserTable, DotRole, DotTable, TermTable, Trie};
use crate::types::LanguageHint;

/// Sentence rule family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleFamily {
    /// Full-width stops, no whitespace requirement, closer lookahead
    Cjk,
    /// ASCII stops followed by whitespace, abbreviation guard
    Latin,
}

impl RuleFamily {
    /// Families applied for a language hint, in a fixed order
    pub fn for_hint(hint: LanguageHint) -> &'static [RuleFamily] {
        match hint {
            LanguageHint::Cjk => &[RuleFamily::Cjk],
            LanguageHint::Latin => &[RuleFamily::Latin],
            LanguageHint::Mixed => &[RuleFamily::Cjk, RuleFamily::Latin],
        }
    }
}

/// One compiled rule family
#[derive(Debug, Clone)]
pub struct RuleSet {
    code: String,
    name: String,
    terminators: TermTable,
    clause_stops: TermTable,
    closers: CloserTable,
    dots: DotTable,
    abbreviations: Trie,
    require_following_space: bool,
}

impl RuleSet {
    /// Create from configuration
    pub fn from_config(config: &RuleTableConfig) -> Result<Self, String> {
        config.validate()?;

        Ok(Self {
            code: config.metadata.code.clone(),
            name: config.metadata.name.clone(),
            terminators: TermTable::new(&config.terminators.chars),
            clause_stops: TermTable::new(&config.terminators.clause_stops),
            closers: CloserTable::new(&config.closers.chars),
            dots: DotTable,
            abbreviations: Trie::from_categories(&config.abbreviations.categories),
            require_following_space: config.terminators.require_following_space,
        })
    }

    /// Table code (`cjk`, `latin`)
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Human readable table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add abbreviations on top of the table's own list
    pub fn add_abbreviations<'a>(&mut self, extra: impl IntoIterator<Item = &'a str>) {
        self.abbreviations.extend(extra);
    }

    #[inline]
    pub fn is_terminator(&self, ch: char) -> bool {
        self.terminators.is_terminator(ch)
    }

    #[inline]
    pub fn is_closer(&self, ch: char) -> bool {
        self.closers.is_closer(ch)
    }

    #[inline]
    fn is_clause_stop(&self, ch: char) -> bool {
        self.clause_stops.is_terminator(ch)
    }

    /// Boundary offset for a terminator run starting at `chars[idx]`
    ///
    /// Returns the index right after the run and any closing quotes or
    /// brackets that follow it, or `None` when this family rejects the
    /// position.
    pub fn boundary_at(&self, chars: &[char], idx: usize) -> Option<usize> {
        let ch = *chars.get(idx)?;
        if !self.is_terminator(ch) {
            return None;
        }

        if ch == '.' {
            let prev = idx.checked_sub(1).map(|i| chars[i]);
            let next = chars.get(idx + 1).copied();
            if self.dots.classify(prev, next) != DotRole::Ordinary {
                return None;
            }
        }

        let mut end = idx;
        while end < chars.len() && self.is_terminator(chars[end]) {
            end += 1;
        }
        let single_dot = ch == '.' && end == idx + 1;

        while end < chars.len() && self.is_closer(chars[end]) {
            end += 1;
        }

        if self.require_following_space && end < chars.len() && !chars[end].is_whitespace() {
            return None;
        }

        if single_dot && self.abbreviations.find_abbrev(chars, idx) {
            return None;
        }

        Some(end)
    }

    /// Whether `text` ends with a terminator or clause stop of this family
    pub fn ends_with_terminator(&self, text: &str) -> bool {
        text.trim_end()
            .trim_end_matches(|c: char| self.is_closer(c))
            .chars()
            .next_back()
            .is_some_and(|c| self.is_terminator(c) || self.is_clause_stop(c))
    }
}

/// Both rule families, ready for lookup by language hint
#[derive(Debug, Clone)]
pub struct RuleBook {
    cjk: RuleSet,
    latin: RuleSet,
}

impl RuleBook {
    /// Create from compiled families
    pub fn new(cjk: RuleSet, latin: RuleSet) -> Self {
        Self { cjk, latin }
    }

    /// Copy of this book with extra Latin abbreviations
    pub fn with_abbreviations(&self, extra: &[String]) -> Self {
        let mut book = self.clone();
        book.latin.add_abbreviations(extra.iter().map(String::as_str));
        book
    }

    /// Rule set for a family
    pub fn rule_set(&self, family: RuleFamily) -> &RuleSet {
        match family {
            RuleFamily::Cjk => &self.cjk,
            RuleFamily::Latin => &self.latin,
        }
    }

    /// Rule sets applied for a hint
    pub fn families(&self, hint: LanguageHint) -> impl Iterator<Item = &RuleSet> + '_ {
        RuleFamily::for_hint(hint)
            .iter()
            .map(move |family| self.rule_set(*family))
    }

    /// Whether any family applied for `hint` treats `ch` as a terminator
    #[inline]
    pub fn is_terminator(&self, hint: LanguageHint, ch: char) -> bool {
        self.families(hint).any(|rules| rules.is_terminator(ch))
    }

    /// Union of the families' decisions at `chars[idx]`
    ///
    /// When several families accept, the furthest end wins so that every
    /// trailing closer is kept with the sentence.
    pub fn boundary_at(&self, hint: LanguageHint, chars: &[char], idx: usize) -> Option<usize> {
        self.families(hint)
            .filter_map(|rules| rules.boundary_at(chars, idx))
            .max()
    }

    /// Paragraph-level terminator check used by the feature extractor
    pub fn ends_with_terminator(&self, text: &str) -> bool {
        self.cjk.ends_with_terminator(text) || self.latin.ends_with_terminator(text)
    }
}
