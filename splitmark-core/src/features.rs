//! Paragraph feature extraction

use std::sync::OnceLock;

use regex::Regex;

use crate::language::RuleBook;
use crate::types::{FeatureRecord, LanguageHint, Paragraph, StyleTag};

/// Bullet or numbered list opener at the start of a paragraph
fn list_marker() -> &'static Regex {
    static LIST_MARKER: OnceLock<Regex> = OnceLock::new();
    LIST_MARKER.get_or_init(|| {
        Regex::new(r"^(?:\d+[.)]|[•\-*])").expect("list marker pattern is valid")
    })
}

/// Derive the features the scorer and detector need for one paragraph
pub fn extract_features(
    paragraph: &Paragraph,
    rules: &RuleBook,
    dominance_threshold: f64,
) -> FeatureRecord {
    let text = paragraph.text.as_str();
    let char_length = paragraph.char_len();

    FeatureRecord {
        is_heading: paragraph.style_tag == StyleTag::Heading,
        ends_with_sentence_terminator: rules.ends_with_terminator(text),
        char_length,
        is_empty: char_length == 0,
        language_hint: language_hint(text, dominance_threshold),
        is_list_item: is_list_item(text),
    }
}

/// Whether the paragraph opens with a bullet or an item number
pub fn is_list_item(text: &str) -> bool {
    list_marker().is_match(text.trim_start())
}

/// Dominant script of `text`
///
/// Only CJK characters and Latin letters are counted. A class dominates
/// when its share of the counted characters exceeds `threshold`.
pub fn language_hint(text: &str, threshold: f64) -> LanguageHint {
    let (mut cjk, mut latin) = (0usize, 0usize);
    for ch in text.chars() {
        if is_cjk(ch) {
            cjk += 1;
        } else if is_latin_letter(ch) {
            latin += 1;
        }
    }

    let total = cjk + latin;
    if total == 0 {
        return LanguageHint::Mixed;
    }

    let total = total as f64;
    if cjk as f64 / total > threshold {
        LanguageHint::Cjk
    } else if latin as f64 / total > threshold {
        LanguageHint::Latin
    } else {
        LanguageHint::Mixed
    }
}

#[inline]
fn is_cjk(ch: char) -> bool {
    matches!(ch,
        '\u{3000}'..='\u{303F}'     // CJK symbols and punctuation
        | '\u{3040}'..='\u{309F}'   // Hiragana
        | '\u{30A0}'..='\u{30FF}'   // Katakana
        | '\u{3400}'..='\u{4DBF}'   // Extension A
        | '\u{4E00}'..='\u{9FFF}'   // Unified ideographs
        | '\u{AC00}'..='\u{D7AF}'   // Hangul syllables
        | '\u{F900}'..='\u{FAFF}'   // Compatibility ideographs
        | '\u{FF00}'..='\u{FFEF}'   // Half/full-width forms
    )
}

#[inline]
fn is_latin_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic()
        || (matches!(ch, '\u{00C0}'..='\u{024F}') && ch != '\u{00D7}' && ch != '\u{00F7}')
}
