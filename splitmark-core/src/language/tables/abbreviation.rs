//! Abbreviation trie for backward scanning
//!
//! Compact trie stored in a contiguous node array. Lookups walk the
//! token that precedes a dot and never allocate.

use std::collections::HashMap;

/// Compact trie node using array indices instead of pointers
#[derive(Debug, Clone, Default)]
struct TrieNode {
    /// Child nodes: char -> node index
    children: HashMap<char, u32>,
    /// Whether this node marks end of abbreviation
    is_end: bool,
}

/// Case-insensitive abbreviation trie
#[derive(Debug, Clone)]
pub struct Trie {
    nodes: Vec<TrieNode>,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    /// Create empty trie
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
        }
    }

    /// Build from configuration categories
    pub fn from_categories(categories: &HashMap<String, Vec<String>>) -> Self {
        let mut trie = Self::new();
        for abbreviations in categories.values() {
            trie.extend(abbreviations.iter().map(String::as_str));
        }
        trie
    }

    /// Insert every abbreviation from an iterator
    pub fn extend<'a>(&mut self, abbreviations: impl IntoIterator<Item = &'a str>) {
        for abbr in abbreviations {
            let abbr = abbr.trim().trim_end_matches('.');
            if abbr.is_empty() {
                continue;
            }
            self.insert(abbr);

            // "U.S.A" also matches at the dots after "U" and "U.S"
            for (idx, ch) in abbr.char_indices() {
                if ch == '.' && idx > 0 {
                    self.insert(&abbr[..idx]);
                }
            }
        }
    }

    /// Insert a single abbreviation (without its final dot)
    pub fn insert(&mut self, abbreviation: &str) {
        let mut current_idx = 0u32;

        for ch in abbreviation.chars().flat_map(char::to_lowercase) {
            let next_idx = match self.nodes[current_idx as usize].children.get(&ch) {
                Some(&child_idx) => child_idx,
                None => {
                    let new_idx = self.nodes.len() as u32;
                    self.nodes.push(TrieNode::default());
                    self.nodes[current_idx as usize]
                        .children
                        .insert(ch, new_idx);
                    new_idx
                }
            };
            current_idx = next_idx;
        }

        self.nodes[current_idx as usize].is_end = true;
    }

    /// Check whether the token ending right before `chars[dot_idx]` is an abbreviation
    ///
    /// The token is the maximal run of letters and interior dots before the dot.
    pub fn find_abbrev(&self, chars: &[char], dot_idx: usize) -> bool {
        if dot_idx == 0 || dot_idx >= chars.len() || chars[dot_idx] != '.' {
            return false;
        }

        let mut start = dot_idx;
        while start > 0 {
            let prev = chars[start - 1];
            let interior_dot = prev == '.' && start >= 2 && chars[start - 2].is_alphabetic();
            if prev.is_alphabetic() || interior_dot {
                start -= 1;
            } else {
                break;
            }
        }

        let token = &chars[start..dot_idx];
        match token.first() {
            Some(first) if first.is_alphabetic() => self.match_at(token),
            _ => false,
        }
    }

    /// Check if the char slice matches an abbreviation exactly
    fn match_at(&self, chars: &[char]) -> bool {
        let mut current_idx = 0u32;

        for ch in chars.iter().flat_map(|c| c.to_lowercase()) {
            match self.nodes[current_idx as usize].children.get(&ch) {
                Some(&next_idx) => current_idx = next_idx,
                None => return false,
            }
        }

        self.nodes[current_idx as usize].is_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    #[test]
    fn test_basic_abbreviations() {
        let mut trie = Trie::new();
        trie.extend(["Dr", "Mr", "U.S"]);

        assert!(trie.find_abbrev(&chars("Dr."), 2));
        assert!(trie.find_abbrev(&chars("Mr."), 2));
        assert!(trie.find_abbrev(&chars("Hello Dr."), 8));
        assert!(!trie.find_abbrev(&chars("Ms."), 2));
        assert!(!trie.find_abbrev(&chars("Drive."), 5));
    }

    #[test]
    fn test_multi_period_abbreviations() {
        let mut categories = HashMap::new();
        categories.insert(
            "locations".to_string(),
            vec!["U.S".to_string(), "U.S.A".to_string()],
        );
        let trie = Trie::from_categories(&categories);

        assert!(trie.find_abbrev(&chars("U."), 1), "prefix 'U'");
        assert!(trie.find_abbrev(&chars("U.S."), 3), "full 'U.S'");
        assert!(trie.find_abbrev(&chars("U.S.A."), 5), "full 'U.S.A'");
        assert!(trie.find_abbrev(&chars("from the U.S."), 12));
    }

    #[test]
    fn test_case_insensitive() {
        let mut trie = Trie::new();
        trie.insert("Dr");

        assert!(trie.find_abbrev(&chars("dr."), 2));
        assert!(trie.find_abbrev(&chars("DR."), 2));
        assert!(trie.find_abbrev(&chars("Dr."), 2));
    }

    #[test]
    fn test_trailing_dot_in_entry_is_ignored() {
        let mut trie = Trie::new();
        trie.extend(["etc.", "  ", ""]);

        assert!(trie.find_abbrev(&chars("apples, pears etc."), 17));
        assert!(!trie.find_abbrev(&chars("et."), 2));
    }

    #[test]
    fn test_non_letter_token_never_matches() {
        let mut trie = Trie::new();
        trie.insert("Dr");

        assert!(!trie.find_abbrev(&chars("42."), 2));
        assert!(!trie.find_abbrev(&chars("."), 0));
        assert!(!trie.find_abbrev(&chars("Dr!"), 2));
    }
}
