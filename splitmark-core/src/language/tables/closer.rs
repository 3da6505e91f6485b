//! Closing quote and bracket lookup

use std::collections::HashSet;

/// Characters that close an enclosure right after a terminator
#[derive(Debug, Clone, Default)]
pub struct CloserTable {
    chars: HashSet<char>,
}

impl CloserTable {
    /// Create from configured closing characters
    pub fn new(closers: &[char]) -> Self {
        Self {
            chars: closers.iter().copied().collect(),
        }
    }

    #[inline]
    pub fn is_closer(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }
}
