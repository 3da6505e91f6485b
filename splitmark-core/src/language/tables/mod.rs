//! Runtime tables for sentence rules
//!
//! All tables are allocation-free during lookup.

pub mod abbreviation;
pub mod closer;
pub mod terminator;

pub use abbreviation::Trie;
pub use closer::CloserTable;
pub use terminator::{DotRole, DotTable, TermTable};
