//! Language-specific sentence rules
//!
//! Rule families are data-driven: each family is a TOML table compiled
//! into lookup tables once and shared read-only afterwards.

pub(crate) mod config;
pub mod loader;
pub mod rules;
pub(crate) mod tables;

pub use loader::{load_rule_set, standard_rules};
pub use rules::{RuleBook, RuleFamily, RuleSet};
