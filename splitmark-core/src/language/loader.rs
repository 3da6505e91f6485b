//! Rule table loader
//!
//! The CJK and Latin tables are embedded at compile time and parsed once.

use std::sync::OnceLock;

use crate::error::RuleTableError;
use crate::language::config::RuleTableConfig;
use crate::language::rules::{RuleBook, RuleSet};

const CJK_TABLE: &str = include_str!("../../configs/languages/cjk.toml");
const LATIN_TABLE: &str = include_str!("../../configs/languages/latin.toml");

/// Embedded rule book, built on first access
static EMBEDDED: OnceLock<Result<RuleBook, RuleTableError>> = OnceLock::new();

/// Shared rule book built from the embedded tables
pub fn standard_rules() -> Result<&'static RuleBook, RuleTableError> {
    EMBEDDED
        .get_or_init(|| {
            let cjk = load_rule_set("cjk", CJK_TABLE)?;
            let latin = load_rule_set("latin", LATIN_TABLE)?;
            log::trace!("loaded embedded rule tables: {}, {}", cjk.name(), latin.name());
            Ok(RuleBook::new(cjk, latin))
        })
        .as_ref()
        .map_err(Clone::clone)
}

/// Parse and compile one rule table from TOML
pub fn load_rule_set(code: &str, toml_str: &str) -> Result<RuleSet, RuleTableError> {
    let config: RuleTableConfig = toml::from_str(toml_str).map_err(|e| RuleTableError::Parse {
        code: code.to_string(),
        reason: e.to_string(),
    })?;

    RuleSet::from_config(&config).map_err(|reason| RuleTableError::Invalid {
        code: code.to_string(),
        reason,
    })
}
