//! Input handling module

pub mod document_reader;
pub mod file_reader;
pub mod glob_resolver;

pub use document_reader::{parse_json_document, parse_text_document, read_document};
pub use file_reader::FileReader;
pub use glob_resolver::resolve_patterns;
