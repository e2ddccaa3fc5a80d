//! Project collaborator tests
//!
//! - Opening translation units and reporting missing or unparsable files
//! - `include expansion through include directories
//! - Rendering diagnostics with file locations

pub mod tests_translation_units;
