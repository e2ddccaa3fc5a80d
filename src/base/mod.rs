//! Foundation types for the versym toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`] - Compact file identifiers handed out by a project
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineCol`], [`LineIndex`] - Line/column conversion for diagnostics
//!
//! This module has NO dependencies on other versym modules.

mod file_id;
mod span;

pub use file_id::FileId;
pub use span::{LineCol, LineIndex, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
