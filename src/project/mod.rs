//! Project layer: where translation units come from.
//!
//! The symbol table never reads files itself. It asks a [`Project`] to open a
//! translation unit or an included file and gets back a [`SourceFile`] with
//! its lowered syntax tree. [`InMemoryProject`] is the in-process
//! implementation used by tools that already hold parsed trees.

mod in_memory;
mod source_file;

use std::sync::Arc;

use smol_str::SmolStr;
use thiserror::Error;

use crate::base::FileId;

pub use in_memory::InMemoryProject;
pub use source_file::SourceFile;

/// Errors returned by a [`Project`] when a file cannot be provided.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectError {
    /// The path is not known to the project.
    #[error("file not found: {path}")]
    NotFound { path: SmolStr },

    /// The file exists but its syntax could not be produced.
    #[error("{path}: parse failed: {message}")]
    Parse { path: SmolStr, message: String },
}

impl ProjectError {
    /// Create a not-found error.
    pub fn not_found(path: impl Into<SmolStr>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create a parse error.
    pub fn parse(path: impl Into<SmolStr>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// File-set collaborator of the symbol table.
///
/// Opening the same path twice must return the same [`FileId`].
pub trait Project: std::fmt::Debug {
    /// Open a top-level file by its referenced path.
    fn open_translation_unit(&self, path: &str) -> Result<Arc<SourceFile>, ProjectError>;

    /// Open a file named by an `` `include `` directive.
    fn open_included_file(&self, path: &str) -> Result<Arc<SourceFile>, ProjectError>;

    /// Paths of all translation units, in the project's natural order.
    fn translation_units(&self) -> Vec<SmolStr>;

    /// Look up an already-known file by id.
    fn source(&self, file: FileId) -> Option<Arc<SourceFile>>;
}
