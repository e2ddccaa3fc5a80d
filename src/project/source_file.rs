use std::sync::Arc;

use smol_str::SmolStr;

use crate::base::{FileId, LineIndex};
use crate::syntax::SyntaxTree;

/// One opened file: identity, path, optional text, and its syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    id: FileId,
    path: SmolStr,
    text: Option<Arc<str>>,
    tree: Option<SyntaxTree>,
    parse_error: Option<String>,
}

impl SourceFile {
    pub fn new(id: FileId, path: impl Into<SmolStr>, tree: SyntaxTree) -> Self {
        Self {
            id,
            path: path.into(),
            text: None,
            tree: Some(tree),
            parse_error: None,
        }
    }

    /// A file whose parse failed; no tree is available.
    pub fn unparsable(id: FileId, path: impl Into<SmolStr>, message: impl Into<String>) -> Self {
        Self {
            id,
            path: path.into(),
            text: None,
            tree: None,
            parse_error: Some(message.into()),
        }
    }

    /// Attach the original text, used to render line/column locations.
    pub fn with_text(mut self, text: impl Into<Arc<str>>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn id(&self) -> FileId {
        self.id
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn tree(&self) -> Option<&SyntaxTree> {
        self.tree.as_ref()
    }

    pub fn parse_error(&self) -> Option<&str> {
        self.parse_error.as_deref()
    }

    pub fn line_index(&self) -> Option<LineIndex> {
        self.text.as_deref().map(LineIndex::new)
    }
}
