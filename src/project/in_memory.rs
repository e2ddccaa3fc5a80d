use std::sync::Arc;

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::{Project, ProjectError, SourceFile};
use crate::base::FileId;
use crate::syntax::SyntaxTree;

/// A project whose files are registered up front as lowered syntax trees.
///
/// File ids are assigned in registration order and keyed by normalized path,
/// so re-registering a path replaces its content but keeps its id.
#[derive(Debug, Default)]
pub struct InMemoryProject {
    files: IndexMap<SmolStr, Arc<SourceFile>>,
    translation_units: Vec<SmolStr>,
    /// Directories tried, in order, for `` `include `` paths
    include_dirs: Vec<SmolStr>,
}

impl InMemoryProject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_include_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.include_dirs
            .extend(dirs.into_iter().map(|d| normalize_path(&d.into())));
        self
    }

    /// Register a translation unit.
    pub fn add_translation_unit(&mut self, path: &str, tree: SyntaxTree) -> FileId {
        let id = self.insert(path, |id, path| SourceFile::new(id, path, tree));
        self.mark_translation_unit(path);
        id
    }

    /// Register a translation unit together with its text.
    pub fn add_translation_unit_with_text(
        &mut self,
        path: &str,
        text: &str,
        tree: SyntaxTree,
    ) -> FileId {
        let id = self.insert(path, |id, path| {
            SourceFile::new(id, path, tree).with_text(text)
        });
        self.mark_translation_unit(path);
        id
    }

    /// Register a translation unit that failed to parse.
    pub fn add_unparsable(&mut self, path: &str, message: &str) -> FileId {
        let id = self.insert(path, |id, path| SourceFile::unparsable(id, path, message));
        self.mark_translation_unit(path);
        id
    }

    /// Register a file that is only reachable through `` `include ``.
    pub fn add_include_file(&mut self, path: &str, tree: SyntaxTree) -> FileId {
        self.insert(path, |id, path| SourceFile::new(id, path, tree))
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    fn insert(&mut self, path: &str, make: impl FnOnce(FileId, SmolStr) -> SourceFile) -> FileId {
        let key = normalize_path(path);
        let id = match self.files.get_index_of(&key) {
            Some(index) => FileId::new(index),
            None => FileId::new(self.files.len()),
        };
        let file = make(id, key.clone());
        tracing::trace!("[PROJECT] register {} as {}", key, id);
        self.files.insert(key, Arc::new(file));
        id
    }

    fn mark_translation_unit(&mut self, path: &str) {
        let key = normalize_path(path);
        if !self.translation_units.contains(&key) {
            self.translation_units.push(key);
        }
    }

    fn lookup(&self, path: &str) -> Option<Arc<SourceFile>> {
        self.files.get(&normalize_path(path)).cloned()
    }
}

impl Project for InMemoryProject {
    fn open_translation_unit(&self, path: &str) -> Result<Arc<SourceFile>, ProjectError> {
        if !self.translation_units.contains(&normalize_path(path)) {
            return Err(ProjectError::not_found(path));
        }
        self.lookup(path)
            .ok_or_else(|| ProjectError::not_found(path))
    }

    fn open_included_file(&self, path: &str) -> Result<Arc<SourceFile>, ProjectError> {
        if let Some(file) = self.lookup(path) {
            return Ok(file);
        }
        self.include_dirs
            .iter()
            .find_map(|dir| self.lookup(&format!("{}/{}", dir, path)))
            .ok_or_else(|| ProjectError::not_found(path))
    }

    fn translation_units(&self) -> Vec<SmolStr> {
        self.translation_units.clone()
    }

    fn source(&self, file: FileId) -> Option<Arc<SourceFile>> {
        self.files
            .get_index(file.index())
            .map(|(_, source)| Arc::clone(source))
    }
}

/// Normalize a path so that `./a//b.sv` and `a/b.sv` name the same file.
pub(crate) fn normalize_path(path: &str) -> SmolStr {
    let unified = path.replace('\\', "/");
    let parts: Vec<&str> = unified
        .split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect();
    let joined = parts.join("/");
    if unified.starts_with('/') {
        SmolStr::from(format!("/{}", joined))
    } else {
        SmolStr::from(joined)
    }
}
