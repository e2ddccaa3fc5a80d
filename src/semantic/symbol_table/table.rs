use std::sync::Arc;

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::integrity::IntegrityError;
use super::reference::{RefId, ReferenceComponent, ReferenceNode};
use super::scope::{ScopeId, ScopeNode, TableId};
use super::symbol::{SymbolInfo, SymbolKind};
use crate::base::{FileId, LineIndex};
use crate::project::{Project, SourceFile};
use crate::semantic::Diagnostic;

/// Name printed for the root scope.
pub(crate) const ROOT_NAME: &str = "$root";

const ANONYMOUS_PREFIX: &str = "%anon-";

/// A file that contributed declarations.
#[derive(Debug, Clone)]
pub(super) struct FileRecord {
    pub path: SmolStr,
    pub lines: Option<LineIndex>,
}

/// An out-of-line method body built before it could join its class.
#[derive(Debug, Clone)]
pub(crate) struct DetachedBody {
    pub body: ScopeId,
    /// Class component of `C::f`; its only child is the method component
    pub qualifier: RefId,
    pub method: RefId,
    pub file: FileId,
}

/// Owner of the scope tree and of every reference chain in it.
///
/// Building only adds nodes and chains; resolving only fills in
/// `resolved` links. Nodes are never removed.
pub struct SymbolTable {
    pub(super) id: TableId,
    /// Arena storage for all scope nodes; index 0 is the root
    pub(super) scopes: Vec<ScopeNode>,
    /// Arena storage for all reference components
    pub(super) refs: Vec<ReferenceNode>,
    pub(super) project: Option<Arc<dyn Project>>,
    pub(super) files: IndexMap<FileId, FileRecord>,
    /// Out-of-line bodies whose class is not declared yet
    pub(super) detached: Vec<DetachedBody>,
}

impl SymbolTable {
    /// An empty table with no project; `` `include `` is ignored.
    pub fn new() -> Self {
        let id = TableId::next();
        Self {
            id,
            scopes: vec![ScopeNode::new(
                SmolStr::new_static(ROOT_NAME),
                None,
                SymbolInfo::new(SymbolKind::Root),
            )],
            refs: Vec::new(),
            project: None,
            files: IndexMap::new(),
            detached: Vec::new(),
        }
    }

    /// An empty table that opens files through `project`.
    pub fn with_project(project: Arc<dyn Project>) -> Self {
        let mut table = Self::new();
        table.project = Some(project);
        table
    }

    pub fn id(&self) -> TableId {
        self.id
    }

    pub fn project(&self) -> Option<&Arc<dyn Project>> {
        self.project.as_ref()
    }

    pub fn root(&self) -> ScopeId {
        ScopeId::new(self.id, 0)
    }

    /// True if `scope` is a handle into this table.
    pub fn owns(&self, scope: ScopeId) -> bool {
        scope.table() == self.id && scope.index() < self.scopes.len()
    }

    /// Node of a scope handle.
    ///
    /// # Panics
    ///
    /// If `id` belongs to another table.
    pub fn scope(&self, id: ScopeId) -> &ScopeNode {
        match self.scopes.get(id.index()) {
            Some(node) if id.table() == self.id => node,
            _ => self.foreign_handle(id.table(), id.index()),
        }
    }

    pub(crate) fn scope_mut(&mut self, id: ScopeId) -> &mut ScopeNode {
        if id.table() != self.id || id.index() >= self.scopes.len() {
            self.foreign_handle(id.table(), id.index());
        }
        &mut self.scopes[id.index()]
    }

    #[cold]
    fn foreign_handle(&self, handle: TableId, index: usize) -> ! {
        let err = IntegrityError::ForeignHandle {
            owner: self.id,
            handle,
            index,
        };
        tracing::error!("[INTEGRITY] {}", err);
        panic!("symbol table integrity violated: {err}");
    }

    pub fn info(&self, id: ScopeId) -> &SymbolInfo {
        &self.scope(id).info
    }

    pub(crate) fn info_mut(&mut self, id: ScopeId) -> &mut SymbolInfo {
        &mut self.scope_mut(id).info
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    pub fn scope_ids(&self) -> impl Iterator<Item = ScopeId> + '_ {
        (0..self.scopes.len()).map(|index| ScopeId::new(self.id, index))
    }

    /// Node of a reference handle.
    ///
    /// # Panics
    ///
    /// If `id` belongs to another table.
    pub fn reference(&self, id: RefId) -> &ReferenceNode {
        match self.refs.get(id.index()) {
            Some(node) if id.table() == self.id => node,
            _ => self.foreign_handle(id.table(), id.index()),
        }
    }

    pub fn component(&self, id: RefId) -> &ReferenceComponent {
        &self.reference(id).component
    }

    pub(crate) fn component_mut(&mut self, id: RefId) -> &mut ReferenceComponent {
        &mut self.reference_mut(id).component
    }

    fn reference_mut(&mut self, id: RefId) -> &mut ReferenceNode {
        if id.table() != self.id || id.index() >= self.refs.len() {
            self.foreign_handle(id.table(), id.index());
        }
        &mut self.refs[id.index()]
    }

    pub fn reference_count(&self) -> usize {
        self.refs.len()
    }

    /// Roots of the chains written directly in `scope`.
    pub fn pending_references(&self, scope: ScopeId) -> &[RefId] {
        &self.info(scope).references
    }

    // ========================================================================
    // Growth
    // ========================================================================

    /// Insert a named child; on a name clash the existing child is returned
    /// as the error and nothing changes.
    pub(crate) fn emplace_child(
        &mut self,
        parent: ScopeId,
        name: &str,
        info: SymbolInfo,
    ) -> Result<ScopeId, ScopeId> {
        if let Some(existing) = self.scope(parent).find_child(name) {
            return Err(existing);
        }
        let id = ScopeId::new(self.id, self.scopes.len());
        let name = SmolStr::new(name);
        tracing::trace!("[TABLE] declare {} {}::{}", info.kind, self.full_path(parent), name);
        self.scopes.push(ScopeNode::new(name.clone(), Some(parent), info));
        self.scope_mut(parent).children.insert(name, id);
        Ok(id)
    }

    /// Insert a child named `%anon-{base}-{n}` from the parent's counter.
    pub(crate) fn emplace_anonymous_child(
        &mut self,
        parent: ScopeId,
        base: &str,
        info: SymbolInfo,
    ) -> ScopeId {
        let name = self.fresh_anonymous_name(parent, base);
        match self.emplace_child(parent, &name, info) {
            Ok(id) | Err(id) => id,
        }
    }

    fn fresh_anonymous_name(&mut self, parent: ScopeId, base: &str) -> SmolStr {
        loop {
            let counter = &mut self.info_mut(parent).anonymous_counter;
            let name = SmolStr::from(format!("{}{}-{}", ANONYMOUS_PREFIX, base, *counter));
            *counter += 1;
            if self.scope(parent).find_child(&name).is_none() {
                return name;
            }
        }
    }

    /// Insert a node that `parent` does not list as a child.
    ///
    /// Lookups from inside the node still see `parent` and its ancestors.
    pub(crate) fn emplace_detached(
        &mut self,
        parent: ScopeId,
        name: &str,
        info: SymbolInfo,
    ) -> ScopeId {
        let id = ScopeId::new(self.id, self.scopes.len());
        tracing::trace!("[TABLE] detached {} {}::{}", info.kind, self.full_path(parent), name);
        self.scopes
            .push(ScopeNode::new(SmolStr::new(name), Some(parent), info));
        id
    }

    /// Make a detached node the child `name` of `parent`.
    pub(crate) fn attach_child(&mut self, parent: ScopeId, name: &str, node: ScopeId) {
        let name = SmolStr::new(name);
        let scope = self.scope_mut(node);
        scope.name = name.clone();
        scope.parent = Some(parent);
        self.scope_mut(parent).children.insert(name, node);
    }

    /// Move the children and chains of the detached node `from` into `into`.
    ///
    /// Children rejected by `keep` stay behind. Anonymous children are
    /// renamed from `into`'s counter when their name is taken. Returns the
    /// children whose name `into` already declares; they stay behind too.
    pub(crate) fn merge_detached(
        &mut self,
        from: ScopeId,
        into: ScopeId,
        keep: impl Fn(&SymbolInfo) -> bool,
    ) -> Vec<ScopeId> {
        let mut clashes = Vec::new();
        let children = std::mem::take(&mut self.scope_mut(from).children);
        for (name, child) in children {
            if !keep(self.info(child)) {
                continue;
            }
            let name = if self.scope(into).find_child(&name).is_none() {
                name
            } else if let Some(rest) = name.strip_prefix(ANONYMOUS_PREFIX) {
                self.rename_anonymous(child, into, rest)
            } else {
                clashes.push(child);
                continue;
            };
            self.attach_child(into, &name, child);
        }

        let references = std::mem::take(&mut self.info_mut(from).references);
        for node in self.refs.iter_mut().filter(|node| node.home == from) {
            node.home = into;
        }
        self.info_mut(into).references.extend(references);
        clashes
    }

    /// Pick a fresh `%anon-` name in `parent` for `node`, whose current name
    /// ends in `base-N`, and rename the components bound under the old name.
    fn rename_anonymous(&mut self, node: ScopeId, parent: ScopeId, rest: &str) -> SmolStr {
        let base = rest.rsplit_once('-').map_or(rest, |(base, _)| base);
        let name = self.fresh_anonymous_name(parent, base);
        let old = std::mem::replace(&mut self.scope_mut(node).name, name.clone());
        for reference in &mut self.refs {
            let component = &mut reference.component;
            if component.resolved == Some(node) && component.identifier == old {
                component.identifier = name.clone();
            }
        }
        name
    }

    /// Start a new chain in `home`; it joins the home scope's pending list.
    pub(crate) fn add_root_reference(
        &mut self,
        home: ScopeId,
        file: Option<FileId>,
        component: ReferenceComponent,
    ) -> RefId {
        let id = RefId::new(self.id, self.refs.len());
        self.refs.push(ReferenceNode {
            component,
            parent: None,
            children: Vec::new(),
            home,
            file,
        });
        self.info_mut(home).references.push(id);
        id
    }

    /// Extend a chain with a component below `parent`.
    pub(crate) fn add_child_reference(
        &mut self,
        parent: RefId,
        component: ReferenceComponent,
    ) -> RefId {
        let id = RefId::new(self.id, self.refs.len());
        let (home, file) = {
            let parent = self.reference(parent);
            (parent.home, parent.file)
        };
        self.refs.push(ReferenceNode {
            component,
            parent: Some(parent),
            children: Vec::new(),
            home,
            file,
        });
        self.reference_mut(parent).children.push(id);
        id
    }

    pub(crate) fn push_detached(&mut self, body: DetachedBody) {
        self.detached.push(body);
    }

    pub(crate) fn take_detached(&mut self) -> Vec<DetachedBody> {
        std::mem::take(&mut self.detached)
    }

    /// Point a reference component at a scope node.
    ///
    /// The target must belong to this table; [`check_integrity`](Self::check_integrity)
    /// reports any that do not, and dropping such a table panics.
    pub fn bind_reference(&mut self, reference: RefId, target: ScopeId) {
        self.component_mut(reference).resolved = Some(target);
    }

    /// Resolved target of a component, if it is bound into this table.
    pub fn resolved_target(&self, reference: RefId) -> Option<ScopeId> {
        self.component(reference)
            .resolved
            .filter(|target| self.owns(*target))
    }

    // ========================================================================
    // Files
    // ========================================================================

    pub(crate) fn register_file(&mut self, source: &SourceFile) {
        self.files
            .entry(source.id())
            .or_insert_with(|| FileRecord {
                path: SmolStr::new(source.path()),
                lines: source.line_index(),
            });
    }

    /// Path of a file that contributed declarations.
    pub fn file_path(&self, file: FileId) -> Option<&str> {
        self.files.get(&file).map(|record| record.path.as_str())
    }

    /// Render a diagnostic with its file location when known.
    pub fn render_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let record = diagnostic.file.and_then(|file| self.files.get(&file));
        diagnostic.render(
            record.map(|r| r.path.as_str()),
            record.and_then(|r| r.lines.as_ref()),
        )
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SymbolTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymbolTable")
            .field("id", &self.id)
            .field("scopes", &self.scopes.len())
            .field("references", &self.refs.len())
            .field("detached", &self.detached.len())
            .field("has_project", &self.project.is_some())
            .finish()
    }
}
