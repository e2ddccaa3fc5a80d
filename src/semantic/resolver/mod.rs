//! Resolver: binds pending reference chains to scope nodes.
//!
//! Every scope's pending chains are walked root first. A component whose
//! parent could not be bound is skipped silently; the parent already
//! accounts for the failure. Bindings are only ever added, so running a
//! pass again only binds what has become resolvable since.
//!
//! Lookups sometimes need a chain that has not been visited yet: the
//! declared type of a variable, the target of a typedef, or the base class
//! of a class. Those chains are resolved on demand, silently, with a guard
//! against cycles through typedefs and `extends`.

mod canonical;
mod lookup;

use rustc_hash::FxHashSet;

use crate::semantic::diagnostics::{Diagnostic, DiagnosticCollector};
use crate::semantic::symbol_table::{KindCheck, RefId, RefKind, ScopeId, SymbolTable};

pub(crate) use canonical::Canonical;

/// One resolve pass over a table.
pub struct Resolver<'t> {
    pub(crate) table: &'t mut SymbolTable,
    /// Chains being resolved on demand; re-entry means a cycle
    in_progress: FxHashSet<RefId>,
}

impl<'t> Resolver<'t> {
    pub fn new(table: &'t mut SymbolTable) -> Self {
        Self {
            table,
            in_progress: FxHashSet::default(),
        }
    }

    /// Try to bind every unresolved component in the table.
    pub fn resolve_all(&mut self) -> Vec<Diagnostic> {
        let mut diagnostics = DiagnosticCollector::new();
        let scopes: Vec<ScopeId> = self.table.scope_ids().collect();
        for scope in scopes {
            let roots = self.table.pending_references(scope).to_vec();
            for root in roots {
                self.resolve_chain(root, &mut diagnostics);
            }
        }
        diagnostics.take()
    }

    /// Bind only chain roots whose target is a child of their own scope.
    /// Reports nothing.
    pub fn resolve_locally(&mut self) {
        let scopes: Vec<ScopeId> = self.table.scope_ids().collect();
        for scope in scopes {
            let roots = self.table.pending_references(scope).to_vec();
            for root in roots {
                let component = self.table.component(root);
                if component.is_resolved()
                    || !matches!(component.ref_kind, RefKind::Unqualified | RefKind::Immediate)
                {
                    continue;
                }
                let Some(found) = self.table.find_child(scope, &component.identifier) else {
                    continue;
                };
                if component.required.check(self.table.kind_of(found)) == KindCheck::Match {
                    self.table.bind_reference(root, found);
                }
            }
        }
    }

    fn resolve_chain(&mut self, node: RefId, diagnostics: &mut DiagnosticCollector) {
        if !self.table.component(node).is_resolved() {
            if let Err(diagnostic) = self.resolve_component(node) {
                diagnostics.add(diagnostic);
            }
            if self.table.resolved_target(node).is_none() {
                return;
            }
        }
        let children = self.table.reference(node).children().to_vec();
        for child in children {
            self.resolve_chain(child, diagnostics);
        }
    }

    /// Bind one component whose parent (if any) is already bound.
    ///
    /// `Ok` with the component still unbound means the lookup could not be
    /// attempted yet (an unresolved type); that is not reported here.
    pub(crate) fn resolve_component(&mut self, node: RefId) -> Result<(), Diagnostic> {
        let component = self.table.component(node).clone();
        let home = self.table.reference(node).home();
        let found = match component.ref_kind {
            RefKind::Unqualified => self.lookup_unqualified(node, home, &component)?,
            RefKind::Immediate => self.lookup_local(node, home, &component)?,
            RefKind::DirectMember => match self.parent_target(node) {
                Some(context) => self.lookup_direct_member(node, context, &component)?,
                None => None,
            },
            RefKind::MemberOfTypeOfParent => match self.parent_target(node) {
                Some(context) => self.lookup_member_of_type(node, context, &component)?,
                None => None,
            },
        };
        if let Some(found) = found {
            tracing::trace!(
                "[RESOLVE] {} -> {}",
                self.table.reference_path(node),
                self.table.full_path(found)
            );
            self.table.bind_reference(node, found);
        }
        Ok(())
    }

    fn parent_target(&self, node: RefId) -> Option<ScopeId> {
        let parent = self.table.reference(node).parent()?;
        self.table.resolved_target(parent)
    }

    /// Resolve the chain down to `reference` without reporting, and return its target.
    pub(crate) fn ensure_resolved(&mut self, reference: RefId) -> Option<ScopeId> {
        if self.table.component(reference).is_resolved() {
            return self.table.resolved_target(reference);
        }
        if !self.in_progress.insert(reference) {
            tracing::trace!("[RESOLVE] cycle through {}", self.table.reference_path(reference));
            return None;
        }
        for node in self.table.chain_to(reference) {
            if self.table.component(node).is_resolved() {
                continue;
            }
            if self.resolve_component(node).is_err() || !self.table.component(node).is_resolved() {
                break;
            }
        }
        self.in_progress.remove(&reference);
        self.table.resolved_target(reference)
    }
}
