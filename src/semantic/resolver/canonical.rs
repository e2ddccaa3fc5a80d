//! Canonical types and inherited members.

use rustc_hash::FxHashSet;

use super::Resolver;
use crate::semantic::symbol_table::{ScopeId, SymbolKind};

/// Where a chain of typedefs ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Canonical {
    /// A scope that can have members (struct, class, enum, module, ...)
    Scope(ScopeId),
    /// A built-in type; nothing to look up in
    Primitive,
    /// Some alias along the way is not bound (yet), or the aliases loop
    Unresolved,
}

impl Resolver<'_> {
    /// Follow typedef targets from `scope` until a non-typedef is reached.
    pub(crate) fn canonical(&mut self, scope: ScopeId) -> Canonical {
        let mut current = scope;
        let mut visited = FxHashSet::default();
        loop {
            if self.table.kind_of(current) != SymbolKind::Typedef {
                return Canonical::Scope(current);
            }
            if !visited.insert(current) {
                return Canonical::Unresolved;
            }
            let Some(target_ref) = self.table.info(current).declared_type.user_defined else {
                return Canonical::Primitive;
            };
            match self.ensure_resolved(target_ref) {
                Some(target) => current = target,
                None => return Canonical::Unresolved,
            }
        }
    }

    /// Look for `name` among the children of `scope`, then of its base
    /// classes in `extends` order.
    pub(crate) fn find_member(&mut self, scope: ScopeId, name: &str) -> Option<ScopeId> {
        let mut visited = FxHashSet::default();
        let mut current = Some(scope);
        while let Some(searched) = current {
            if !visited.insert(searched) {
                return None;
            }
            if let Some(found) = self.table.find_child(searched, name) {
                return Some(found);
            }
            current = self.base_class(searched);
        }
        None
    }

    /// The class `class` extends, seen through typedefs.
    pub(crate) fn base_class(&mut self, class: ScopeId) -> Option<ScopeId> {
        if self.table.kind_of(class) != SymbolKind::Class {
            return None;
        }
        let base_ref = self.table.info(class).parent_type?;
        let base = self.ensure_resolved(base_ref)?;
        match self.canonical(base) {
            Canonical::Scope(base) if self.table.kind_of(base) == SymbolKind::Class => Some(base),
            _ => None,
        }
    }
}
