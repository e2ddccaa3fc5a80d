use super::reference::RefId;
use super::scope::ScopeId;
use super::symbol::{RequiredKind, SymbolKind};
use super::table::SymbolTable;

impl SymbolTable {
    // ============================================================
    // Scope queries
    // ============================================================

    pub fn find_child(&self, scope: ScopeId, name: &str) -> Option<ScopeId> {
        self.scope(scope).find_child(name)
    }

    /// Follow child names down from the root.
    pub fn lookup_path(&self, path: &[&str]) -> Option<ScopeId> {
        path.iter()
            .try_fold(self.root(), |scope, name| self.find_child(scope, name))
    }

    /// `scope` followed by each enclosing scope up to the root.
    pub fn ancestors(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(Some(scope), move |id| self.scope(*id).parent())
    }

    /// Plain lexical lookup: the nearest enclosing scope with a child `name`.
    pub fn lookup_upward(&self, scope: ScopeId, name: &str) -> Option<ScopeId> {
        self.ancestors(scope)
            .find_map(|ancestor| self.find_child(ancestor, name))
    }

    /// `$root::a::b` style path of a scope node.
    pub fn full_path(&self, scope: ScopeId) -> String {
        let mut names: Vec<&str> = self
            .ancestors(scope)
            .map(|id| self.scope(id).name())
            .collect();
        names.reverse();
        names.join("::")
    }

    /// Kind of the scope, as shown in member-lookup messages.
    pub fn kind_of(&self, scope: ScopeId) -> SymbolKind {
        self.info(scope).kind
    }

    // ============================================================
    // Reference chain queries
    // ============================================================

    pub fn chain_root(&self, reference: RefId) -> RefId {
        let mut current = reference;
        while let Some(parent) = self.reference(current).parent() {
            current = parent;
        }
        current
    }

    /// Components from the chain root down to `reference`, inclusive.
    pub fn chain_to(&self, reference: RefId) -> Vec<RefId> {
        let mut path: Vec<RefId> =
            std::iter::successors(Some(reference), |id| self.reference(*id).parent()).collect();
        path.reverse();
        path
    }

    /// Written form of the chain up to `reference`, like `@a::b.c`.
    pub fn reference_path(&self, reference: RefId) -> String {
        self.chain_to(reference)
            .into_iter()
            .map(|id| {
                let component = self.component(id);
                format!("{}{}", component.ref_kind.prefix(), component.identifier)
            })
            .collect()
    }

    /// Follow the last child at each level down to a leaf.
    pub fn last_leaf(&self, reference: RefId) -> RefId {
        let mut current = reference;
        while let Some(last) = self.reference(current).children().last() {
            current = *last;
        }
        current
    }

    /// Like [`last_leaf`](Self::last_leaf), skipping named parameter
    /// assignments hanging off a type name (`A#(.N(1))::B` ends at `B`).
    pub fn last_type_component(&self, reference: RefId) -> RefId {
        let mut current = reference;
        while let Some(next) = self
            .reference(current)
            .children()
            .iter()
            .rev()
            .find(|child| {
                self.component(**child).required != RequiredKind::Exact(SymbolKind::Parameter)
            })
        {
            current = *next;
        }
        current
    }
}
