use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};

use smol_str::SmolStr;

use super::symbol::SymbolInfo;

/// Identity of one [`SymbolTable`](super::SymbolTable) instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TableId(u32);

impl TableId {
    pub(super) fn next() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle of a scope node: an arena index tagged with its owning table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScopeId {
    table: TableId,
    index: u32,
}

impl ScopeId {
    pub(super) fn new(table: TableId, index: usize) -> Self {
        Self {
            table,
            index: index as u32,
        }
    }

    /// Get the index into the owning table's arena
    pub fn index(self) -> usize {
        self.index as usize
    }

    pub fn table(self) -> TableId {
        self.table
    }
}

/// A named node of the scope tree.
#[derive(Debug, Clone)]
pub struct ScopeNode {
    pub(super) name: SmolStr,
    pub(super) parent: Option<ScopeId>,
    /// Sorted so dumps and iteration are deterministic
    pub(super) children: BTreeMap<SmolStr, ScopeId>,
    pub(super) info: SymbolInfo,
}

impl ScopeNode {
    pub(super) fn new(name: SmolStr, parent: Option<ScopeId>, info: SymbolInfo) -> Self {
        Self {
            name,
            parent,
            children: BTreeMap::new(),
            info,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    pub fn info(&self) -> &SymbolInfo {
        &self.info
    }

    pub fn find_child(&self, name: &str) -> Option<ScopeId> {
        self.children.get(name).copied()
    }

    /// Children in name order.
    pub fn children(&self) -> impl Iterator<Item = (&str, ScopeId)> + '_ {
        self.children.iter().map(|(name, id)| (name.as_str(), *id))
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}
