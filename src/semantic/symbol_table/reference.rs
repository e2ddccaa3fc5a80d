use smol_str::SmolStr;

use super::scope::{ScopeId, TableId};
use super::symbol::RequiredKind;
use crate::base::{FileId, TextRange};

/// Handle of a reference component within its owning table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RefId {
    table: TableId,
    index: u32,
}

impl RefId {
    pub(super) fn new(table: TableId, index: usize) -> Self {
        Self {
            table,
            index: index as u32,
        }
    }

    pub fn index(self) -> usize {
        self.index as usize
    }

    pub fn table(self) -> TableId {
        self.table
    }
}

/// How a reference component is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefKind {
    /// Search the home scope, then each enclosing scope
    Unqualified,
    /// Bound while building; only looked up (in the home scope) if still unbound
    Immediate,
    /// Member of the scope the previous component resolved to (`::`)
    DirectMember,
    /// Member of the type of the previous component's symbol (`.`)
    MemberOfTypeOfParent,
}

impl RefKind {
    /// Prefix used when printing a component.
    pub fn prefix(self) -> &'static str {
        match self {
            RefKind::Unqualified => "@",
            RefKind::Immediate => "!",
            RefKind::DirectMember => "::",
            RefKind::MemberOfTypeOfParent => ".",
        }
    }
}

/// One name in a reference chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceComponent {
    pub identifier: SmolStr,
    pub range: Option<TextRange>,
    pub ref_kind: RefKind,
    pub required: RequiredKind,
    /// Non-owning link to the resolved scope node
    pub resolved: Option<ScopeId>,
}

impl ReferenceComponent {
    pub fn new(
        identifier: impl Into<SmolStr>,
        range: Option<TextRange>,
        ref_kind: RefKind,
        required: RequiredKind,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            range,
            ref_kind,
            required,
            resolved: None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }
}

/// A component placed in its chain.
#[derive(Debug, Clone)]
pub struct ReferenceNode {
    pub(super) component: ReferenceComponent,
    pub(super) parent: Option<RefId>,
    pub(super) children: Vec<RefId>,
    /// Scope in which the reference was written
    pub(super) home: ScopeId,
    pub(super) file: Option<FileId>,
}

impl ReferenceNode {
    pub fn component(&self) -> &ReferenceComponent {
        &self.component
    }

    pub fn parent(&self) -> Option<RefId> {
        self.parent
    }

    pub fn children(&self) -> &[RefId] {
        &self.children
    }

    pub fn home(&self) -> ScopeId {
        self.home
    }

    pub fn file(&self) -> Option<FileId> {
        self.file
    }
}
