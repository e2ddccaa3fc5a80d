use smol_str::SmolStr;

use super::reference::RefId;
use crate::base::{FileId, TextRange};
use crate::syntax::PortDirection;

/// What a scope node declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Root,
    Module,
    Interface,
    Package,
    Class,
    Function,
    Task,
    Parameter,
    Typedef,
    /// Variables, nets and instances share one namespace and one kind.
    DataNetVariableInstance,
    Struct,
    Enum,
    EnumConstant,
    Generate,
    Unspecified,
}

impl SymbolKind {
    /// Human-readable name used in dumps and diagnostics.
    pub fn display(self) -> &'static str {
        match self {
            SymbolKind::Root => "<root>",
            SymbolKind::Module => "module",
            SymbolKind::Interface => "interface",
            SymbolKind::Package => "package",
            SymbolKind::Class => "class",
            SymbolKind::Function => "function",
            SymbolKind::Task => "task",
            SymbolKind::Parameter => "parameter",
            SymbolKind::Typedef => "typedef",
            SymbolKind::DataNetVariableInstance => "data/net/var/instance",
            SymbolKind::Struct => "struct",
            SymbolKind::Enum => "enum",
            SymbolKind::EnumConstant => "<enum constant>",
            SymbolKind::Generate => "generate",
            SymbolKind::Unspecified => "<unspecified>",
        }
    }

    pub fn is_callable(self) -> bool {
        matches!(self, SymbolKind::Function | SymbolKind::Task)
    }
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display())
    }
}

/// Outcome of checking a found symbol against a [`RequiredKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindCheck {
    Match,
    Mismatch,
    /// A typedef was found where a class is required; the alias decides.
    AliasOfClass,
}

/// The kind a reference must resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredKind {
    /// Anything goes
    Unspecified,
    /// Function or task
    Callable,
    /// Class, or a typedef whose canonical type is a class
    Class,
    Exact(SymbolKind),
}

impl RequiredKind {
    /// Requirement for exactly `kind`, folding the special cases.
    pub fn exact(kind: SymbolKind) -> Self {
        match kind {
            SymbolKind::Unspecified => RequiredKind::Unspecified,
            SymbolKind::Class => RequiredKind::Class,
            other => RequiredKind::Exact(other),
        }
    }

    pub fn check(self, actual: SymbolKind) -> KindCheck {
        let matched = match self {
            RequiredKind::Unspecified => true,
            RequiredKind::Callable => actual.is_callable(),
            RequiredKind::Class => {
                if actual == SymbolKind::Typedef {
                    return KindCheck::AliasOfClass;
                }
                actual == SymbolKind::Class
            }
            RequiredKind::Exact(kind) => kind == actual,
        };
        if matched {
            KindCheck::Match
        } else {
            KindCheck::Mismatch
        }
    }

    pub fn display(self) -> &'static str {
        match self {
            RequiredKind::Unspecified => "<unspecified>",
            RequiredKind::Callable => "<callable>",
            RequiredKind::Class => "class",
            RequiredKind::Exact(kind) => kind.display(),
        }
    }

    /// Message for a reference that found `found` where `self` was required.
    pub fn mismatch_message(self, identifier: &str, found: SymbolKind) -> String {
        format!(
            "Expecting reference \"{}\" to resolve to a {}, but found a {}",
            identifier,
            self.display(),
            found.display()
        )
    }
}

impl std::fmt::Display for RequiredKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display())
    }
}

/// Declared type of a symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationType {
    /// Last type component of the chain naming a user-defined type.
    /// `None` means the type is primitive or absent.
    pub user_defined: Option<RefId>,
    /// The type as written, if any
    pub source: Option<SmolStr>,
    /// Set for nets inferred from first use
    pub implicit: bool,
}

/// Payload of one scope node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolInfo {
    pub kind: SymbolKind,
    /// File that introduced the declaration
    pub file: Option<FileId>,
    pub range: Option<TextRange>,
    pub declared_type: DeclarationType,
    /// Base class named in `extends`
    pub parent_type: Option<RefId>,
    pub is_port: bool,
    pub direction: Option<PortDirection>,
    /// Further declarations merged into this one (`output q; reg q;`)
    pub supplements: Vec<TextRange>,
    pub(crate) references: Vec<RefId>,
    pub(crate) anonymous_counter: u32,
}

impl SymbolInfo {
    pub fn new(kind: SymbolKind) -> Self {
        Self {
            kind,
            file: None,
            range: None,
            declared_type: DeclarationType::default(),
            parent_type: None,
            is_port: false,
            direction: None,
            supplements: Vec::new(),
            references: Vec::new(),
            anonymous_counter: 0,
        }
    }

    pub fn at(mut self, file: Option<FileId>, range: Option<TextRange>) -> Self {
        self.file = file;
        self.range = range;
        self
    }

    pub fn with_type(mut self, declared_type: DeclarationType) -> Self {
        self.declared_type = declared_type;
        self
    }

    /// Roots of the reference chains written in this scope.
    pub fn references(&self) -> &[RefId] {
        &self.references
    }

    pub fn anonymous_count(&self) -> u32 {
        self.anonymous_counter
    }
}
