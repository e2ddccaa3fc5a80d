//! Declarations and design items.

use smol_str::SmolStr;

use super::expr::{Argument, DataType, Expr, Ident, TypeName};
use crate::base::TextRange;

/// The lowered syntax of one translation unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyntaxTree {
    pub items: Vec<Item>,
}

impl SyntaxTree {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }
}

/// A description or module/class/package item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    /// `module` or `interface`
    Module(ModuleDecl),
    Package(PackageDecl),
    Class(ClassDecl),
    /// `function` or `task`, possibly defined out-of-line
    Subroutine(SubroutineDecl),
    /// `function new` inside a class
    Constructor(ConstructorDecl),
    Parameter(ParamDecl),
    /// Variable or net declaration
    Data(DataDecl),
    /// Module or interface instantiation
    Instances(InstantiationDecl),
    Typedef(TypedefDecl),
    /// Non-ANSI port declaration in a body
    Port(PortDecl),
    Generate(GenerateIf),
    Assign(ContinuousAssign),
    /// Any statement, reduced to its expression
    Statement(Expr),
    Include(Include),
}

// ============================================================================
// Design elements
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    Module,
    Interface,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDecl {
    pub kind: ModuleKind,
    pub name: Ident,
    pub params: Vec<ParamDecl>,
    /// Header ports, ANSI (`input a`) or non-ANSI (`a`)
    pub ports: Vec<PortDecl>,
    pub items: Vec<Item>,
}

impl ModuleDecl {
    pub fn new(name: impl Into<Ident>) -> Self {
        Self {
            kind: ModuleKind::Module,
            name: name.into(),
            params: Vec::new(),
            ports: Vec::new(),
            items: Vec::new(),
        }
    }

    pub fn interface(name: impl Into<Ident>) -> Self {
        Self {
            kind: ModuleKind::Interface,
            ..Self::new(name)
        }
    }

    pub fn with_params(mut self, params: Vec<ParamDecl>) -> Self {
        self.params = params;
        self
    }

    pub fn with_ports(mut self, ports: Vec<PortDecl>) -> Self {
        self.ports = ports;
        self
    }

    pub fn with_items(mut self, items: Vec<Item>) -> Self {
        self.items = items;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDecl {
    pub name: Ident,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    pub name: Ident,
    pub params: Vec<ParamDecl>,
    pub extends: Option<TypeName>,
    pub items: Vec<Item>,
}

impl ClassDecl {
    pub fn new(name: impl Into<Ident>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            extends: None,
            items: Vec::new(),
        }
    }

    pub fn extends(mut self, base: TypeName) -> Self {
        self.extends = Some(base);
        self
    }

    pub fn with_params(mut self, params: Vec<ParamDecl>) -> Self {
        self.params = params;
        self
    }

    pub fn with_items(mut self, items: Vec<Item>) -> Self {
        self.items = items;
        self
    }
}

// ============================================================================
// Subroutines
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubroutineKind {
    Function,
    Task,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubroutineName {
    /// `function f`
    Simple(Ident),
    /// `function C::f`
    OutOfLine { class: Ident, method: Ident },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubroutineDecl {
    pub kind: SubroutineKind,
    pub name: SubroutineName,
    /// Function return type; `Implicit` for tasks and `void`-less functions
    pub return_type: DataType,
    pub ports: Vec<PortDecl>,
    pub items: Vec<Item>,
}

impl SubroutineDecl {
    pub fn function(name: impl Into<Ident>) -> Self {
        Self {
            kind: SubroutineKind::Function,
            name: SubroutineName::Simple(name.into()),
            return_type: DataType::Implicit,
            ports: Vec::new(),
            items: Vec::new(),
        }
    }

    pub fn task(name: impl Into<Ident>) -> Self {
        Self {
            kind: SubroutineKind::Task,
            ..Self::function(name)
        }
    }

    /// Turn this into an out-of-line definition of a method of `class`.
    pub fn out_of_line(mut self, class: impl Into<Ident>) -> Self {
        let method = match self.name {
            SubroutineName::Simple(name) => name,
            SubroutineName::OutOfLine { method, .. } => method,
        };
        self.name = SubroutineName::OutOfLine {
            class: class.into(),
            method,
        };
        self
    }

    pub fn returns(mut self, return_type: DataType) -> Self {
        self.return_type = return_type;
        self
    }

    pub fn with_ports(mut self, ports: Vec<PortDecl>) -> Self {
        self.ports = ports;
        self
    }

    pub fn with_items(mut self, items: Vec<Item>) -> Self {
        self.items = items;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstructorDecl {
    pub ports: Vec<PortDecl>,
    pub items: Vec<Item>,
}

// ============================================================================
// Parameters, data, ports
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamDefault {
    Value(Expr),
    Type(DataType),
}

/// `parameter int N = 4` or `parameter type T = int`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDecl {
    pub is_type: bool,
    pub data_type: DataType,
    pub name: Ident,
    pub default: Option<ParamDefault>,
}

impl ParamDecl {
    pub fn value(data_type: DataType, name: impl Into<Ident>, default: Option<Expr>) -> Self {
        Self {
            is_type: false,
            data_type,
            name: name.into(),
            default: default.map(ParamDefault::Value),
        }
    }

    pub fn type_param(name: impl Into<Ident>, default: Option<DataType>) -> Self {
        Self {
            is_type: true,
            data_type: DataType::Implicit,
            name: name.into(),
            default: default.map(ParamDefault::Type),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDecl {
    pub name: Ident,
    pub init: Option<Expr>,
}

impl From<&str> for VarDecl {
    fn from(name: &str) -> Self {
        VarDecl {
            name: Ident::new(name),
            init: None,
        }
    }
}

/// `T a, b = x;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDecl {
    pub data_type: DataType,
    pub vars: Vec<VarDecl>,
}

impl DataDecl {
    pub fn new(data_type: DataType, vars: Vec<VarDecl>) -> Self {
        Self { data_type, vars }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDirection {
    Input,
    Output,
    Inout,
    Ref,
}

/// Port declaration; `direction` is absent for bare header names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortDecl {
    pub direction: Option<PortDirection>,
    pub data_type: DataType,
    pub names: Vec<Ident>,
}

impl PortDecl {
    pub fn new(direction: Option<PortDirection>, data_type: DataType, names: Vec<Ident>) -> Self {
        Self {
            direction,
            data_type,
            names,
        }
    }
}

// ============================================================================
// Instances
// ============================================================================

/// Port connection of an instance (`.clk(clk)` or positional).
pub type PortConnection = Argument;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub name: Ident,
    pub ports: Vec<PortConnection>,
}

impl Instance {
    pub fn new(name: impl Into<Ident>, ports: Vec<PortConnection>) -> Self {
        Self {
            name: name.into(),
            ports,
        }
    }
}

/// `pp #(.N(1)) a(), b(.x(y));`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstantiationDecl {
    pub type_name: TypeName,
    pub instances: Vec<Instance>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedefDecl {
    pub name: Ident,
    pub data_type: DataType,
}

// ============================================================================
// Generate, assignments, includes
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateBlock {
    pub label: Option<Ident>,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElseBranch {
    If(Box<GenerateIf>),
    Block(GenerateBlock),
}

/// `if (cond) begin : label ... end else ...` at generate level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateIf {
    pub condition: Expr,
    pub then_block: GenerateBlock,
    pub else_branch: Option<ElseBranch>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinuousAssign {
    pub lhs: Expr,
    pub rhs: Expr,
}

/// `` `include "path" `` left in place by the preprocessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Include {
    pub path: SmolStr,
    pub range: Option<TextRange>,
}
