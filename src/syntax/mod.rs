//! Syntax layer: the normalized SystemVerilog tree consumed by the builder.
//!
//! Parsing and preprocessing happen outside this crate. A front end lowers
//! its concrete syntax tree into these owned types, keeping only what the
//! symbol table needs: declarations with their names and nested items, and
//! expressions reduced to the references they contain.
//!
//! Every identifier carries an optional [`TextRange`](crate::base::TextRange)
//! so diagnostics can point back into the original text.

mod expr;
mod tree;

pub use expr::{
    Argument, Call, DataType, EnumConstant, Expr, Ident, ParamAssignment, Path, PathSegment,
    Separator, StructMember, TypeName, TypeSegment,
};
pub use tree::{
    ClassDecl, ConstructorDecl, ContinuousAssign, DataDecl, ElseBranch, GenerateBlock, GenerateIf,
    Include, Instance, InstantiationDecl, Item, ModuleDecl, ModuleKind, PackageDecl, ParamDecl,
    ParamDefault, PortConnection, PortDecl, PortDirection, SubroutineDecl, SubroutineKind,
    SubroutineName, SyntaxTree, TypedefDecl, VarDecl,
};
