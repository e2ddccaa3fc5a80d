//! # Semantic Analysis
//!
//! This module turns lowered syntax trees into a symbol table: a tree of
//! scopes holding every declaration, plus reference chains for every use of
//! a name. Building and resolving are separate, re-enterable passes:
//!
//! ```text
//! build(file) ...  → scopes + pending reference chains   (any order, any number)
//! resolve()        → bind pending chains, report failures (idempotent)
//! ```

pub mod builder;
pub mod diagnostics;
pub mod resolver;
pub mod symbol_table;

pub use builder::build_symbol_table;
pub use diagnostics::{Diagnostic, DiagnosticCollector, DiagnosticKind, Severity, codes};
pub use resolver::Resolver;
pub use symbol_table::{
    DeclarationType, IntegrityError, KindCheck, RefId, RefKind, ReferenceComponent,
    ReferenceNode, RequiredKind, ScopeId, ScopeNode, SymbolInfo, SymbolKind, SymbolTable,
    TableId,
};
