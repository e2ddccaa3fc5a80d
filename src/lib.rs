//! # versym-base
//!
//! Symbol table and cross-reference resolver for SystemVerilog.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! semantic  → Scope tree, reference chains, builder, resolver, diagnostics
//!   ↓
//! project   → Project trait, SourceFile, in-memory project
//!   ↓
//! syntax    → Normalized SystemVerilog syntax tree
//!   ↓
//! base      → Primitives (FileId, TextRange, LineIndex)
//! ```

// ============================================================================
// MODULES (dependency order: base → syntax → project → semantic)
// ============================================================================

/// Foundation types: FileId, TextRange, line/column conversion
pub mod base;

/// Syntax: lowered declarations and expressions consumed by the builder
pub mod syntax;

/// Project management: opening translation units and includes
pub mod project;

/// Semantic model: symbol table, builder, resolver
pub mod semantic;

// Re-export foundation types
pub use base::{FileId, LineCol, LineIndex, TextRange, TextSize};

// Re-export the main entry points
pub use project::{InMemoryProject, Project, ProjectError, SourceFile};
pub use semantic::{Diagnostic, DiagnosticKind, SymbolTable};
