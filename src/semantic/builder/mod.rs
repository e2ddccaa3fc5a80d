//! Builder: populates a symbol table from one syntax tree.
//!
//! Declarations become scope nodes; every reference becomes a chain in the
//! scope where it was written and waits for the resolver. Only bindings that
//! are known while building (self references, anonymous types, out-of-line
//! qualifiers) are made here. Out-of-line bodies join their class at the end
//! of the first build in which the class is declared.

mod context;
mod declarations;
mod out_of_line;
mod references;
mod types;

use crate::project::SourceFile;
use crate::semantic::Diagnostic;
use crate::semantic::symbol_table::SymbolTable;

use context::Builder;

/// Add the declarations and references of `source` to `table`.
///
/// Returns diagnostics for problems visible within this file alone.
pub fn build_symbol_table(source: &SourceFile, table: &mut SymbolTable) -> Vec<Diagnostic> {
    table.register_file(source);
    let Some(tree) = source.tree() else {
        tracing::debug!("[BUILD] {} has no syntax tree", source.path());
        return Vec::new();
    };
    tracing::debug!("[BUILD] {} ({} items)", source.path(), tree.items.len());
    let mut builder = Builder::new(table, source.id());
    builder.build_items(&tree.items);
    let mut diagnostics = builder.finish();
    diagnostics.extend(out_of_line::splice_detached(table));
    diagnostics
}
