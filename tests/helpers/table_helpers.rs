//! Helpers for building and querying symbol tables in tests.

use std::sync::Arc;

use versym::semantic::{RefId, ScopeId};
use versym::syntax::{Item, SyntaxTree};
use versym::{Diagnostic, InMemoryProject, SymbolTable};

/// A project with one translation unit per `(path, items)` pair.
pub fn project_of(files: Vec<(&str, Vec<Item>)>) -> Arc<InMemoryProject> {
    let mut project = InMemoryProject::new();
    for (path, items) in files {
        project.add_translation_unit(path, SyntaxTree::new(items));
    }
    Arc::new(project)
}

/// Build the named translation units in the given order, then resolve.
///
/// Returns the table with build and resolve diagnostics, in that order.
pub fn build_in_order(
    project: Arc<InMemoryProject>,
    order: &[&str],
) -> (SymbolTable, Vec<Diagnostic>) {
    let mut table = SymbolTable::with_project(project);
    let mut diagnostics = Vec::new();
    for path in order {
        let built = table
            .build_translation_unit(path)
            .unwrap_or_else(|err| panic!("failed to build {}: {}", path, err));
        diagnostics.extend(built);
    }
    diagnostics.extend(table.resolve());
    (table, diagnostics)
}

/// Build every translation unit of a single-file project and resolve.
pub fn build_single(items: Vec<Item>) -> (SymbolTable, Vec<Diagnostic>) {
    build_in_order(project_of(vec![("top.sv", items)]), &["top.sv"])
}

/// Get a scope by its path below the root, panicking with the dump if absent.
pub fn get_scope(table: &SymbolTable, path: &[&str]) -> ScopeId {
    table.lookup_path(path).unwrap_or_else(|| {
        panic!(
            "Expected scope {:?} to exist in:\n{}",
            path,
            table.print_definitions()
        )
    })
}

/// Every reference component in the table, chains in pre-order.
pub fn all_references(table: &SymbolTable) -> Vec<RefId> {
    fn walk(table: &SymbolTable, reference: RefId, out: &mut Vec<RefId>) {
        out.push(reference);
        for child in table.reference(reference).children() {
            walk(table, *child, out);
        }
    }
    let mut out = Vec::new();
    for scope in table.scope_ids() {
        for root in table.pending_references(scope) {
            walk(table, *root, &mut out);
        }
    }
    out
}

/// Assert the component written as `written` (e.g. `@c.x`) resolves to `expected`.
pub fn assert_resolves_to(table: &SymbolTable, written: &str, expected: &str) {
    let found = all_references(table)
        .into_iter()
        .filter(|r| table.reference_path(*r) == written)
        .collect::<Vec<_>>();
    assert!(!found.is_empty(), "no reference written as {}", written);
    for reference in found {
        let target = table.resolved_target(reference).map(|t| table.full_path(t));
        assert_eq!(
            target.as_deref(),
            Some(expected),
            "{} resolved to {:?}",
            written,
            target
        );
    }
}

/// Assert every component written as `written` is still unbound.
pub fn assert_unresolved(table: &SymbolTable, written: &str) {
    for reference in all_references(table) {
        if table.reference_path(reference) == written {
            assert_eq!(
                table.resolved_target(reference),
                None,
                "{} unexpectedly resolved",
                written
            );
        }
    }
}
