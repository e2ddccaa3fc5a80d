//! Table-level build and resolve passes.

use std::time::Instant;

use super::table::SymbolTable;
use crate::project::{ProjectError, SourceFile};
use crate::semantic::builder::build_symbol_table;
use crate::semantic::diagnostics::{Diagnostic, DiagnosticCollector};
use crate::semantic::resolver::Resolver;

impl SymbolTable {
    /// Build a file the caller already holds, without going through a project.
    pub fn build_source(&mut self, source: &SourceFile) -> Vec<Diagnostic> {
        build_symbol_table(source, self)
    }

    /// Open `path` through the project and build it.
    ///
    /// Fails with a `NotFound` diagnostic for a path the project does not
    /// know (or when there is no project) and with `InvalidArgument` when
    /// the file did not parse. Otherwise returns the build diagnostics.
    pub fn build_translation_unit(&mut self, path: &str) -> Result<Vec<Diagnostic>, Diagnostic> {
        let Some(project) = self.project.clone() else {
            return Err(ProjectError::not_found(path).into());
        };
        let source = project.open_translation_unit(path)?;
        if let Some(message) = source.parse_error() {
            return Err(ProjectError::parse(source.path(), message).into());
        }
        Ok(build_symbol_table(&source, self))
    }

    /// Build every translation unit of the project, in the project's order.
    pub fn build_all(&mut self) -> Vec<Diagnostic> {
        let Some(project) = self.project.clone() else {
            tracing::debug!("[BUILD] no project, nothing to build");
            return Vec::new();
        };
        let start = Instant::now();
        let units = project.translation_units();
        let mut diagnostics = DiagnosticCollector::new();
        for path in &units {
            match self.build_translation_unit(path) {
                Ok(found) => diagnostics.extend(found),
                Err(failure) => diagnostics.add(failure),
            }
        }
        tracing::info!(
            "[BUILD] {} translation units in {:?} ({} diagnostics, {} errors)",
            units.len(),
            start.elapsed(),
            diagnostics.len(),
            diagnostics.error_count()
        );
        diagnostics.take()
    }

    /// Bind every reference that can be bound. Safe to call repeatedly.
    pub fn resolve(&mut self) -> Vec<Diagnostic> {
        let start = Instant::now();
        let mut diagnostics = DiagnosticCollector::new();
        diagnostics.extend(Resolver::new(self).resolve_all());
        tracing::info!(
            "[RESOLVE] {} references in {:?} ({} diagnostics, {} errors)",
            self.reference_count(),
            start.elapsed(),
            diagnostics.len(),
            diagnostics.error_count()
        );
        diagnostics.take()
    }

    /// Bind only references to symbols declared in the reference's own scope.
    pub fn resolve_locally_only(&mut self) {
        Resolver::new(self).resolve_locally();
    }
}
