//! Build context: tracks table, file, and current scope during building.

use crate::base::{FileId, TextRange};
use crate::semantic::diagnostics::{Diagnostic, DiagnosticCollector};
use crate::semantic::symbol_table::{
    RefId, RefKind, ReferenceComponent, RequiredKind, ScopeId, SymbolInfo, SymbolKind,
    SymbolTable,
};
use crate::syntax::{Ident, SubroutineKind};

/// Build state passed through all build functions.
pub(super) struct Builder<'t> {
    pub table: &'t mut SymbolTable,
    /// File whose items are being built; switches inside includes
    pub file: FileId,
    pub scope: ScopeId,
    pub diagnostics: DiagnosticCollector,
    /// Files currently being expanded through `include
    pub include_stack: Vec<FileId>,
}

impl<'t> Builder<'t> {
    pub fn new(table: &'t mut SymbolTable, file: FileId) -> Self {
        let scope = table.root();
        Self {
            table,
            file,
            scope,
            diagnostics: DiagnosticCollector::new(),
            include_stack: vec![file],
        }
    }

    pub fn finish(mut self) -> Vec<Diagnostic> {
        self.diagnostics.take()
    }

    /// Run `f` with `scope` as the current scope.
    pub fn in_scope<R>(&mut self, scope: ScopeId, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = std::mem::replace(&mut self.scope, scope);
        let result = f(self);
        self.scope = saved;
        result
    }

    /// Declare `name` in the current scope.
    ///
    /// A clash reports `AlreadyExists` and keeps the earlier declaration,
    /// which is returned as the error.
    pub fn try_declare(&mut self, name: &Ident, info: SymbolInfo) -> Result<ScopeId, ScopeId> {
        let info = info.at(Some(self.file), name.range);
        let declared = self.table.emplace_child(self.scope, name.as_str(), info);
        if declared.is_err() {
            self.report_duplicate(name);
        }
        declared
    }

    /// Like [`try_declare`](Self::try_declare), but a clash yields the earlier
    /// declaration so the rest of the construct is still built into it.
    pub fn declare(&mut self, name: &Ident, info: SymbolInfo) -> ScopeId {
        match self.try_declare(name, info) {
            Ok(id) | Err(id) => id,
        }
    }

    pub fn report_duplicate(&mut self, name: &Ident) {
        let scope_path = self.table.full_path(self.scope);
        self.diagnostics
            .already_defined(name.as_str(), &scope_path, Some(self.file), name.range);
    }

    pub fn report(&mut self, diagnostic: Diagnostic, range: Option<TextRange>) {
        self.diagnostics
            .add(diagnostic.with_location(Some(self.file), range));
    }

    /// Start a chain in the current scope.
    pub fn root_reference(
        &mut self,
        name: &Ident,
        ref_kind: RefKind,
        required: RequiredKind,
    ) -> RefId {
        let component = ReferenceComponent::new(name.text.clone(), name.range, ref_kind, required);
        self.table
            .add_root_reference(self.scope, Some(self.file), component)
    }

    pub fn child_reference(
        &mut self,
        parent: RefId,
        name: &Ident,
        ref_kind: RefKind,
        required: RequiredKind,
    ) -> RefId {
        let component = ReferenceComponent::new(name.text.clone(), name.range, ref_kind, required);
        self.table.add_child_reference(parent, component)
    }

    /// An immediate chain in the current scope, already bound to `target`.
    pub fn self_reference(&mut self, name: &Ident, target: ScopeId) -> RefId {
        let reference = self.root_reference(name, RefKind::Immediate, RequiredKind::Unspecified);
        self.table.bind_reference(reference, target);
        reference
    }
}

pub(super) fn subroutine_kind(kind: SubroutineKind) -> SymbolKind {
    match kind {
        SubroutineKind::Function => SymbolKind::Function,
        SubroutineKind::Task => SymbolKind::Task,
    }
}
