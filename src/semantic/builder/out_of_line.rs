//! Out-of-line method definitions (`function C::f ... endfunction`).
//!
//! The body is always built into a detached scope first, so it does not
//! matter whether the class comes earlier or later in the design. At the
//! end of every build, each waiting body whose class is declared by then is
//! spliced in. A body whose class never shows up stays orphaned: its own
//! declarations and references are kept and resolved from the enclosing
//! scope, and the resolver reports the unknown qualifier.

use super::context::{Builder, subroutine_kind};
use crate::semantic::diagnostics::{Diagnostic, DiagnosticCollector, DiagnosticKind, codes};
use crate::semantic::symbol_table::{
    DetachedBody, RefKind, RequiredKind, SymbolInfo, SymbolKind, SymbolTable,
};
use crate::syntax::{Ident, SubroutineDecl};

impl Builder<'_> {
    pub(super) fn build_out_of_line(
        &mut self,
        decl: &SubroutineDecl,
        class: &Ident,
        method: &Ident,
    ) {
        let kind = subroutine_kind(decl.kind);
        let return_type = self.build_data_type(&decl.return_type);
        let qualifier = self.root_reference(class, RefKind::Immediate, RequiredKind::Class);
        let method_ref = self.child_reference(
            qualifier,
            method,
            RefKind::DirectMember,
            RequiredKind::exact(kind),
        );

        let info = SymbolInfo::new(kind)
            .at(Some(self.file), method.range)
            .with_type(return_type);
        let name = format!("{}::{}", class.as_str(), method.as_str());
        let body = self.table.emplace_detached(self.scope, &name, info);
        self.in_scope(body, |b| b.build_subroutine_body(decl, true));
        self.table.push_detached(DetachedBody {
            body,
            qualifier,
            method: method_ref,
            file: self.file,
        });
    }
}

/// Splice every waiting out-of-line body whose class is declared now.
pub(super) fn splice_detached(table: &mut SymbolTable) -> Vec<Diagnostic> {
    let mut diagnostics = DiagnosticCollector::new();
    for detached in table.take_detached() {
        if !splice(table, &detached, &mut diagnostics) {
            table.push_detached(detached);
        }
    }
    diagnostics.take()
}

/// Returns false while the qualifier does not name a class in its scope.
///
/// A missing prototype is injected into the class. A prototype of the same
/// kind absorbs the body, keeping its own ports. A prototype of the other
/// subroutine kind stays authoritative and the body stays orphaned.
fn splice(
    table: &mut SymbolTable,
    detached: &DetachedBody,
    diagnostics: &mut DiagnosticCollector,
) -> bool {
    let home = table.reference(detached.qualifier).home();
    let class_name = table.component(detached.qualifier).identifier.clone();
    let Some(class) = table.find_child(home, &class_name) else {
        return false;
    };
    if table.kind_of(class) != SymbolKind::Class {
        return false;
    }
    table.bind_reference(detached.qualifier, class);

    let method = table.component(detached.method).clone();
    let kind = table.kind_of(detached.body);
    let file = Some(detached.file);
    let Some(prototype) = table.find_child(class, &method.identifier) else {
        let message = format!(
            "No member symbol \"{}\" in parent scope (class) {}",
            method.identifier,
            table.full_path(class)
        );
        diagnostics.add(
            Diagnostic::warning(DiagnosticKind::NotFound, message)
                .with_code(codes::INJECTED_METHOD)
                .with_location(file, method.range),
        );
        table.attach_child(class, &method.identifier, detached.body);
        table.bind_reference(detached.method, detached.body);
        tracing::debug!("[BUILD] injected out-of-line {}", table.full_path(detached.body));
        return true;
    };

    table.bind_reference(detached.method, prototype);
    let prototype_kind = table.kind_of(prototype);
    if prototype_kind != kind {
        let message = format!(
            "{} {} cannot be redefined out-of-line as a {}",
            prototype_kind,
            table.full_path(prototype),
            kind
        );
        diagnostics.add(
            Diagnostic::error(DiagnosticKind::AlreadyExists, message)
                .with_code(codes::OUT_OF_LINE_CONFLICT)
                .with_location(file, method.range),
        );
        return true;
    }

    // The prototype's port list is authoritative.
    let clashes = table.merge_detached(detached.body, prototype, |info| !info.is_port);
    let scope_path = table.full_path(prototype);
    for clash in clashes {
        let node = table.scope(clash);
        diagnostics.already_defined(node.name(), &scope_path, node.info().file, node.info().range);
    }
    tracing::debug!("[BUILD] spliced out-of-line body into {}", scope_path);
    true
}
