//! The four lookup rules, one per reference kind.

use super::{Canonical, Resolver};
use crate::semantic::diagnostics::{Diagnostic, DiagnosticKind, codes};
use crate::semantic::symbol_table::{
    KindCheck, RefId, ReferenceComponent, ScopeId, SymbolKind,
};

type Lookup = Result<Option<ScopeId>, Diagnostic>;

impl Resolver<'_> {
    /// Nearest enclosing scope (members inherited by classes included) that
    /// has the name; the kind filter applies to that first match only.
    pub(super) fn lookup_unqualified(
        &mut self,
        node: RefId,
        home: ScopeId,
        component: &ReferenceComponent,
    ) -> Lookup {
        let scopes: Vec<ScopeId> = self.table.ancestors(home).collect();
        for scope in scopes {
            if let Some(found) = self.find_member(scope, &component.identifier) {
                return self.check_kind(node, found, component).map(Some);
            }
        }
        let message = format!(
            "Unable to resolve symbol \"{}\" from context {}",
            component.identifier,
            self.table.full_path(home)
        );
        Err(self.diagnostic(node, DiagnosticKind::NotFound, codes::UNRESOLVED_SYMBOL, message))
    }

    /// An immediate component left unbound by the builder: home scope only.
    pub(super) fn lookup_local(
        &mut self,
        node: RefId,
        home: ScopeId,
        component: &ReferenceComponent,
    ) -> Lookup {
        match self.table.find_child(home, &component.identifier) {
            Some(found) => self.check_kind(node, found, component).map(Some),
            None => {
                let message = format!(
                    "Unable to resolve symbol \"{}\" from context {}",
                    component.identifier,
                    self.table.full_path(home)
                );
                Err(self.diagnostic(node, DiagnosticKind::NotFound, codes::UNRESOLVED_SYMBOL, message))
            }
        }
    }

    /// `context::name`: a member of the context seen through typedefs.
    pub(super) fn lookup_direct_member(
        &mut self,
        node: RefId,
        context: ScopeId,
        component: &ReferenceComponent,
    ) -> Lookup {
        let scope = match self.canonical(context) {
            Canonical::Scope(scope) => scope,
            Canonical::Unresolved => return Ok(None),
            Canonical::Primitive => {
                let message = format!(
                    "Canonical type of {} does not have any members",
                    self.table.full_path(context)
                );
                return Err(self.diagnostic(
                    node,
                    DiagnosticKind::InvalidArgument,
                    codes::NO_MEMBERS,
                    message,
                ));
            }
        };
        match self.find_member(scope, &component.identifier) {
            Some(found) => self.check_kind(node, found, component).map(Some),
            None => {
                let message = format!(
                    "No member symbol \"{}\" in parent scope ({}) {}",
                    component.identifier,
                    self.table.kind_of(scope),
                    self.table.full_path(scope)
                );
                Err(self.diagnostic(node, DiagnosticKind::NotFound, codes::NO_SUCH_MEMBER, message))
            }
        }
    }

    /// `value.name`: a member of the declared type of the value.
    ///
    /// Scopes that are not values (generate blocks, packages) are their own
    /// type, so `g1.x` looks inside `g1`.
    pub(super) fn lookup_member_of_type(
        &mut self,
        node: RefId,
        context: ScopeId,
        component: &ReferenceComponent,
    ) -> Lookup {
        let info = self.table.info(context);
        let Some(type_ref) = info.declared_type.user_defined else {
            if !is_value(info.kind) {
                return self.lookup_direct_member(node, context, component);
            }
            let parent = self.table.reference(node).parent().unwrap_or(node);
            let message = format!(
                "Type of parent reference {} ({}) does not have any members",
                self.table.reference_path(parent),
                info.declared_type.source.as_deref().unwrap_or("<implicit>")
            );
            return Err(self.diagnostic(
                node,
                DiagnosticKind::InvalidArgument,
                codes::NO_MEMBERS,
                message,
            ));
        };
        match self.ensure_resolved(type_ref) {
            Some(type_scope) => self.lookup_direct_member(node, type_scope, component),
            // The type chain reports its own failure.
            None => Ok(None),
        }
    }

    /// Apply the component's kind filter to a found symbol.
    fn check_kind(
        &mut self,
        node: RefId,
        found: ScopeId,
        component: &ReferenceComponent,
    ) -> Result<ScopeId, Diagnostic> {
        let actual = self.table.kind_of(found);
        let accepted = match component.required.check(actual) {
            KindCheck::Match => true,
            KindCheck::Mismatch => false,
            // An alias that cannot be followed yet gets the benefit of the doubt.
            KindCheck::AliasOfClass => match self.canonical(found) {
                Canonical::Scope(target) => self.table.kind_of(target) == SymbolKind::Class,
                Canonical::Primitive => false,
                Canonical::Unresolved => true,
            },
        };
        if accepted {
            return Ok(found);
        }
        let message = component
            .required
            .mismatch_message(&component.identifier, actual);
        Err(self.diagnostic(node, DiagnosticKind::InvalidArgument, codes::KIND_MISMATCH, message))
    }

    fn diagnostic(
        &self,
        node: RefId,
        kind: DiagnosticKind,
        code: &'static str,
        message: String,
    ) -> Diagnostic {
        let reference = self.table.reference(node);
        Diagnostic::error(kind, message)
            .with_code(code)
            .with_location(reference.file(), reference.component().range)
    }
}

/// Kinds whose members are those of their declared type.
fn is_value(kind: SymbolKind) -> bool {
    matches!(
        kind,
        SymbolKind::DataNetVariableInstance
            | SymbolKind::Parameter
            | SymbolKind::Function
            | SymbolKind::EnumConstant
    )
}
