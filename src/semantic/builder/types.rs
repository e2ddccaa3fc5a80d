use smol_str::SmolStr;

use super::context::Builder;
use crate::semantic::symbol_table::{
    DeclarationType, RefId, RefKind, RequiredKind, SymbolInfo, SymbolKind,
};
use crate::syntax::{Argument, DataType, EnumConstant, Ident, StructMember, TypeName};

impl Builder<'_> {
    /// Turn a written type into a declared type, building any chains it needs
    /// in the current scope.
    pub(super) fn build_data_type(&mut self, data_type: &DataType) -> DeclarationType {
        let source = data_type.source_text().map(SmolStr::from);
        let user_defined = match data_type {
            DataType::Implicit | DataType::Primitive(_) => None,
            DataType::Named(name) => Some(self.build_type_name(name, RequiredKind::Unspecified)),
            DataType::Struct(members) => Some(self.build_anonymous_struct(members)),
            DataType::Enum(constants) => Some(self.build_anonymous_enum(constants)),
        };
        DeclarationType {
            user_defined,
            source,
            implicit: false,
        }
    }

    /// Build `a#(.P(x))::b` as `@a` with children `::P[parameter]` and `::b`.
    /// `required` applies to the last segment, which is returned.
    pub(super) fn build_type_name(&mut self, name: &TypeName, required: RequiredKind) -> RefId {
        let last = name.segments.len().saturating_sub(1);
        let mut current: Option<RefId> = None;
        for (i, segment) in name.segments.iter().enumerate() {
            let segment_required = if i == last {
                required
            } else {
                RequiredKind::Unspecified
            };
            let reference = match current {
                None => self.root_reference(&segment.name, RefKind::Unqualified, segment_required),
                Some(parent) => self.child_reference(
                    parent,
                    &segment.name,
                    RefKind::DirectMember,
                    segment_required,
                ),
            };
            for param in &segment.params {
                match param {
                    Argument::Named { name, value } => {
                        self.child_reference(
                            reference,
                            name,
                            RefKind::DirectMember,
                            RequiredKind::Exact(SymbolKind::Parameter),
                        );
                        if let Some(value) = value {
                            self.build_expr(value);
                        }
                    }
                    Argument::Positional(value) => self.build_expr(value),
                }
            }
            current = Some(reference);
        }
        match current {
            Some(reference) => reference,
            // A type name always has a segment; an empty one degrades to an unnamed reference.
            None => self.root_reference(&Ident::new(""), RefKind::Unqualified, required),
        }
    }

    fn build_anonymous_struct(&mut self, members: &[StructMember]) -> RefId {
        let info = SymbolInfo::new(SymbolKind::Struct).at(Some(self.file), None);
        let scope = self.table.emplace_anonymous_child(self.scope, "struct", info);
        self.in_scope(scope, |b| {
            for member in members {
                let declared = b.build_data_type(&member.data_type);
                for name in &member.names {
                    b.declare_data(name, declared.clone(), None, false);
                }
            }
        });
        let name = Ident::new(self.table.scope(scope).name());
        self.self_reference(&name, scope)
    }

    /// Constants live in the enum's scope and are also visible in the
    /// enclosing scope, as aliases of `!%anon-enum-N::CONST`.
    fn build_anonymous_enum(&mut self, constants: &[EnumConstant]) -> RefId {
        let info = SymbolInfo::new(SymbolKind::Enum).at(Some(self.file), None);
        let scope = self.table.emplace_anonymous_child(self.scope, "enum", info);
        let name = Ident::new(self.table.scope(scope).name());
        let enum_ref = self.self_reference(&name, scope);
        for constant in constants {
            if let Some(value) = &constant.value {
                self.build_expr(value);
            }
            let declared = self.in_scope(scope, |b| {
                b.try_declare(&constant.name, SymbolInfo::new(SymbolKind::EnumConstant))
            });
            let Ok(declared) = declared else {
                continue;
            };
            let member = self.child_reference(
                enum_ref,
                &constant.name,
                RefKind::DirectMember,
                RequiredKind::Unspecified,
            );
            self.table.bind_reference(member, declared);
            let alias = DeclarationType {
                user_defined: Some(member),
                source: None,
                implicit: false,
            };
            self.declare(
                &constant.name,
                SymbolInfo::new(SymbolKind::Typedef).with_type(alias),
            );
        }
        enum_ref
    }
}
