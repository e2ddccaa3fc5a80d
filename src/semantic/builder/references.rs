use super::context::Builder;
use crate::semantic::symbol_table::{RefId, RefKind, RequiredKind, SymbolKind};
use crate::syntax::{Argument, Call, Expr, Path, Separator};

impl Builder<'_> {
    pub(super) fn build_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal(_) => {}
            Expr::Reference(path) => {
                self.build_reference(path, RequiredKind::Unspecified);
            }
            Expr::Call(call) => self.build_call(call),
            Expr::Operation(operands) => {
                for operand in operands {
                    self.build_expr(operand);
                }
            }
        }
    }

    /// Build a chain mirroring `path`; `required` applies to the last component.
    /// Returns the last component.
    pub(super) fn build_reference(&mut self, path: &Path, required: RequiredKind) -> RefId {
        let root_required = if path.is_simple() {
            required
        } else {
            RequiredKind::Unspecified
        };
        let mut current = self.root_reference(&path.root, RefKind::Unqualified, root_required);
        let last = path.rest.len().saturating_sub(1);
        for (i, segment) in path.rest.iter().enumerate() {
            let ref_kind = match segment.separator {
                Separator::Scope => RefKind::DirectMember,
                Separator::Dot => RefKind::MemberOfTypeOfParent,
            };
            let segment_required = if i == last {
                required
            } else {
                RequiredKind::Unspecified
            };
            current = self.child_reference(current, &segment.name, ref_kind, segment_required);
        }
        current
    }

    /// A call target must be callable; named arguments are its formal ports.
    fn build_call(&mut self, call: &Call) {
        let target = self.build_reference(&call.target, RequiredKind::Callable);
        for argument in &call.args {
            match argument {
                Argument::Named { name, value } => {
                    self.child_reference(
                        target,
                        name,
                        RefKind::DirectMember,
                        RequiredKind::Exact(SymbolKind::DataNetVariableInstance),
                    );
                    if let Some(value) = value {
                        self.build_expr(value);
                    }
                }
                Argument::Positional(value) => self.build_expr(value),
            }
        }
    }
}
