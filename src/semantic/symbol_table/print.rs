//! Golden-style dumps of the scope tree.
//!
//! Both dumps walk the scope tree in child-name order and print one
//! `name: { (payload) children }` entry per node; only the payload differs.

use super::reference::RefId;
use super::scope::ScopeId;
use super::symbol::{RequiredKind, SymbolKind};
use super::table::SymbolTable;

type PayloadPrinter = fn(&SymbolTable, &mut String, ScopeId, usize);

fn spacer(out: &mut String, indent: usize) {
    out.extend(std::iter::repeat_n(' ', indent));
}

impl SymbolTable {
    /// Dump every declaration with its kind, origin file and type.
    pub fn print_definitions(&self) -> String {
        let mut out = String::new();
        self.print_scope_tree(&mut out, self.root(), 0, SymbolTable::print_definition);
        out
    }

    /// Dump the reference chains written in each scope.
    pub fn print_references(&self) -> String {
        let mut out = String::new();
        self.print_scope_tree(&mut out, self.root(), 0, SymbolTable::print_scope_references);
        out
    }

    /// One component as `@name[kind] -> $root::target`.
    pub fn describe_component(&self, reference: RefId) -> String {
        let component = self.component(reference);
        let mut text = format!("{}{}", component.ref_kind.prefix(), component.identifier);
        if component.required != RequiredKind::Unspecified {
            text.push('[');
            text.push_str(component.required.display());
            text.push(']');
        }
        text.push_str(" -> ");
        match self.resolved_target(reference) {
            Some(target) => text.push_str(&self.full_path(target)),
            None => text.push_str("<unresolved>"),
        }
        text
    }

    fn print_scope_tree(
        &self,
        out: &mut String,
        scope: ScopeId,
        indent: usize,
        payload: PayloadPrinter,
    ) {
        out.push_str("{ (");
        payload(self, out, scope, indent);
        out.push(')');
        let node = self.scope(scope);
        if node.child_count() == 0 {
            out.push_str(" }");
            return;
        }
        out.push('\n');
        for (name, child) in node.children() {
            spacer(out, indent + 2);
            out.push_str(name);
            out.push_str(": ");
            self.print_scope_tree(out, child, indent + 2, payload);
            out.push('\n');
        }
        spacer(out, indent);
        out.push('}');
    }

    fn print_definition(&self, out: &mut String, scope: ScopeId, indent: usize) {
        let info = self.info(scope);
        out.push('\n');
        spacer(out, indent + 4);
        out.push_str("metatype: ");
        out.push_str(info.kind.display());
        out.push('\n');
        if let Some(path) = info.file.and_then(|file| self.file_path(file)) {
            spacer(out, indent + 4);
            out.push_str("file: ");
            out.push_str(path);
            out.push('\n');
        }
        if info.kind == SymbolKind::DataNetVariableInstance {
            let declared = &info.declared_type;
            spacer(out, indent + 4);
            out.push_str("type-info { source: ");
            match &declared.source {
                Some(source) => {
                    out.push('"');
                    out.push_str(source);
                    out.push('"');
                }
                None => out.push_str("(unknown)"),
            }
            out.push_str(", type ref: ");
            match declared.user_defined {
                Some(reference) => out.push_str(&self.describe_component(reference)),
                None => out.push_str("(primitive)"),
            }
            if declared.implicit {
                out.push_str(", implicit");
            }
            out.push_str(" }\n");
        }
        spacer(out, indent);
    }

    fn print_scope_references(&self, out: &mut String, scope: ScopeId, indent: usize) {
        let references = self.pending_references(scope);
        out.push_str("refs:");
        if references.len() > 1 {
            out.push('\n');
            for reference in references {
                spacer(out, indent + 4);
                self.print_reference_tree(out, *reference, indent + 4);
                out.push('\n');
            }
            spacer(out, indent);
        } else {
            for reference in references {
                out.push(' ');
                self.print_reference_tree(out, *reference, indent);
            }
        }
    }

    /// Prints one chain; the caller places the first line.
    fn print_reference_tree(&self, out: &mut String, reference: RefId, indent: usize) {
        out.push_str("{ (");
        out.push_str(&self.describe_component(reference));
        out.push(')');
        let children = self.reference(reference).children();
        if children.is_empty() {
            out.push_str(" }");
            return;
        }
        out.push('\n');
        for child in children {
            spacer(out, indent + 2);
            self.print_reference_tree(out, *child, indent + 2);
            out.push('\n');
        }
        spacer(out, indent);
        out.push('}');
    }
}
