use smol_str::SmolStr;

use super::context::{Builder, subroutine_kind};
use crate::semantic::symbol_table::{
    DeclarationType, RefId, RefKind, RequiredKind, ScopeId, SymbolInfo, SymbolKind,
};
use crate::syntax::{
    ClassDecl, ConstructorDecl, ContinuousAssign, DataDecl, ElseBranch, Expr, GenerateBlock,
    GenerateIf, Ident, Include, InstantiationDecl, Item, ModuleDecl, ModuleKind, PackageDecl,
    ParamDecl, ParamDefault, PortConnection, PortDecl, PortDirection, SubroutineDecl,
    SubroutineName, TypedefDecl,
};

impl Builder<'_> {
    pub(crate) fn build_items(&mut self, items: &[Item]) {
        for item in items {
            self.build_item(item);
        }
    }

    fn build_item(&mut self, item: &Item) {
        match item {
            Item::Module(decl) => self.build_module(decl),
            Item::Package(decl) => self.build_package(decl),
            Item::Class(decl) => self.build_class(decl),
            Item::Subroutine(decl) => self.build_subroutine(decl),
            Item::Constructor(decl) => self.build_constructor(decl),
            Item::Parameter(decl) => self.build_parameter(decl),
            Item::Data(decl) => self.build_data(decl),
            Item::Instances(decl) => self.build_instances(decl),
            Item::Typedef(decl) => self.build_typedef(decl),
            Item::Port(decl) => self.build_port(decl),
            Item::Generate(decl) => self.build_generate_if(decl),
            Item::Assign(assign) => self.build_continuous_assign(assign),
            Item::Statement(expr) => self.build_expr(expr),
            Item::Include(include) => self.build_include(include),
        }
    }

    // ========================================================================
    // Design elements
    // ========================================================================

    fn build_module(&mut self, decl: &ModuleDecl) {
        let kind = match decl.kind {
            ModuleKind::Module => SymbolKind::Module,
            ModuleKind::Interface => SymbolKind::Interface,
        };
        let scope = self.declare(&decl.name, SymbolInfo::new(kind));
        self.in_scope(scope, |b| {
            for param in &decl.params {
                b.build_parameter(param);
            }
            for port in &decl.ports {
                b.build_port(port);
            }
            b.build_items(&decl.items);
        });
    }

    fn build_package(&mut self, decl: &PackageDecl) {
        let scope = self.declare(&decl.name, SymbolInfo::new(SymbolKind::Package));
        self.in_scope(scope, |b| b.build_items(&decl.items));
    }

    fn build_class(&mut self, decl: &ClassDecl) {
        // The base class is named from the enclosing scope, not from inside the class.
        let base = decl
            .extends
            .as_ref()
            .map(|base| self.build_type_name(base, RequiredKind::Class));
        let mut info = SymbolInfo::new(SymbolKind::Class);
        info.parent_type = base;
        let scope = self.declare(&decl.name, info);
        self.in_scope(scope, |b| {
            for param in &decl.params {
                b.build_parameter(param);
            }
            b.build_items(&decl.items);
        });
    }

    // ========================================================================
    // Subroutines
    // ========================================================================

    fn build_subroutine(&mut self, decl: &SubroutineDecl) {
        match &decl.name {
            SubroutineName::Simple(name) => {
                let return_type = self.build_data_type(&decl.return_type);
                let info = SymbolInfo::new(subroutine_kind(decl.kind)).with_type(return_type);
                let scope = self.declare(name, info);
                self.in_scope(scope, |b| b.build_subroutine_body(decl, true));
            }
            SubroutineName::OutOfLine { class, method } => {
                self.build_out_of_line(decl, class, method)
            }
        }
    }

    pub(super) fn build_subroutine_body(&mut self, decl: &SubroutineDecl, declare_ports: bool) {
        if declare_ports {
            for port in &decl.ports {
                self.build_port(port);
            }
        }
        self.build_items(&decl.items);
    }

    fn build_constructor(&mut self, decl: &ConstructorDecl) {
        let class_scope = self.scope;
        let scope =
            match self.try_declare(&Ident::new("new"), SymbolInfo::new(SymbolKind::Function)) {
                Ok(scope) => {
                    // `new` returns an object of its own class.
                    let class_name = Ident::new(self.table.scope(class_scope).name());
                    let self_type = self.self_reference(&class_name, class_scope);
                    self.table.info_mut(scope).declared_type = DeclarationType {
                        user_defined: Some(self_type),
                        source: Some(class_name.text),
                        implicit: false,
                    };
                    scope
                }
                Err(existing) => existing,
            };
        self.in_scope(scope, |b| {
            for port in &decl.ports {
                b.build_port(port);
            }
            b.build_items(&decl.items);
        });
    }

    // ========================================================================
    // Parameters, data, typedefs, ports
    // ========================================================================

    pub(super) fn build_parameter(&mut self, decl: &ParamDecl) {
        let declared = if decl.is_type {
            DeclarationType::default()
        } else {
            self.build_data_type(&decl.data_type)
        };
        match &decl.default {
            Some(ParamDefault::Value(expr)) => self.build_expr(expr),
            Some(ParamDefault::Type(data_type)) => {
                self.build_data_type(data_type);
            }
            None => {}
        }
        self.declare(
            &decl.name,
            SymbolInfo::new(SymbolKind::Parameter).with_type(declared),
        );
    }

    fn build_data(&mut self, decl: &DataDecl) {
        // One declared type is shared by every variable of the statement.
        let declared = self.build_data_type(&decl.data_type);
        for var in &decl.vars {
            if let Some(init) = &var.init {
                self.build_expr(init);
            }
            self.declare_data(&var.name, declared.clone(), None, false);
        }
    }

    fn build_typedef(&mut self, decl: &TypedefDecl) {
        let declared = self.build_data_type(&decl.data_type);
        self.declare(
            &decl.name,
            SymbolInfo::new(SymbolKind::Typedef).with_type(declared),
        );
    }

    pub(super) fn build_port(&mut self, decl: &PortDecl) {
        let declared = self.build_data_type(&decl.data_type);
        for name in &decl.names {
            self.declare_data(name, declared.clone(), decl.direction, true);
        }
    }

    /// Declare a variable or port, merging split port declarations.
    pub(super) fn declare_data(
        &mut self,
        name: &Ident,
        declared: DeclarationType,
        direction: Option<PortDirection>,
        is_port: bool,
    ) -> ScopeId {
        if let Some(existing) = self.table.find_child(self.scope, name.as_str()) {
            if !self.merge_port(existing, name, &declared, direction, is_port) {
                self.report_duplicate(name);
            }
            return existing;
        }
        let mut info = SymbolInfo::new(SymbolKind::DataNetVariableInstance).with_type(declared);
        info.is_port = is_port;
        info.direction = direction;
        self.declare(name, info)
    }

    /// Fold a second declaration of a port into the first (`output q; reg q;`).
    ///
    /// Two directions, or two different written types, do not merge.
    fn merge_port(
        &mut self,
        existing: ScopeId,
        name: &Ident,
        declared: &DeclarationType,
        direction: Option<PortDirection>,
        is_port: bool,
    ) -> bool {
        let info = self.table.info(existing);
        if info.kind != SymbolKind::DataNetVariableInstance || !(info.is_port || is_port) {
            return false;
        }
        if info.direction.is_some() && direction.is_some() {
            return false;
        }
        if let (Some(first), Some(second)) = (&info.declared_type.source, &declared.source) {
            if first != second {
                return false;
            }
        }

        let info = self.table.info_mut(existing);
        info.is_port = true;
        if info.direction.is_none() {
            info.direction = direction;
        }
        if info.declared_type.source.is_none() && declared.source.is_some() {
            info.declared_type = declared.clone();
        }
        if let Some(range) = name.range {
            info.supplements.push(range);
        }
        tracing::trace!("[BUILD] merged port declaration of {}", name.as_str());
        true
    }

    // ========================================================================
    // Instances
    // ========================================================================

    fn build_instances(&mut self, decl: &InstantiationDecl) {
        let type_ref = self.build_type_name(&decl.type_name, RequiredKind::Unspecified);
        let source = SmolStr::from(decl.type_name.text());
        for instance in &decl.instances {
            let declared = DeclarationType {
                user_defined: Some(type_ref),
                source: Some(source.clone()),
                implicit: false,
            };
            let node = self.declare(
                &instance.name,
                SymbolInfo::new(SymbolKind::DataNetVariableInstance).with_type(declared),
            );
            // Port names hang off a self reference to the instance, so they
            // are looked up in the instance's type.
            let self_ref = self.self_reference(&instance.name, node);
            for connection in &instance.ports {
                self.build_port_connection(self_ref, connection);
            }
        }
    }

    fn build_port_connection(&mut self, self_ref: RefId, connection: &PortConnection) {
        match connection {
            PortConnection::Named { name, value } => {
                self.child_reference(
                    self_ref,
                    name,
                    RefKind::MemberOfTypeOfParent,
                    RequiredKind::Exact(SymbolKind::DataNetVariableInstance),
                );
                if let Some(value) = value {
                    self.build_expr(value);
                }
            }
            PortConnection::Positional(value) => self.build_expr(value),
        }
    }

    // ========================================================================
    // Generate blocks
    // ========================================================================

    fn build_generate_if(&mut self, decl: &GenerateIf) {
        self.build_expr(&decl.condition);
        self.build_generate_block(&decl.then_block);
        match &decl.else_branch {
            // `else if` clauses become siblings, not nested scopes
            Some(ElseBranch::If(next)) => self.build_generate_if(next),
            Some(ElseBranch::Block(block)) => self.build_generate_block(block),
            None => {}
        }
    }

    fn build_generate_block(&mut self, block: &GenerateBlock) {
        let scope = match &block.label {
            Some(label) => self.declare(label, SymbolInfo::new(SymbolKind::Generate)),
            None => {
                let info = SymbolInfo::new(SymbolKind::Generate).at(Some(self.file), None);
                self.table
                    .emplace_anonymous_child(self.scope, "generate", info)
            }
        };
        self.in_scope(scope, |b| b.build_items(&block.items));
    }

    // ========================================================================
    // Continuous assignments and includes
    // ========================================================================

    fn build_continuous_assign(&mut self, assign: &ContinuousAssign) {
        match &assign.lhs {
            Expr::Reference(path) if path.is_simple() => self.build_assign_target(&path.root),
            other => self.build_expr(other),
        }
        self.build_expr(&assign.rhs);
    }

    /// An undeclared assignment target declares an implicit net.
    fn build_assign_target(&mut self, name: &Ident) {
        let root = self.table.root();
        let declared = self
            .table
            .ancestors(self.scope)
            .take_while(|scope| *scope != root)
            .any(|scope| self.table.find_child(scope, name.as_str()).is_some());
        if declared {
            self.root_reference(name, RefKind::Unqualified, RequiredKind::Unspecified);
            return;
        }
        let implicit = DeclarationType {
            user_defined: None,
            source: None,
            implicit: true,
        };
        let info = SymbolInfo::new(SymbolKind::DataNetVariableInstance).with_type(implicit);
        if let Ok(net) = self.try_declare(name, info) {
            tracing::trace!("[BUILD] implicit net {}", self.table.full_path(net));
            let reference =
                self.root_reference(name, RefKind::Unqualified, RequiredKind::Unspecified);
            self.table.bind_reference(reference, net);
        }
    }

    fn build_include(&mut self, include: &Include) {
        let Some(project) = self.table.project().cloned() else {
            tracing::debug!("[BUILD] no project, ignoring include of {}", include.path);
            return;
        };
        let source = match project.open_included_file(&include.path) {
            Ok(source) => source,
            Err(err) => {
                self.report(err.into(), include.range);
                return;
            }
        };
        if self.include_stack.contains(&source.id()) {
            tracing::debug!("[BUILD] recursive include of {} skipped", source.path());
            return;
        }
        if let Some(message) = source.parse_error() {
            let err = crate::project::ProjectError::parse(source.path(), message);
            self.report(err.into(), include.range);
        }
        let Some(tree) = source.tree() else {
            return;
        };
        self.table.register_file(&source);
        let outer = std::mem::replace(&mut self.file, source.id());
        self.include_stack.push(source.id());
        self.build_items(&tree.items);
        self.include_stack.pop();
        self.file = outer;
    }
}
