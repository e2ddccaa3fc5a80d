//! Build-then-resolve scenarios over realistic designs.

use versym::semantic::{DiagnosticKind, Severity, SymbolKind, codes};
use versym::syntax::*;

use crate::helpers::diagnostic_helpers::*;
use crate::helpers::source_fixtures::*;
use crate::helpers::table_helpers::*;

// =============================================================================
// CLASSES AND PACKAGES
// =============================================================================

#[test]
fn test_out_of_line_body_sees_class_members() {
    let (table, diagnostics) = build_single(counter_package());
    assert!(diagnostics.is_empty(), "{:#?}", diagnostics);

    let next = get_scope(&table, &["pkg", "Counter", "next"]);
    assert_eq!(table.kind_of(next), SymbolKind::Function);
    assert!(table.find_child(next, "step").is_some());
    assert!(table.find_child(next, "tmp").is_some());
    assert_resolves_to(&table, "@range_t", "$root::pkg::range_t");

    assert_resolves_to(&table, "!Counter", "$root::pkg::Counter");
    assert_resolves_to(&table, "!Counter::next", "$root::pkg::Counter::next");
    assert_resolves_to(&table, "@limits", "$root::pkg::Counter::limits");
    assert_resolves_to(&table, "@limits.hi", "$root::pkg::%anon-struct-0::hi");
}

#[test]
fn test_missing_prototype_is_injected_with_warning() {
    let (table, diagnostics) = build_single(vec![
        Item::Class(ClassDecl::new("C")),
        Item::Subroutine(
            SubroutineDecl::task("run")
                .out_of_line("C")
                .with_items(vec![use_of("undeclared")]),
        ),
    ]);
    let warnings: Vec<_> = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].code.as_deref(), Some(codes::INJECTED_METHOD));
    assert_single_message(
        &diagnostics,
        "Unable to resolve symbol \"undeclared\" from context $root::C::run",
    );
    assert_eq!(
        table.kind_of(get_scope(&table, &["C", "run"])),
        SymbolKind::Task
    );
}

#[test]
fn test_package_scoped_type_and_member_chain() {
    let (table, diagnostics) = build_single(vec![
        Item::Package(PackageDecl {
            name: Ident::new("cfg"),
            items: vec![
                typedef(
                    "pair_t",
                    DataType::Struct(vec![StructMember {
                        data_type: DataType::primitive("int"),
                        names: vec![Ident::new("first"), Ident::new("second")],
                    }]),
                ),
                Item::Parameter(ParamDecl::value(
                    DataType::primitive("int"),
                    "WIDTH",
                    Some(Expr::literal("8")),
                )),
            ],
        }),
        module(
            "top",
            vec![
                data(DataType::named("cfg::pair_t"), &["p"]),
                use_of("p.second"),
                use_of("cfg::WIDTH"),
                use_of("p.third"),
            ],
        ),
    ]);
    assert_resolves_to(&table, "@cfg::pair_t", "$root::cfg::pair_t");
    assert_resolves_to(&table, "@p.second", "$root::cfg::%anon-struct-0::second");
    assert_resolves_to(&table, "@cfg::WIDTH", "$root::cfg::WIDTH");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::NotFound);
    assert_eq!(
        &*diagnostics[0].message,
        "No member symbol \"third\" in parent scope (struct) $root::cfg::%anon-struct-0"
    );
}

#[test]
fn test_class_handle_method_call_through_inheritance() {
    let (table, diagnostics) = build_single(vec![
        Item::Class(ClassDecl::new("base").with_items(vec![Item::Subroutine(
            SubroutineDecl::task("reset"),
        )])),
        Item::Class(ClassDecl::new("derived").extends(TypeName::parse("base"))),
        module(
            "tb",
            vec![
                data(DataType::named("derived"), &["obj"]),
                Item::Statement(Expr::call("obj.reset", vec![])),
                Item::Statement(Expr::call("obj.missing", vec![])),
            ],
        ),
    ]);
    assert_resolves_to(&table, "@obj.reset", "$root::base::reset");
    assert_single_message(
        &diagnostics,
        "No member symbol \"missing\" in parent scope (class) $root::derived",
    );
}

#[test]
fn test_constructor_result_members() {
    let (table, diagnostics) = build_single(vec![Item::Class(
        ClassDecl::new("packet").with_items(vec![
            data(DataType::primitive("int"), &["len"]),
            Item::Constructor(ConstructorDecl {
                ports: vec![],
                items: vec![use_of("len")],
            }),
        ]),
    )]);
    assert_no_errors(&diagnostics);
    assert_resolves_to(&table, "@len", "$root::packet::len");
    assert_resolves_to(&table, "!packet", "$root::packet");
}

// =============================================================================
// MODULES
// =============================================================================

#[test]
fn test_hierarchy_with_ports_generate_and_implicit_nets() {
    let (table, diagnostics) = build_single(vec![
        Item::Module(
            ModuleDecl::new("leaf")
                .with_params(vec![ParamDecl::type_param("T", Some(DataType::primitive("logic")))])
                .with_ports(vec![PortDecl::new(
                    Some(PortDirection::Input),
                    DataType::named("T"),
                    vec![Ident::new("d")],
                )]),
        ),
        module(
            "top",
            vec![
                Item::Generate(GenerateIf {
                    condition: Expr::literal("1"),
                    then_block: GenerateBlock {
                        label: Some(Ident::new("g")),
                        items: vec![Item::Instances(InstantiationDecl {
                            type_name: TypeName::parse("leaf").with_params(vec![
                                Argument::named("T", Some(Expr::reference("bit"))),
                            ]),
                            instances: vec![Instance::new(
                                "u",
                                vec![Argument::named("d", Some(Expr::reference("w")))],
                            )],
                        })],
                    },
                    else_branch: None,
                }),
                Item::Assign(ContinuousAssign {
                    lhs: Expr::reference("w"),
                    rhs: Expr::literal("1'b1"),
                }),
                use_of("g.u"),
            ],
        ),
    ]);

    assert_resolves_to(&table, "@T", "$root::leaf::T");
    assert_resolves_to(&table, "@leaf::T", "$root::leaf::T");
    assert_resolves_to(&table, "!u.d", "$root::leaf::d");
    assert_resolves_to(&table, "@g.u", "$root::top::g::u");
    // `w` is used before its implicit declaration by the assignment.
    assert_resolves_to(&table, "@w", "$root::top::w");
    assert!(
        table
            .info(get_scope(&table, &["top", "w"]))
            .declared_type
            .implicit
    );
    // `bit` is a value expression in the parameter list, not a symbol.
    assert_single_message(
        &diagnostics,
        "Unable to resolve symbol \"bit\" from context $root::top::g",
    );
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn test_duplicates_across_files_reported_once() {
    let project = project_of(vec![
        ("one.sv", vec![module("dup", vec![])]),
        ("two.sv", vec![module("dup", vec![])]),
    ]);
    let (table, diagnostics) = build_in_order(project, &["two.sv", "one.sv"]);
    assert_single_message(&diagnostics, "\"dup\" is already defined in the $root scope");
    assert_eq!(diagnostics[0].code.as_deref(), Some(codes::DUPLICATE_DEFINITION));
    let dup = table.info(get_scope(&table, &["dup"]));
    assert_eq!(dup.file.and_then(|f| table.file_path(f)), Some("two.sv"));
}
