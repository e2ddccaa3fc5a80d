//! Common syntax tree fixtures for tests.
//!
//! Each fixture mirrors a small SystemVerilog source, shown in its doc comment.

use versym::syntax::*;

// =============================================================================
// BUILDING BLOCKS
// =============================================================================

pub fn module(name: &str, items: Vec<Item>) -> Item {
    Item::Module(ModuleDecl::new(name).with_items(items))
}

pub fn instance(type_name: &str, name: &str) -> Item {
    Item::Instances(InstantiationDecl {
        type_name: TypeName::parse(type_name),
        instances: vec![Instance::new(name, vec![])],
    })
}

pub fn data(data_type: DataType, names: &[&str]) -> Item {
    Item::Data(DataDecl::new(
        data_type,
        names.iter().map(|n| VarDecl::from(*n)).collect(),
    ))
}

pub fn use_of(path: &str) -> Item {
    Item::Statement(Expr::reference(path))
}

pub fn typedef(name: &str, data_type: DataType) -> Item {
    Item::Typedef(TypedefDecl {
        name: Ident::new(name),
        data_type,
    })
}

pub fn tree(items: Vec<Item>) -> SyntaxTree {
    SyntaxTree::new(items)
}

// =============================================================================
// FIXTURES
// =============================================================================

/// ```text
/// module pp; endmodule
/// module qq; pp pp_inst(); endmodule
/// ```
pub fn pp_qq() -> Vec<Item> {
    vec![
        module("pp", vec![]),
        module("qq", vec![instance("pp", "pp_inst")]),
    ]
}

/// Three modules instantiating each other in a cycle, one per file:
///
/// ```text
/// a.sv: module A; B b_inst(); endmodule
/// b.sv: module B; C c_inst(); endmodule
/// c.sv: module C; A a_inst(); logic x = missing; endmodule
/// ```
pub fn cycle_files() -> Vec<(&'static str, Vec<Item>)> {
    vec![
        ("a.sv", vec![module("A", vec![instance("B", "b_inst")])]),
        ("b.sv", vec![module("B", vec![instance("C", "c_inst")])]),
        (
            "c.sv",
            vec![module(
                "C",
                vec![
                    instance("A", "a_inst"),
                    Item::Data(DataDecl::new(
                        DataType::primitive("logic"),
                        vec![VarDecl {
                            name: Ident::new("x"),
                            init: Some(Expr::reference("missing")),
                        }],
                    )),
                ],
            )],
        ),
    ]
}

/// A class with an out-of-line method and a typedef'd struct:
///
/// ```text
/// package pkg;
///   typedef struct { int lo; int hi; } range_t;
///   class Counter;
///     range_t limits;
///     extern function int next(int step);
///   endclass
///   function int Counter::next(int step);
///     int tmp = limits.hi;
///   endfunction
/// endpackage
/// ```
pub fn counter_package() -> Vec<Item> {
    let int = || DataType::primitive("int");
    let step_port = || {
        PortDecl::new(
            Some(PortDirection::Input),
            int(),
            vec![Ident::new("step")],
        )
    };
    vec![Item::Package(PackageDecl {
        name: Ident::new("pkg"),
        items: vec![
            typedef(
                "range_t",
                DataType::Struct(vec![
                    StructMember {
                        data_type: int(),
                        names: vec![Ident::new("lo")],
                    },
                    StructMember {
                        data_type: int(),
                        names: vec![Ident::new("hi")],
                    },
                ]),
            ),
            Item::Class(ClassDecl::new("Counter").with_items(vec![
                data(DataType::named("range_t"), &["limits"]),
                Item::Subroutine(
                    SubroutineDecl::function("next")
                        .returns(int())
                        .with_ports(vec![step_port()]),
                ),
            ])),
            Item::Subroutine(
                SubroutineDecl::function("next")
                    .out_of_line("Counter")
                    .returns(int())
                    .with_ports(vec![step_port()])
                    .with_items(vec![Item::Data(DataDecl::new(
                        int(),
                        vec![VarDecl {
                            name: Ident::new("tmp"),
                            init: Some(Expr::reference("limits.hi")),
                        }],
                    ))]),
            ),
        ],
    })]
}

/// A class and an out-of-line method body in separate files:
///
/// ```text
/// class.sv:  class C; int count; [extern function int f();] endclass
/// method.sv: function int C::f(); int local_v = count; endfunction
/// ```
pub fn out_of_line_files(with_prototype: bool) -> Vec<(&'static str, Vec<Item>)> {
    let int = || DataType::primitive("int");
    let mut members = vec![data(int(), &["count"])];
    if with_prototype {
        members.push(Item::Subroutine(SubroutineDecl::function("f").returns(int())));
    }
    vec![
        ("class.sv", vec![Item::Class(ClassDecl::new("C").with_items(members))]),
        (
            "method.sv",
            vec![Item::Subroutine(
                SubroutineDecl::function("f")
                    .out_of_line("C")
                    .returns(int())
                    .with_items(vec![Item::Data(DataDecl::new(
                        int(),
                        vec![VarDecl {
                            name: Ident::new("local_v"),
                            init: Some(Expr::reference("count")),
                        }],
                    ))]),
            )],
        ),
    ]
}
