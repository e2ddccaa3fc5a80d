//! Building translation units in any order gives the same table.

use rstest::rstest;

use crate::helpers::diagnostic_helpers::*;
use crate::helpers::source_fixtures::*;
use crate::helpers::table_helpers::*;

const CANONICAL_ORDER: [&str; 3] = ["a.sv", "b.sv", "c.sv"];

#[rstest]
#[case(["a.sv", "b.sv", "c.sv"])]
#[case(["a.sv", "c.sv", "b.sv"])]
#[case(["b.sv", "a.sv", "c.sv"])]
#[case(["b.sv", "c.sv", "a.sv"])]
#[case(["c.sv", "a.sv", "b.sv"])]
#[case(["c.sv", "b.sv", "a.sv"])]
fn test_file_order_does_not_change_result(#[case] order: [&str; 3]) {
    let (expected, expected_diagnostics) =
        build_in_order(project_of(cycle_files()), &CANONICAL_ORDER);
    let (table, diagnostics) = build_in_order(project_of(cycle_files()), &order);

    assert_eq!(table.print_definitions(), expected.print_definitions());
    assert_eq!(table.print_references(), expected.print_references());
    assert_eq!(
        sorted_messages(&diagnostics),
        sorted_messages(&expected_diagnostics)
    );
    assert_eq!(
        sorted_messages(&diagnostics),
        vec!["Unable to resolve symbol \"missing\" from context $root::C".to_string()]
    );
}

#[rstest]
#[case([0, 1, 2])]
#[case([0, 2, 1])]
#[case([1, 0, 2])]
#[case([1, 2, 0])]
#[case([2, 0, 1])]
#[case([2, 1, 0])]
fn test_item_order_within_file_does_not_change_result(#[case] order: [usize; 3]) {
    let modules = || -> Vec<_> {
        cycle_files()
            .into_iter()
            .flat_map(|(_, items)| items)
            .collect()
    };
    let (expected, _) = build_single(modules());
    let all = modules();
    let permuted = order.iter().map(|i| all[*i].clone()).collect();
    let (table, diagnostics) = build_single(permuted);

    assert_eq!(table.print_definitions(), expected.print_definitions());
    assert_eq!(table.print_references(), expected.print_references());
    assert_eq!(diagnostics.len(), 1);
}

#[rstest]
fn test_out_of_line_body_and_class_in_either_file_order(
    #[values(true, false)] with_prototype: bool,
    #[values(["class.sv", "method.sv"], ["method.sv", "class.sv"])] order: [&str; 2],
) {
    let (expected, expected_diagnostics) = build_in_order(
        project_of(out_of_line_files(with_prototype)),
        &["class.sv", "method.sv"],
    );
    let (table, diagnostics) =
        build_in_order(project_of(out_of_line_files(with_prototype)), &order);

    assert_eq!(table.print_definitions(), expected.print_definitions());
    assert_eq!(table.print_references(), expected.print_references());
    assert_eq!(
        sorted_messages(&diagnostics),
        sorted_messages(&expected_diagnostics)
    );

    assert!(table.lookup_path(&["C", "f", "local_v"]).is_some());
    assert_resolves_to(&table, "!C", "$root::C");
    assert_resolves_to(&table, "!C::f", "$root::C::f");
    assert_resolves_to(&table, "@count", "$root::C::count");
    let expected_messages: Vec<String> = if with_prototype {
        vec![]
    } else {
        vec!["No member symbol \"f\" in parent scope (class) $root::C".to_string()]
    };
    assert_eq!(sorted_messages(&diagnostics), expected_messages);
}

#[test]
fn test_cycle_resolves_every_instance_type() {
    let (table, _) = build_in_order(project_of(cycle_files()), &CANONICAL_ORDER);
    assert_resolves_to(&table, "@B", "$root::B");
    assert_resolves_to(&table, "@C", "$root::C");
    assert_resolves_to(&table, "@A", "$root::A");
    assert_resolves_to(&table, "!a_inst", "$root::C::a_inst");
    assert_unresolved(&table, "@missing");
}

#[test]
fn test_resolving_between_builds_matches_building_everything_first() {
    let project = project_of(cycle_files());
    let (expected, _) = build_in_order(project.clone(), &CANONICAL_ORDER);

    let mut table = versym::SymbolTable::with_project(project);
    table.build_translation_unit("a.sv").unwrap();
    let early = table.resolve();
    assert_single_message(&early, "Unable to resolve symbol \"B\" from context $root::A");

    table.build_translation_unit("c.sv").unwrap();
    table.build_translation_unit("b.sv").unwrap();
    let late = table.resolve();
    assert_eq!(
        sorted_messages(&late),
        vec!["Unable to resolve symbol \"missing\" from context $root::C".to_string()]
    );
    assert_eq!(table.print_definitions(), expected.print_definitions());
    assert_eq!(table.print_references(), expected.print_references());
}

#[test]
fn test_repeated_resolve_changes_nothing() {
    let (mut table, first) = build_in_order(project_of(cycle_files()), &CANONICAL_ORDER);
    let definitions = table.print_definitions();
    let references = table.print_references();

    let second = table.resolve();
    let third = table.resolve();

    assert_eq!(sorted_messages(&second), sorted_messages(&errors_only(&first)));
    assert_eq!(second, third);
    assert_eq!(table.print_definitions(), definitions);
    assert_eq!(table.print_references(), references);
}

fn errors_only(diagnostics: &[versym::Diagnostic]) -> Vec<versym::Diagnostic> {
    errors(diagnostics).into_iter().cloned().collect()
}
