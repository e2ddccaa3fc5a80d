//! Golden dumps of definitions and references.

use versym::SymbolTable;

use crate::helpers::source_fixtures::*;
use crate::helpers::table_helpers::*;

#[test]
fn test_empty_table_dumps() {
    let table = SymbolTable::new();
    assert_eq!(table.print_definitions(), "{ (\n    metatype: <root>\n) }");
    assert_eq!(table.print_references(), "{ (refs:) }");
}

#[test]
fn test_references_before_resolve() {
    let mut table = SymbolTable::with_project(project_of(vec![("top.sv", pp_qq())]));
    table.build_translation_unit("top.sv").unwrap();
    let expected = "\
{ (refs:)
  pp: { (refs:) }
  qq: { (refs:
      { (@pp -> <unresolved>) }
      { (!pp_inst -> $root::qq::pp_inst) }
  )
    pp_inst: { (refs:) }
  }
}";
    assert_eq!(table.print_references(), expected);
}

#[test]
fn test_definitions_after_resolve() {
    let (table, diagnostics) = build_single(pp_qq());
    assert!(diagnostics.is_empty());
    let expected = "\
{ (
    metatype: <root>
)
  pp: { (
      metatype: module
      file: top.sv
  ) }
  qq: { (
      metatype: module
      file: top.sv
  )
    pp_inst: { (
        metatype: data/net/var/instance
        file: top.sv
        type-info { source: \"pp\", type ref: @pp -> $root::pp }
    ) }
  }
}";
    assert_eq!(table.print_definitions(), expected);
}

#[test]
fn test_references_of_out_of_line_method() {
    let (table, _) = build_single(counter_package());
    let printed = table.print_references();
    let expected_chain = "\
  pkg: { (refs:
      { (!%anon-struct-0 -> $root::pkg::%anon-struct-0) }
      { (!Counter[class] -> $root::pkg::Counter)
        { (::next[function] -> $root::pkg::Counter::next) }
      }
  )";
    assert!(
        printed.contains(expected_chain),
        "unexpected dump:\n{}",
        printed
    );
    assert!(printed.contains("{ (@limits -> $root::pkg::Counter::limits)"));
    assert!(printed.contains("{ (.hi -> $root::pkg::%anon-struct-0::hi) }"));
}
