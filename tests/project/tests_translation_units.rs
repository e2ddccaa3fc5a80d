//! Translation units opened through a project.

use std::sync::Arc;

use versym::semantic::{DiagnosticKind, codes};
use versym::syntax::*;
use versym::{InMemoryProject, SymbolTable, TextRange, TextSize};

use crate::helpers::source_fixtures::*;
use crate::helpers::table_helpers::*;

#[test]
fn test_unknown_translation_unit() {
    let mut table = SymbolTable::with_project(project_of(vec![("top.sv", pp_qq())]));
    let err = table.build_translation_unit("nope.sv").unwrap_err();
    assert_eq!(err.kind, DiagnosticKind::NotFound);
    assert_eq!(err.code.as_deref(), Some(codes::FILE_NOT_FOUND));
    assert_eq!(&*err.message, "file not found: nope.sv");
    assert_eq!(table.scope_count(), 1);
}

#[test]
fn test_no_project_means_nothing_to_open() {
    let mut table = SymbolTable::new();
    let err = table.build_translation_unit("top.sv").unwrap_err();
    assert_eq!(err.kind, DiagnosticKind::NotFound);
    assert!(table.build_all().is_empty());
}

#[test]
fn test_unparsable_translation_unit_builds_nothing() {
    let mut project = InMemoryProject::new();
    project.add_unparsable("bad.sv", "unexpected token 'endmodule'");
    project.add_translation_unit("good.sv", tree(pp_qq()));
    let mut table = SymbolTable::with_project(Arc::new(project));

    let err = table.build_translation_unit("bad.sv").unwrap_err();
    assert_eq!(err.kind, DiagnosticKind::InvalidArgument);
    assert_eq!(err.code.as_deref(), Some(codes::PARSE_FAILED));
    assert_eq!(
        &*err.message,
        "bad.sv: parse failed: unexpected token 'endmodule'"
    );
    assert_eq!(table.scope_count(), 1);
}

#[test]
fn test_build_all_collects_failures_and_continues() {
    let mut project = InMemoryProject::new();
    project.add_unparsable("bad.sv", "oops");
    project.add_translation_unit("good.sv", tree(pp_qq()));
    let mut table = SymbolTable::with_project(Arc::new(project));

    let diagnostics = table.build_all();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::InvalidArgument);
    assert!(table.lookup_path(&["qq", "pp_inst"]).is_some());
    assert!(table.resolve().is_empty());
}

#[test]
fn test_building_same_unit_twice_reports_duplicates() {
    let mut table = SymbolTable::with_project(project_of(vec![("top.sv", pp_qq())]));
    assert!(table.build_translation_unit("./top.sv").unwrap().is_empty());
    let again = table.build_translation_unit("top.sv").unwrap();
    let messages: Vec<&str> = again.iter().map(|d| &*d.message).collect();
    assert_eq!(
        messages,
        vec![
            "\"pp\" is already defined in the $root scope",
            "\"qq\" is already defined in the $root scope",
            "\"pp_inst\" is already defined in the $root::qq scope",
        ]
    );
}

#[test]
fn test_render_diagnostic_with_line_and_column() {
    let text = "module m;\n  foo x;\nendmodule\n";
    let foo = Ident::at("foo", TextRange::new(TextSize::from(12), TextSize::from(15)));
    let items = vec![module(
        "m",
        vec![Item::Data(DataDecl::new(
            DataType::Named(TypeName::new(foo)),
            vec!["x".into()],
        ))],
    )];
    let mut project = InMemoryProject::new();
    project.add_translation_unit_with_text("rtl/t.sv", text, tree(items));
    let (table, diagnostics) = build_in_order(Arc::new(project), &["rtl/t.sv"]);

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        table.render_diagnostic(&diagnostics[0]),
        "rtl/t.sv:2:3: Unable to resolve symbol \"foo\" from context $root::m"
    );
}
