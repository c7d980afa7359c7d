//! End-to-end scenarios covering both passes together: a translation unit
//! is parsed, run through [`crate::analyze`], and then inspected for the
//! qualified names, scoping, type resolutions, and diagnostics a complete
//! implementation of both passes needs to get right.

use soda_par::ast::Stmt;
use soda_par::Parser;
use soda_util::diagnostic::Handler;
use soda_util::symbol::Symbol;

use crate::DefKind;

fn parse(source: &str) -> soda_par::Tu {
    let mut handler = Handler::new();
    let mut parser = Parser::new(source, Symbol::intern("test.soda"), &mut handler);
    parser.parse().expect("source must parse")
}

fn analyze(tu: &mut soda_par::Tu) -> (crate::DefTable, Handler) {
    let mut handler = Handler::new();
    let defs = crate::analyze(tu, &mut handler);
    (defs, handler)
}

#[test]
fn deeply_nested_namespace_produces_a_dotted_qualified_name() {
    let mut tu = parse("namespace app { namespace core { class Engine { } } }");
    let (defs, handler) = analyze(&mut tu);
    assert!(!handler.has_errors());
    let names: Vec<_> = defs
        .iter_enumerated()
        .map(|(_, d)| d.qualified_name.as_str())
        .collect();
    assert!(names.contains(&"app"));
    assert!(names.contains(&"app.core"));
    assert!(names.contains(&"app.core.Engine"));
}

#[test]
fn anonymous_namespace_does_not_add_a_qualifier() {
    let mut tu = parse("namespace { class Widget { } }");
    let (defs, _handler) = analyze(&mut tu);
    let widget = defs
        .iter_enumerated()
        .find(|(_, d)| d.kind == DefKind::Class)
        .unwrap()
        .1;
    assert_eq!(widget.qualified_name.as_str(), "Widget");
}

#[test]
fn self_referential_field_type_resolves() {
    let mut tu = parse("class Node { Node next; }");
    let (_, handler) = analyze(&mut tu);
    assert!(!handler.has_errors());
    match &tu.stmts[0] {
        Stmt::ClassDef(c) => match &c.stmts[0] {
            Stmt::VarDecl(v) => assert!(v.ty.resolved_decl.is_some()),
            _ => panic!("expected var-decl"),
        },
        _ => panic!("expected class-def"),
    }
}

#[test]
fn delegate_argument_types_resolve_but_delegate_return_type_does_not() {
    let mut tu = parse("class Event { } delegate void Handler(Event e);");
    let (_, handler) = analyze(&mut tu);
    assert!(!handler.has_errors());
    match &tu.stmts[1] {
        Stmt::Delegate(d) => {
            assert!(d.args[0].ty.resolved_decl.is_some());
            assert!(d.return_type.resolved_decl.is_none());
        }
        _ => panic!("expected delegate"),
    }
}

#[test]
fn foreign_declaration_return_type_is_never_visited_by_the_type_reference_pass() {
    // `Buffer` is a declared class, but a `FuncDecl`'s return type falls
    // outside this pass's resolution contract (only `VarDecl`/`Argument`
    // types, `Alias` targets, and `ClassDef` bases are resolved), so it
    // stays unresolved and raises no diagnostic either way.
    let src = r#"class Buffer { } [CCode(header="io.h")] Buffer native_alloc();"#;
    let mut tu = parse(src);
    let (_, handler) = analyze(&mut tu);
    assert!(!handler.has_errors());
    match &tu.stmts[1] {
        Stmt::FuncDecl(f) => assert!(f.return_type.resolved_decl.is_none()),
        _ => panic!("expected func-decl"),
    }
}

#[test]
fn alias_of_alias_resolves_one_hop_without_following_the_chain() {
    // the target of an alias is resolved, but that resolution stops at the
    // immediate declaration; nothing here collapses transitive alias chains.
    let mut tu = parse("class Raw { } alias A = Raw; alias B = A;");
    let (_, handler) = analyze(&mut tu);
    assert!(!handler.has_errors());
    match &tu.stmts[2] {
        Stmt::Alias(b) => assert!(b.target.resolved_decl.is_some()),
        _ => panic!("expected alias"),
    }
}

#[test]
fn block_scoped_shadow_resolves_to_the_inner_declaration() {
    let src = "class Outer { } void main() { class Outer { } Outer local; }";
    let mut tu = parse(src);
    let (defs, handler) = analyze(&mut tu);
    assert!(!handler.has_errors());
    let outer_defs: Vec<_> = defs
        .iter_enumerated()
        .filter(|(_, d)| d.kind == DefKind::Class)
        .collect();
    assert_eq!(outer_defs.len(), 2);
    match &tu.stmts[1] {
        Stmt::FuncDef(f) => match &f.stmts[1] {
            Stmt::VarDecl(v) => {
                let resolved = v.ty.resolved_decl.unwrap();
                let inner_id = *f.symbols.get(&Symbol::intern("Outer")).unwrap();
                assert_eq!(inner_id, resolved);
            }
            _ => panic!("expected var-decl"),
        },
        _ => panic!("expected func-def"),
    }
}

#[test]
fn switch_case_declarations_share_the_switch_scope() {
    let src = r#"
        class Counter { }
        void run(Counter n) {
            switch (n) {
                case 0:
                    class Zero { }
                    break;
                default:
                    Zero fallback;
                    break;
            }
        }
    "#;
    let mut tu = parse(src);
    let (_, handler) = analyze(&mut tu);
    assert!(!handler.has_errors());
    match &tu.stmts[1] {
        Stmt::FuncDef(f) => match &f.stmts[0] {
            Stmt::SwitchStmt(sw) => {
                assert!(sw.symbols.contains_key(&Symbol::intern("Zero")));
            }
            _ => panic!("expected switch-stmt"),
        },
        _ => panic!("expected func-def"),
    }
}

#[test]
fn import_and_empty_statements_contribute_no_declarations() {
    let mut tu = parse("import app.core; ;");
    let (defs, handler) = analyze(&mut tu);
    assert!(!handler.has_errors());
    assert!(defs.is_empty());
}

#[test]
fn class_base_forward_referenced_later_in_the_file_resolves() {
    let mut tu = parse("class Derived : Base { } class Base { }");
    let (_, handler) = analyze(&mut tu);
    assert!(!handler.has_errors());
    match &tu.stmts[0] {
        Stmt::ClassDef(c) => assert!(c.bases[0].resolved_decl.is_some()),
        _ => panic!("expected class-def"),
    }
}

#[test]
fn unresolvable_type_name_reports_unknown_type_name_pointing_at_the_identifier() {
    let mut tu = parse("Nonexistent x;");
    let (_, handler) = analyze(&mut tu);
    assert!(handler.has_errors());
    let diag = &handler.diagnostics()[0];
    assert!(diag.message.contains("unknown type name 'Nonexistent'"));
    match &tu.stmts[0] {
        Stmt::VarDecl(v) => {
            assert!(v.ty.resolved_decl.is_none());
            assert_eq!(diag.range, v.ty.range);
        }
        _ => panic!("expected var-decl"),
    }
}

#[test]
fn duplicate_top_level_definition_is_reported_once_per_redefinition() {
    let mut tu = parse("class Dup { } class Dup { } class Dup { }");
    let (_, handler) = analyze(&mut tu);
    let dup_errors: Vec<_> = handler
        .diagnostics()
        .iter()
        .filter(|d| d.message.contains("duplicate definition"))
        .collect();
    assert_eq!(dup_errors.len(), 2);
}

#[test]
fn scope_and_typeref_errors_both_surface_from_a_single_analyze_call() {
    let src = "class Dup { } class Dup { } Missing m;";
    let mut tu = parse(src);
    let (_, handler) = analyze(&mut tu);
    assert!(handler.diagnostics().iter().any(|d| d.message.contains("duplicate definition")));
    assert!(handler.diagnostics().iter().any(|d| d.message.contains("unknown type name")));
}
