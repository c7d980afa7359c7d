//! Edge cases and worked scenarios for the parser, covering empty input,
//! the full range of top-level forms, the `var-decl`/`func-def` speculative
//! split, and the syntax-error cases the grammar defines no recovery for.

use soda_util::diagnostic::Handler;
use soda_util::symbol::Symbol;

use crate::ast::{Access, Expr, Stmt, Storage};
use crate::Parser;

fn parse(source: &str) -> Result<crate::Tu, crate::SyntaxError> {
    let mut handler = Handler::new();
    let mut parser = Parser::new(source, Symbol::intern("test.soda"), &mut handler);
    parser.parse()
}

#[test]
fn empty_source_parses_to_an_empty_tu() {
    let tu = parse("").unwrap();
    assert!(tu.stmts.is_empty());
}

#[test]
fn whitespace_and_comments_only() {
    let tu = parse("   \n\t// a comment\n").unwrap();
    assert!(tu.stmts.is_empty());
}

#[test]
fn single_var_decl() {
    let tu = parse("int x = 42;").unwrap();
    assert_eq!(tu.stmts.len(), 1);
    match &tu.stmts[0] {
        Stmt::VarDecl(v) => {
            assert_eq!(v.ty.name.as_str(), "int");
            assert_eq!(v.name.as_str(), "x");
            assert!(matches!(v.init, Some(Expr::Integer(_))));
        }
        _ => panic!("expected var-decl"),
    }
}

#[test]
fn var_decl_without_initializer() {
    let tu = parse("int count;").unwrap();
    match &tu.stmts[0] {
        Stmt::VarDecl(v) => assert!(v.init.is_none()),
        _ => panic!("expected var-decl"),
    }
}

#[test]
fn func_def_disambiguated_from_var_decl_by_paren() {
    let tu = parse("int main() { return 0; }").unwrap();
    match &tu.stmts[0] {
        Stmt::FuncDef(f) => {
            assert_eq!(f.name.as_str(), "main");
            assert_eq!(f.stmts.len(), 1);
            assert!(matches!(f.stmts[0], Stmt::ReturnStmt(_)));
        }
        _ => panic!("expected func-def"),
    }
}

#[test]
fn func_def_with_specifiers_and_arguments() {
    let tu = parse("public static int add(int a, int b) { return a + b; }").unwrap();
    match &tu.stmts[0] {
        Stmt::FuncDef(f) => {
            assert_eq!(f.access, Access::Public);
            assert_eq!(f.storage, Storage::Static);
            assert_eq!(f.args.len(), 2);
            assert_eq!(f.args[0].name.as_str(), "a");
        }
        _ => panic!("expected func-def"),
    }
}

#[test]
fn class_def_with_bases_and_members() {
    let src = "class Animal : Base, Named {\n  int age;\n  public void speak() { }\n}";
    let tu = parse(src).unwrap();
    match &tu.stmts[0] {
        Stmt::ClassDef(c) => {
            assert_eq!(c.name.as_str(), "Animal");
            assert_eq!(c.bases.len(), 2);
            assert_eq!(c.stmts.len(), 2);
        }
        _ => panic!("expected class-def"),
    }
}

#[test]
fn namespace_with_nested_top_stmts() {
    let src = "namespace app.core {\n  int counter = 0;\n}";
    let tu = parse(src).unwrap();
    match &tu.stmts[0] {
        Stmt::Namespace(n) => {
            assert_eq!(n.name.as_ref().unwrap().name.as_str(), "app.core");
            assert_eq!(n.stmts.len(), 1);
        }
        _ => panic!("expected namespace"),
    }
}

#[test]
fn anonymous_namespace() {
    let tu = parse("namespace { int x = 1; }").unwrap();
    match &tu.stmts[0] {
        Stmt::Namespace(n) => assert!(n.name.is_none()),
        _ => panic!("expected namespace"),
    }
}

#[test]
fn import_statement() {
    let tu = parse("import app.core.utils;").unwrap();
    match &tu.stmts[0] {
        Stmt::Import(i) => assert_eq!(i.qualified_name.name.as_str(), "app.core.utils"),
        _ => panic!("expected import"),
    }
}

#[test]
fn alias_declaration() {
    let tu = parse("alias Handle = const int;").unwrap();
    match &tu.stmts[0] {
        Stmt::Alias(a) => {
            assert_eq!(a.name.as_str(), "Handle");
            assert!(a.target.is_const);
            assert_eq!(a.target.name.as_str(), "int");
        }
        _ => panic!("expected alias"),
    }
}

#[test]
fn delegate_declaration() {
    let tu = parse("delegate void Callback(int code);").unwrap();
    match &tu.stmts[0] {
        Stmt::Delegate(d) => {
            assert_eq!(d.name.as_str(), "Callback");
            assert_eq!(d.args.len(), 1);
        }
        _ => panic!("expected delegate"),
    }
}

#[test]
fn foreign_declaration() {
    let src = r#"[CCode(cname="puts", header="stdio.h")] int native_puts(const char text);"#;
    let tu = parse(src).unwrap();
    match &tu.stmts[0] {
        Stmt::FuncDecl(f) => {
            assert_eq!(f.name.as_str(), "native_puts");
            let foreign = f.foreign.as_ref().unwrap();
            assert_eq!(foreign.params.get(&Symbol::intern("cname")).unwrap(), "puts");
            assert_eq!(foreign.params.get(&Symbol::intern("header")).unwrap(), "stdio.h");
        }
        _ => panic!("expected func-decl"),
    }
}

#[test]
fn empty_top_level_statement() {
    let tu = parse(";;").unwrap();
    assert_eq!(tu.stmts.len(), 2);
    assert!(matches!(tu.stmts[0], Stmt::EmptyStmt(_)));
}

#[test]
fn if_else_and_switch_inside_a_function() {
    let src = r#"
        int classify(int n) {
            if (n < 0) {
                return -1;
            } else {
                switch (n) {
                    case 0:
                        return 0;
                    default:
                        return 1;
                }
            }
        }
    "#;
    let tu = parse(src).unwrap();
    match &tu.stmts[0] {
        Stmt::FuncDef(f) => match &f.stmts[0] {
            Stmt::IfStmt(i) => {
                assert!(i.else_branch.is_some());
            }
            _ => panic!("expected if-stmt"),
        },
        _ => panic!("expected func-def"),
    }
}

#[test]
fn call_as_expression_statement() {
    let src = "void main() { log(\"hi\"); }";
    let tu = parse(src).unwrap();
    match &tu.stmts[0] {
        Stmt::FuncDef(f) => assert!(matches!(f.stmts[0], Stmt::ExprStmt(_))),
        _ => panic!("expected func-def"),
    }
}

#[test]
fn nested_var_decl_inside_a_function_body() {
    let src = "void main() { int total = 0; total; }";
    // "total;" alone is a bare identifier used as a statement, which the
    // grammar disallows: only call expressions are legal expr-stmts.
    let err = parse(src).unwrap_err();
    assert!(err.message.contains("call expression"));
}

#[test]
fn local_declarations_are_permitted_inside_function_bodies() {
    let src = "void main() { int total = 0; log(total); }";
    let tu = parse(src).unwrap();
    match &tu.stmts[0] {
        Stmt::FuncDef(f) => {
            assert!(matches!(f.stmts[0], Stmt::VarDecl(_)));
            assert!(matches!(f.stmts[1], Stmt::ExprStmt(_)));
        }
        _ => panic!("expected func-def"),
    }
}

#[test]
fn precedence_worked_example() {
    // Matches the grammar's precedence table: * binds tighter than +, which
    // binds tighter than the shift/bitwise/comparison/logical tiers above it.
    let tu = parse("int r = 1 + 2 * 3 << 1;").unwrap();
    match &tu.stmts[0] {
        Stmt::VarDecl(v) => assert!(matches!(v.init, Some(Expr::BinOp(_)))),
        _ => panic!("expected var-decl"),
    }
}

#[test]
fn unterminated_block_is_a_syntax_error() {
    assert!(parse("void main() {").is_err());
}

#[test]
fn missing_semicolon_is_a_syntax_error() {
    assert!(parse("int x = 1").is_err());
}

#[test]
fn unbalanced_parens_in_call_is_a_syntax_error() {
    assert!(parse("void main() { log(\"hi\"; }").is_err());
}

#[test]
fn mismatched_brace_is_a_syntax_error() {
    assert!(parse("class A { ").is_err());
}

#[test]
fn expr_statement_that_is_not_a_call_is_rejected() {
    assert!(parse("void main() { 1 + 2; }").is_err());
}

#[test]
fn invalid_leading_token_is_a_syntax_error() {
    assert!(parse("} int x;").is_err());
}

#[test]
fn void_return_type_parses_as_a_keyword_spelled_type_ident() {
    let tu = parse("void main() { }").unwrap();
    match &tu.stmts[0] {
        Stmt::FuncDef(f) => assert_eq!(f.return_type.name.as_str(), "void"),
        _ => panic!("expected func-def"),
    }
}

#[test]
fn elif_desugars_into_a_nested_if_in_the_else_branch() {
    let src = r#"
        int classify(int n) {
            if (n < 0) {
                return -1;
            } elif (n == 0) {
                return 0;
            } else {
                return 1;
            }
        }
    "#;
    let tu = parse(src).unwrap();
    match &tu.stmts[0] {
        Stmt::FuncDef(f) => match &f.stmts[0] {
            Stmt::IfStmt(outer) => match outer.else_branch.as_deref() {
                Some(Stmt::IfStmt(inner)) => assert!(inner.else_branch.is_some()),
                _ => panic!("expected elif to desugar into a nested if-stmt"),
            },
            _ => panic!("expected if-stmt"),
        },
        _ => panic!("expected func-def"),
    }
}
