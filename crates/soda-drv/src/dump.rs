//! The debug AST dump: a canonical s-expression-like textual form,
//! `(kind (line,col) fields...)`, with each child indented two spaces past
//! its parent. This is the pretty-printer's stand-in for testing — the
//! real pretty-printer that round-trips back to source text is an external
//! collaborator this workspace doesn't implement.

use soda_par::ast::{
    Access, Alias, Argument, BinOp, BreakStmt, CaseStmt, ClassDef, CompoundStmt, Delegate,
    EmptyStmt, Expr, ExprStmt, FuncDecl, FuncDef, IfStmt, Import, Namespace, ReturnStmt, Stmt,
    Storage, SwitchStmt, Tu, TypeIdent, VarDecl,
};
use soda_util::span::Position;
use std::fmt::Write;

const INDENT: &str = "  ";

fn pos(p: Position) -> String {
    format!("({},{})", p.display_line(), p.display_column())
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

/// Dumps a whole translation unit, terminated with a trailing newline.
pub fn dump_tu(tu: &Tu) -> String {
    let mut out = String::new();
    writeln!(out, "(tu {} \"{}\"", pos(tu.range.start), tu.file.as_str()).unwrap();
    for stmt in &tu.stmts {
        dump_stmt(&mut out, stmt, 1);
    }
    out.push_str(")\n");
    out
}

fn dump_stmt(out: &mut String, stmt: &Stmt, depth: usize) {
    indent(out, depth);
    match stmt {
        Stmt::Namespace(ns) => dump_namespace(out, ns, depth),
        Stmt::Import(imp) => dump_import(out, imp),
        Stmt::Alias(a) => dump_alias(out, a),
        Stmt::ClassDef(c) => dump_class(out, c, depth),
        Stmt::Delegate(d) => dump_delegate(out, d),
        Stmt::FuncDecl(f) => dump_func_decl(out, f),
        Stmt::FuncDef(f) => dump_func_def(out, f, depth),
        Stmt::VarDecl(v) => dump_var_decl(out, v),
        Stmt::CompoundStmt(block) => dump_block(out, block, depth),
        Stmt::IfStmt(s) => dump_if(out, s, depth),
        Stmt::SwitchStmt(s) => dump_switch(out, s, depth),
        Stmt::ReturnStmt(s) => dump_return(out, s),
        Stmt::BreakStmt(s) => dump_break(out, s),
        Stmt::ExprStmt(s) => dump_expr_stmt(out, s),
        Stmt::EmptyStmt(s) => dump_empty(out, s),
    }
}

fn dump_namespace(out: &mut String, ns: &Namespace, depth: usize) {
    let name = ns.name.as_ref().map(|n| n.name.as_str().to_string()).unwrap_or_default();
    writeln!(out, "(namespace {} \"{}\"", pos(ns.range.start), name).unwrap();
    for stmt in &ns.stmts {
        dump_stmt(out, stmt, depth + 1);
    }
    indent(out, depth);
    out.push_str(")\n");
}

fn dump_import(out: &mut String, imp: &Import) {
    writeln!(
        out,
        "(import {} \"{}\")",
        pos(imp.range.start),
        imp.qualified_name.name.as_str()
    )
    .unwrap();
}

fn dump_type_ident(ty: &TypeIdent) -> String {
    let resolved = if ty.resolved_decl.is_some() { "resolved" } else { "unresolved" };
    format!("{}{}:{}", if ty.is_const { "const " } else { "" }, ty.name.as_str(), resolved)
}

fn dump_alias(out: &mut String, a: &Alias) {
    writeln!(
        out,
        "(alias {} {} {})",
        pos(a.range.start),
        a.name.as_str(),
        dump_type_ident(&a.target)
    )
    .unwrap();
}

fn dump_class(out: &mut String, c: &ClassDef, depth: usize) {
    let bases: Vec<String> = c.bases.iter().map(dump_type_ident).collect();
    writeln!(
        out,
        "(class {} {} [{}]",
        pos(c.range.start),
        c.name.as_str(),
        bases.join(" ")
    )
    .unwrap();
    for stmt in &c.stmts {
        dump_stmt(out, stmt, depth + 1);
    }
    indent(out, depth);
    out.push_str(")\n");
}

fn dump_args(args: &[Argument]) -> String {
    args.iter()
        .map(|a| format!("{} {}", dump_type_ident(&a.ty), a.name.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn dump_delegate(out: &mut String, d: &Delegate) {
    writeln!(
        out,
        "(delegate {} {} {}({}))",
        pos(d.range.start),
        dump_type_ident(&d.return_type),
        d.name.as_str(),
        dump_args(&d.args)
    )
    .unwrap();
}

fn dump_func_decl(out: &mut String, f: &FuncDecl) {
    let foreign = if f.foreign.is_some() { " foreign" } else { "" };
    writeln!(
        out,
        "(func-decl {} {} {}({}){})",
        pos(f.range.start),
        dump_type_ident(&f.return_type),
        f.name.as_str(),
        dump_args(&f.args),
        foreign
    )
    .unwrap();
}

fn access_str(access: Access) -> &'static str {
    match access {
        Access::Default => "default",
        Access::Public => "public",
        Access::Private => "private",
        Access::Protected => "protected",
        Access::Internal => "internal",
    }
}

fn storage_str(storage: Storage) -> &'static str {
    match storage {
        Storage::Instance => "instance",
        Storage::Static => "static",
    }
}

fn dump_func_def(out: &mut String, f: &FuncDef, depth: usize) {
    writeln!(
        out,
        "(func-def {} {} {} {} {}({})",
        pos(f.range.start),
        access_str(f.access),
        storage_str(f.storage),
        dump_type_ident(&f.return_type),
        f.name.as_str(),
        dump_args(&f.args)
    )
    .unwrap();
    for stmt in &f.stmts {
        dump_stmt(out, stmt, depth + 1);
    }
    indent(out, depth);
    out.push_str(")\n");
}

fn dump_var_decl(out: &mut String, v: &VarDecl) {
    write!(
        out,
        "(var-decl {} {} {} {} {}",
        pos(v.range.start),
        access_str(v.access),
        storage_str(v.storage),
        dump_type_ident(&v.ty),
        v.name.as_str()
    )
    .unwrap();
    if let Some(init) = &v.init {
        out.push(' ');
        out.push_str(&dump_expr(init));
    }
    out.push_str(")\n");
}

fn dump_block(out: &mut String, block: &CompoundStmt, depth: usize) {
    writeln!(out, "(block {}", pos(block.range.start)).unwrap();
    for stmt in &block.stmts {
        dump_stmt(out, stmt, depth + 1);
    }
    indent(out, depth);
    out.push_str(")\n");
}

fn dump_if(out: &mut String, s: &IfStmt, depth: usize) {
    writeln!(out, "(if {} {}", pos(s.range.start), dump_expr(&s.cond)).unwrap();
    dump_stmt(out, &s.then_branch, depth + 1);
    if let Some(else_branch) = &s.else_branch {
        dump_stmt(out, else_branch, depth + 1);
    }
    indent(out, depth);
    out.push_str(")\n");
}

fn dump_switch(out: &mut String, s: &SwitchStmt, depth: usize) {
    writeln!(out, "(switch {} {}", pos(s.range.start), dump_expr(&s.expr)).unwrap();
    for case in &s.cases {
        dump_case(out, case, depth + 1);
    }
    indent(out, depth);
    out.push_str(")\n");
}

fn dump_case(out: &mut String, case: &CaseStmt, depth: usize) {
    indent(out, depth);
    match &case.label {
        Some(label) => writeln!(out, "(case {} {}", pos(case.range.start), dump_expr(label)).unwrap(),
        None => writeln!(out, "(default {}", pos(case.range.start)).unwrap(),
    }
    dump_stmt(out, &case.body, depth + 1);
    indent(out, depth);
    out.push_str(")\n");
}

fn dump_return(out: &mut String, s: &ReturnStmt) {
    match &s.expr {
        Some(e) => writeln!(out, "(return {} {})", pos(s.range.start), dump_expr(e)).unwrap(),
        None => writeln!(out, "(return {})", pos(s.range.start)).unwrap(),
    }
}

fn dump_break(out: &mut String, s: &BreakStmt) {
    writeln!(out, "(break {})", pos(s.range.start)).unwrap();
}

fn dump_expr_stmt(out: &mut String, s: &ExprStmt) {
    writeln!(out, "(expr-stmt {} {})", pos(s.range.start), dump_expr(&s.expr)).unwrap();
}

fn dump_empty(out: &mut String, s: &EmptyStmt) {
    writeln!(out, "(empty-stmt {})", pos(s.range.start)).unwrap();
}

fn binop_str(op: BinOp) -> &'static str {
    use BinOp::*;
    match op {
        LogAnd => "&&",
        LogOr => "||",
        Le => "<=",
        Ge => ">=",
        Ne => "!=",
        EqEq => "==",
        Shl => "<<",
        Shr => ">>",
        BitAnd => "&",
        BitOr => "|",
        BitXor => "^",
        Lt => "<",
        Gt => ">",
        Add => "+",
        Sub => "-",
        Mul => "*",
        Div => "/",
        Mod => "%",
        Inc => "++",
        Dec => "--",
    }
}

fn dump_expr(expr: &Expr) -> String {
    match expr {
        Expr::Integer(e) => format!("(int {} {})", pos(e.range.start), e.value),
        Expr::Float(e) => format!("(float {} {})", pos(e.range.start), e.value),
        Expr::Ident(e) => format!("(ident {} {})", pos(e.range.start), e.name.as_str()),
        Expr::StrLit(e) => format!("(str {} {:?})", pos(e.range.start), e.text),
        Expr::BinOp(e) => format!(
            "(binop {} {} {} {})",
            pos(e.range.start),
            binop_str(e.op),
            dump_expr(&e.lhs),
            dump_expr(&e.rhs)
        ),
        Expr::Call(e) => {
            let args: Vec<String> = e.args.iter().map(dump_expr).collect();
            format!("(call {} {} [{}])", pos(e.range.start), e.callee.as_str(), args.join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soda_sem::analyze;
    use soda_par::Parser;
    use soda_util::diagnostic::Handler;
    use soda_util::symbol::Symbol;

    fn dump(source: &str) -> String {
        let mut handler = Handler::new();
        let mut parser = Parser::new(source, Symbol::intern("t.soda"), &mut handler);
        let mut tu = parser.parse().expect("source must parse");
        analyze(&mut tu, &mut handler);
        assert!(!handler.has_errors());
        dump_tu(&tu)
    }

    #[test]
    fn class_and_var_decl_dump_with_resolved_type() {
        let out = dump("class Point { } Point origin;");
        assert!(out.contains("(class (1,1) Point []"));
        assert!(out.contains("(var-decl (1,17) default instance Point:resolved origin)"));
    }

    #[test]
    fn func_def_dump_includes_access_storage_and_body() {
        let out = dump("void main() { return; }");
        assert!(out.contains("(func-def (1,1) default instance void:unresolved main()"));
        assert!(out.contains("(return (1,15))"));
    }

    #[test]
    fn dump_is_deterministic() {
        let src = "class A { } class B : A { } A x;";
        assert_eq!(dump(src), dump(src));
    }

    #[test]
    fn nested_blocks_indent_by_a_fixed_width() {
        let out = dump("void f() { { return; } }");
        let inner_return_line = out.lines().find(|l| l.trim_start().starts_with("(return")).unwrap();
        let leading_spaces = inner_return_line.len() - inner_return_line.trim_start().len();
        assert_eq!(leading_spaces, 6);
    }
}
