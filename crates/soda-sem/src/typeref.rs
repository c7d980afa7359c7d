//! The type-reference pass: the second decorating walk, run after
//! [`crate::scope::run`]. It resolves the `TypeIdent`s the grammar actually
//! treats as type references — a `var-decl`'s declared type, an
//! `argument`'s type, an `alias` target, a class's base list — against the
//! declaration arena the scope pass produced, filling in `resolved_decl`
//! wherever the bare type name names a class, alias, or delegate visible
//! from that point in the tree. Function, foreign-declaration, and delegate
//! return types are never visited here: the grammar's own resolution
//! contract only covers `VarDecl`/`Argument` types, `Alias` targets, and
//! `ClassDef` bases, so a return type stays exactly as the parser left it.
//!
//! Every `TypeIdent` this pass does visit must resolve; one that doesn't
//! reports an "unknown type name" diagnostic carrying the identifier's own
//! source range.
//!
//! Lookup walks the same lexical nesting the scope pass built, but rebuilds
//! it from the `symbols` tables already sitting on each scope-bearing node
//! rather than re-running the rib bookkeeping: the scope pass is the only
//! place new bindings are minted, so a scope stack of cloned `symbols`
//! snapshots is enough for read-only resolution.

use indexmap::IndexMap;
use soda_par::ast::{
    Alias, ClassDef, CompoundStmt, Delegate, FuncDecl, FuncDef, Namespace, Stmt, SwitchStmt, Tu,
    TypeIdent, VarDecl,
};
use soda_util::diagnostic::{Diagnostic, Handler};
use soda_util::symbol::Symbol;

use crate::scope::{DefKind, DefTable};

/// Names a [`TypeIdent`] may resolve to. A variable or function appearing in
/// type position is left unresolved rather than treated as a match — a
/// `var-decl`'s own name can shadow an unrelated class, and resolving
/// through it would silently point a type at the wrong declaration.
fn is_type_like(kind: DefKind) -> bool {
    matches!(kind, DefKind::Class | DefKind::Alias | DefKind::Delegate)
}

struct TypeRefPass<'a> {
    defs: &'a DefTable,
    scopes: Vec<IndexMap<Symbol, soda_par::ast::DefId>>,
    handler: &'a mut Handler,
}

impl<'a> TypeRefPass<'a> {
    fn new(defs: &'a DefTable, handler: &'a mut Handler) -> Self {
        TypeRefPass {
            defs,
            scopes: Vec::new(),
            handler,
        }
    }

    fn push_scope(&mut self, symbols: &IndexMap<Symbol, soda_par::ast::DefId>) {
        self.scopes.push(symbols.clone());
    }

    fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    fn resolve(&self, name: Symbol) -> Option<soda_par::ast::DefId> {
        for scope in self.scopes.iter().rev() {
            if let Some(&def_id) = scope.get(&name) {
                if is_type_like(self.defs[def_id].kind) {
                    return Some(def_id);
                }
            }
        }
        None
    }

    /// Resolves `ty` and reports "unknown type name" when nothing in scope
    /// matches it — this is the only diagnostic the type-reference pass
    /// raises, and it applies to every `TypeIdent` this pass visits.
    fn visit_type_ident(&mut self, ty: &mut TypeIdent) {
        ty.resolved_decl = self.resolve(ty.name);
        if ty.resolved_decl.is_none() {
            self.handler.emit(Diagnostic::error(
                format!("unknown type name '{}'", ty.name.as_str()),
                ty.range,
            ));
        }
    }

    fn visit_tu(&mut self, tu: &mut Tu) {
        self.push_scope(&tu.symbols);
        for stmt in &mut tu.stmts {
            self.visit_stmt(stmt);
        }
        self.pop_scope();
    }

    fn visit_stmt(&mut self, stmt: &mut Stmt) {
        match stmt {
            Stmt::Namespace(ns) => self.visit_namespace(ns),
            Stmt::ClassDef(c) => self.visit_class(c),
            Stmt::FuncDef(f) => self.visit_func_def(f),
            Stmt::FuncDecl(f) => self.visit_func_decl(f),
            Stmt::VarDecl(v) => self.visit_var_decl(v),
            Stmt::Alias(a) => self.visit_alias(a),
            Stmt::Delegate(d) => self.visit_delegate(d),
            Stmt::Import(_) | Stmt::EmptyStmt(_) => {}
            Stmt::CompoundStmt(block) => self.visit_block(block),
            Stmt::IfStmt(if_stmt) => {
                self.visit_stmt(&mut if_stmt.then_branch);
                if let Some(else_branch) = &mut if_stmt.else_branch {
                    self.visit_stmt(else_branch);
                }
            }
            Stmt::SwitchStmt(switch) => self.visit_switch(switch),
            Stmt::ReturnStmt(_) | Stmt::BreakStmt(_) | Stmt::ExprStmt(_) => {}
        }
    }

    fn visit_namespace(&mut self, ns: &mut Namespace) {
        self.push_scope(&ns.symbols);
        for stmt in &mut ns.stmts {
            self.visit_stmt(stmt);
        }
        self.pop_scope();
    }

    fn visit_class(&mut self, class: &mut ClassDef) {
        for base in &mut class.bases {
            self.visit_type_ident(base);
        }
        self.push_scope(&class.symbols);
        for stmt in &mut class.stmts {
            self.visit_stmt(stmt);
        }
        self.pop_scope();
    }

    fn visit_func_def(&mut self, func: &mut FuncDef) {
        for arg in &mut func.args {
            self.visit_type_ident(&mut arg.ty);
        }
        self.push_scope(&func.symbols);
        for stmt in &mut func.stmts {
            self.visit_stmt(stmt);
        }
        self.pop_scope();
    }

    fn visit_func_decl(&mut self, decl: &mut FuncDecl) {
        for arg in &mut decl.args {
            self.visit_type_ident(&mut arg.ty);
        }
    }

    fn visit_var_decl(&mut self, var: &mut VarDecl) {
        self.visit_type_ident(&mut var.ty);
    }

    fn visit_alias(&mut self, alias: &mut Alias) {
        self.visit_type_ident(&mut alias.target);
    }

    fn visit_delegate(&mut self, delegate: &mut Delegate) {
        for arg in &mut delegate.args {
            self.visit_type_ident(&mut arg.ty);
        }
    }

    fn visit_block(&mut self, block: &mut CompoundStmt) {
        self.push_scope(&block.symbols);
        for stmt in &mut block.stmts {
            self.visit_stmt(stmt);
        }
        self.pop_scope();
    }

    fn visit_switch(&mut self, switch: &mut SwitchStmt) {
        self.push_scope(&switch.symbols);
        for case in &mut switch.cases {
            self.visit_stmt(&mut case.body);
        }
        self.pop_scope();
    }
}

/// Runs the type-reference pass over `tu` using the declaration arena
/// produced by [`crate::scope::run`]. Every unresolved `TypeIdent` this pass
/// visits reports an "unknown type name" diagnostic to `handler`.
pub fn run(tu: &mut Tu, defs: &DefTable, handler: &mut Handler) {
    let mut pass = TypeRefPass::new(defs, handler);
    pass.visit_tu(tu);
}

#[cfg(test)]
mod tests {
    use super::*;
    use soda_par::ast::Stmt;
    use soda_par::Parser;
    use soda_util::diagnostic::Handler;

    fn parse(source: &str) -> Tu {
        let mut handler = Handler::new();
        let mut parser = Parser::new(source, Symbol::intern("test.soda"), &mut handler);
        parser.parse().expect("source must parse")
    }

    fn run_pass(tu: &mut Tu) -> Handler {
        let mut handler = Handler::new();
        let defs = crate::scope::run(tu, &mut handler);
        run(tu, &defs, &mut handler);
        handler
    }

    #[test]
    fn class_used_as_a_var_decl_type_resolves() {
        let mut tu = parse("class Point { } Point origin;");
        let handler = run_pass(&mut tu);
        assert!(!handler.has_errors());
        match &tu.stmts[1] {
            Stmt::VarDecl(v) => assert!(v.ty.resolved_decl.is_some()),
            _ => panic!("expected var-decl"),
        }
    }

    #[test]
    fn undeclared_primitive_type_name_is_an_unknown_type_name_error() {
        // `int` is not a keyword in this grammar and no declaration named
        // `int` exists in this source, so it is exactly as unresolvable as
        // any other undeclared name.
        let mut tu = parse("int x = 1;");
        let handler = run_pass(&mut tu);
        assert!(handler.has_errors());
        assert!(handler.diagnostics()[0].message.contains("unknown type name"));
        match &tu.stmts[0] {
            Stmt::VarDecl(v) => assert!(v.ty.resolved_decl.is_none()),
            _ => panic!("expected var-decl"),
        }
    }

    #[test]
    fn alias_target_resolves_to_the_aliased_class() {
        let mut tu = parse("class Handle { } alias H = Handle;");
        let handler = run_pass(&mut tu);
        assert!(!handler.has_errors());
        match &tu.stmts[1] {
            Stmt::Alias(a) => assert!(a.target.resolved_decl.is_some()),
            _ => panic!("expected alias"),
        }
    }

    #[test]
    fn class_base_list_resolves() {
        let mut tu = parse("class Base { } class Derived : Base { }");
        let handler = run_pass(&mut tu);
        assert!(!handler.has_errors());
        match &tu.stmts[1] {
            Stmt::ClassDef(c) => assert!(c.bases[0].resolved_decl.is_some()),
            _ => panic!("expected class-def"),
        }
    }

    #[test]
    fn forward_reference_to_a_later_class_still_resolves() {
        // the scope pass records every top-level declaration before the
        // type-reference pass runs, so declaration order does not matter.
        let mut tu = parse("Later x; class Later { }");
        let handler = run_pass(&mut tu);
        assert!(!handler.has_errors());
        match &tu.stmts[0] {
            Stmt::VarDecl(v) => assert!(v.ty.resolved_decl.is_some()),
            _ => panic!("expected var-decl"),
        }
    }

    #[test]
    fn variable_name_does_not_satisfy_a_type_reference() {
        // `Thing` is declared, but as a `Var`, not a type-like kind, so
        // using it in type position still reports "unknown type name".
        let mut tu = parse("class int { } int Thing = 1; Thing x;");
        let handler = run_pass(&mut tu);
        match &tu.stmts[2] {
            Stmt::VarDecl(v) => assert!(v.ty.resolved_decl.is_none()),
            _ => panic!("expected var-decl"),
        }
        assert!(handler.diagnostics().iter().any(|d| d.message.contains("unknown type name 'Thing'")));
    }

    #[test]
    fn function_argument_types_resolve_against_the_enclosing_scope() {
        let mut tu = parse("class Point { } void move(Point p) { }");
        let handler = run_pass(&mut tu);
        assert!(!handler.has_errors());
        match &tu.stmts[1] {
            Stmt::FuncDef(f) => assert!(f.args[0].ty.resolved_decl.is_some()),
            _ => panic!("expected func-def"),
        }
    }

    #[test]
    fn function_return_type_is_never_visited_by_this_pass() {
        // `void` is a reserved keyword with no declaration anywhere, yet it
        // produces no diagnostic: the pass's resolution contract does not
        // include function return types at all.
        let mut tu = parse("void main() { }");
        let handler = run_pass(&mut tu);
        assert!(!handler.has_errors());
    }
}
