//! The scope pass: walks a freshly parsed translation unit, assigns every
//! named declaration a [`DefId`], and records it both in the declaration
//! arena ([`DefTable`]) and in the `symbols` table of whichever scope-bearing
//! node introduces it.
//!
//! Name lookup during the walk goes through a parent-linked chain of
//! [`Rib`]s — one per scope actually entered (namespace, class, function,
//! block, switch) — rather than through the AST's own `symbols` fields,
//! which only ever hold names declared directly in that one scope. The rib
//! chain is what lets a nested scope see an outer declaration; it is
//! discarded once the pass finishes, since everything it ever resolved was
//! copied into either a `symbols` table or a node's `resolved_decl`.

use indexmap::IndexMap;
use soda_par::ast::{
    ClassDef, CompoundStmt, Delegate, DefId, FuncDef, Namespace, Stmt, SwitchStmt, Tu,
};
use soda_util::diagnostic::{Diagnostic, Handler};
use soda_util::index_vec::{Idx, IndexVec};
use soda_util::span::SourceRange;
use soda_util::symbol::Symbol;

/// What kind of thing a [`DefId`] names. Only the kinds the grammar actually
/// produces at scope-entry points are listed — there is no catch-all
/// variant, so adding a new declaration form to the grammar without adding
/// its kind here is a compile error in the scope pass, not a silent gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefKind {
    Namespace,
    Class,
    Func,
    Var,
    Alias,
    Delegate,
}

/// One entry in the declaration arena: everything about a definition that a
/// later pass might need to look up by [`DefId`], without having to walk
/// back to the declaring AST node.
#[derive(Debug, Clone)]
pub struct DefInfo {
    /// The fully-qualified name, e.g. `geometry.Point` for a class `Point`
    /// nested in `namespace geometry`.
    pub qualified_name: Symbol,
    pub kind: DefKind,
    pub range: SourceRange,
}

pub type DefTable = IndexVec<DefId, DefInfo>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct RibId(u32);

impl Idx for RibId {
    fn from_usize(idx: usize) -> Self {
        RibId(idx as u32)
    }
    fn index(self) -> usize {
        self.0 as usize
    }
}

struct Rib {
    parent: Option<RibId>,
    qualified_prefix: Symbol,
}

/// Drives the scope-building walk. Exists only for the duration of
/// [`run`]; its [`DefTable`] is the one durable output.
struct ScopePass<'a> {
    defs: DefTable,
    ribs: IndexVec<RibId, Rib>,
    current: RibId,
    handler: &'a mut Handler,
}

impl<'a> ScopePass<'a> {
    fn new(handler: &'a mut Handler) -> Self {
        let mut ribs = IndexVec::new();
        let root = ribs.push(Rib {
            parent: None,
            qualified_prefix: Symbol::intern(""),
        });
        ScopePass {
            defs: DefTable::new(),
            ribs,
            current: root,
            handler,
        }
    }

    fn enter_scope(&mut self, qualified_prefix: Symbol) {
        let rib = Rib {
            parent: Some(self.current),
            qualified_prefix,
        };
        self.current = self.ribs.push(rib);
    }

    fn exit_scope(&mut self) {
        if let Some(parent) = self.ribs[self.current].parent {
            self.current = parent;
        }
    }

    fn qualified_prefix(&self) -> Symbol {
        self.ribs[self.current].qualified_prefix
    }

    /// Registers `*name` in the arena under its fully-qualified form,
    /// inserts it — under the bare local name it had on entry — into
    /// `symbols`, the table living on the AST node that owns the current
    /// scope, and rewrites `*name` in place to that fully-qualified form:
    /// any name attached to a name-bearing declaration node is its
    /// fully-qualified dotted name from this point on.
    ///
    /// Redefining a name already present in `symbols` is an error: the new
    /// declaration is still registered (so the rest of the pass has a
    /// `DefId` to work with and one bad definition doesn't cascade into
    /// missing-declaration errors everywhere it's used), but a diagnostic
    /// reports the earlier definition's location.
    fn declare(
        &mut self,
        name: &mut Symbol,
        kind: DefKind,
        range: SourceRange,
        symbols: &mut IndexMap<Symbol, DefId>,
    ) -> DefId {
        let local_name = *name;
        if let Some(&previous) = symbols.get(&local_name) {
            let prev_pos = self.defs[previous].range.start;
            self.handler.emit(Diagnostic::error(
                format!(
                    "duplicate definition of '{}': previous definition at line {} column {}",
                    local_name.as_str(),
                    prev_pos.display_line(),
                    prev_pos.display_column(),
                ),
                range,
            ));
        }
        let qualified_name =
            Symbol::join_qualified(self.qualified_prefix().as_str(), local_name.as_str());
        let def_id = self.defs.push(DefInfo {
            qualified_name,
            kind,
            range,
        });
        symbols.insert(local_name, def_id);
        *name = qualified_name;
        def_id
    }

    fn visit_tu(&mut self, tu: &mut Tu) {
        let mut symbols = std::mem::take(&mut tu.symbols);
        for stmt in &mut tu.stmts {
            self.visit_stmt(stmt, &mut symbols);
        }
        tu.symbols = symbols;
    }

    /// Dispatches every `Stmt` variant, whether it appears at `top-stmt`
    /// position or nested inside a function body: the grammar lets
    /// declarations and control-flow statements mix freely in both places,
    /// so one dispatcher handles both instead of duplicating the match.
    fn visit_stmt(&mut self, stmt: &mut Stmt, symbols: &mut IndexMap<Symbol, DefId>) {
        match stmt {
            Stmt::Namespace(ns) => self.visit_namespace(ns, symbols),
            Stmt::ClassDef(c) => self.visit_class(c, symbols),
            Stmt::FuncDef(f) => self.visit_func_def(f, symbols),
            Stmt::FuncDecl(f) => {
                self.declare(&mut f.name, DefKind::Func, f.range, symbols);
            }
            Stmt::VarDecl(v) => {
                self.declare(&mut v.name, DefKind::Var, v.range, symbols);
            }
            Stmt::Alias(a) => {
                self.declare(&mut a.name, DefKind::Alias, a.range, symbols);
            }
            Stmt::Delegate(d) => self.visit_delegate(d, symbols),
            Stmt::Import(_) | Stmt::EmptyStmt(_) => {}
            Stmt::CompoundStmt(block) => self.visit_block(block),
            Stmt::IfStmt(if_stmt) => {
                self.visit_stmt(&mut if_stmt.then_branch, symbols);
                if let Some(else_branch) = &mut if_stmt.else_branch {
                    self.visit_stmt(else_branch, symbols);
                }
            }
            Stmt::SwitchStmt(switch) => self.visit_switch(switch),
            Stmt::ReturnStmt(_) | Stmt::BreakStmt(_) | Stmt::ExprStmt(_) => {}
        }
    }

    fn visit_namespace(&mut self, ns: &mut Namespace, parent_symbols: &mut IndexMap<Symbol, DefId>) {
        let mut symbols = std::mem::take(&mut ns.symbols);
        let qualified_prefix = match &mut ns.name {
            Some(fq) => {
                self.declare(&mut fq.name, DefKind::Namespace, ns.range, parent_symbols);
                fq.name
            }
            None => self.qualified_prefix(),
        };
        self.enter_scope(qualified_prefix);
        for stmt in &mut ns.stmts {
            self.visit_stmt(stmt, &mut symbols);
        }
        self.exit_scope();
        ns.symbols = symbols;
    }

    fn visit_class(&mut self, class: &mut ClassDef, parent_symbols: &mut IndexMap<Symbol, DefId>) {
        let mut symbols = std::mem::take(&mut class.symbols);
        self.declare(&mut class.name, DefKind::Class, class.range, parent_symbols);
        self.enter_scope(class.name);
        for stmt in &mut class.stmts {
            self.visit_stmt(stmt, &mut symbols);
        }
        self.exit_scope();
        class.symbols = symbols;
    }

    /// Besides the function's own name, a `FuncDef` opens a scope that a
    /// function argument and a top-level local declared in the body both
    /// contend for: arguments are declared into `symbols` before the body is
    /// walked, so `void f(int x) { int x; }` is a redefinition exactly like
    /// two arguments of the same name are.
    fn visit_func_def(&mut self, func: &mut FuncDef, parent_symbols: &mut IndexMap<Symbol, DefId>) {
        let mut symbols = std::mem::take(&mut func.symbols);
        self.declare(&mut func.name, DefKind::Func, func.range, parent_symbols);
        self.enter_scope(func.name);
        for arg in &mut func.args {
            self.declare(&mut arg.name, DefKind::Var, arg.range, &mut symbols);
        }
        for stmt in &mut func.stmts {
            self.visit_stmt(stmt, &mut symbols);
        }
        self.exit_scope();
        func.symbols = symbols;
    }

    /// A `delegate` has no body, but its argument list still owns a scope of
    /// its own — mirrors `visit_func_def` without the statement walk.
    fn visit_delegate(&mut self, d: &mut Delegate, parent_symbols: &mut IndexMap<Symbol, DefId>) {
        let mut symbols = std::mem::take(&mut d.symbols);
        self.declare(&mut d.name, DefKind::Delegate, d.range, parent_symbols);
        self.enter_scope(d.name);
        for arg in &mut d.args {
            self.declare(&mut arg.name, DefKind::Var, arg.range, &mut symbols);
        }
        self.exit_scope();
        d.symbols = symbols;
    }

    fn visit_block(&mut self, block: &mut CompoundStmt) {
        let mut symbols = std::mem::take(&mut block.symbols);
        let qualified_prefix = self.qualified_prefix();
        self.enter_scope(qualified_prefix);
        for stmt in &mut block.stmts {
            self.visit_stmt(stmt, &mut symbols);
        }
        self.exit_scope();
        block.symbols = symbols;
    }

    fn visit_switch(&mut self, switch: &mut SwitchStmt) {
        let mut symbols = std::mem::take(&mut switch.symbols);
        let qualified_prefix = self.qualified_prefix();
        self.enter_scope(qualified_prefix);
        for case in &mut switch.cases {
            self.visit_stmt(&mut case.body, &mut symbols);
        }
        self.exit_scope();
        switch.symbols = symbols;
    }
}

/// Runs the scope pass over `tu`, decorating every scope-bearing node's
/// `symbols` table in place and returning the declaration arena the
/// type-reference pass resolves against. Redefinitions are reported to
/// `handler` but do not stop the walk.
pub fn run(tu: &mut Tu, handler: &mut Handler) -> DefTable {
    let mut pass = ScopePass::new(handler);
    pass.visit_tu(tu);
    pass.defs
}
