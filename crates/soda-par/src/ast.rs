//! The Soda abstract syntax tree produced by the parser and decorated in
//! place by the two semantic passes in `soda-sem`.
//!
//! Every node carries a `range`; scope-bearing nodes additionally carry a
//! `symbols` table mapping a name declared directly in that scope to the
//! [`DefId`] the scope pass assigns it. Declaration metadata itself (kind,
//! fully-qualified name, defining range) lives in `soda-sem`'s declaration
//! arena rather than on the node, so parent-to-child ownership stays a plain
//! tree with no pointers between siblings.

use indexmap::IndexMap;
use soda_util::span::SourceRange;
use soda_util::symbol::Symbol;

soda_util::define_idx!(DefId);

/// Maps a name declared directly in some scope to the declaration the scope
/// pass assigned it. Order-preserving so diagnostics and debug dumps are
/// deterministic across runs.
pub type SymbolTable = IndexMap<Symbol, DefId>;

/// A dotted name: `ident { "." ident }`. Used where the grammar calls for
/// `fq-ident` but the occurrence is not itself resolved by the type-reference
/// pass (namespace names, import targets).
#[derive(Debug, Clone)]
pub struct FqIdent {
    pub name: Symbol,
    pub range: SourceRange,
}

// ---------------------------------------------------------------- Expressions

#[derive(Debug, Clone)]
pub enum Expr {
    Integer(IntegerExpr),
    Float(FloatExpr),
    Ident(IdentExpr),
    StrLit(StrLitExpr),
    BinOp(BinOpExpr),
    Call(CallExpr),
}

impl Expr {
    pub fn range(&self) -> SourceRange {
        match self {
            Expr::Integer(e) => e.range,
            Expr::Float(e) => e.range,
            Expr::Ident(e) => e.range,
            Expr::StrLit(e) => e.range,
            Expr::BinOp(e) => e.range,
            Expr::Call(e) => e.range,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntBase {
    Dec,
    Hex,
    Oct,
    Bin,
}

#[derive(Debug, Clone)]
pub struct IntegerExpr {
    pub value: u64,
    pub base: IntBase,
    pub range: SourceRange,
}

#[derive(Debug, Clone)]
pub struct FloatExpr {
    pub value: f64,
    pub range: SourceRange,
}

/// A (possibly dotted) name used as a value. `resolved_decl` mirrors
/// [`TypeIdent`]'s field for symmetry, but the type-reference pass never
/// fills it in: resolving non-type identifier uses is an explicitly
/// out-of-scope later pass, so this stays `None` through both decorating
/// passes.
#[derive(Debug, Clone)]
pub struct IdentExpr {
    pub name: Symbol,
    pub resolved_decl: Option<DefId>,
    pub range: SourceRange,
}

#[derive(Debug, Clone)]
pub struct StrLitExpr {
    pub text: String,
    pub range: SourceRange,
}

/// Binary operators in the grammar's precedence table. `Inc`/`Dec` are the
/// `++`/`--` tokens at level 80 exactly as the table lists them: binary, not
/// prefix/postfix unary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    LogAnd,
    LogOr,
    Le,
    Ge,
    Ne,
    EqEq,
    Shl,
    Shr,
    BitAnd,
    BitOr,
    BitXor,
    Lt,
    Gt,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Inc,
    Dec,
}

impl BinOp {
    /// Ascending precedence from the grammar table: a smaller number binds
    /// less tightly. All levels are left-associative.
    pub fn precedence(self) -> u8 {
        use BinOp::*;
        match self {
            LogAnd | LogOr => 10,
            Le | Ge | Ne | EqEq => 20,
            Shl | Shr => 30,
            BitAnd | BitOr | BitXor => 40,
            Lt | Gt => 50,
            Add | Sub => 60,
            Mul | Div | Mod => 70,
            Inc | Dec => 80,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BinOpExpr {
    pub op: BinOp,
    pub lhs: Box<Expr>,
    pub rhs: Box<Expr>,
    pub range: SourceRange,
}

#[derive(Debug, Clone)]
pub struct CallExpr {
    pub callee: Symbol,
    pub args: Vec<Expr>,
    pub range: SourceRange,
}

// ----------------------------------------------------------------- Statements

/// The translation unit: the parser's top-level output. Never nested inside
/// another node, so it lives outside the `Stmt` sum.
#[derive(Debug, Clone)]
pub struct Tu {
    pub file: Symbol,
    pub stmts: Vec<Stmt>,
    pub symbols: SymbolTable,
    pub range: SourceRange,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Namespace(Namespace),
    Import(Import),
    Alias(Alias),
    ClassDef(ClassDef),
    Delegate(Delegate),
    FuncDecl(FuncDecl),
    FuncDef(FuncDef),
    VarDecl(VarDecl),
    CompoundStmt(CompoundStmt),
    IfStmt(IfStmt),
    SwitchStmt(SwitchStmt),
    ReturnStmt(ReturnStmt),
    BreakStmt(BreakStmt),
    ExprStmt(ExprStmt),
    EmptyStmt(EmptyStmt),
}

impl Stmt {
    pub fn range(&self) -> SourceRange {
        match self {
            Stmt::Namespace(s) => s.range,
            Stmt::Import(s) => s.range,
            Stmt::Alias(s) => s.range,
            Stmt::ClassDef(s) => s.range,
            Stmt::Delegate(s) => s.range,
            Stmt::FuncDecl(s) => s.range,
            Stmt::FuncDef(s) => s.range,
            Stmt::VarDecl(s) => s.range,
            Stmt::CompoundStmt(s) => s.range,
            Stmt::IfStmt(s) => s.range,
            Stmt::SwitchStmt(s) => s.range,
            Stmt::ReturnStmt(s) => s.range,
            Stmt::BreakStmt(s) => s.range,
            Stmt::ExprStmt(s) => s.range,
            Stmt::EmptyStmt(s) => s.range,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Namespace {
    pub name: Option<FqIdent>,
    pub stmts: Vec<Stmt>,
    pub symbols: SymbolTable,
    pub range: SourceRange,
}

#[derive(Debug, Clone)]
pub struct Import {
    pub qualified_name: FqIdent,
    pub range: SourceRange,
}

#[derive(Debug, Clone)]
pub struct Alias {
    pub name: Symbol,
    pub target: TypeIdent,
    pub range: SourceRange,
}

#[derive(Debug, Clone)]
pub struct ClassDef {
    pub name: Symbol,
    pub bases: Vec<TypeIdent>,
    pub stmts: Vec<Stmt>,
    pub symbols: SymbolTable,
    pub range: SourceRange,
}

#[derive(Debug, Clone)]
pub struct Delegate {
    pub return_type: TypeIdent,
    pub name: Symbol,
    pub args: Vec<Argument>,
    pub symbols: SymbolTable,
    pub range: SourceRange,
}

/// `[CCode(name="value", ...)]` attached to a [`FuncDecl`]. Values are
/// string-literal text only, per the grammar.
#[derive(Debug, Clone)]
pub struct ForeignAnnotation {
    pub params: IndexMap<Symbol, String>,
    pub range: SourceRange,
}

#[derive(Debug, Clone)]
pub struct FuncDecl {
    pub return_type: TypeIdent,
    pub name: Symbol,
    pub args: Vec<Argument>,
    pub foreign: Option<ForeignAnnotation>,
    pub range: SourceRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Default,
    Public,
    Private,
    Protected,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    Instance,
    Static,
}

#[derive(Debug, Clone)]
pub struct FuncDef {
    pub access: Access,
    pub storage: Storage,
    pub return_type: TypeIdent,
    pub name: Symbol,
    pub args: Vec<Argument>,
    pub stmts: Vec<Stmt>,
    pub symbols: SymbolTable,
    pub range: SourceRange,
}

#[derive(Debug, Clone)]
pub struct VarDecl {
    pub access: Access,
    pub storage: Storage,
    pub ty: TypeIdent,
    pub name: Symbol,
    pub init: Option<Expr>,
    pub range: SourceRange,
}

/// A function/delegate parameter: `type-ident ident [ "=" expr ]` with no
/// specifiers, distinct from the full [`VarDecl`] the grammar's `arg-list`
/// production otherwise resembles.
#[derive(Debug, Clone)]
pub struct Argument {
    pub ty: TypeIdent,
    pub name: Symbol,
    pub default: Option<Expr>,
    pub range: SourceRange,
}

#[derive(Debug, Clone)]
pub struct TypeIdent {
    pub name: Symbol,
    pub is_const: bool,
    pub resolved_decl: Option<DefId>,
    pub range: SourceRange,
}

#[derive(Debug, Clone)]
pub struct CompoundStmt {
    pub stmts: Vec<Stmt>,
    pub symbols: SymbolTable,
    pub range: SourceRange,
}

#[derive(Debug, Clone)]
pub struct IfStmt {
    pub cond: Expr,
    pub then_branch: Box<Stmt>,
    pub else_branch: Option<Box<Stmt>>,
    pub range: SourceRange,
}

#[derive(Debug, Clone)]
pub struct SwitchStmt {
    pub expr: Expr,
    pub cases: Vec<CaseStmt>,
    pub symbols: SymbolTable,
    pub range: SourceRange,
}

/// `case expr ":" stmt` when `label` is `Some`, `default ":" stmt` when
/// `None`. Kept as one tagged kind with an optional label rather than split
/// into `Case`/`Default` variants — see DESIGN.md.
#[derive(Debug, Clone)]
pub struct CaseStmt {
    pub label: Option<Expr>,
    pub body: Box<Stmt>,
    pub range: SourceRange,
}

#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub expr: Option<Expr>,
    pub range: SourceRange,
}

#[derive(Debug, Clone)]
pub struct BreakStmt {
    pub range: SourceRange,
}

#[derive(Debug, Clone)]
pub struct ExprStmt {
    pub expr: Expr,
    pub range: SourceRange,
}

#[derive(Debug, Clone)]
pub struct EmptyStmt {
    pub range: SourceRange,
}
