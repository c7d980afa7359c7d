//! Statement parsing.
//!
//! `stmt ::= top-stmt | compound-stmt | if-stmt | switch-stmt | return-stmt
//! ";" | break-stmt ";" | expr-stmt ";"`. The five stmt-only forms each
//! start with a token no `top-stmt` production starts with (`{`, `if`,
//! `switch`, `return`, `break`), so they are tried first; anything else
//! falls through to [`Parser::parse_top_stmt_like`] with the `expr-stmt`
//! fallback enabled, since declarations (and the bracketed foreign
//! annotation, `alias`, `import`, `namespace`, `class`, `delegate`) are all
//! legal to nest inside a function body too.

use soda_lex::TokenKind;
use soda_util::span::SourceRange;

use crate::ast::{BreakStmt, CaseStmt, CompoundStmt, Expr, ExprStmt, IfStmt, ReturnStmt, Stmt, SwitchStmt, SymbolTable};
use crate::error::PResult;
use crate::Parser;

impl Parser {
    pub(crate) fn parse_stmt(&mut self) -> PResult<Stmt> {
        if self.at(TokenKind::LBrace) {
            return self.parse_compound_stmt();
        }
        if self.at_keyword("if") {
            return self.parse_if_stmt();
        }
        if self.at_keyword("switch") {
            return self.parse_switch_stmt();
        }
        if self.at_keyword("return") {
            return self.parse_return_stmt();
        }
        if self.at_keyword("break") {
            return self.parse_break_stmt();
        }
        self.parse_top_stmt_like(true)
    }

    /// `compound-stmt ::= "{" { stmt } "}"`
    pub(crate) fn parse_compound_stmt(&mut self) -> PResult<Stmt> {
        let open = self.expect(TokenKind::LBrace, "'{'")?;
        let mut stmts = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.is_eof() {
            stmts.push(self.parse_stmt()?);
        }
        let close = self.expect(TokenKind::RBrace, "'}'")?;
        Ok(Stmt::CompoundStmt(CompoundStmt {
            stmts,
            symbols: SymbolTable::new(),
            range: open.range.join(close.range),
        }))
    }

    /// `if-stmt ::= "if" "(" expr ")" stmt [ "else" stmt ]`
    ///
    /// `elif` has no dedicated AST node: `elif COND STMT` is sugar for
    /// `else if (COND) STMT`, so an `elif` chain is desugared here into
    /// nested `IfStmt`s nested inside each other's `else_branch`, one per
    /// `elif`, with any trailing `else` attaching to the innermost one.
    fn parse_if_stmt(&mut self) -> PResult<Stmt> {
        let start = self.bump().range;
        self.parse_if_tail(start)
    }

    fn parse_if_tail(&mut self, start: SourceRange) -> PResult<Stmt> {
        self.expect(TokenKind::LParen, "'('")?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::RParen, "')'")?;
        let then_branch = self.parse_stmt()?;
        let mut range = start.join(then_branch.range());
        let else_branch = if self.at_keyword("elif") {
            let elif_start = self.bump().range;
            let nested = self.parse_if_tail(elif_start)?;
            range = range.join(nested.range());
            Some(Box::new(nested))
        } else if self.accept_keyword("else") {
            let else_stmt = self.parse_stmt()?;
            range = range.join(else_stmt.range());
            Some(Box::new(else_stmt))
        } else {
            None
        };
        Ok(Stmt::IfStmt(IfStmt {
            cond,
            then_branch: Box::new(then_branch),
            else_branch,
            range,
        }))
    }

    /// `switch-stmt ::= "switch" "(" expr ")" "{" { case } "}"`
    fn parse_switch_stmt(&mut self) -> PResult<Stmt> {
        let start = self.bump().range;
        self.expect(TokenKind::LParen, "'('")?;
        let expr = self.parse_expr()?;
        self.expect(TokenKind::RParen, "')'")?;
        self.expect(TokenKind::LBrace, "'{'")?;
        let mut cases = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.is_eof() {
            cases.push(self.parse_case()?);
        }
        let close = self.expect(TokenKind::RBrace, "'}'")?;
        Ok(Stmt::SwitchStmt(SwitchStmt {
            expr,
            cases,
            symbols: SymbolTable::new(),
            range: start.join(close.range),
        }))
    }

    /// `case ::= "case" expr ":" stmt | "default" ":" stmt`
    fn parse_case(&mut self) -> PResult<CaseStmt> {
        let start = self.current_range();
        let label = if self.accept_keyword("default") {
            None
        } else if self.accept_keyword("case") {
            Some(self.parse_expr()?)
        } else {
            return Err(self.unexpected("'case' or 'default'"));
        };
        self.expect(TokenKind::Colon, "':'")?;
        let body = self.parse_stmt()?;
        let range = start.join(body.range());
        Ok(CaseStmt {
            label,
            body: Box::new(body),
            range,
        })
    }

    /// `return-stmt ::= "return" [ expr ] ";"`
    fn parse_return_stmt(&mut self) -> PResult<Stmt> {
        let start = self.bump().range;
        let expr = if self.at(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        let semi = self.expect(TokenKind::Semicolon, "';'")?;
        Ok(Stmt::ReturnStmt(ReturnStmt {
            expr,
            range: start.join(semi.range),
        }))
    }

    /// `break-stmt ::= "break" ";"`
    fn parse_break_stmt(&mut self) -> PResult<Stmt> {
        let start = self.bump().range;
        let semi = self.expect(TokenKind::Semicolon, "';'")?;
        Ok(Stmt::BreakStmt(BreakStmt {
            range: start.join(semi.range),
        }))
    }

    /// `expr-stmt ::= expr ";"`, restricted to call expressions: any other
    /// primary appearing as a statement is rejected once the full expression
    /// has been parsed, so the error still points at a real token rather
    /// than failing to find a production to try.
    pub(crate) fn parse_expr_stmt(&mut self) -> PResult<Stmt> {
        let expr = self.parse_expr()?;
        if !matches!(expr, Expr::Call(_)) {
            return Err(crate::error::SyntaxError::new(
                "only call expressions are allowed as statements",
                expr.range(),
            ));
        }
        let semi = self.expect(TokenKind::Semicolon, "';'")?;
        let range = expr.range().join(semi.range);
        Ok(Stmt::ExprStmt(ExprStmt { expr, range }))
    }
}
