//! Top-level declarations: `tu`, `top-stmt`, and everything that can appear
//! directly inside a translation unit, a `namespace`, or a `class`.
//!
//! `var-decl` and `func-def` share the syntactic prefix `specifiers
//! type-ident ident`; the only backtracking the parser performs is falling
//! back from that shared prefix to a plain expression statement when the
//! construct turns out not to be a declaration at all (see
//! [`Parser::parse_decl_or_expr_stmt`]). Inside a `namespace`/`class`/`tu`
//! body that fallback is not offered — `top-stmt` has no `expr-stmt`
//! alternative, so an incomplete declaration there is a hard error.

use indexmap::IndexMap;
use soda_lex::TokenKind;
use soda_util::span::SourceRange;
use soda_util::symbol::Symbol;

use crate::ast::{
    Access, Alias, Argument, ClassDef, Delegate, EmptyStmt, FqIdent, ForeignAnnotation, FuncDecl,
    FuncDef, Import, Namespace, Stmt, Storage, SymbolTable, Tu, TypeIdent, VarDecl,
};
use crate::error::PResult;
use crate::Parser;

impl Parser {
    pub(crate) fn parse_tu(&mut self) -> PResult<Tu> {
        let start = self.current_range();
        let mut stmts = Vec::new();
        while !self.is_eof() {
            stmts.push(self.parse_top_stmt()?);
        }
        let range = if let Some(last) = stmts.last() {
            start.join(last.range())
        } else {
            start
        };
        Ok(Tu {
            file: self.file,
            stmts,
            symbols: SymbolTable::new(),
            range,
        })
    }

    /// `top-stmt ::= foreign-decl | alias | import-stmt | namespace |
    /// class-def | func-def | var-decl ";" | empty-stmt | delegate`
    pub(crate) fn parse_top_stmt(&mut self) -> PResult<Stmt> {
        self.parse_top_stmt_like(false)
    }

    /// Shared by [`Parser::parse_top_stmt`] and `soda_par::stmt`'s local
    /// statement dispatch, which falls through to this once the stmt-only
    /// forms (`compound-stmt`, `if-stmt`, `switch-stmt`, `return-stmt`,
    /// `break-stmt`) are ruled out. `allow_expr_fallback` is `true` only
    /// from the local dispatch, matching `stmt`'s extra `expr-stmt`
    /// alternative that `top-stmt` doesn't have.
    pub(crate) fn parse_top_stmt_like(&mut self, allow_expr_fallback: bool) -> PResult<Stmt> {
        if self.at(TokenKind::LBracket) {
            return self.parse_foreign_decl();
        }
        if self.at_keyword("alias") {
            return self.parse_alias();
        }
        if self.at_keyword("import") {
            return self.parse_import();
        }
        if self.at_keyword("namespace") {
            return self.parse_namespace();
        }
        if self.at_keyword("class") {
            return self.parse_class_def();
        }
        if self.at_keyword("delegate") {
            return self.parse_delegate();
        }
        if self.at(TokenKind::Semicolon) {
            return self.parse_empty_stmt();
        }
        self.parse_decl_or_expr_stmt(allow_expr_fallback)
    }

    fn parse_empty_stmt(&mut self) -> PResult<Stmt> {
        let tok = self.bump();
        Ok(Stmt::EmptyStmt(EmptyStmt { range: tok.range }))
    }

    /// `foreign-decl ::= "[" "CCode" "(" params ")" "]" func-decl`
    fn parse_foreign_decl(&mut self) -> PResult<Stmt> {
        let open = self.expect(TokenKind::LBracket, "'['")?;
        if !self.at_keyword("CCode") {
            return Err(self.unexpected("'CCode'"));
        }
        self.bump();
        self.expect(TokenKind::LParen, "'('")?;
        let params = self.parse_foreign_params()?;
        self.expect(TokenKind::RParen, "')'")?;
        self.expect(TokenKind::RBracket, "']'")?;
        let foreign_range = open.range;

        let return_type = self.parse_type_ident()?;
        let name_tok = self.expect(TokenKind::Ident, "a function name")?;
        let name = Symbol::intern(&name_tok.text);
        self.expect(TokenKind::LParen, "'('")?;
        let args = self.parse_arg_list()?;
        self.expect(TokenKind::RParen, "')'")?;
        let semi = self.expect(TokenKind::Semicolon, "';'")?;

        Ok(Stmt::FuncDecl(FuncDecl {
            return_type,
            name,
            args,
            foreign: Some(ForeignAnnotation {
                params,
                range: foreign_range,
            }),
            range: foreign_range.join(semi.range),
        }))
    }

    fn parse_foreign_params(&mut self) -> PResult<IndexMap<Symbol, String>> {
        let mut params = IndexMap::new();
        if self.at(TokenKind::RParen) {
            return Ok(params);
        }
        loop {
            let key_tok = self.expect(TokenKind::Ident, "a parameter name")?;
            self.expect(TokenKind::Assign, "'='")?;
            let value_tok = self.expect(TokenKind::StrLit, "a string literal")?;
            params.insert(Symbol::intern(&key_tok.text), value_tok.text);
            if self.accept(TokenKind::Comma) {
                continue;
            }
            break;
        }
        Ok(params)
    }

    /// `alias ::= "alias" ident "=" type-ident ";"`
    fn parse_alias(&mut self) -> PResult<Stmt> {
        let start = self.bump().range;
        let name_tok = self.expect(TokenKind::Ident, "an alias name")?;
        self.expect(TokenKind::Assign, "'='")?;
        let target = self.parse_type_ident()?;
        let semi = self.expect(TokenKind::Semicolon, "';'")?;
        Ok(Stmt::Alias(Alias {
            name: Symbol::intern(&name_tok.text),
            target,
            range: start.join(semi.range),
        }))
    }

    /// `import-stmt ::= "import" fq-ident ";"`
    fn parse_import(&mut self) -> PResult<Stmt> {
        let start = self.bump().range;
        let (name, name_range) = self.parse_dotted_name()?;
        let semi = self.expect(TokenKind::Semicolon, "';'")?;
        Ok(Stmt::Import(Import {
            qualified_name: FqIdent {
                name,
                range: name_range,
            },
            range: start.join(semi.range),
        }))
    }

    /// `namespace ::= "namespace" [ fq-ident ] "{" { top-stmt } "}"`
    fn parse_namespace(&mut self) -> PResult<Stmt> {
        let start = self.bump().range;
        let name = if self.at(TokenKind::Ident) {
            let (name, range) = self.parse_dotted_name()?;
            Some(FqIdent { name, range })
        } else {
            None
        };
        self.expect(TokenKind::LBrace, "'{'")?;
        let mut stmts = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.is_eof() {
            stmts.push(self.parse_top_stmt()?);
        }
        let close = self.expect(TokenKind::RBrace, "'}'")?;
        Ok(Stmt::Namespace(Namespace {
            name,
            stmts,
            symbols: SymbolTable::new(),
            range: start.join(close.range),
        }))
    }

    /// `class-def ::= "class" ident [ ":" fq-ident { "," fq-ident } ] "{"
    /// { top-stmt } "}"`
    fn parse_class_def(&mut self) -> PResult<Stmt> {
        let start = self.bump().range;
        let name_tok = self.expect(TokenKind::Ident, "a class name")?;
        let name = Symbol::intern(&name_tok.text);

        let mut bases = Vec::new();
        if self.accept(TokenKind::Colon) {
            loop {
                let (base_name, base_range) = self.parse_dotted_name()?;
                bases.push(TypeIdent {
                    name: base_name,
                    is_const: false,
                    resolved_decl: None,
                    range: base_range,
                });
                if self.accept(TokenKind::Comma) {
                    continue;
                }
                break;
            }
        }

        self.expect(TokenKind::LBrace, "'{'")?;
        let mut stmts = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.is_eof() {
            stmts.push(self.parse_top_stmt()?);
        }
        let close = self.expect(TokenKind::RBrace, "'}'")?;
        Ok(Stmt::ClassDef(ClassDef {
            name,
            bases,
            stmts,
            symbols: SymbolTable::new(),
            range: start.join(close.range),
        }))
    }

    /// `delegate ::= "delegate" type-ident ident "(" arg-list ")" ";"`
    fn parse_delegate(&mut self) -> PResult<Stmt> {
        let start = self.bump().range;
        let return_type = self.parse_type_ident()?;
        let name_tok = self.expect(TokenKind::Ident, "a delegate name")?;
        let name = Symbol::intern(&name_tok.text);
        self.expect(TokenKind::LParen, "'('")?;
        let args = self.parse_arg_list()?;
        self.expect(TokenKind::RParen, "')'")?;
        let semi = self.expect(TokenKind::Semicolon, "';'")?;
        Ok(Stmt::Delegate(Delegate {
            return_type,
            name,
            args,
            symbols: SymbolTable::new(),
            range: start.join(semi.range),
        }))
    }

    /// `specifiers ::= { "public" | "private" | "protected" | "internal" |
    /// "static" }`
    fn parse_specifiers(&mut self) -> (Access, Storage) {
        let mut access = Access::Default;
        let mut storage = Storage::Instance;
        loop {
            if self.accept_keyword("public") {
                access = Access::Public;
            } else if self.accept_keyword("private") {
                access = Access::Private;
            } else if self.accept_keyword("protected") {
                access = Access::Protected;
            } else if self.accept_keyword("internal") {
                access = Access::Internal;
            } else if self.accept_keyword("static") {
                storage = Storage::Static;
            } else {
                break;
            }
        }
        (access, storage)
    }

    /// `type-ident ::= [ "const" ] fq-ident`
    ///
    /// `void` lexes as a keyword (it is reserved so it can never be used as
    /// an ordinary identifier), but it is also the return type every
    /// function returning nothing is declared with, so type position
    /// special-cases it: a bare `void` is accepted here the same way an
    /// `Ident` token would be, without ever becoming legal in a general
    /// `fq-ident` context such as an expression or an import target.
    pub(crate) fn parse_type_ident(&mut self) -> PResult<TypeIdent> {
        let start = self.current_range();
        let is_const = self.accept_keyword("const");
        let (name, name_range) = if self.at_keyword("void") {
            let tok = self.bump();
            (Symbol::intern(&tok.text), tok.range)
        } else {
            self.parse_dotted_name()?
        };
        let range = if is_const { start.join(name_range) } else { name_range };
        Ok(TypeIdent {
            name,
            is_const,
            resolved_decl: None,
            range,
        })
    }

    /// `arg-list ::= [ var-decl { "," var-decl } ]`, reading each element as
    /// `type-ident ident [ "=" expr ]` — a parameter has no specifiers.
    pub(crate) fn parse_arg_list(&mut self) -> PResult<Vec<Argument>> {
        let mut args = Vec::new();
        if self.at(TokenKind::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_argument()?);
            if self.accept(TokenKind::Comma) {
                continue;
            }
            break;
        }
        Ok(args)
    }

    fn parse_argument(&mut self) -> PResult<Argument> {
        let ty = self.parse_type_ident()?;
        let name_tok = self.expect(TokenKind::Ident, "a parameter name")?;
        let name = Symbol::intern(&name_tok.text);
        let mut range = ty.range.join(name_tok.range);
        let default = if self.accept(TokenKind::Assign) {
            let expr = self.parse_expr()?;
            range = range.join(expr.range());
            Some(expr)
        } else {
            None
        };
        Ok(Argument {
            ty,
            name,
            default,
            range,
        })
    }

    /// The shared `specifiers type-ident ident` prefix of `var-decl` and
    /// `func-def`. When `allow_expr_fallback` is set (inside a function
    /// body) and the prefix turns out not to name a declaration, the cursor
    /// rewinds and the tokens are reparsed as an expression statement.
    pub(crate) fn parse_decl_or_expr_stmt(&mut self, allow_expr_fallback: bool) -> PResult<Stmt> {
        let start = self.current_range();
        let mark = self.mark();
        let (access, storage) = self.parse_specifiers();
        let has_specifiers = access != Access::Default || storage != Storage::Instance;

        let ty = self.parse_type_ident()?;

        if self.at(TokenKind::Ident) {
            let name_tok = self.bump();
            let name = Symbol::intern(&name_tok.text);
            return if self.at(TokenKind::LParen) {
                self.finish_func_def(access, storage, ty, name, start)
            } else {
                self.finish_var_decl(access, storage, ty, name, start)
            };
        }

        if has_specifiers || !allow_expr_fallback {
            return Err(self.unexpected("an identifier after the declared type"));
        }

        self.reset(mark);
        self.parse_expr_stmt()
    }

    fn finish_func_def(
        &mut self,
        access: Access,
        storage: Storage,
        return_type: TypeIdent,
        name: Symbol,
        start: SourceRange,
    ) -> PResult<Stmt> {
        self.expect(TokenKind::LParen, "'('")?;
        let args = self.parse_arg_list()?;
        self.expect(TokenKind::RParen, "')'")?;
        let body = self.parse_compound_stmt()?;
        let range = start.join(body.range());
        let stmts = match body {
            Stmt::CompoundStmt(c) => c.stmts,
            _ => unreachable!("parse_compound_stmt always returns a CompoundStmt"),
        };
        Ok(Stmt::FuncDef(FuncDef {
            access,
            storage,
            return_type,
            name,
            args,
            stmts,
            symbols: SymbolTable::new(),
            range,
        }))
    }

    fn finish_var_decl(
        &mut self,
        access: Access,
        storage: Storage,
        ty: TypeIdent,
        name: Symbol,
        start: SourceRange,
    ) -> PResult<Stmt> {
        let init = if self.accept(TokenKind::Assign) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let semi = self.expect(TokenKind::Semicolon, "';'")?;
        Ok(Stmt::VarDecl(VarDecl {
            access,
            storage,
            ty,
            name,
            init,
            range: start.join(semi.range),
        }))
    }
}
