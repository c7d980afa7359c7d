//! Expression parsing.
//!
//! `expr ::= primary { binop primary }`, climbed with the usual precedence
//! loop: a smaller precedence number binds less tightly, every level is
//! left-associative, so the recursive call on the right-hand operand uses
//! `prec + 1` as its floor.
//!
//! `primary ::= number | strlit | call | fq-ident | "(" expr ")"`. A call and
//! a bare dotted identifier share the `fq-ident` prefix; the branch is
//! decided by a single token of lookahead for `(` once the name is read, no
//! backtracking needed. A parenthesized expression is not its own node —
//! `(` and `)` are consumed and the inner expression is returned unchanged.

use soda_lex::TokenKind;
use soda_util::span::SourceRange;
use soda_util::symbol::Symbol;

use crate::ast::{BinOp, BinOpExpr, CallExpr, Expr, FloatExpr, IdentExpr, IntBase, IntegerExpr, StrLitExpr};
use crate::error::PResult;
use crate::Parser;

impl Parser {
    pub fn parse_expr(&mut self) -> PResult<Expr> {
        self.parse_expr_prec(0)
    }

    fn parse_expr_prec(&mut self, min_prec: u8) -> PResult<Expr> {
        let mut lhs = self.parse_primary()?;
        while let Some(op) = self.peek_binop() {
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            self.bump();
            let rhs = self.parse_expr_prec(prec + 1)?;
            let range = lhs.range().join(rhs.range());
            lhs = Expr::BinOp(BinOpExpr {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
                range,
            });
        }
        Ok(lhs)
    }

    fn peek_binop(&self) -> Option<BinOp> {
        let op = match self.current_kind() {
            TokenKind::AndAnd => BinOp::LogAnd,
            TokenKind::OrOr => BinOp::LogOr,
            TokenKind::LeOp => BinOp::Le,
            TokenKind::GeOp => BinOp::Ge,
            TokenKind::NeOp => BinOp::Ne,
            TokenKind::EqOp => BinOp::EqEq,
            TokenKind::Shl => BinOp::Shl,
            TokenKind::Shr => BinOp::Shr,
            TokenKind::Amp => BinOp::BitAnd,
            TokenKind::Pipe => BinOp::BitOr,
            TokenKind::Caret => BinOp::BitXor,
            TokenKind::Lt => BinOp::Lt,
            TokenKind::Gt => BinOp::Gt,
            TokenKind::Plus => BinOp::Add,
            TokenKind::Minus => BinOp::Sub,
            TokenKind::Star => BinOp::Mul,
            TokenKind::Slash => BinOp::Div,
            TokenKind::Percent => BinOp::Mod,
            TokenKind::PlusPlus => BinOp::Inc,
            TokenKind::MinusMinus => BinOp::Dec,
            _ => return None,
        };
        Some(op)
    }

    fn parse_primary(&mut self) -> PResult<Expr> {
        match self.current_kind() {
            TokenKind::DecIconst => self.parse_integer(10),
            TokenKind::HexIconst => self.parse_integer(16),
            TokenKind::OctIconst => self.parse_integer(8),
            TokenKind::BinIconst => self.parse_integer(2),
            TokenKind::FConst => self.parse_float(),
            TokenKind::StrLit => self.parse_strlit(),
            TokenKind::LParen => self.parse_paren(),
            TokenKind::Ident => self.parse_ident_or_call(),
            _ => Err(self.unexpected("an expression")),
        }
    }

    fn parse_integer(&mut self, radix: u32) -> PResult<Expr> {
        let token = self.bump();
        let base = match radix {
            16 => IntBase::Hex,
            8 => IntBase::Oct,
            2 => IntBase::Bin,
            _ => IntBase::Dec,
        };
        let value = u64::from_str_radix(&token.text, radix).unwrap_or(0);
        Ok(Expr::Integer(IntegerExpr {
            value,
            base,
            range: token.range,
        }))
    }

    fn parse_float(&mut self) -> PResult<Expr> {
        let token = self.bump();
        let value = token.text.parse::<f64>().unwrap_or(0.0);
        Ok(Expr::Float(FloatExpr {
            value,
            range: token.range,
        }))
    }

    fn parse_strlit(&mut self) -> PResult<Expr> {
        let token = self.bump();
        Ok(Expr::StrLit(StrLitExpr {
            text: token.text,
            range: token.range,
        }))
    }

    fn parse_paren(&mut self) -> PResult<Expr> {
        self.bump();
        let inner = self.parse_expr()?;
        self.expect(TokenKind::RParen, "')'")?;
        Ok(inner)
    }

    fn parse_ident_or_call(&mut self) -> PResult<Expr> {
        let (name, range) = self.parse_dotted_name()?;
        if self.at(TokenKind::LParen) {
            self.parse_call(name, range)
        } else {
            Ok(Expr::Ident(IdentExpr {
                name,
                resolved_decl: None,
                range,
            }))
        }
    }

    fn parse_call(&mut self, callee: Symbol, callee_range: SourceRange) -> PResult<Expr> {
        self.bump();
        let mut args = Vec::new();
        if !self.at(TokenKind::RParen) {
            loop {
                args.push(self.parse_expr()?);
                if self.accept(TokenKind::Comma) {
                    continue;
                }
                break;
            }
        }
        let close = self.expect(TokenKind::RParen, "')'")?;
        Ok(Expr::Call(CallExpr {
            callee,
            args,
            range: callee_range.join(close.range),
        }))
    }
}
