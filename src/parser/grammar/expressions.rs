//! Expression parsing by precedence climbing.
//!
//! Binding strength, loosest first: assignment (right), conditional, `||`,
//! `&&`, equality, comparison, `|`, `^`, `&`, shifts, additive,
//! multiplicative, `**` (right), prefix unary, postfix.

use smol_str::SmolStr;
use text_size::TextSize;

use super::types::is_elementary_type_name;
use crate::parser::lexer::TokenKind;
use crate::parser::parser::{PResult, Parser, unquote};
use crate::syntax::{
    CallArgs, Expr, ExprKind, Ident, Literal, NamedArgument, TypeName, TypeNameKind,
};

const NUMBER_UNITS: &[&str] = &[
    "wei", "gwei", "ether", "seconds", "minutes", "hours", "days", "weeks", "years",
];

/// (precedence, right associative)
fn binary_precedence(kind: TokenKind) -> Option<(u8, bool)> {
    use TokenKind::*;
    let prec = match kind {
        PipePipe => (1, false),
        AmpAmp => (2, false),
        EqEq | NotEq => (3, false),
        Lt | Gt | LtEq | GtEq => (4, false),
        Pipe => (5, false),
        Caret => (6, false),
        Amp => (7, false),
        Shl | Shr | ShrUnsigned => (8, false),
        Plus | Minus => (9, false),
        Star | Slash | Percent => (10, false),
        StarStar => (11, true),
        _ => return None,
    };
    Some(prec)
}

fn is_assignment_op(kind: TokenKind) -> bool {
    use TokenKind::*;
    matches!(
        kind,
        Assign
            | PlusAssign
            | MinusAssign
            | StarAssign
            | SlashAssign
            | PercentAssign
            | PipeAssign
            | AmpAssign
            | CaretAssign
            | ShlAssign
            | ShrAssign
            | ShrUnsignedAssign
    )
}

impl<'a> Parser<'a> {
    pub(crate) fn parse_expression(&mut self) -> PResult<Expr> {
        let start = self.start();
        let lhs = self.parse_conditional()?;
        match self.peek() {
            Some(kind) if is_assignment_op(kind) => {
                let op = SmolStr::new(self.text());
                self.bump();
                let rhs = self.parse_expression()?;
                Ok(Expr {
                    kind: ExprKind::Assign {
                        op,
                        lhs: Box::new(lhs),
                        rhs: Box::new(rhs),
                    },
                    range: self.range_from(start),
                })
            }
            _ => Ok(lhs),
        }
    }

    fn parse_conditional(&mut self) -> PResult<Expr> {
        let start = self.start();
        let condition = self.parse_binary(1)?;
        if !self.eat(TokenKind::Question) {
            return Ok(condition);
        }
        let then_expr = self.parse_expression()?;
        self.expect(TokenKind::Colon, "`:`")?;
        let else_expr = self.parse_expression()?;
        Ok(Expr {
            kind: ExprKind::Conditional {
                condition: Box::new(condition),
                then_expr: Box::new(then_expr),
                else_expr: Box::new(else_expr),
            },
            range: self.range_from(start),
        })
    }

    fn parse_binary(&mut self, min_prec: u8) -> PResult<Expr> {
        let start = self.start();
        let mut lhs = self.parse_unary()?;
        while let Some((prec, right_assoc)) = self.peek().and_then(binary_precedence) {
            if prec < min_prec {
                break;
            }
            let op = SmolStr::new(self.text());
            self.bump();
            let next_min = if right_assoc { prec } else { prec + 1 };
            let rhs = self.parse_binary(next_min)?;
            lhs = Expr {
                kind: ExprKind::Binary {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
                range: self.range_from(start),
            };
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> PResult<Expr> {
        let start = self.start();
        match self.peek() {
            Some(
                TokenKind::Bang
                | TokenKind::Tilde
                | TokenKind::Minus
                | TokenKind::Plus
                | TokenKind::PlusPlus
                | TokenKind::MinusMinus
                | TokenKind::Delete,
            ) => {
                let op = SmolStr::new(self.text());
                self.bump();
                let operand = self.parse_unary()?;
                Ok(Expr {
                    kind: ExprKind::Unary {
                        op,
                        operand: Box::new(operand),
                        prefix: true,
                    },
                    range: self.range_from(start),
                })
            }
            _ => {
                let primary = self.parse_primary()?;
                self.parse_postfix(start, primary)
            }
        }
    }

    fn parse_postfix(&mut self, start: TextSize, mut expr: Expr) -> PResult<Expr> {
        loop {
            let kind = match self.peek() {
                Some(TokenKind::Dot) => {
                    self.bump();
                    let member = self.expect_member_name()?;
                    ExprKind::Member {
                        base: Box::new(expr),
                        member,
                    }
                }
                Some(TokenKind::LBracket) => {
                    self.bump();
                    let kind = self.parse_index_or_slice(expr)?;
                    self.expect(TokenKind::RBracket, "`]`")?;
                    kind
                }
                Some(TokenKind::LParen) => {
                    let args = self.parse_call_args()?;
                    ExprKind::Call {
                        callee: Box::new(expr),
                        args,
                    }
                }
                Some(TokenKind::LBrace)
                    if self.nth(1) == Some(TokenKind::Ident)
                        && self.nth(2) == Some(TokenKind::Colon) =>
                {
                    self.bump();
                    let options = self.parse_named_arguments()?;
                    self.expect(TokenKind::RBrace, "`}`")?;
                    ExprKind::CallOptions {
                        callee: Box::new(expr),
                        options,
                    }
                }
                Some(TokenKind::PlusPlus | TokenKind::MinusMinus) => {
                    let op = SmolStr::new(self.text());
                    self.bump();
                    ExprKind::Unary {
                        op,
                        operand: Box::new(expr),
                        prefix: false,
                    }
                }
                _ => break,
            };
            expr = Expr {
                kind,
                range: self.range_from(start),
            };
        }
        Ok(expr)
    }

    /// After `[`: `]`, `i]`, `a:b]`, `:b]`, `a:]`. The closing bracket is left.
    fn parse_index_or_slice(&mut self, base: Expr) -> PResult<ExprKind> {
        let base = Box::new(base);
        if self.at(TokenKind::RBracket) {
            return Ok(ExprKind::Index { base, index: None });
        }
        let first = if self.at(TokenKind::Colon) {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };
        if !self.eat(TokenKind::Colon) {
            return Ok(ExprKind::Index { base, index: first });
        }
        let end = if self.at(TokenKind::RBracket) {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };
        Ok(ExprKind::Slice {
            base,
            start: first,
            end,
        })
    }

    /// `(a, b)` or `({x: 1, y: 2})`
    pub(crate) fn parse_call_args(&mut self) -> PResult<CallArgs> {
        self.expect(TokenKind::LParen, "`(`")?;
        if self.eat(TokenKind::LBrace) {
            let args = self.parse_named_arguments()?;
            self.expect(TokenKind::RBrace, "`}`")?;
            self.expect(TokenKind::RParen, "`)`")?;
            return Ok(CallArgs::Named(args));
        }
        let args = self.parse_expression_list(TokenKind::RParen)?;
        self.expect(TokenKind::RParen, "`)`")?;
        Ok(CallArgs::Positional(args))
    }

    /// Comma separated expressions up to (not including) `close`.
    pub(crate) fn parse_expression_list(&mut self, close: TokenKind) -> PResult<Vec<Expr>> {
        let mut items = Vec::new();
        if self.at(close) {
            return Ok(items);
        }
        loop {
            items.push(self.parse_expression()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(items)
    }

    /// `name: value, ...` up to the closing brace (left unconsumed).
    fn parse_named_arguments(&mut self) -> PResult<Vec<NamedArgument>> {
        let mut args = Vec::new();
        while !self.at(TokenKind::RBrace) {
            let name = self.expect_ident()?;
            self.expect(TokenKind::Colon, "`:`")?;
            let value = self.parse_expression()?;
            args.push(NamedArgument { name, value });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(args)
    }

    fn parse_primary(&mut self) -> PResult<Expr> {
        let start = self.start();
        let kind = match self.peek() {
            Some(TokenKind::Ident) if is_elementary_type_name(self.text()) => {
                let name = SmolStr::new(self.text());
                self.bump();
                let payable = name == "address" && self.eat(TokenKind::Payable);
                ExprKind::ElementaryType(TypeName {
                    kind: TypeNameKind::Elementary { name, payable },
                    range: self.range_from(start),
                })
            }
            Some(TokenKind::Ident) => ExprKind::Ident(self.expect_ident()?),
            // `payable(x)` converts to `address payable`
            Some(TokenKind::Payable) => {
                self.bump();
                ExprKind::ElementaryType(TypeName {
                    kind: TypeNameKind::Elementary {
                        name: SmolStr::new_static("address"),
                        payable: true,
                    },
                    range: self.range_from(start),
                })
            }
            // `type(T)` behaves like a call to a builtin named `type`
            Some(TokenKind::Type) => {
                let range = self.bump();
                ExprKind::Ident(Ident {
                    name: SmolStr::new_static("type"),
                    range,
                })
            }
            Some(TokenKind::Number) => {
                let mut text = self.text().to_string();
                self.bump();
                if self.at(TokenKind::Ident) && NUMBER_UNITS.contains(&self.text()) {
                    text.push(' ');
                    text.push_str(self.text());
                    self.bump();
                }
                ExprKind::Literal(Literal::Number(text))
            }
            Some(TokenKind::String) => {
                let mut value = String::new();
                while self.at(TokenKind::String) {
                    value.push_str(&unquote(self.text()));
                    self.bump();
                }
                ExprKind::Literal(Literal::String(value))
            }
            Some(TokenKind::HexString) => {
                let mut value = String::new();
                while self.at(TokenKind::HexString) {
                    value.push_str(&unquote(self.text()));
                    self.bump();
                }
                ExprKind::Literal(Literal::HexString(value))
            }
            Some(TokenKind::True) => {
                self.bump();
                ExprKind::Literal(Literal::Bool(true))
            }
            Some(TokenKind::False) => {
                self.bump();
                ExprKind::Literal(Literal::Bool(false))
            }
            Some(TokenKind::New) => {
                self.bump();
                ExprKind::New(self.parse_type_name()?)
            }
            Some(TokenKind::LParen) => {
                self.bump();
                let mut items = Vec::new();
                loop {
                    if self.at(TokenKind::Comma) || self.at(TokenKind::RParen) {
                        items.push(None);
                    } else {
                        items.push(Some(self.parse_expression()?));
                    }
                    if !self.eat(TokenKind::Comma) {
                        break;
                    }
                }
                self.expect(TokenKind::RParen, "`)`")?;
                if items.len() == 1 && items[0].is_none() {
                    items.clear();
                }
                ExprKind::Tuple(items)
            }
            Some(TokenKind::LBracket) => {
                self.bump();
                let items = self.parse_expression_list(TokenKind::RBracket)?;
                self.expect(TokenKind::RBracket, "`]`")?;
                ExprKind::Array(items)
            }
            _ => return Err(self.error_here("expected expression")),
        };
        Ok(Expr {
            kind,
            range: self.range_from(start),
        })
    }
}
