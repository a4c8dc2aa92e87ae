//! Blocks and statements.
//!
//! A statement that starts with a type name is ambiguous with an expression
//! statement (`a[i] = 1;` vs `T[] x;`). The parser tries a declaration first
//! and rewinds to the expression form when that fails.

use crate::parser::lexer::TokenKind;
use crate::parser::parser::{PResult, Parser};
use crate::syntax::{Block, CatchClause, Statement, StatementKind, VariableDeclaration};

impl<'a> Parser<'a> {
    /// `unchecked? { Statement* }`
    pub(crate) fn parse_block(&mut self) -> PResult<Block> {
        let start = self.start();
        let unchecked = self.eat(TokenKind::Unchecked);
        self.expect(TokenKind::LBrace, "`{`")?;
        let mut statements = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.at_eof() {
            statements.push(self.parse_statement()?);
        }
        self.expect(TokenKind::RBrace, "`}`")?;
        Ok(Block {
            statements,
            unchecked,
            range: self.range_from(start),
        })
    }

    pub(crate) fn parse_statement(&mut self) -> PResult<Statement> {
        let start = self.start();
        let kind = match self.peek() {
            Some(TokenKind::LBrace) => StatementKind::Block(self.parse_block()?),
            Some(TokenKind::Unchecked) if self.nth(1) == Some(TokenKind::LBrace) => {
                StatementKind::Block(self.parse_block()?)
            }
            Some(TokenKind::If) => {
                self.bump();
                self.expect(TokenKind::LParen, "`(`")?;
                let condition = self.parse_expression()?;
                self.expect(TokenKind::RParen, "`)`")?;
                let then_branch = Box::new(self.parse_statement()?);
                let else_branch = if self.eat(TokenKind::Else) {
                    Some(Box::new(self.parse_statement()?))
                } else {
                    None
                };
                StatementKind::If {
                    condition,
                    then_branch,
                    else_branch,
                }
            }
            Some(TokenKind::For) => self.parse_for()?,
            Some(TokenKind::While) => {
                self.bump();
                self.expect(TokenKind::LParen, "`(`")?;
                let condition = self.parse_expression()?;
                self.expect(TokenKind::RParen, "`)`")?;
                let body = Box::new(self.parse_statement()?);
                StatementKind::While { condition, body }
            }
            Some(TokenKind::Do) => {
                self.bump();
                let body = Box::new(self.parse_statement()?);
                self.expect(TokenKind::While, "`while`")?;
                self.expect(TokenKind::LParen, "`(`")?;
                let condition = self.parse_expression()?;
                self.expect(TokenKind::RParen, "`)`")?;
                self.expect(TokenKind::Semicolon, "`;`")?;
                StatementKind::DoWhile { body, condition }
            }
            Some(TokenKind::Return) => {
                self.bump();
                let value = if self.at(TokenKind::Semicolon) {
                    None
                } else {
                    Some(self.parse_expression()?)
                };
                self.expect(TokenKind::Semicolon, "`;`")?;
                StatementKind::Return(value)
            }
            Some(TokenKind::Emit) => {
                self.bump();
                let event = self.parse_expression()?;
                self.expect(TokenKind::Semicolon, "`;`")?;
                StatementKind::Emit(event)
            }
            // `revert Err(..)`; plain `revert(..)` is an ordinary call
            Some(TokenKind::Ident)
                if self.at_contextual("revert") && self.nth(1) == Some(TokenKind::Ident) =>
            {
                self.bump();
                let error = self.parse_expression()?;
                self.expect(TokenKind::Semicolon, "`;`")?;
                StatementKind::Revert(error)
            }
            Some(TokenKind::Try) => self.parse_try()?,
            Some(TokenKind::Assembly) => {
                self.skip_assembly()?;
                StatementKind::Assembly
            }
            Some(TokenKind::Break) => {
                self.bump();
                self.expect(TokenKind::Semicolon, "`;`")?;
                StatementKind::Break
            }
            Some(TokenKind::Continue) => {
                self.bump();
                self.expect(TokenKind::Semicolon, "`;`")?;
                StatementKind::Continue
            }
            _ => return self.parse_simple_statement(),
        };
        Ok(Statement {
            kind,
            range: self.range_from(start),
        })
    }

    /// `for (init; cond; update) body`
    fn parse_for(&mut self) -> PResult<StatementKind> {
        self.expect(TokenKind::For, "`for`")?;
        self.expect(TokenKind::LParen, "`(`")?;
        let init = if self.eat(TokenKind::Semicolon) {
            None
        } else {
            Some(Box::new(self.parse_simple_statement()?))
        };
        let condition = if self.at(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::Semicolon, "`;`")?;
        let update = if self.at(TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::RParen, "`)`")?;
        let body = Box::new(self.parse_statement()?);
        Ok(StatementKind::For {
            init,
            condition,
            update,
            body,
        })
    }

    /// `try expr returns (..) { } catch Name(..) { } catch { }`
    fn parse_try(&mut self) -> PResult<StatementKind> {
        self.expect(TokenKind::Try, "`try`")?;
        let expr = self.parse_expression()?;
        let returns = if self.eat(TokenKind::Returns) {
            self.parse_parameter_list()?
        } else {
            Vec::new()
        };
        let body = self.parse_block()?;
        let mut catches = Vec::new();
        while self.at(TokenKind::Catch) {
            let start = self.start();
            self.bump();
            let ident = if self.at(TokenKind::Ident) {
                Some(self.expect_ident()?)
            } else {
                None
            };
            let params = if self.at(TokenKind::LParen) {
                self.parse_parameter_list()?
            } else {
                Vec::new()
            };
            let body = self.parse_block()?;
            catches.push(CatchClause {
                ident,
                params,
                body,
                range: self.range_from(start),
            });
        }
        Ok(StatementKind::Try {
            expr,
            returns,
            body,
            catches,
        })
    }

    /// `assembly "evmasm"? ("memory-safe")? { ... }` skipped by brace balance.
    fn skip_assembly(&mut self) -> PResult<()> {
        self.expect(TokenKind::Assembly, "`assembly`")?;
        self.eat(TokenKind::String);
        if self.eat(TokenKind::LParen) {
            while !self.at(TokenKind::RParen) && !self.at_eof() {
                self.bump();
            }
            self.expect(TokenKind::RParen, "`)`")?;
        }
        self.expect(TokenKind::LBrace, "`{`")?;
        let mut depth = 1usize;
        while depth > 0 {
            match self.peek() {
                Some(TokenKind::LBrace) => depth += 1,
                Some(TokenKind::RBrace) => depth -= 1,
                None => return Err(self.error_here("unterminated assembly block")),
                _ => {}
            }
            self.bump();
        }
        Ok(())
    }

    /// Variable declaration or expression statement, including the `;`.
    pub(crate) fn parse_simple_statement(&mut self) -> PResult<Statement> {
        let start = self.start();
        let checkpoint = self.checkpoint();

        let declarations = if self.at(TokenKind::LParen) {
            self.try_tuple_declaration()
                .filter(|_| self.at(TokenKind::Assign))
        } else {
            self.try_variable_declaration()
                .filter(|_| self.at(TokenKind::Assign) || self.at(TokenKind::Semicolon))
                .map(|decl| vec![Some(decl)])
        };

        let kind = match declarations {
            Some(declarations) => {
                let initializer = if self.eat(TokenKind::Assign) {
                    Some(self.parse_expression()?)
                } else {
                    None
                };
                StatementKind::VariableDeclaration {
                    declarations,
                    initializer,
                }
            }
            None => {
                self.rewind(checkpoint);
                StatementKind::Expression(self.parse_expression()?)
            }
        };
        self.expect(TokenKind::Semicolon, "`;`")?;
        Ok(Statement {
            kind,
            range: self.range_from(start),
        })
    }

    fn try_variable_declaration(&mut self) -> Option<VariableDeclaration> {
        self.parse_variable_declaration().ok()
    }

    /// `Type location? name`
    pub(crate) fn parse_variable_declaration(&mut self) -> PResult<VariableDeclaration> {
        let start = self.start();
        let ty = self.parse_type_name()?;
        let location = self.parse_storage_location();
        let name = self.expect_ident()?;
        Ok(VariableDeclaration {
            ty,
            location,
            name,
            range: self.range_from(start),
        })
    }

    /// `(uint a, , bool c)`; empty slots are `None`.
    fn try_tuple_declaration(&mut self) -> Option<Vec<Option<VariableDeclaration>>> {
        if !self.eat(TokenKind::LParen) {
            return None;
        }
        let mut declarations = Vec::new();
        loop {
            if self.at(TokenKind::Comma) || self.at(TokenKind::RParen) {
                declarations.push(None);
            } else {
                declarations.push(Some(self.try_variable_declaration()?));
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        if !self.eat(TokenKind::RParen) {
            return None;
        }
        declarations.iter().any(Option::is_some).then_some(declarations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::ExprKind;

    fn statement(text: &str) -> Statement {
        let mut parser = Parser::new(text);
        let stmt = parser.parse_statement().unwrap();
        assert!(parser.at_eof(), "trailing input in {text:?}");
        stmt
    }

    #[test]
    fn test_declaration_vs_expression() {
        assert!(matches!(
            statement("Point memory p;").kind,
            StatementKind::VariableDeclaration { .. }
        ));
        assert!(matches!(
            statement("uint[] storage xs = data;").kind,
            StatementKind::VariableDeclaration { .. }
        ));
        assert!(matches!(
            statement("a[i] = 1;").kind,
            StatementKind::Expression(_)
        ));
        assert!(matches!(
            statement("a.b = c;").kind,
            StatementKind::Expression(_)
        ));
    }

    #[test]
    fn test_tuple_declaration_and_assignment() {
        let StatementKind::VariableDeclaration { declarations, .. } =
            statement("(uint a, , bool c) = f();").kind
        else {
            panic!("expected declaration");
        };
        assert_eq!(declarations.len(), 3);
        assert!(declarations[1].is_none());

        let StatementKind::Expression(expr) = statement("(a, b) = f();").kind else {
            panic!("expected expression");
        };
        assert!(matches!(expr.kind, ExprKind::Assign { .. }));
    }

    #[test]
    fn test_for_and_unchecked() {
        let StatementKind::For { init, body, .. } =
            statement("for (uint i = 0; i < n; i++) { unchecked { x++; } }").kind
        else {
            panic!("expected for");
        };
        assert!(init.is_some());
        let StatementKind::Block(block) = body.kind else {
            panic!("expected block");
        };
        let StatementKind::Block(inner) = &block.statements[0].kind else {
            panic!("expected unchecked block");
        };
        assert!(inner.unchecked);
    }

    #[test]
    fn test_revert_forms() {
        assert!(matches!(
            statement("revert Unauthorized(msg.sender);").kind,
            StatementKind::Revert(_)
        ));
        assert!(matches!(
            statement("revert(\"nope\");").kind,
            StatementKind::Expression(_)
        ));
    }

    #[test]
    fn test_try_catch() {
        let StatementKind::Try { returns, catches, .. } = statement(
            "try t.f() returns (uint v) { x = v; } catch Error(string memory r) { } catch { }",
        )
        .kind
        else {
            panic!("expected try");
        };
        assert_eq!(returns.len(), 1);
        assert_eq!(catches.len(), 2);
        assert_eq!(catches[0].ident.as_ref().unwrap().name, "Error");
    }

    #[test]
    fn test_assembly_is_skipped() {
        assert_eq!(
            statement("assembly (\"memory-safe\") { let x := mload(0x40) { } }").kind,
            StatementKind::Assembly
        );
    }

    #[test]
    fn test_missing_semicolon() {
        let err = Parser::new("x = 1 }").parse_statement().unwrap_err();
        assert_eq!(u32::from(err.offset), 6);
    }
}
