//! Source units, contracts and declarations.

use smol_str::SmolStr;
use text_size::TextRange;

use crate::parser::lexer::TokenKind;
use crate::parser::parser::{PResult, Parser, unquote};
use crate::syntax::*;

impl<'a> Parser<'a> {
    /// SourceUnit = SourceItem*
    pub(crate) fn parse_source_unit(&mut self) -> PResult<SourceUnit> {
        let mut items = Vec::new();
        while !self.at_eof() {
            if self.eat(TokenKind::Semicolon) {
                continue;
            }
            items.push(self.parse_source_item()?);
        }
        Ok(SourceUnit {
            items,
            range: TextRange::up_to(self.source_len()),
        })
    }

    fn parse_source_item(&mut self) -> PResult<SourceItem> {
        let doc = self.take_doc();
        let item = match self.peek() {
            Some(TokenKind::Pragma) => SourceItem::Pragma(self.parse_pragma()?),
            Some(TokenKind::Import) => SourceItem::Import(self.parse_import()?),
            Some(
                TokenKind::Abstract
                | TokenKind::Contract
                | TokenKind::Interface
                | TokenKind::Library,
            ) => SourceItem::Contract(self.parse_contract(doc)?),
            Some(TokenKind::Function) => SourceItem::Function(self.parse_function(doc)?),
            Some(TokenKind::Struct) => SourceItem::Struct(self.parse_struct(doc)?),
            Some(TokenKind::Enum) => SourceItem::Enum(self.parse_enum(doc)?),
            Some(TokenKind::Event) => SourceItem::Event(self.parse_event(doc)?),
            Some(TokenKind::Type) => SourceItem::UserType(self.parse_user_type(doc)?),
            Some(TokenKind::Using) => SourceItem::Using(self.parse_using()?),
            Some(TokenKind::Ident) if self.at_error_definition() => {
                SourceItem::Error(self.parse_error_definition(doc)?)
            }
            Some(_) => SourceItem::Variable(self.parse_state_variable(doc)?),
            None => return Err(self.error_here("expected declaration")),
        };
        Ok(item)
    }

    fn at_error_definition(&self) -> bool {
        self.at_contextual("error")
            && self.nth(1) == Some(TokenKind::Ident)
            && self.nth(2) == Some(TokenKind::LParen)
    }

    /// `pragma <anything> ;`
    fn parse_pragma(&mut self) -> PResult<PragmaDirective> {
        let start = self.start();
        let keyword = self.expect(TokenKind::Pragma, "`pragma`")?;
        while !self.at(TokenKind::Semicolon) {
            if self.at_eof() {
                return Err(self.error_here("expected `;`"));
            }
            self.bump();
        }
        let end = self.start();
        self.bump();
        let text = self.source_text(TextRange::new(keyword.end(), end)).trim().to_string();
        Ok(PragmaDirective {
            text,
            range: self.range_from(start),
        })
    }

    /// ```text
    /// import "path" (as X)? ;
    /// import * as X from "path" ;
    /// import { A, B as C } from "path" ;
    /// ```
    fn parse_import(&mut self) -> PResult<ImportDirective> {
        let start = self.start();
        self.expect(TokenKind::Import, "`import`")?;

        let (path, kind) = match self.peek() {
            Some(TokenKind::String) => {
                let path = self.parse_string_literal()?;
                let alias = if self.eat(TokenKind::As) {
                    Some(self.expect_ident()?)
                } else {
                    None
                };
                (path, ImportKind::Plain { alias })
            }
            Some(TokenKind::Star) => {
                self.bump();
                self.expect(TokenKind::As, "`as`")?;
                let alias = self.expect_ident()?;
                self.expect_contextual("from")?;
                (self.parse_string_literal()?, ImportKind::Glob { alias })
            }
            Some(TokenKind::LBrace) => {
                self.bump();
                let mut symbols = Vec::new();
                while !self.at(TokenKind::RBrace) {
                    let name = self.expect_ident()?;
                    let alias = if self.eat(TokenKind::As) {
                        Some(self.expect_ident()?)
                    } else {
                        None
                    };
                    symbols.push(ImportSymbol { name, alias });
                    if !self.eat(TokenKind::Comma) {
                        break;
                    }
                }
                self.expect(TokenKind::RBrace, "`}`")?;
                self.expect_contextual("from")?;
                (self.parse_string_literal()?, ImportKind::Symbols(symbols))
            }
            _ => return Err(self.error_here("expected import path")),
        };

        self.expect(TokenKind::Semicolon, "`;`")?;
        Ok(ImportDirective {
            path,
            kind,
            range: self.range_from(start),
        })
    }

    fn parse_string_literal(&mut self) -> PResult<StringLiteral> {
        if !self.at(TokenKind::String) {
            return Err(self.error_here("expected string literal"));
        }
        let value = unquote(self.text());
        let range = self.bump();
        Ok(StringLiteral { value, range })
    }

    /// `abstract? (contract|interface|library) Name (is Base(args)?, ...)? { parts }`
    fn parse_contract(&mut self, doc: Option<String>) -> PResult<ContractDefinition> {
        let start = self.start();
        let is_abstract = self.eat(TokenKind::Abstract);
        let kind = match self.peek() {
            Some(TokenKind::Contract) => ContractKind::Contract,
            Some(TokenKind::Interface) => ContractKind::Interface,
            Some(TokenKind::Library) => ContractKind::Library,
            _ => return Err(self.error_here("expected `contract`")),
        };
        self.bump();
        let name = self.expect_ident()?;

        let mut bases = Vec::new();
        if self.eat(TokenKind::Is) {
            loop {
                let base_start = self.start();
                let path = self.parse_ident_path()?;
                let args = if self.at(TokenKind::LParen) {
                    self.bump();
                    let args = self.parse_expression_list(TokenKind::RParen)?;
                    self.expect(TokenKind::RParen, "`)`")?;
                    Some(args)
                } else {
                    None
                };
                bases.push(InheritanceSpecifier {
                    path,
                    args,
                    range: self.range_from(base_start),
                });
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect(TokenKind::LBrace, "`{`")?;
        let mut parts = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.at_eof() {
            if self.eat(TokenKind::Semicolon) {
                continue;
            }
            parts.push(self.parse_contract_part()?);
        }
        self.expect(TokenKind::RBrace, "`}`")?;

        Ok(ContractDefinition {
            kind,
            is_abstract,
            name,
            bases,
            parts,
            doc,
            range: self.range_from(start),
        })
    }

    fn parse_contract_part(&mut self) -> PResult<ContractPart> {
        let doc = self.take_doc();
        let part = match self.peek() {
            Some(TokenKind::Function | TokenKind::Constructor | TokenKind::Modifier) => {
                ContractPart::Function(self.parse_function(doc)?)
            }
            Some(TokenKind::Ident)
                if (self.at_contextual("fallback") || self.at_contextual("receive"))
                    && self.nth(1) == Some(TokenKind::LParen) =>
            {
                ContractPart::Function(self.parse_function(doc)?)
            }
            Some(TokenKind::Struct) => ContractPart::Struct(self.parse_struct(doc)?),
            Some(TokenKind::Enum) => ContractPart::Enum(self.parse_enum(doc)?),
            Some(TokenKind::Event) => ContractPart::Event(self.parse_event(doc)?),
            Some(TokenKind::Type) => ContractPart::UserType(self.parse_user_type(doc)?),
            Some(TokenKind::Using) => ContractPart::Using(self.parse_using()?),
            Some(TokenKind::Ident) if self.at_error_definition() => {
                ContractPart::Error(self.parse_error_definition(doc)?)
            }
            _ => ContractPart::Variable(self.parse_state_variable(doc)?),
        };
        Ok(part)
    }

    /// Functions, constructors, modifiers, `fallback` and `receive`.
    pub(crate) fn parse_function(&mut self, doc: Option<String>) -> PResult<FunctionDefinition> {
        let start = self.start();
        let (kind, name) = match self.peek() {
            Some(TokenKind::Function) => {
                self.bump();
                let name = if self.at(TokenKind::Ident) {
                    Some(self.expect_ident()?)
                } else {
                    None
                };
                (FunctionKind::Function, name)
            }
            Some(TokenKind::Constructor) => {
                self.bump();
                (FunctionKind::Constructor, None)
            }
            Some(TokenKind::Modifier) => {
                self.bump();
                (FunctionKind::Modifier, Some(self.expect_ident()?))
            }
            Some(TokenKind::Ident) if self.at_contextual("fallback") => {
                (FunctionKind::Fallback, Some(self.expect_ident()?))
            }
            Some(TokenKind::Ident) if self.at_contextual("receive") => {
                (FunctionKind::Receive, Some(self.expect_ident()?))
            }
            _ => return Err(self.error_here("expected function")),
        };

        // Modifiers may omit the parameter list.
        let params = if self.at(TokenKind::LParen) {
            self.parse_parameter_list()?
        } else {
            Vec::new()
        };

        let mut attributes = Vec::new();
        loop {
            let attribute = match self.peek() {
                Some(TokenKind::Public) => FunctionAttribute::Visibility(Visibility::Public),
                Some(TokenKind::Private) => FunctionAttribute::Visibility(Visibility::Private),
                Some(TokenKind::Internal) => FunctionAttribute::Visibility(Visibility::Internal),
                Some(TokenKind::External) => FunctionAttribute::Visibility(Visibility::External),
                Some(TokenKind::Pure) => FunctionAttribute::Mutability(Mutability::Pure),
                Some(TokenKind::View) => FunctionAttribute::Mutability(Mutability::View),
                Some(TokenKind::Payable) => FunctionAttribute::Mutability(Mutability::Payable),
                Some(TokenKind::Constant) => FunctionAttribute::Mutability(Mutability::Constant),
                Some(TokenKind::Virtual) => FunctionAttribute::Virtual,
                Some(TokenKind::Override) => {
                    attributes.push(FunctionAttribute::Override(self.parse_override()?));
                    continue;
                }
                Some(TokenKind::Ident) => {
                    attributes.push(FunctionAttribute::Modifier(
                        self.parse_modifier_invocation()?,
                    ));
                    continue;
                }
                _ => break,
            };
            self.bump();
            attributes.push(attribute);
        }

        let returns = if self.eat(TokenKind::Returns) {
            self.parse_parameter_list()?
        } else {
            Vec::new()
        };

        let body = if self.eat(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_block()?)
        };

        Ok(FunctionDefinition {
            kind,
            name,
            params,
            returns,
            attributes,
            body,
            doc,
            range: self.range_from(start),
        })
    }

    /// `override` or `override(A, B)`
    fn parse_override(&mut self) -> PResult<Vec<IdentPath>> {
        self.expect(TokenKind::Override, "`override`")?;
        let mut paths = Vec::new();
        if self.eat(TokenKind::LParen) {
            while !self.at(TokenKind::RParen) {
                paths.push(self.parse_ident_path()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::RParen, "`)`")?;
        }
        Ok(paths)
    }

    fn parse_modifier_invocation(&mut self) -> PResult<ModifierInvocation> {
        let start = self.start();
        let path = self.parse_ident_path()?;
        let args = if self.at(TokenKind::LParen) {
            self.bump();
            let args = self.parse_expression_list(TokenKind::RParen)?;
            self.expect(TokenKind::RParen, "`)`")?;
            Some(args)
        } else {
            None
        };
        Ok(ModifierInvocation {
            path,
            args,
            range: self.range_from(start),
        })
    }

    /// `Type attrs* name (= expr)? ;`
    fn parse_state_variable(&mut self, doc: Option<String>) -> PResult<VariableDefinition> {
        let start = self.start();
        let ty = self.parse_type_name()?;

        let mut attributes = Vec::new();
        loop {
            let attribute = match self.peek() {
                Some(TokenKind::Public) => VariableAttribute::Visibility(Visibility::Public),
                Some(TokenKind::Private) => VariableAttribute::Visibility(Visibility::Private),
                Some(TokenKind::Internal) => VariableAttribute::Visibility(Visibility::Internal),
                Some(TokenKind::External) => VariableAttribute::Visibility(Visibility::External),
                Some(TokenKind::Constant) => VariableAttribute::Constant,
                Some(TokenKind::Immutable) => VariableAttribute::Immutable,
                Some(TokenKind::Ident)
                    if self.at_contextual("transient")
                        && self.nth(1) == Some(TokenKind::Ident) =>
                {
                    VariableAttribute::Transient
                }
                Some(TokenKind::Override) => {
                    attributes.push(VariableAttribute::Override(self.parse_override()?));
                    continue;
                }
                _ => break,
            };
            self.bump();
            attributes.push(attribute);
        }

        let name = self.expect_ident()?;
        let initializer = if self.eat(TokenKind::Assign) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.expect(TokenKind::Semicolon, "`;`")?;

        Ok(VariableDefinition {
            ty,
            attributes,
            name,
            initializer,
            doc,
            range: self.range_from(start),
        })
    }

    fn parse_struct(&mut self, doc: Option<String>) -> PResult<StructDefinition> {
        let start = self.start();
        self.expect(TokenKind::Struct, "`struct`")?;
        let name = self.expect_ident()?;
        self.expect(TokenKind::LBrace, "`{`")?;
        let mut fields = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.at_eof() {
            fields.push(self.parse_variable_declaration()?);
            self.expect(TokenKind::Semicolon, "`;`")?;
        }
        self.expect(TokenKind::RBrace, "`}`")?;
        Ok(StructDefinition {
            name,
            fields,
            doc,
            range: self.range_from(start),
        })
    }

    fn parse_enum(&mut self, doc: Option<String>) -> PResult<EnumDefinition> {
        let start = self.start();
        self.expect(TokenKind::Enum, "`enum`")?;
        let name = self.expect_ident()?;
        self.expect(TokenKind::LBrace, "`{`")?;
        let mut values = Vec::new();
        while !self.at(TokenKind::RBrace) {
            values.push(self.expect_ident()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBrace, "`}`")?;
        Ok(EnumDefinition {
            name,
            values,
            doc,
            range: self.range_from(start),
        })
    }

    fn parse_event(&mut self, doc: Option<String>) -> PResult<EventDefinition> {
        let start = self.start();
        self.expect(TokenKind::Event, "`event`")?;
        let name = self.expect_ident()?;
        let params = self.parse_parameter_list()?;
        let anonymous = self.eat(TokenKind::Anonymous);
        self.expect(TokenKind::Semicolon, "`;`")?;
        Ok(EventDefinition {
            name,
            params,
            anonymous,
            doc,
            range: self.range_from(start),
        })
    }

    fn parse_error_definition(&mut self, doc: Option<String>) -> PResult<ErrorDefinition> {
        let start = self.start();
        self.expect_contextual("error")?;
        let name = self.expect_ident()?;
        let params = self.parse_parameter_list()?;
        self.expect(TokenKind::Semicolon, "`;`")?;
        Ok(ErrorDefinition {
            name,
            params,
            doc,
            range: self.range_from(start),
        })
    }

    /// `type Name is Underlying;`
    fn parse_user_type(&mut self, doc: Option<String>) -> PResult<TypeDefinition> {
        let start = self.start();
        self.expect(TokenKind::Type, "`type`")?;
        let name = self.expect_ident()?;
        self.expect(TokenKind::Is, "`is`")?;
        let ty = self.parse_type_name()?;
        self.expect(TokenKind::Semicolon, "`;`")?;
        Ok(TypeDefinition {
            name,
            ty,
            doc,
            range: self.range_from(start),
        })
    }

    /// `using L for T global? ;` / `using {f, g as +} for T;` / `using L for *;`
    fn parse_using(&mut self) -> PResult<UsingDirective> {
        let start = self.start();
        self.expect(TokenKind::Using, "`using`")?;

        let target = if self.eat(TokenKind::LBrace) {
            let mut functions = Vec::new();
            while !self.at(TokenKind::RBrace) {
                let path = self.parse_ident_path()?;
                let operator = if self.eat(TokenKind::As) {
                    let op = SmolStr::new(self.text());
                    self.bump();
                    Some(op)
                } else {
                    None
                };
                functions.push(UsingFunction { path, operator });
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::RBrace, "`}`")?;
            UsingTarget::Functions(functions)
        } else {
            UsingTarget::Library(self.parse_ident_path()?)
        };

        self.expect(TokenKind::For, "`for`")?;
        let for_type = if self.eat(TokenKind::Star) {
            None
        } else {
            Some(self.parse_type_name()?)
        };
        let global = self.eat_contextual("global");
        self.expect(TokenKind::Semicolon, "`;`")?;

        Ok(UsingDirective {
            target,
            for_type,
            global,
            range: self.range_from(start),
        })
    }
}
