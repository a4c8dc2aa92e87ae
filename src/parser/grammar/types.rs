//! Type names, parameter lists and dotted identifier paths.

use smol_str::SmolStr;

use crate::parser::lexer::TokenKind;
use crate::parser::parser::{PResult, Parser};
use crate::syntax::{IdentPath, Parameter, StorageLocation, TypeName, TypeNameKind};

/// Is `name` a built-in value type (`uint256`, `bytes4`, `address`, ...)?
pub fn is_elementary_type_name(name: &str) -> bool {
    match name {
        "address" | "bool" | "string" | "bytes" | "byte" | "int" | "uint" | "fixed"
        | "ufixed" => true,
        _ => {
            if let Some(bits) = name.strip_prefix("uint").or_else(|| name.strip_prefix("int")) {
                return bits
                    .parse::<u32>()
                    .is_ok_and(|n| n % 8 == 0 && (8..=256).contains(&n));
            }
            if let Some(size) = name.strip_prefix("bytes") {
                return size.parse::<u32>().is_ok_and(|n| (1..=32).contains(&n));
            }
            if let Some(spec) = name
                .strip_prefix("ufixed")
                .or_else(|| name.strip_prefix("fixed"))
            {
                return spec.split_once('x').is_some_and(|(m, n)| {
                    m.parse::<u32>().is_ok() && n.parse::<u32>().is_ok()
                });
            }
            false
        }
    }
}

impl<'a> Parser<'a> {
    /// `A.B.C`
    pub(crate) fn parse_ident_path(&mut self) -> PResult<IdentPath> {
        let start = self.start();
        let mut segments = vec![self.expect_ident()?];
        while self.at(TokenKind::Dot) && self.nth(1) == Some(TokenKind::Ident) {
            self.bump();
            segments.push(self.expect_ident()?);
        }
        Ok(IdentPath {
            segments,
            range: self.range_from(start),
        })
    }

    /// TypeName = (Elementary | UserDefined | Mapping | FunctionType) ('[' Expr? ']')*
    pub(crate) fn parse_type_name(&mut self) -> PResult<TypeName> {
        let start = self.start();
        let kind = match self.peek() {
            Some(TokenKind::Mapping) => self.parse_mapping()?,
            Some(TokenKind::Function) => self.parse_function_type()?,
            Some(TokenKind::Ident) if is_elementary_type_name(self.text()) => {
                let name = SmolStr::new(self.text());
                self.bump();
                let payable = name == "address" && self.eat(TokenKind::Payable);
                TypeNameKind::Elementary { name, payable }
            }
            Some(TokenKind::Ident) => TypeNameKind::UserDefined(self.parse_ident_path()?),
            _ => return Err(self.error_here("expected type name")),
        };
        let mut ty = TypeName {
            kind,
            range: self.range_from(start),
        };

        while self.at(TokenKind::LBracket) {
            self.bump();
            let size = if self.at(TokenKind::RBracket) {
                None
            } else {
                Some(Box::new(self.parse_expression()?))
            };
            self.expect(TokenKind::RBracket, "`]`")?;
            ty = TypeName {
                kind: TypeNameKind::Array {
                    base: Box::new(ty),
                    size,
                },
                range: self.range_from(start),
            };
        }
        Ok(ty)
    }

    /// `mapping(K name? => V name?)`
    fn parse_mapping(&mut self) -> PResult<TypeNameKind> {
        self.expect(TokenKind::Mapping, "`mapping`")?;
        self.expect(TokenKind::LParen, "`(`")?;
        let key = self.parse_type_name()?;
        let key_name = if self.at(TokenKind::Ident) {
            Some(self.expect_ident()?)
        } else {
            None
        };
        self.expect(TokenKind::FatArrow, "`=>`")?;
        let value = self.parse_type_name()?;
        let value_name = if self.at(TokenKind::Ident) {
            Some(self.expect_ident()?)
        } else {
            None
        };
        self.expect(TokenKind::RParen, "`)`")?;
        Ok(TypeNameKind::Mapping {
            key: Box::new(key),
            key_name,
            value: Box::new(value),
            value_name,
        })
    }

    /// `function (params) attrs* returns (params)`
    fn parse_function_type(&mut self) -> PResult<TypeNameKind> {
        self.expect(TokenKind::Function, "`function`")?;
        let params = self.parse_parameter_list()?;
        let mut attributes = Vec::new();
        while let Some(
            TokenKind::Public
            | TokenKind::Private
            | TokenKind::Internal
            | TokenKind::External
            | TokenKind::Pure
            | TokenKind::View
            | TokenKind::Payable,
        ) = self.peek()
        {
            attributes.push(SmolStr::new(self.text()));
            self.bump();
        }
        let returns = if self.eat(TokenKind::Returns) {
            self.parse_parameter_list()?
        } else {
            Vec::new()
        };
        Ok(TypeNameKind::Function {
            params,
            returns,
            attributes,
        })
    }

    pub(crate) fn parse_storage_location(&mut self) -> Option<StorageLocation> {
        let location = match self.peek()? {
            TokenKind::Memory => StorageLocation::Memory,
            TokenKind::Storage => StorageLocation::Storage,
            TokenKind::Calldata => StorageLocation::Calldata,
            _ => return None,
        };
        self.bump();
        Some(location)
    }

    /// `( Parameter (',' Parameter)* )`
    pub(crate) fn parse_parameter_list(&mut self) -> PResult<Vec<Parameter>> {
        self.expect(TokenKind::LParen, "`(`")?;
        let mut params = Vec::new();
        if self.eat(TokenKind::RParen) {
            return Ok(params);
        }
        loop {
            params.push(self.parse_parameter()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen, "`)`")?;
        Ok(params)
    }

    fn parse_parameter(&mut self) -> PResult<Parameter> {
        let start = self.start();
        let ty = self.parse_type_name()?;
        let location = self.parse_storage_location();
        let indexed = self.eat(TokenKind::Indexed);
        let name = if self.at(TokenKind::Ident) {
            Some(self.expect_ident()?)
        } else {
            None
        };
        Ok(Parameter {
            ty,
            location,
            indexed,
            name,
            range: self.range_from(start),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn type_of(text: &str) -> TypeName {
        Parser::new(text).parse_type_name().unwrap()
    }

    #[rstest]
    #[case("uint256", true)]
    #[case("int8", true)]
    #[case("bytes32", true)]
    #[case("bytes33", false)]
    #[case("uint7", false)]
    #[case("ufixed128x18", true)]
    #[case("Token", false)]
    fn test_elementary_names(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_elementary_type_name(name), expected);
    }

    #[test]
    fn test_address_payable() {
        let ty = type_of("address payable");
        assert_eq!(
            ty.kind,
            TypeNameKind::Elementary {
                name: "address".into(),
                payable: true
            }
        );
    }

    #[test]
    fn test_nested_mapping_and_arrays() {
        let ty = type_of("mapping(address owner => mapping(uint => Lib.Point[]))");
        let TypeNameKind::Mapping { key_name, value, .. } = ty.kind else {
            panic!("expected mapping");
        };
        assert_eq!(key_name.unwrap().name, "owner");
        let TypeNameKind::Mapping { value: inner, .. } = value.kind else {
            panic!("expected inner mapping");
        };
        let TypeNameKind::Array { base, size } = inner.kind else {
            panic!("expected array");
        };
        assert!(size.is_none());
        let TypeNameKind::UserDefined(path) = base.kind else {
            panic!("expected user type");
        };
        assert_eq!(path.to_dotted(), "Lib.Point");
    }

    #[test]
    fn test_parameter_list() {
        let params = Parser::new("(uint a, string memory b, address indexed)")
            .parse_parameter_list()
            .unwrap();
        assert_eq!(params.len(), 3);
        assert_eq!(params[1].location, Some(StorageLocation::Memory));
        assert!(params[2].indexed);
        assert!(params[2].name.is_none());
    }
}
