//! Parser collaborator: source text in, typed syntax tree out.
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with TokenKind (comments kept for NatSpec)
//!     ↓
//! Parser (recursive descent, grammar/*) → syntax::SourceUnit
//! ```
//!
//! The indexing core only sees the [`SourceParser`] trait, so hosts can swap
//! in another front end. Parsing is all-or-nothing: a syntax error aborts
//! with a [`ParseError`] and the caller decides how to degrade.

mod grammar;
mod lexer;
#[allow(clippy::module_inception)]
mod parser;

pub use grammar::is_elementary_type_name;
pub use lexer::{Lexer, Token, TokenKind, tokenize};
pub use parser::ParseError;

use crate::syntax::SourceUnit;

/// Turns source text into a syntax tree, or fails on the first error.
pub trait SourceParser: Send + Sync {
    fn parse(&self, text: &str) -> Result<SourceUnit, ParseError>;
}

/// The built-in Solidity front end.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolidityParser;

impl SourceParser for SolidityParser {
    fn parse(&self, text: &str) -> Result<SourceUnit, ParseError> {
        let mut parser = parser::Parser::new(text);
        let unit = parser.parse_source_unit();
        if let Err(err) = &unit {
            tracing::trace!(error = %err, "parse failed");
        }
        unit
    }
}
