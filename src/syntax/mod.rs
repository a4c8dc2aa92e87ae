//! Syntax: typed AST for Solidity and a traversal helper.
//!
//! The tree is the output contract of the [`crate::parser`] collaborator.
//! Every node carries a [`TextRange`](crate::base::TextRange); nothing above
//! this layer looks at raw tokens.

pub mod ast;
pub mod visit;

pub use ast::*;
pub use visit::Visitor;
