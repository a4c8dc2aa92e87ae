//! High-level IR (HIR): the semantic document model and its indexing cache.
//!
//! Each source file is parsed once per distinct text into an immutable
//! [`ParsedDocument`]: a flat arena of declarations ([`HirSymbol`]) plus the
//! access chains of every identifier use ([`ParsedExpression`]). The
//! [`Walker`] owns one document per path and answers every cross-file
//! question (scope lookup, member lookup, type of an expression) lazily.
//!
//! ## Key Types
//!
//! - [`Walker`]: Indexing cache, linker and resolver
//! - [`ParsedDocument`]: Symbols and expressions of one file
//! - [`SymbolRef`] / [`ExprRef`]: Cross-document handles
//! - [`DeclarationType`]: A declared type, flattened for member lookup
//! - [`ExpressionType`]: What an access chain evaluates to
//!
//! ## Pipeline
//!
//! ```text
//! SourceDocument            ← text + resolved imports (project layer)
//!     │
//!     ▼
//! parse_with_recovery       ← AST, blanking lines until it parses
//!     │
//!     ▼
//! ParsedDocument::build     ← symbols, locals, access chains
//!     │
//!     ▼
//! Walker::index             ← cache by text, link imports
//!     │
//!     ▼
//! reference / members_of    ← lazy, memoized per document version
//! ```

mod document;
mod expressions;
mod ids;
mod recovery;
mod resolve;
mod scope;
mod symbols;
mod types;
mod walker;

pub use document::{ParsedDocument, Selected, Selection};
pub use expressions::ParsedExpression;
pub use ids::{ExprId, ExprRef, SymbolId, SymbolRef};
pub use recovery::{DegradedParse, parse_with_blanked, parse_with_recovery};
pub use resolve::ExpressionType;
pub use scope::KindFilter;
pub use symbols::{
    ContractData, FunctionData, HirSymbol, ImportBinding, ImportData, SymbolData, SymbolKind,
    UsingData, VariableData,
};
pub use types::{DeclarationType, MappingType};
pub use walker::{CacheEntry, IndexReport, Walker};
