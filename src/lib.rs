//! # solace-base
//!
//! Core library for Solidity project resolution, semantic indexing and IDE
//! queries.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → IDE features (completion, hover, goto-def, rename)
//!   ↓
//! hir       → Semantic documents, indexing cache, lazy resolution
//!   ↓
//! project   → Packages, remappings, import resolution, source closure
//!   ↓
//! syntax    → Typed AST and visitor
//!   ↓
//! parser    → Logos lexer, recursive-descent parser
//!   ↓
//! base      → Primitives (FileId, TextRange, LineIndex, paths)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → syntax → project → hir → ide)
// ============================================================================

/// Foundation types: FileId, TextRange, line/column conversion
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, `SourceParser` seam
pub mod parser;

/// Syntax: typed AST for Solidity
pub mod syntax;

/// Project model: packages, remappings, filesystem providers
pub mod project;

/// High-level IR: parsed documents, the indexing walker, scoped lookup
pub mod hir;

/// IDE features: completion, hover, goto-definition, references, rename
pub mod ide;

// Re-export foundation types
pub use base::{FileId, LineCol, LineIndex, TextRange, TextSize};
