//! IDE features: High-level APIs for editor integrations.
//!
//! This module provides the interface between the semantic model (HIR)
//! and a language server. Each function corresponds to an editor request.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: Take the walker and a position, return data
//! 2. **No LSP types**: Uses our own types, converted at the LSP boundary
//! 3. **Best effort**: Anything unresolved yields an empty result, never an error
//!
//! ## Usage
//!
//! The recommended way to use this module is through `AnalysisHost`:
//!
//! ```ignore
//! use solace::ide::AnalysisHost;
//!
//! let mut host = AnalysisHost::load("/work/token", &ProjectSettings::default(), fs)?;
//! host.index_project();
//!
//! let analysis = host.analysis();
//! let symbols = analysis.document_symbols("/work/token/src/Token.sol");
//! ```

mod access_chain;
mod analysis;
mod completion;
pub mod globals;
mod goto;
mod hover;
mod navigation;
mod references;
mod rename;
mod symbols;

pub use access_chain::{AccessChain, ChainLink, import_path_prefix, parse_access_chain};
pub use analysis::{Analysis, AnalysisHost, SharedAnalysisHost};
pub use completion::{CompletionItem, CompletionKind, completions};
pub use goto::{GotoResult, GotoTarget, goto_definition};
pub use hover::{HoverResult, build_hover_content, hover};
pub use navigation::FileRange;
pub use references::{Reference, ReferenceResult, find_references, references_to};
pub use rename::{RenameResult, TextEdit, rename};
pub use symbols::{SymbolInfo, document_symbols, workspace_symbols};
