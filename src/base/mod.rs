//! Foundation types for the Solace toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`] - Interned file identifiers
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//! - [`FileTable`] - Path ↔ FileId interning
//! - Path helpers that normalise separators to `/`
//!
//! This module has NO dependencies on other solace modules.

pub mod constants;
mod file_id;
pub mod paths;
mod span;

pub use file_id::{FileId, FileTable};
pub use span::{LineCol, LineIndex, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
