//! Handles into the per-document arenas.
//!
//! Symbols and expressions live in flat vectors owned by their
//! [`ParsedDocument`](super::ParsedDocument). Cross references (contract to
//! base, expression to parent) are stored as these indices, never as
//! pointers, so a document can be dropped or replaced as a unit.

use std::fmt;

use crate::base::FileId;

/// Index of a symbol inside one document.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct SymbolId(pub u32);

impl SymbolId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolId({})", self.0)
    }
}

/// Index of an access-chain link inside one document.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ExprId(pub u32);

impl ExprId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprId({})", self.0)
    }
}

/// A symbol anywhere in the index.
///
/// Only meaningful for the document version it was obtained from: a reparse
/// renumbers every symbol of that file.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct SymbolRef {
    pub file: FileId,
    pub id: SymbolId,
}

impl SymbolRef {
    pub const fn new(file: FileId, id: SymbolId) -> Self {
        Self { file, id }
    }
}

/// An expression link anywhere in the index.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ExprRef {
    pub file: FileId,
    pub id: ExprId,
}

impl ExprRef {
    pub const fn new(file: FileId, id: ExprId) -> Self {
        Self { file, id }
    }
}
