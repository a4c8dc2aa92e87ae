//! Locations handed back to the editor, and "what is under the cursor".

use std::sync::Arc;

use crate::base::{FileId, LineCol, TextRange, TextSize};
use crate::hir::{ExprRef, ParsedDocument, SymbolRef, Walker};

/// A span in one document with its line/column conversion already done.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileRange {
    pub file: FileId,
    pub path: Arc<str>,
    pub range: TextRange,
    /// Start position (0-indexed).
    pub start: LineCol,
    /// End position (0-indexed).
    pub end: LineCol,
}

impl FileRange {
    pub fn new(doc: &ParsedDocument, range: TextRange) -> Self {
        Self {
            file: doc.file(),
            path: doc.path().clone(),
            range,
            start: doc.line_index().line_col(range.start()),
            end: doc.line_index().line_col(range.end()),
        }
    }
}

/// The symbol under `offset` and the span of the token that names it.
/// Declaration names are checked before uses.
pub(crate) fn symbol_at(walker: &Walker, file: FileId, offset: TextSize) -> Option<(SymbolRef, TextRange)> {
    let doc = walker.document(file)?;
    if let Some(id) = doc.declaration_at(offset) {
        let symbol = doc.symbol(id)?;
        return Some((SymbolRef::new(file, id), symbol.name_range));
    }
    let expr = doc.expression_at(offset)?;
    let target = walker.reference(ExprRef::new(file, expr))?;
    Some((target, doc.expression(expr)?.range))
}
