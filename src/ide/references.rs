//! Find references implementation.

use crate::base::{FileId, TextSize};
use crate::hir::{SymbolRef, Walker};

use super::navigation::{FileRange, symbol_at};

/// Result of a find-references request.
#[derive(Clone, Debug, Default)]
pub struct ReferenceResult {
    /// The symbol the references point to.
    pub target: Option<SymbolRef>,
    /// All references found, declaration first when included.
    pub references: Vec<Reference>,
}

impl ReferenceResult {
    /// Create an empty result.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if any references were found.
    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    /// Get the number of references.
    pub fn len(&self) -> usize {
        self.references.len()
    }
}

/// A reference to a symbol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reference {
    pub location: FileRange,
    /// Whether this is the definition (vs a reference).
    pub is_definition: bool,
}

/// Find all references to the symbol under `offset`, across every indexed
/// document.
pub fn find_references(walker: &Walker, file: FileId, offset: TextSize, include_declaration: bool) -> ReferenceResult {
    match symbol_at(walker, file, offset) {
        Some((target, _)) => references_to(walker, target, include_declaration),
        None => ReferenceResult::empty(),
    }
}

/// All uses of `target`, optionally preceded by its declaration name.
pub fn references_to(walker: &Walker, target: SymbolRef, include_declaration: bool) -> ReferenceResult {
    let mut references = Vec::new();
    if include_declaration {
        if let Some((doc, symbol)) = walker.document(target.file).zip(walker.symbol(target)) {
            references.push(Reference {
                location: FileRange::new(doc, symbol.name_range),
                is_definition: true,
            });
        }
    }
    for expr in walker.references_to(target) {
        let Some(doc) = walker.document(expr.file) else {
            continue;
        };
        let Some(link) = doc.expression(expr.id) else {
            continue;
        };
        references.push(Reference {
            location: FileRange::new(doc, link.range),
            is_definition: false,
        });
    }
    tracing::trace!(?target, count = references.len(), "references");
    ReferenceResult {
        target: Some(target),
        references,
    }
}
