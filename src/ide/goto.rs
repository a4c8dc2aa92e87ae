//! Go-to-definition implementation.

use smol_str::SmolStr;

use crate::base::{FileId, TextRange, TextSize};
use crate::hir::{HirSymbol, SymbolKind, SymbolRef, Walker};

use super::navigation::{FileRange, symbol_at};

/// Result of a go-to-definition request.
#[derive(Clone, Debug, Default)]
pub struct GotoResult {
    /// The targets to jump to.
    pub targets: Vec<GotoTarget>,
}

impl GotoResult {
    /// Create an empty result (no targets found).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a result with a single target.
    pub fn single(target: GotoTarget) -> Self {
        Self {
            targets: vec![target],
        }
    }

    /// Check if any targets were found.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// A target location for go-to-definition.
#[derive(Clone, Debug)]
pub struct GotoTarget {
    /// Name span of the declaration, or the start of an imported file.
    pub location: FileRange,
    /// The symbol kind; `None` when the target is a whole file.
    pub kind: Option<SymbolKind>,
    /// The symbol name, or the file path.
    pub name: SmolStr,
}

impl GotoTarget {
    pub fn from_symbol(walker: &Walker, target: SymbolRef) -> Option<Self> {
        let doc = walker.document(target.file)?;
        let symbol: &HirSymbol = doc.symbol(target.id)?;
        Some(Self {
            location: FileRange::new(doc, symbol.name_range),
            kind: Some(symbol.kind),
            name: symbol.name.clone(),
        })
    }
}

/// Find the definition of the symbol, or the file of the import path,
/// under `offset`.
pub fn goto_definition(walker: &Walker, file: FileId, offset: TextSize) -> GotoResult {
    let Some(doc) = walker.document(file) else {
        return GotoResult::empty();
    };

    if let Some(import) = doc.import_at(offset) {
        let target = walker
            .import_target(SymbolRef::new(file, import))
            .and_then(|target| walker.document(target));
        return match target {
            Some(target) => GotoResult::single(GotoTarget {
                location: FileRange::new(target, TextRange::empty(TextSize::from(0))),
                kind: None,
                name: SmolStr::new(&**target.path()),
            }),
            None => GotoResult::empty(),
        };
    }

    symbol_at(walker, file, offset)
        .and_then(|(target, _)| GotoTarget::from_symbol(walker, target))
        .map(GotoResult::single)
        .unwrap_or_default()
}
