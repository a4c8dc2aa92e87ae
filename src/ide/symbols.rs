//! Symbol listing for workspace and document views.

use smol_str::SmolStr;

use crate::base::FileId;
use crate::hir::{HirSymbol, ParsedDocument, SymbolId, SymbolKind, Walker};

use super::navigation::FileRange;

/// A symbol for the workspace symbol list or document outline.
#[derive(Clone, Debug)]
pub struct SymbolInfo {
    /// Symbol name.
    pub name: SmolStr,
    /// Symbol kind.
    pub kind: SymbolKind,
    /// Type or kind shown next to the name.
    pub detail: Option<String>,
    /// Whole declaration.
    pub range: FileRange,
    /// The declared name.
    pub selection_range: FileRange,
    /// Name of the enclosing contract, struct or enum.
    pub container_name: Option<SmolStr>,
    /// Nested members (document outline only).
    pub children: Vec<SymbolInfo>,
}

impl SymbolInfo {
    /// Create from a HirSymbol.
    pub fn from_hir(doc: &ParsedDocument, symbol: &HirSymbol) -> Self {
        Self {
            name: symbol.name.clone(),
            kind: symbol.kind,
            detail: symbol.declared_type().map(ToString::to_string),
            range: FileRange::new(doc, symbol.range),
            selection_range: FileRange::new(doc, symbol.name_range),
            container_name: symbol
                .container
                .and_then(|id| doc.symbol(id))
                .map(|c| c.name.clone()),
            children: Vec::new(),
        }
    }
}

fn is_listed(symbol: &HirSymbol) -> bool {
    symbol.kind.is_outline() && !symbol.name.is_empty()
}

/// Get all symbols in the workspace, optionally filtered by a query.
///
/// # Arguments
/// * `walker` - The indexed documents
/// * `query` - Optional search query (case-insensitive substring match)
///
/// # Returns
/// List of matching symbols, sorted by name then path.
pub fn workspace_symbols(walker: &Walker, query: Option<&str>) -> Vec<SymbolInfo> {
    let query_lower = query.map(str::to_lowercase);

    let mut results: Vec<SymbolInfo> = walker
        .documents()
        .flat_map(|doc| {
            let query_lower = query_lower.clone();
            doc.symbols()
                .filter(|(_, symbol)| is_listed(symbol))
                .filter(move |(_, symbol)| match &query_lower {
                    Some(q) => symbol.name.to_lowercase().contains(q.as_str()),
                    None => true,
                })
                .map(move |(_, symbol)| SymbolInfo::from_hir(doc, symbol))
        })
        .collect();

    results.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.range.path.cmp(&b.range.path)));
    results
}

/// Get all symbols in a specific file for document outline.
///
/// Top-level declarations form the roots; contract members, struct fields
/// and enum values are nested under their owner.
pub fn document_symbols(walker: &Walker, file: FileId) -> Vec<SymbolInfo> {
    let Some(doc) = walker.document(file) else {
        return Vec::new();
    };
    doc.top_level()
        .iter()
        .filter_map(|&id| outline_node(doc, id))
        .collect()
}

fn outline_node(doc: &ParsedDocument, id: SymbolId) -> Option<SymbolInfo> {
    let symbol = doc.symbol(id)?;
    if !is_listed(symbol) {
        return None;
    }
    let mut info = SymbolInfo::from_hir(doc, symbol);
    info.children = symbol
        .members()
        .iter()
        .filter_map(|&member| outline_node(doc, member))
        .collect();
    Some(info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{MemoryFileSystem, Project, ProjectSettings};

    fn setup() -> Walker {
        let fs = MemoryFileSystem::new()
            .with_file(
                "/p/A.sol",
                "import \"./B.sol\";\nuint256 constant MAX = 1;\ncontract Alpha {\n    struct Pair { uint a; uint b; }\n    using L for uint;\n    function run(uint x) public { uint y = x; }\n}\n",
            )
            .with_file("/p/B.sol", "library L {}\nenum Phase { Start, End }\n");
        let project = Project::load("/p", &ProjectSettings::default(), &fs).unwrap();
        let mut walker = Walker::new();
        walker.index_project(&project, &fs);
        walker
    }

    #[test]
    fn test_document_outline_tree() {
        let walker = setup();
        let file = walker.file_id("/p/A.sol").unwrap();
        let outline = document_symbols(&walker, file);
        let roots: Vec<&str> = outline.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(roots, vec!["MAX", "Alpha"]);

        let alpha = &outline[1];
        let members: Vec<&str> = alpha.children.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(members, vec!["Pair", "run"]);
        assert_eq!(alpha.children[0].children.len(), 2);
        assert!(alpha.children[1].children.is_empty());
    }

    #[test]
    fn test_workspace_query_is_case_insensitive() {
        let walker = setup();
        let names: Vec<SmolStr> = workspace_symbols(&walker, Some("PHA"))
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Alpha", "Phase"]);
        assert!(workspace_symbols(&walker, None).len() >= 8);
    }
}
