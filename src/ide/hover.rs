//! Hover information implementation.

use crate::base::{FileId, TextSize};
use crate::hir::{ExprRef, HirSymbol, ParsedDocument, SymbolData, SymbolKind, SymbolRef, Walker};

use super::globals;
use super::navigation::{FileRange, symbol_at};

/// Result of a hover request.
#[derive(Clone, Debug)]
pub struct HoverResult {
    /// The hover content (markdown).
    pub contents: String,
    /// The hovered token.
    pub range: FileRange,
    /// The symbol described, `None` for builtins and import paths.
    pub target: Option<SymbolRef>,
}

/// Get hover information for a position.
///
/// # Returns
/// Hover information, or None if nothing to show.
pub fn hover(walker: &Walker, file: FileId, offset: TextSize) -> Option<HoverResult> {
    let doc = walker.document(file)?;

    if let Some(import) = doc.import_at(offset).and_then(|id| doc.symbol(id)) {
        let data = import.as_import()?;
        let resolved = data.resolved.as_deref().unwrap_or("unresolved");
        return Some(HoverResult {
            contents: format!("```solidity\nimport \"{}\";\n```\n\n`{resolved}`", data.path),
            range: FileRange::new(doc, data.path_range),
            target: None,
        });
    }

    if let Some((target, range)) = symbol_at(walker, file, offset) {
        return Some(HoverResult {
            contents: build_hover_content(walker, target)?,
            range: FileRange::new(doc, range),
            target: Some(target),
        });
    }

    hover_builtin(walker, doc, offset)
}

/// Hover for an unresolved link naming a global (`keccak256`, `msg.sender`).
fn hover_builtin(walker: &Walker, doc: &ParsedDocument, offset: TextSize) -> Option<HoverResult> {
    let id = doc.expression_at(offset)?;
    let link = doc.expression(id)?;
    let builtin = match link.parent {
        None if !link.opaque_base => globals::global(&link.name)?,
        None => return None,
        Some(parent) => {
            let parent = doc.expression(parent)?;
            if !parent.is_root() || walker.reference(ExprRef::new(doc.file(), id)).is_some() {
                return None;
            }
            globals::object_members(&parent.name)?
                .iter()
                .find(|m| m.name == link.name)?
        }
    };
    Some(HoverResult {
        contents: format!("```solidity\n{}\n```\n\n{}", builtin.detail, builtin.doc),
        range: FileRange::new(doc, link.range),
        target: None,
    })
}

/// Build the markdown for a symbol: signature block, then NatSpec.
pub fn build_hover_content(walker: &Walker, target: SymbolRef) -> Option<String> {
    let doc = walker.document(target.file)?;
    let symbol = doc.symbol(target.id)?;
    let mut content = format!("```solidity\n{}\n```", signature(walker, doc, target, symbol));
    if let Some(natspec) = symbol.doc.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        content.push_str("\n\n---\n\n");
        content.push_str(natspec);
    }
    Some(content)
}

fn signature(walker: &Walker, doc: &ParsedDocument, target: SymbolRef, symbol: &HirSymbol) -> String {
    let container = symbol
        .container
        .and_then(|id| doc.symbol(id))
        .map(|c| c.name.as_str());
    match &symbol.data {
        SymbolData::Variable(var) => {
            let mut parts = vec![var.ty.to_string()];
            if symbol.kind == SymbolKind::StateVariable || symbol.kind == SymbolKind::Constant {
                if let Some(visibility) = var.visibility {
                    parts.push(visibility.as_str().to_string());
                }
                if var.constant {
                    parts.push("constant".into());
                }
                if var.immutable {
                    parts.push("immutable".into());
                }
            }
            if var.indexed {
                parts.push("indexed".into());
            }
            if let Some(location) = var.location {
                parts.push(location.as_str().to_string());
            }
            parts.push(symbol.name.to_string());
            let declaration = parts.join(" ");
            match (symbol.kind, container) {
                (SymbolKind::StateVariable | SymbolKind::StructMember, Some(owner)) => {
                    format!("{declaration}\n// in {owner}")
                }
                _ => declaration,
            }
        }
        SymbolData::Import(import) => match walker.import_target(target) {
            Some(target) => format!(
                "import \"{}\" as {};\n// {}",
                import.path,
                symbol.name,
                walker.path(target).map(|p| p.to_string()).unwrap_or_default()
            ),
            None => format!("import \"{}\" as {};", import.path, symbol.name),
        },
        _ if symbol.kind == SymbolKind::EnumMember => match container {
            Some(owner) => format!("{owner}.{}", symbol.name),
            None => symbol.name.to_string(),
        },
        _ if matches!(symbol.kind, SymbolKind::Struct | SymbolKind::Enum) => {
            format!("{} {}", symbol.kind.display(), symbol.name)
        }
        _ => header(doc.slice(symbol.range)),
    }
}

/// Declaration text up to its body, whitespace collapsed.
fn header(source: &str) -> String {
    let mut depth = 0i32;
    let mut end = source.len();
    for (idx, c) in source.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            '{' | ';' if depth == 0 => {
                end = idx;
                break;
            }
            _ => {}
        }
    }
    source[..end].split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{MemoryFileSystem, Project, ProjectSettings};

    const SRC: &str = "\
/// @notice A token.
contract Token {
    /// Balance per holder.
    mapping(address => uint256) public balances;

    /// @dev Moves tokens.
    function transfer(address to, uint256 amount) external returns (bool) {
        balances[to] += amount;
        bytes32 h = keccak256(\"\");
        address s = msg.sender;
        return true;
    }
}
";

    fn setup() -> (Walker, FileId) {
        let fs = MemoryFileSystem::new().with_file("/p/Token.sol", SRC);
        let project = Project::load("/p", &ProjectSettings::default(), &fs).unwrap();
        let mut walker = Walker::new();
        walker.index_project(&project, &fs);
        let file = walker.file_id("/p/Token.sol").unwrap();
        (walker, file)
    }

    fn at(needle: &str) -> TextSize {
        TextSize::from(SRC.find(needle).unwrap() as u32 + 1)
    }

    #[test]
    fn test_function_signature_and_natspec() {
        let (walker, file) = setup();
        let result = hover(&walker, file, at("transfer(")).unwrap();
        assert!(result.contents.contains(
            "function transfer(address to, uint256 amount) external returns (bool)"
        ));
        assert!(result.contents.contains("@dev Moves tokens."));
    }

    #[test]
    fn test_state_variable_from_use() {
        let (walker, file) = setup();
        let result = hover(&walker, file, at("balances[to]")).unwrap();
        assert!(result.contents.contains("mapping(address => uint256) public balances"));
        assert_eq!(result.range.start.line, 7);
    }

    #[test]
    fn test_builtins() {
        let (walker, file) = setup();
        let result = hover(&walker, file, at("keccak256(")).unwrap();
        assert!(result.contents.contains("Keccak-256"));
        let result = hover(&walker, file, at("sender;")).unwrap();
        assert!(result.contents.contains("Sender of the message"));
    }

    #[test]
    fn test_header_stops_at_body() {
        assert_eq!(
            header("function f(uint a)\n    public\n    returns (uint) {\n  return a;\n}"),
            "function f(uint a) public returns (uint)"
        );
        assert_eq!(header("event E(uint indexed a);"), "event E(uint indexed a)");
    }
}
