//! Hover, goto, references and symbol listings across files.

use solace::hir::SymbolKind;
use solace::ide::AnalysisHost;

use crate::helpers::cursor::position_of;
use crate::helpers::workspace::{memory_host, path};

const TOKEN: &str = "\
import \"./Base.sol\";

/// @notice A simple token.
contract Token is Base {
    mapping(address => uint256) public balances;

    /// @dev Moves `amount` to `to`.
    function transfer(address to, uint256 amount) public returns (bool) {
        balances[msg.sender] -= amount;
        balances[to] += amount;
        emitted();
        return true;
    }
}
";

const BASE: &str = "\
abstract contract Base {
    event Moved(uint256 amount);
    function emitted() internal {}
}
";

fn host() -> AnalysisHost {
    memory_host(&[("src/Token.sol", TOKEN), ("src/Base.sol", BASE)])
}

#[test]
fn test_hover_on_use_shows_declaration() {
    let host = host();
    let (line, col) = position_of(TOKEN, "balances[to]", 2);
    let hover = host.analysis().hover(&path("src/Token.sol"), line, col).unwrap();
    assert!(hover.contents.contains("mapping(address => uint256) public balances"));
    assert_eq!(hover.range.start.line, line);
    assert!(hover.target.is_some());
}

#[test]
fn test_hover_on_declaration_shows_natspec() {
    let host = host();
    let (line, col) = position_of(TOKEN, "transfer(", 1);
    let hover = host.analysis().hover(&path("src/Token.sol"), line, col).unwrap();
    assert!(hover.contents.starts_with("```solidity\nfunction transfer(address to, uint256 amount) public returns (bool)"));
    assert!(hover.contents.contains("@dev Moves `amount` to `to`."));
}

#[test]
fn test_hover_import_path_shows_target() {
    let host = host();
    let (line, col) = position_of(TOKEN, "Base.sol", 0);
    let hover = host.analysis().hover(&path("src/Token.sol"), line, col).unwrap();
    assert!(hover.contents.contains(&path("src/Base.sol")));
}

#[test]
fn test_hover_on_whitespace_is_none() {
    let host = host();
    assert!(host.analysis().hover(&path("src/Token.sol"), 1, 0).is_none());
}

#[test]
fn test_goto_crosses_files() {
    let host = host();
    let (line, col) = position_of(TOKEN, "emitted()", 3);
    let result = host.analysis().goto_definition(&path("src/Token.sol"), line, col);
    assert_eq!(result.targets.len(), 1);
    let target = &result.targets[0];
    assert_eq!(&*target.location.path, path("src/Base.sol"));
    assert_eq!(target.location.start.line, 2);
    assert_eq!(target.kind, Some(SymbolKind::Function));
    assert_eq!(target.name, "emitted");
}

#[test]
fn test_goto_base_contract_name() {
    let host = host();
    let (line, col) = position_of(TOKEN, "Base {", 1);
    let result = host.analysis().goto_definition(&path("src/Token.sol"), line, col);
    assert_eq!(result.targets.len(), 1);
    assert_eq!(&*result.targets[0].location.path, path("src/Base.sol"));
    assert_eq!(result.targets[0].kind, Some(SymbolKind::Contract));
}

#[test]
fn test_references_across_files() {
    let host = host();
    let (line, col) = position_of(BASE, "emitted", 0);
    let result = host.analysis().find_references(&path("src/Base.sol"), line, col, true);
    assert_eq!(result.len(), 2);
    assert!(result.references[0].is_definition);
    assert_eq!(&*result.references[1].location.path, path("src/Token.sol"));

    let without = host.analysis().find_references(&path("src/Base.sol"), line, col, false);
    assert_eq!(without.len(), 1);
}

#[test]
fn test_document_symbols_outline() {
    let host = host();
    let outline = host.analysis().document_symbols(&path("src/Token.sol"));
    assert_eq!(outline.len(), 1);
    let token = &outline[0];
    assert_eq!(token.name, "Token");
    assert_eq!(token.kind, SymbolKind::Contract);
    let members: Vec<&str> = token.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(members, vec!["balances", "transfer"]);
    assert_eq!(token.children[0].container_name.as_deref(), Some("Token"));
    assert_eq!(token.children[0].detail.as_deref(), Some("mapping(address => uint256)"));
    assert!(token.range.range.contains_range(token.selection_range.range));
}

#[test]
fn test_workspace_symbols_query() {
    let host = host();
    let analysis = host.analysis();
    let names: Vec<String> = analysis
        .workspace_symbols(Some("mov"))
        .into_iter()
        .map(|s| s.name.to_string())
        .collect();
    assert_eq!(names, vec!["Moved"]);
    assert!(analysis.workspace_symbols(Some("zzz")).is_empty());
    assert!(analysis.workspace_symbols(None).len() >= 5);
}

#[test]
fn test_edits_are_visible_to_queries() {
    let mut host = host();
    host.set_file_content(&path("src/Base.sol"), "abstract contract Base {\n    function renamedHelper() internal {}\n}\n");
    let analysis = host.analysis();
    assert!(analysis.workspace_symbols(Some("emitted")).is_empty());
    assert_eq!(analysis.workspace_symbols(Some("renamedHelper")).len(), 1);
    let (line, col) = position_of(TOKEN, "emitted()", 0);
    assert!(analysis.goto_definition(&path("src/Token.sol"), line, col).is_empty());
}
