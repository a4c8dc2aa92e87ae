//! Indexing cache behaviour across files.

use std::sync::Arc;

use solace::hir::{CacheEntry, SymbolKind, Walker};
use solace::project::{FileSystem, MemoryFileSystem, Project, ProjectSettings};

fn load(files: &[(&str, &str)]) -> (MemoryFileSystem, Project) {
    let mut fs = MemoryFileSystem::new();
    for (path, text) in files {
        fs.insert(path, *text);
    }
    let project = Project::load("/p", &ProjectSettings::default(), &fs).unwrap();
    (fs, project)
}

const CYCLE: &[(&str, &str)] = &[
    ("/p/A.sol", "import \"./B.sol\";\ncontract A {}\n"),
    ("/p/B.sol", "import \"./A.sol\";\ncontract B {}\n"),
];

#[test]
fn test_cyclic_imports_index_both_sides() {
    let (fs, project) = load(CYCLE);
    for entry in ["/p/A.sol", "/p/B.sol"] {
        let mut walker = Walker::new();
        let text = fs.read_to_string(entry).unwrap();
        let report = walker.update(&project, &fs, entry, &text);
        assert_eq!(report.reparsed.len(), 2, "from {entry}");
        assert!(walker.document_by_path("/p/A.sol").is_some());
        assert!(walker.document_by_path("/p/B.sol").is_some());
    }
}

const CYCLE_CONSTANTS: &[(&str, &str)] = &[
    (
        "/p/A.sol",
        "import \"./B.sol\";\nuint constant FROM_A = 1;\ncontract A { function f() public { FROM_B; } }\n",
    ),
    (
        "/p/B.sol",
        "import \"./A.sol\";\nuint constant FROM_B = 2;\ncontract B { function g() public { FROM_A; } }\n",
    ),
];

#[test]
fn test_cyclic_imports_resolve_file_level_symbols_both_ways() {
    let (fs, project) = load(CYCLE_CONSTANTS);
    for entry in ["/p/A.sol", "/p/B.sol"] {
        let mut walker = Walker::new();
        let text = fs.read_to_string(entry).unwrap();
        walker.update(&project, &fs, entry, &text);
        let a = walker.file_id("/p/A.sol").unwrap();
        let b = walker.file_id("/p/B.sol").unwrap();

        for (from, name, into) in [(a, "FROM_B", b), (b, "FROM_A", a)] {
            let doc = walker.document(from).unwrap();
            let at = doc.text().find(&format!("{name};")).unwrap() as u32;
            let found = walker
                .find_in_scope(name, at.into(), from)
                .unwrap_or_else(|| panic!("{name} unresolved when indexing from {entry}"));
            assert_eq!(found.file, into, "{name} from {entry}");
            let symbol = walker.symbol(found).unwrap();
            assert_eq!(symbol.kind, SymbolKind::Constant);
            assert_eq!(symbol.name, name);
        }
    }
}

#[test]
fn test_imports_are_linked() {
    let (fs, project) = load(CYCLE);
    let mut walker = Walker::new();
    walker.index_project(&project, &fs);
    let a = walker.document_by_path("/p/A.sol").unwrap();
    let import = a.imports().next().unwrap();
    let target = walker.import_target(solace::hir::SymbolRef::new(a.file(), import));
    assert_eq!(target, walker.file_id("/p/B.sol"));
}

#[test]
fn test_unchanged_text_is_a_cache_hit() {
    let (fs, project) = load(CYCLE);
    let mut walker = Walker::new();
    walker.index_project(&project, &fs);
    let before = Arc::clone(walker.document_by_path("/p/A.sol").unwrap());

    let report = walker.index_project(&project, &fs);
    assert!(report.reparsed.is_empty());
    assert_eq!(report.reused.len(), 2);
    assert!(Arc::ptr_eq(&before, walker.document_by_path("/p/A.sol").unwrap()));

    let report = walker.update(&project, &fs, "/p/A.sol", "import \"./B.sol\";\ncontract A2 {}\n");
    assert_eq!(report.reparsed, vec![walker.file_id("/p/A.sol").unwrap()]);
    assert!(!Arc::ptr_eq(&before, walker.document_by_path("/p/A.sol").unwrap()));
    assert!(walker.document_by_path("/p/A.sol").unwrap().version() > before.version());
}

#[test]
fn test_degraded_parse_keeps_other_declarations() {
    let broken = "contract A {\n    function f() public {\n        uint x = ;\n    }\n}\ncontract B {}\n";
    let (fs, project) = load(&[("/p/A.sol", broken)]);
    let mut walker = Walker::new();
    walker.index_project(&project, &fs);
    let doc = walker.document_by_path("/p/A.sol").unwrap();
    assert_eq!(doc.blanked_lines(), &[2]);
    assert!(doc.top_level_named("A").is_some());
    assert!(doc.top_level_named("B").is_some());
    assert_eq!(&**doc.text(), broken);
}

#[test]
fn test_unclosed_contract_degrades_to_empty_model() {
    let (fs, project) = load(&[("/p/A.sol", "contract A {\n")]);
    let mut walker = Walker::new();
    walker.index_project(&project, &fs);
    let file = walker.file_id("/p/A.sol").unwrap();
    let Some(CacheEntry::Parsed(doc)) = walker.entry(file) else {
        panic!("expected a parsed entry");
    };
    assert_eq!(doc.blanked_lines(), &[0]);
    assert!(doc.top_level().is_empty());
    assert_eq!(doc.diagnostics().len(), 1);
}

#[test]
fn test_spans_are_well_formed() {
    let text = "\
/// @title Token
contract Token {
    struct Pair { uint a; uint b; }
    enum Kind { One, Two }
    event Moved(address indexed from, uint amount);
    error Denied(address who);
    mapping(address => uint) balances;
    modifier only() { _; }
    function move(address to, uint amount) public only returns (bool ok) {
        uint left = balances[to] - amount;
        ok = left > 0;
    }
}
";
    let (fs, project) = load(&[("/p/Token.sol", text)]);
    let mut walker = Walker::new();
    walker.index_project(&project, &fs);
    let doc = walker.document_by_path("/p/Token.sol").unwrap();
    assert!(doc.symbols().count() > 10);
    for (_, symbol) in doc.symbols() {
        assert!(symbol.range.start() <= symbol.range.end());
        assert!(
            symbol.range.contains_range(symbol.name_range),
            "{} name outside its declaration",
            symbol.name
        );
        assert!(usize::from(symbol.range.end()) <= text.len());
        if !symbol.name.is_empty() {
            assert_eq!(doc.slice(symbol.name_range), symbol.name.as_str());
        }
    }
    for (_, expr) in doc.expressions() {
        assert!(expr.range.start() <= expr.range.end());
    }

    let token = doc.top_level_named("Token").unwrap();
    assert_eq!(doc.symbol(token).unwrap().doc.as_deref(), Some("@title Token"));
    let kinds: Vec<SymbolKind> = doc
        .symbol(token)
        .unwrap()
        .members()
        .iter()
        .map(|&id| doc.symbol(id).unwrap().kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            SymbolKind::Struct,
            SymbolKind::Enum,
            SymbolKind::Event,
            SymbolKind::Error,
            SymbolKind::StateVariable,
            SymbolKind::Modifier,
            SymbolKind::Function,
        ]
    );
}

#[test]
fn test_remove_drops_document() {
    let (fs, project) = load(CYCLE);
    let mut walker = Walker::new();
    walker.index_project(&project, &fs);
    walker.remove("/p/B.sol");
    assert!(walker.document_by_path("/p/B.sol").is_none());
    assert!(walker.documents().all(|d| &**d.path() != "/p/B.sol"));
    let a = walker.document_by_path("/p/A.sol").unwrap();
    let import = a.imports().next().unwrap();
    assert_eq!(walker.import_target(solace::hir::SymbolRef::new(a.file(), import)), None);
}
