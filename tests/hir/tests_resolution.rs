//! Name and member resolution across files.

use solace::base::TextSize;
use solace::hir::{ExprRef, ExpressionType, HirSymbol, SymbolKind, Walker};
use solace::project::{MemoryFileSystem, Project, ProjectSettings};

fn index(files: &[(&str, &str)]) -> Walker {
    let mut fs = MemoryFileSystem::new();
    for (path, text) in files {
        fs.insert(path, *text);
    }
    let project = Project::load("/p", &ProjectSettings::default(), &fs).unwrap();
    let mut walker = Walker::new();
    walker.index_project(&project, &fs);
    walker
}

/// The expression link under the last character of `needle` in `path`.
fn link_at(walker: &Walker, path: &str, needle: &str) -> ExprRef {
    let doc = walker.document_by_path(path).unwrap();
    let at = doc.text().find(needle).unwrap() + needle.len() - 1;
    let id = doc.expression_at(TextSize::from(at as u32)).unwrap();
    ExprRef::new(doc.file(), id)
}

fn resolve<'w>(walker: &'w Walker, path: &str, needle: &str) -> Option<&'w HirSymbol> {
    walker
        .reference(link_at(walker, path, needle))
        .and_then(|r| walker.symbol(r))
}

fn resolved_path(walker: &Walker, path: &str, needle: &str) -> Option<String> {
    let target = walker.reference(link_at(walker, path, needle))?;
    walker.path(target.file).map(|p| p.to_string())
}

const BASE: &str = "\
contract A {
    uint internal counter;
    function bar() public virtual returns (uint) { return counter; }
}
";

const CHILD: &str = "\
import \"./A.sol\";
contract B is A {
    function bar() public override returns (uint) { return super.bar() + 1; }
    function baz() public returns (uint) {
        counter;
        this.bar();
        return bar();
    }
}
";

#[test]
fn test_inherited_members_resolve_into_base_file() {
    let walker = index(&[("/p/A.sol", BASE), ("/p/B.sol", CHILD)]);
    let counter = resolve(&walker, "/p/B.sol", "        counter").unwrap();
    assert_eq!(counter.kind, SymbolKind::StateVariable);
    assert_eq!(resolved_path(&walker, "/p/B.sol", "        counter").as_deref(), Some("/p/A.sol"));
}

#[test]
fn test_super_skips_own_override() {
    let walker = index(&[("/p/A.sol", BASE), ("/p/B.sol", CHILD)]);
    assert_eq!(resolved_path(&walker, "/p/B.sol", "super.bar").as_deref(), Some("/p/A.sol"));
    assert_eq!(resolved_path(&walker, "/p/B.sol", "this.bar").as_deref(), Some("/p/B.sol"));
    assert_eq!(resolved_path(&walker, "/p/B.sol", "return bar").as_deref(), Some("/p/B.sol"));
}

#[test]
fn test_locals_shadow_state_and_params() {
    let text = "\
contract C {
    uint value;
    function f(uint value) public returns (uint) {
        {
            uint value = 2;
            value;
        }
        return value;
    }
}
";
    let walker = index(&[("/p/C.sol", text)]);
    assert_eq!(resolve(&walker, "/p/C.sol", "            value;").unwrap().kind, SymbolKind::LocalVariable);
    assert_eq!(resolve(&walker, "/p/C.sol", "return value").unwrap().kind, SymbolKind::Parameter);
}

#[test]
fn test_namespace_import_members() {
    let lib = "library Math { function max(uint a, uint b) internal pure returns (uint) { return a; } }\nuint constant LIMIT = 3;\n";
    let user = "\
import \"./Math.sol\" as M;
import {Math as Calc} from \"./Math.sol\";
contract U {
    function f() public pure returns (uint) {
        M.LIMIT;
        Calc.max(1, 2);
        return M.Math.max(1, 2);
    }
}
";
    let walker = index(&[("/p/Math.sol", lib), ("/p/U.sol", user)]);
    let limit = resolve(&walker, "/p/U.sol", "M.LIMIT").unwrap();
    assert_eq!(limit.kind, SymbolKind::Constant);
    assert_eq!(resolve(&walker, "/p/U.sol", "Calc.max").unwrap().name, "max");
    assert_eq!(resolve(&walker, "/p/U.sol", "M.Math.max").unwrap().kind, SymbolKind::Function);
}

#[test]
fn test_using_for_attaches_library_functions() {
    let text = "\
library Bits {
    function flip(uint x) internal pure returns (uint) { return x + 1; }
    function name(string memory s) internal pure returns (string memory) { return s; }
}
using Bits for uint;
contract D {
    function f(uint n, string memory s) public pure {
        n.flip();
        s.name();
    }
}
";
    let walker = index(&[("/p/D.sol", text)]);
    assert_eq!(resolve(&walker, "/p/D.sol", "n.flip").unwrap().name, "flip");
    assert!(resolve(&walker, "/p/D.sol", "s.name").is_none());
}

#[test]
fn test_expression_types_follow_chains() {
    let text = "\
struct Inner { uint v; }
struct Outer { Inner inner; Inner[] list; }
contract E {
    mapping(uint => Outer) store;
    function f() public view {
        store[1].list[0].v;
        store[1].inner;
    }
}
";
    let walker = index(&[("/p/E.sol", text)]);
    assert_eq!(resolve(&walker, "/p/E.sol", "list[0].v").unwrap().kind, SymbolKind::StructMember);

    let ty = walker
        .expression_type(link_at(&walker, "/p/E.sol", "store[1].inner"))
        .unwrap();
    let ExpressionType::Value { ty, target } = ty else {
        panic!("expected a value");
    };
    assert_eq!(ty.name, "Inner");
    assert_eq!(walker.symbol(target.unwrap()).unwrap().kind, SymbolKind::Struct);
}

#[test]
fn test_unknown_names_stay_unresolved() {
    let text = "contract F { function f() public { ghost.value; } }";
    let walker = index(&[("/p/F.sol", text)]);
    assert!(resolve(&walker, "/p/F.sol", "ghost").is_none());
    assert!(resolve(&walker, "/p/F.sol", "ghost.value").is_none());
}

#[test]
fn test_references_cover_every_file() {
    let walker = index(&[("/p/A.sol", BASE), ("/p/B.sol", CHILD)]);
    let a = walker.document_by_path("/p/A.sol").unwrap();
    let counter = a.symbols().find(|(_, s)| s.name == "counter").unwrap().0;
    let refs = walker.references_to(solace::hir::SymbolRef::new(a.file(), counter));
    assert_eq!(refs.len(), 2);
    let files: Vec<_> = refs.iter().map(|r| r.file).collect();
    assert!(files.contains(&a.file()));
    assert!(files.contains(&walker.file_id("/p/B.sol").unwrap()));
}
