//! Completion through the host, with the cursor line mid-edit.

use solace::ide::{CompletionItem, CompletionKind};
use solace::project::ProjectSettings;

use crate::helpers::cursor::extract_cursor;
use crate::helpers::workspace::{memory_host, memory_host_with, path};

fn labels(items: &[CompletionItem]) -> Vec<&str> {
    let mut labels: Vec<&str> = items.iter().map(|i| &*i.label).collect();
    labels.sort_unstable();
    labels.dedup();
    labels
}

/// Complete at the `$0` marker of `fixture`, stored as `src/Main.sol` next
/// to `others`.
fn complete(fixture: &str, others: &[(&str, &str)]) -> Vec<CompletionItem> {
    let (text, line, col) = extract_cursor(fixture);
    let mut files = vec![("src/Main.sol", text.as_str())];
    files.extend_from_slice(others);
    let mut host = memory_host(&files);
    host.completions(&path("src/Main.sol"), line, col)
}

#[test]
fn test_struct_members_are_exactly_its_fields() {
    let items = complete(
        "\
struct Point { uint x; uint y; }
contract C {
    function f() public {
        Point memory p;
        p.$0
    }
}
",
        &[],
    );
    assert_eq!(labels(&items), vec!["x", "y"]);
    assert!(items.iter().all(|i| i.kind == CompletionKind::Field));
}

#[test]
fn test_instance_of_derived_contract_offers_base_functions() {
    let base = "contract A { function bar() public {} }\n";
    let items = complete(
        "\
import \"./A.sol\";
contract B is A {
    function baz() public {}
}
contract User {
    function f(B b) public {
        b.$0
    }
}
",
        &[("src/A.sol", base)],
    );
    let labels = labels(&items);
    assert!(labels.contains(&"bar"));
    assert!(labels.contains(&"baz"));
}

#[test]
fn test_chain_through_mapping_and_call() {
    let items = complete(
        "\
struct Point { uint x; uint y; }
contract C {
    mapping(address => Point[]) points;
    function first() internal view returns (Point memory) { return points[msg.sender][0]; }
    function f() public {
        first().$0
    }
}
",
        &[],
    );
    assert_eq!(labels(&items), vec!["x", "y"]);
}

#[test]
fn test_builtin_objects() {
    let items = complete(
        "\
contract C {
    function f() public {
        msg.$0
    }
}
",
        &[],
    );
    let labels = labels(&items);
    assert!(labels.contains(&"sender"));
    assert!(labels.contains(&"value"));
    assert!(labels.contains(&"data"));
}

#[test]
fn test_enum_values() {
    let items = complete(
        "\
enum Phase { Open, Closed }
contract C {
    function f() public {
        Phase.$0
    }
}
",
        &[],
    );
    assert_eq!(labels(&items), vec!["Closed", "Open"]);
}

#[test]
fn test_scope_completion_lists_locals_and_globals() {
    let items = complete(
        "\
contract C {
    uint total;
    function f(uint amount) public {
        uint local = amount;
        $0
    }
}
",
        &[],
    );
    let labels = labels(&items);
    for expected in ["total", "amount", "local", "f", "C", "msg", "keccak256", "uint256", "return"] {
        assert!(labels.contains(&expected), "missing {expected}");
    }
}

#[test]
fn test_import_path_completion_uses_remappings() {
    let (text, line, col) = extract_cursor("import \"@oz/$0\ncontract C {}\n");
    let mut host = memory_host_with(
        &[
            ("src/Main.sol", text.as_str()),
            ("lib/openzeppelin/token/ERC20.sol", "contract ERC20 {}\n"),
            ("src/Other.sol", "contract Other {}\n"),
        ],
        ProjectSettings::default().with_remappings(["@oz/=lib/openzeppelin/"]),
    );
    let items = host.completions(&path("src/Main.sol"), line, col);
    let labels = labels(&items);
    assert!(labels.contains(&"@oz/token/ERC20.sol"));
    assert!(!labels.contains(&"./Other.sol"));
}

#[test]
fn test_relative_import_path_completion() {
    let (text, line, col) = extract_cursor("import \"./$0\ncontract C {}\n");
    let mut host = memory_host(&[("src/Main.sol", text.as_str()), ("src/Other.sol", "contract Other {}\n")]);
    let items = host.completions(&path("src/Main.sol"), line, col);
    assert_eq!(labels(&items), vec!["./Other.sol"]);
}

#[test]
fn test_unresolvable_chain_is_empty() {
    let items = complete(
        "\
contract C {
    function f() public {
        nothing.$0
    }
}
",
        &[],
    );
    assert!(items.is_empty());
}

#[test]
fn test_using_for_uint_applies_to_uint256_values() {
    let items = complete(
        "\
library SafeMath {
    function add(uint256 a, uint256 b) internal pure returns (uint256) { return a + b; }
}
contract C {
    using SafeMath for uint;
    function f() public view {
        block.timestamp.$0
    }
}
",
        &[],
    );
    assert_eq!(labels(&items), vec!["add"]);
}

#[test]
fn test_using_for_uint256_applies_to_uint_locals() {
    let items = complete(
        "\
library SafeMath {
    function add(uint256 a, uint256 b) internal pure returns (uint256) { return a + b; }
}
contract C {
    using SafeMath for uint256;
    function f() public pure {
        uint x;
        x.$0
    }
}
",
        &[],
    );
    assert_eq!(labels(&items), vec!["add"]);
}
