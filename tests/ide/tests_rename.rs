//! Rename through the host.

use rstest::rstest;

use crate::helpers::cursor::position_of;
use crate::helpers::workspace::{memory_host, path};

const VAULT: &str = "\
contract Vault {
    uint256 public amountTotal;
    function deposit(uint256 amount) public {
        amountTotal += amount;
    }
    function withdraw(uint256 amount) public {
        require(amount <= amountTotal);
        amountTotal -= amount;
    }
}
";

#[test]
fn test_parameter_rename_is_local_to_function() {
    let host = memory_host(&[("src/Vault.sol", VAULT)]);
    let (line, col) = position_of(VAULT, "amount)", 0);
    let result = host.analysis().rename(&path("src/Vault.sol"), line, col, "value").unwrap();
    let edits = &result.edits[path("src/Vault.sol").as_str()];
    let lines: Vec<u32> = edits.iter().map(|e| e.location.start.line).collect();
    assert_eq!(lines, vec![2, 3]);
    for edit in edits {
        assert_eq!(&VAULT[edit.location.range], "amount");
        assert_eq!(edit.new_text, "value");
    }
}

#[test]
fn test_state_variable_rename_skips_longer_words() {
    let host = memory_host(&[("src/Vault.sol", VAULT)]);
    let (line, col) = position_of(VAULT, "amountTotal;", 0);
    let result = host.analysis().rename(&path("src/Vault.sol"), line, col, "sum").unwrap();
    assert_eq!(result.len(), 4);
    for edit in &result.edits[path("src/Vault.sol").as_str()] {
        assert_eq!(&VAULT[edit.location.range], "amountTotal");
    }
}

#[test]
fn test_rename_across_files() {
    let base = "contract Base {\n    function helper() internal {}\n}\n";
    let user = "import \"./Base.sol\";\ncontract User is Base {\n    function f() public { helper(); }\n}\n";
    let host = memory_host(&[("src/Base.sol", base), ("src/User.sol", user)]);
    let (line, col) = position_of(user, "helper", 0);
    let result = host.analysis().rename(&path("src/User.sol"), line, col, "assist").unwrap();
    assert_eq!(result.edits.len(), 2);
    assert_eq!(result.len(), 2);
}

#[rstest]
#[case("")]
#[case("9lives")]
#[case("has space")]
#[case("dash-ed")]
fn test_invalid_names_are_rejected(#[case] name: &str) {
    let host = memory_host(&[("src/Vault.sol", VAULT)]);
    let (line, col) = position_of(VAULT, "amount)", 0);
    assert!(host.analysis().rename(&path("src/Vault.sol"), line, col, name).is_none());
}

#[test]
fn test_nothing_to_rename() {
    let host = memory_host(&[("src/Vault.sol", VAULT)]);
    assert!(host.analysis().rename(&path("src/Vault.sol"), 0, 0, "x").is_none());
}
