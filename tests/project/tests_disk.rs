//! Projects read from a real directory.

use tempfile::TempDir;

use crate::helpers::workspace::{disk_host, write_tree};

#[test]
fn test_foundry_layout_on_disk() {
    let dir = TempDir::new().unwrap();
    write_tree(
        dir.path(),
        &[
            ("foundry.toml", "[profile.default]\nsrc = \"contracts\"\nout = \"build\"\n"),
            ("remappings.txt", "dep/=lib/dep/src/\n"),
            ("contracts/Main.sol", "import \"dep/Helper.sol\";\ncontract Main is Helper {}\n"),
            ("lib/dep/src/Helper.sol", "contract Helper { function help() public {} }\n"),
            ("build/Main.sol", "contract Stale {}\n"),
            (".git/Hidden.sol", "contract Hidden {}\n"),
        ],
    );
    let host = disk_host(dir.path());
    let project = host.project();
    assert_eq!(project.root.sources_dir, "contracts");

    let analysis = host.analysis();
    let names: Vec<String> = analysis
        .workspace_symbols(None)
        .into_iter()
        .map(|s| s.name.to_string())
        .collect();
    assert!(names.contains(&"Main".to_string()));
    assert!(names.contains(&"Helper".to_string()));
    assert!(!names.contains(&"Stale".to_string()));
    assert!(!names.contains(&"Hidden".to_string()));
}

#[test]
fn test_missing_root_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");
    let result = solace::ide::AnalysisHost::load(
        &missing.to_string_lossy(),
        &solace::project::ProjectSettings::default(),
        std::sync::Arc::new(solace::project::OsFileSystem),
    );
    assert!(result.is_err());
}
