//! Import resolution against a loaded project.

use rstest::rstest;
use solace::project::{MemoryFileSystem, Project, ProjectSettings, RemappingSource};

fn fs() -> MemoryFileSystem {
    MemoryFileSystem::new()
        .with_file("/p/src/Main.sol", "")
        .with_file("/p/lib/openzeppelin/Token.sol", "")
        .with_file("/p/lib/forge-std/src/Test.sol", "")
        .with_file("/p/node_modules/@scope/pkg/contracts/Lib.sol", "")
}

fn project(settings: ProjectSettings, fs: &MemoryFileSystem) -> Project {
    Project::load("/p", &settings, fs).unwrap()
}

#[test]
fn test_oz_remapping() {
    let fs = fs();
    let project = project(ProjectSettings::default().with_remappings(["@oz/=lib/openzeppelin/"]), &fs);
    assert_eq!(
        project.resolve_import("@oz/Token.sol", "/p/src/Main.sol", &fs).as_deref(),
        Some("/p/lib/openzeppelin/Token.sol")
    );
}

#[test]
fn test_resolution_is_deterministic() {
    let fs = fs();
    let project = project(ProjectSettings::default().with_remappings(["@oz/=lib/openzeppelin/"]), &fs);
    let first = project.resolve_import("@oz/Token.sol", "/p/src/Main.sol", &fs);
    for _ in 0..3 {
        assert_eq!(project.resolve_import("@oz/Token.sol", "/p/src/Main.sol", &fs), first);
    }
}

#[rstest]
#[case("./Other.sol", Some("/p/src/Other.sol"))]
#[case("../lib/x/Y.sol", Some("/p/lib/x/Y.sol"))]
#[case("forge-std/Test.sol", Some("/p/lib/forge-std/src/Test.sol"))]
#[case("forge-std", None)]
#[case("unknown/Thing.sol", None)]
fn test_resolution_order(#[case] import: &str, #[case] expected: Option<&str>) {
    let fs = fs();
    let project = project(ProjectSettings::default(), &fs);
    assert_eq!(project.resolve_import(import, "/p/src/Main.sol", &fs).as_deref(), expected);
}

#[test]
fn test_backslashes_are_normalised() {
    let fs = fs();
    let project = project(ProjectSettings::default(), &fs);
    assert_eq!(
        project.resolve_import(".\\Other.sol", "/p/src/Main.sol", &fs).as_deref(),
        Some("/p/src/Other.sol")
    );
}

#[test]
fn test_first_non_empty_remapping_source_wins() {
    let fs = fs()
        .with_file("/p/foundry.toml", "[profile.default]\nremappings = [\"a/=lib/from-foundry/\"]\n")
        .with_file("/p/remappings.txt", "a/=lib/from-file/\nb/=lib/b/\n");
    let project = project(ProjectSettings::default().with_remappings(["a/=lib/from-settings/"]), &fs);
    assert_eq!(project.remapping_source, RemappingSource::FoundryConfig);
    assert_eq!(project.remappings.len(), 1);
    assert_eq!(
        project.resolve_import("b/X.sol", "/p/src/Main.sol", &fs),
        None,
        "remappings.txt is not merged in"
    );
}

#[test]
fn test_remappings_file_before_settings() {
    let fs = fs().with_file("/p/remappings.txt", "# deps\na/=lib/from-file/\n");
    let project = project(ProjectSettings::default().with_remappings(["a/=lib/from-settings/"]), &fs);
    assert_eq!(project.remapping_source, RemappingSource::RemappingsFile);
    assert_eq!(
        project.resolve_import("a/X.sol", "/p/src/Main.sol", &fs).as_deref(),
        Some("/p/lib/from-file/X.sol")
    );
}

#[test]
fn test_broken_config_falls_through() {
    let fs = fs().with_file("/p/foundry.toml", "[profile.default\n");
    let project = project(ProjectSettings::default().with_remappings(["a/=lib/a/"]), &fs);
    assert_eq!(project.remapping_source, RemappingSource::Settings);
}

#[test]
fn test_scoped_npm_package() {
    let fs = fs();
    let project = project(ProjectSettings::default(), &fs);
    assert!(project.packages.iter().any(|p| p.name == "@scope"));
    assert!(project.packages.iter().any(|p| p.name == "forge-std"));
}

#[test]
fn test_import_string_for_prefers_remapping() {
    let fs = fs();
    let project = project(ProjectSettings::default().with_remappings(["@oz/=lib/openzeppelin/"]), &fs);
    assert_eq!(
        project.import_string_for("/p/lib/openzeppelin/Token.sol", "/p/src/Main.sol"),
        "@oz/Token.sol"
    );
    assert_eq!(project.import_string_for("/p/src/Other.sol", "/p/src/Main.sol"), "./Other.sol");
}
