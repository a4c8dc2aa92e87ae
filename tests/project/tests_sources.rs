//! Transitive source collection and the compile view.

use solace::project::{MemoryFileSystem, Project, ProjectSettings, SourceDocumentCollection};

fn setup() -> (MemoryFileSystem, Project) {
    let fs = MemoryFileSystem::new()
        .with_file("/p/src/A.sol", "import \"./B.sol\";\nimport {T} from \"@oz/T.sol\";\ncontract A {}\n")
        .with_file("/p/src/B.sol", "import \"./A.sol\";\nimport \"./Missing.sol\";\ncontract B {}\n")
        .with_file("/p/lib/oz/T.sol", "contract T {}\n")
        .with_file("/p/src/Unrelated.sol", "contract U {}\n");
    let project = Project::load("/p", &ProjectSettings::default().with_remappings(["@oz/=lib/oz/"]), &fs).unwrap();
    (fs, project)
}

#[test]
fn test_closure_survives_cycles() {
    let (fs, project) = setup();
    let mut collection = SourceDocumentCollection::new(&project, &fs);
    collection.add_from_fs("/p/src/B.sol");
    let paths: Vec<&str> = collection.documents().map(|d| d.path.as_str()).collect();
    assert_eq!(paths.len(), 3);
    assert_eq!(paths[0], "/p/src/B.sol");
    assert!(collection.contains("/p/src/A.sol"));
    assert!(collection.contains("/p/lib/oz/T.sol"));
    assert!(!collection.contains("/p/src/Unrelated.sol"));
}

#[test]
fn test_adding_twice_keeps_first_text() {
    let (fs, project) = setup();
    let mut collection = SourceDocumentCollection::new(&project, &fs);
    collection.add_and_resolve("/p/src/A.sol", "contract First {}");
    let again = collection.add_and_resolve("/p/src/A.sol", "contract Second {}");
    assert_eq!(&*again.text, "contract First {}");
    assert_eq!(collection.len(), 1);
}

#[test]
fn test_unresolved_import_recorded() {
    let (fs, project) = setup();
    let mut collection = SourceDocumentCollection::new(&project, &fs);
    let doc = collection.add_and_resolve("/p/src/X.sol", "import \"nowhere/Y.sol\";");
    assert_eq!(doc.imports.len(), 1);
    assert_eq!(doc.imports[0].resolved, None);
    assert!(!doc.imports[0].via_package);
}

#[test]
fn test_compile_view_rewrites_package_imports_only() {
    let (fs, project) = setup();
    let mut collection = SourceDocumentCollection::new(&project, &fs);
    let doc = collection.add_from_fs("/p/src/A.sol").unwrap();
    let rewritten = doc.rewritten_text();
    assert!(rewritten.contains("import \"./B.sol\";"));
    assert!(rewritten.contains("import {T} from \"/p/lib/oz/T.sol\";"));
}
