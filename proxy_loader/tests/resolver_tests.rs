use proxy_loader::{DeclarationResolver, LoadError};
use proxy_types::MemberDecl;
use std::fs;
use std::path::Path;

fn write_manifest(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).expect("write manifest");
}

const PART_ONE: &str = r#"
manifest:
  assembly: Test
  imports:
    - path: part_two.decl.yaml
subjects:
  - name: PartialClass
    namespace: Test
    reference: global::Test.PartialClass
    members:
      - member: property
        name: Part1
        type: int
"#;

const PART_TWO: &str = r#"
manifest:
  assembly: Test
subjects:
  - name: PartialClass
    namespace: Test
    reference: global::Test.PartialClass
    members:
      - member: property
        name: Part2
        type: string
  - name: User
    namespace: Test
    reference: global::Test.User
"#;

#[test]
fn imports_are_loaded_before_the_importing_manifest() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), "part_one.decl.yaml", PART_ONE);
    write_manifest(dir.path(), "part_two.decl.yaml", PART_TWO);

    let mut resolver = DeclarationResolver::new(vec![]);
    resolver
        .load_file_with_imports(&dir.path().join("part_one.decl.yaml"))
        .expect("load should succeed");

    assert_eq!(resolver.loaded_file_count(), 2);
    assert_eq!(resolver.get_assemblies(), vec!["Test".to_string()]);

    let subjects = resolver.subjects();
    assert_eq!(subjects.len(), 2);

    // part_two is registered first, so its fragment leads
    let partial = resolver.find_subject("PartialClass").unwrap();
    let names: Vec<_> = partial.members.iter().map(MemberDecl::name).collect();
    assert_eq!(names, vec!["Part2", "Part1"]);

    assert!(resolver.find_subject("global::Test.User").is_some());
}

#[test]
fn loading_the_same_file_twice_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), "part_two.decl.yaml", PART_TWO);
    let path = dir.path().join("part_two.decl.yaml");

    let mut resolver = DeclarationResolver::new(vec![]);
    resolver.load_file_with_imports(&path).unwrap();
    resolver.load_file_with_imports(&path).unwrap();

    assert_eq!(resolver.get_all_files().len(), 1);
    let partial = resolver.find_subject("PartialClass").unwrap();
    assert_eq!(partial.members.len(), 1);
}

#[test]
fn import_cycles_terminate() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(
        dir.path(),
        "a.decl.yaml",
        "manifest:\n  assembly: A\n  imports:\n    - path: b.decl.yaml\n",
    );
    write_manifest(
        dir.path(),
        "b.decl.yaml",
        "manifest:\n  assembly: B\n  imports:\n    - path: a.decl.yaml\n",
    );

    let mut resolver = DeclarationResolver::new(vec![]);
    resolver
        .load_file_with_imports(&dir.path().join("a.decl.yaml"))
        .unwrap();
    assert_eq!(resolver.loaded_file_count(), 2);
    assert!(resolver.subjects().is_empty());
}

#[test]
fn imports_fall_back_to_include_directories() {
    let root = tempfile::tempdir().unwrap();
    let shared = tempfile::tempdir().unwrap();
    write_manifest(root.path(), "part_one.decl.yaml", PART_ONE);
    write_manifest(shared.path(), "part_two.decl.yaml", PART_TWO);

    let mut resolver = DeclarationResolver::new(vec![shared.path().to_path_buf()]);
    resolver
        .load_file_with_imports(&root.path().join("part_one.decl.yaml"))
        .unwrap();
    assert_eq!(resolver.subjects().len(), 2);
}

#[test]
fn missing_import_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), "part_one.decl.yaml", PART_ONE);

    let mut resolver = DeclarationResolver::new(vec![]);
    let err = resolver
        .load_file_with_imports(&dir.path().join("part_one.decl.yaml"))
        .unwrap_err();
    match err {
        LoadError::ImportNotFound { import, .. } => assert_eq!(import, "part_two.decl.yaml"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_yaml_names_its_origin() {
    let mut resolver = DeclarationResolver::new(vec![]);
    let err = resolver.load_str("inline", "manifest: [").unwrap_err();
    assert!(matches!(err, LoadError::Parse { ref origin, .. } if origin == "inline"));
    assert!(err.to_string().starts_with("failed to parse 'inline'"));
}

#[test]
fn in_memory_manifest_merges_like_a_file() {
    let mut resolver = DeclarationResolver::new(vec![]);
    resolver.load_str("inline", PART_TWO).unwrap();
    assert_eq!(resolver.loaded_file_count(), 0);
    assert_eq!(resolver.into_subjects().len(), 2);
}
