use proxy_gen::{GeneratorOptions, ProxyCache, generate_subjects, write_sources};
use proxy_loader::DeclarationResolver;
use std::fs;

const USER_MANIFEST: &str = r#"
manifest:
  assembly: Test
  imports:
    - path: static.decl.yaml
subjects:
  - name: User
    namespace: Test
    reference: global::Test.User
    location: { path: User.cs, line: 3, column: 14 }
    members:
      - member: property
        name: UserName
        type: string
      - member: property
        name: Email
        type: string
        is-read-only: true
      - member: method
        name: DoWork
        parameters:
          - { name: x, type: int, ref-kind: ref }
          - { name: y, type: int, ref-kind: in }
          - { name: z, type: int, ref-kind: out }
      - member: other
        name: _cache
"#;

const STATIC_MANIFEST: &str = r#"
manifest:
  assembly: Test
subjects:
  - name: StaticClass
    namespace: Test
    reference: global::Test.StaticClass
    is-static: true
    location: { path: StaticClass.cs, line: 5, column: 25 }
    members:
      - member: property
        name: Value
        type: int
        is-static: true
"#;

const USER_FRAGMENT: &str = r#"
manifest:
  assembly: Test
subjects:
  - name: User
    namespace: Test
    reference: global::Test.User
    members:
      - member: property
        name: Email
        type: string
"#;

#[test]
fn manifests_to_files_on_disk() {
    let input = tempfile::tempdir().unwrap();
    fs::write(input.path().join("user.decl.yaml"), USER_MANIFEST).unwrap();
    fs::write(input.path().join("static.decl.yaml"), STATIC_MANIFEST).unwrap();

    let mut resolver = DeclarationResolver::new(vec![]);
    resolver
        .load_file_with_imports(&input.path().join("user.decl.yaml"))
        .expect("manifests should load");

    let mut cache = ProxyCache::new();
    let report = generate_subjects(resolver.subjects(), &GeneratorOptions::default(), &mut cache);

    /* the static subject is reported and skipped without blocking the other one */
    assert!(report.has_errors());
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(
        report.diagnostics[0].to_string(),
        "StaticClass.cs(5,25): error RFL0001: Unsupported static type 'StaticClass'. Static types will be supported from a future release onward."
    );
    assert_eq!(report.sources.len(), 1);

    let output = tempfile::tempdir().unwrap();
    let written = write_sources(&output.path().join("generated"), &report.sources).unwrap();
    assert_eq!(written.len(), 1);
    assert!(written[0].ends_with("UserProxy.g.cs"));
    assert!(!output.path().join("generated").join("StaticClassProxy.g.cs").exists());

    let text = fs::read_to_string(&written[0]).unwrap();
    assert!(text.starts_with("namespace Test\n{\n    public partial struct UserProxy\n"));
    assert!(text.contains("        public void DoWork(ref int x, in int y, out int z)\n"));
    assert!(text.contains("            CallDoWork(_target, ref x, in y, out z);\n"));
    assert!(!text.contains("_cache"));
    /* Email is read-only in this manifest */
    assert!(text.contains("Name = \"get_Email\""));
    assert!(!text.contains("set_Email"));
}

#[test]
fn writable_fragment_in_another_manifest_adds_setter() {
    let mut resolver = DeclarationResolver::new(vec![]);
    resolver.load_str("user.decl.yaml", USER_MANIFEST_NO_IMPORTS).unwrap();
    resolver.load_str("user.part.decl.yaml", USER_FRAGMENT).unwrap();

    let mut cache = ProxyCache::new();
    let report = generate_subjects(resolver.subjects(), &GeneratorOptions::default(), &mut cache);

    assert!(!report.has_errors());
    assert_eq!(report.sources.len(), 1);
    assert!(report.sources[0].text.contains("Name = \"set_Email\""));
}

const USER_MANIFEST_NO_IMPORTS: &str = r#"
manifest:
  assembly: Test
subjects:
  - name: User
    namespace: Test
    reference: global::Test.User
    members:
      - member: property
        name: Email
        type: string
        is-read-only: true
"#;

#[test]
fn repeated_runs_hit_the_cache_with_identical_text() {
    let mut resolver = DeclarationResolver::new(vec![]);
    resolver.load_str("user.decl.yaml", USER_MANIFEST_NO_IMPORTS).unwrap();
    let options = GeneratorOptions::default();
    let mut cache = ProxyCache::new();

    let first = generate_subjects(resolver.subjects(), &options, &mut cache);
    let second = generate_subjects(resolver.subjects(), &options, &mut cache);

    assert_eq!(first.sources, second.sources);
    assert_eq!(cache.misses(), 1);
    assert_eq!(cache.hits(), 1);

    let with_conversion = GeneratorOptions {
        implicit_conversion: true,
        ..GeneratorOptions::default()
    };
    let third = generate_subjects(resolver.subjects(), &with_conversion, &mut cache);
    assert_eq!(cache.misses(), 2);
    assert_ne!(first.sources, third.sources);
}

#[test]
fn write_sources_reports_unwritable_directory() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, "file").unwrap();

    let mut resolver = DeclarationResolver::new(vec![]);
    resolver.load_str("user.decl.yaml", USER_MANIFEST_NO_IMPORTS).unwrap();
    let report = generate_subjects(resolver.subjects(), &GeneratorOptions::default(), &mut ProxyCache::new());

    let err = write_sources(&blocker, &report.sources).unwrap_err();
    assert!(matches!(err, proxy_gen::OutputError::CreateDir { .. }));
}

const SAME_NAME_MANIFEST: &str = r#"
manifest:
  assembly: Test
subjects:
  - name: User
    namespace: Test
    reference: global::Test.User
  - name: User
    namespace: Other
    reference: global::Other.User
"#;

#[test]
fn same_simple_name_in_two_namespaces_is_rejected() {
    let mut resolver = DeclarationResolver::new(vec![]);
    resolver.load_str("users.decl.yaml", SAME_NAME_MANIFEST).unwrap();
    let report = generate_subjects(resolver.subjects(), &GeneratorOptions::default(), &mut ProxyCache::new());
    assert_eq!(report.sources.len(), 2);

    let output = tempfile::tempdir().unwrap();
    let err = write_sources(output.path(), &report.sources).unwrap_err();

    match err {
        proxy_gen::OutputError::DuplicateHintName { hint_name, first, second } => {
            assert_eq!(hint_name, "UserProxy.g.cs");
            assert_eq!(first, "global::Test.User");
            assert_eq!(second, "global::Other.User");
        }
        other => panic!("unexpected error: {}", other),
    }
    /* nothing is written once a clash is found */
    assert!(!output.path().join("UserProxy.g.cs").exists());
}

const STRUCT_MANIFEST: &str = r#"
manifest:
  assembly: Test
subjects:
  - name: Point
    namespace: Test
    reference: global::Test.Point
    kind: struct
    members:
      - member: property
        name: X
        type: int
  - name: User
    namespace: Test
    reference: global::Test.User
"#;

#[test]
fn struct_subjects_are_skipped_without_diagnostics() {
    let mut resolver = DeclarationResolver::new(vec![]);
    resolver.load_str("mixed.decl.yaml", STRUCT_MANIFEST).unwrap();

    let report = generate_subjects(resolver.subjects(), &GeneratorOptions::default(), &mut ProxyCache::new());

    assert!(!report.has_errors());
    assert_eq!(report.skipped, vec!["global::Test.Point".to_string()]);
    assert_eq!(report.sources.len(), 1);
    assert_eq!(report.sources[0].hint_name, "UserProxy.g.cs");
}
