//! Solution initialization: project map population and failure semantics.

use slnscope::{IndexError, LoadError, SolutionIndex};

use crate::helpers::SolutionFixture;

#[test]
fn test_init_populates_one_entry_per_project() {
    let fixture = SolutionFixture::builder("Demo")
        .project("Core", &[])
        .file("Base.cs", "namespace Core { public class Base { } }")
        .project("App", &["Core"])
        .file("A.cs", "namespace App { public class A : Base { } }")
        .file("B.cs", "namespace App { public class B { } }")
        .project("Tools", &[])
        .file("T.cs", "namespace Tools { public class T { } }")
        .build();

    let index = SolutionIndex::load(fixture.path()).unwrap();
    assert_eq!(index.solution_name(), "Demo");
    assert_eq!(index.project_count(), 3);

    // Keyed by name, descriptor order preserved, document counts visible.
    let names: Vec<&str> = index.projects().map(|p| p.name()).collect();
    assert_eq!(names, vec!["Core", "App", "Tools"]);
    assert_eq!(index.project("Core").unwrap().documents().len(), 1);
    assert_eq!(index.project("App").unwrap().documents().len(), 2);
    assert_eq!(index.project("Tools").unwrap().documents().len(), 1);
    assert!(index.project("Missing").is_none());
}

#[test]
fn test_compile_failure_aborts_initialization() {
    let fixture = SolutionFixture::builder("Broken")
        .project("Good", &[])
        .file("G.cs", "class G { }")
        .project("Bad", &[])
        .file("B.cs", "class B : NoSuchBase { }")
        .build();

    let err = SolutionIndex::load(fixture.path()).unwrap_err();
    match err {
        IndexError::Compilation(failure) => {
            assert_eq!(failure.project, "Bad");
            assert!(failure.diagnostics[0].message.contains("NoSuchBase"));
        }
        other => panic!("expected CompilationFailure, got {other:?}"),
    }
}

#[test]
fn test_parse_failure_is_a_compile_failure() {
    let fixture = SolutionFixture::builder("Broken")
        .project("Bad", &[])
        .file("B.cs", "class { } }")
        .build();

    assert!(matches!(
        SolutionIndex::load(fixture.path()),
        Err(IndexError::Compilation(_))
    ));
}

#[test]
fn test_missing_descriptor_is_a_load_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = SolutionIndex::load(dir.path()).unwrap_err();
    assert!(matches!(err, IndexError::Load(LoadError::Read { .. })));
}

#[test]
fn test_missing_project_root_is_a_load_error() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("solution.toml"),
        "[[projects]]\nname = \"P\"\nroot = \"nowhere\"\n",
    )
    .unwrap();
    let err = SolutionIndex::load(dir.path()).unwrap_err();
    assert!(matches!(
        err,
        IndexError::Load(LoadError::MissingProjectRoot { .. })
    ));
}

#[test]
fn test_empty_index_answers_queries_with_empty_results() {
    // The default value is the uninitialized-index contract: queries degrade
    // to empty results, never panic.
    let index = SolutionIndex::default();
    assert_eq!(index.project_count(), 0);
    assert!(index.derived_classes("Base", "P").is_empty());
    assert!(index.project("P").is_none());
}

#[test]
fn test_loader_ignores_non_source_files() {
    let fixture = SolutionFixture::builder("Mixed")
        .project("P", &[])
        .file("Code.cs", "class C { }")
        .file("readme.txt", "not code")
        .build();

    let index = SolutionIndex::load(fixture.path()).unwrap();
    assert_eq!(index.project("P").unwrap().documents().len(), 1);
}
