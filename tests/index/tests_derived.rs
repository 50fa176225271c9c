//! The derived-type query across project boundaries.

use rstest::rstest;

use slnscope::{IndexConfig, NameResolution, SolutionIndex};

use crate::helpers::{SolutionFixture, qualified_names};

fn two_project_fixture() -> SolutionFixture {
    SolutionFixture::builder("Derivation")
        .project("P", &[])
        .file(
            "Base.cs",
            r#"
            namespace Lib {
                public class Base { }
                public class Unrelated { }
            }
            "#,
        )
        .project("Q", &["P"])
        .file(
            "Derived.cs",
            r#"
            namespace Lib {
                public class Derived : Base { }
                public class Grandchild : Derived { }
            }
            "#,
        )
        .build()
}

#[test]
fn test_derived_classes_cross_project() {
    let fixture = two_project_fixture();
    let index = SolutionIndex::load(fixture.path()).unwrap();

    let derived = index.derived_classes("Base", "P");
    let names = qualified_names(&derived);
    assert_eq!(names, vec!["Lib.Derived", "Lib.Grandchild"]);
}

#[rstest]
#[case("NoSuchType", "P")]
#[case("Base", "NoSuchProject")]
#[case("Unrelated", "NoSuchProject")]
fn test_misses_are_empty_never_errors(#[case] base: &str, #[case] project: &str) {
    let fixture = two_project_fixture();
    let index = SolutionIndex::load(fixture.path()).unwrap();
    assert!(index.derived_classes(base, project).is_empty());
}

#[test]
fn test_base_itself_is_not_in_the_result() {
    let fixture = two_project_fixture();
    let index = SolutionIndex::load(fixture.path()).unwrap();
    let names = qualified_names(&index.derived_classes("Base", "P"));
    assert!(!names.contains(&"Lib.Base".to_string()));
}

#[test]
fn test_type_with_no_derivations_yields_empty() {
    let fixture = two_project_fixture();
    let index = SolutionIndex::load(fixture.path()).unwrap();
    assert!(index.derived_classes("Unrelated", "P").is_empty());
}

#[test]
fn test_interface_implementers_count_as_derived() {
    let fixture = SolutionFixture::builder("Interfaces")
        .project("P", &[])
        .file("IFace.cs", "public interface IRunnable { }")
        .project("Q", &["P"])
        .file(
            "Impl.cs",
            "public class Runner : IRunnable { } public interface IFast : IRunnable { }",
        )
        .build();
    let index = SolutionIndex::load(fixture.path()).unwrap();
    let names = qualified_names(&index.derived_classes("IRunnable", "P"));
    assert_eq!(names, vec!["IFast", "Runner"]);
}

#[test]
fn test_first_match_wins_in_document_order() {
    // Two distinct types share the simple name "Base"; the loader orders
    // documents by file name, so a_first.cs seeds the query.
    let fixture = SolutionFixture::builder("Dup")
        .project("P", &[])
        .file("a_first.cs", "namespace A { public class Base { } }")
        .file("b_second.cs", "namespace B { public class Base { } }")
        .project("Q", &["P"])
        .file(
            "Derived.cs",
            r#"
            namespace A { public class FromA : Base { } }
            namespace B { public class FromB : Base { } }
            "#,
        )
        .build();
    let index = SolutionIndex::load(fixture.path()).unwrap();
    let names = qualified_names(&index.derived_classes("Base", "P"));
    assert_eq!(names, vec!["A.FromA"]);
}

#[test]
fn test_strict_unique_treats_ambiguity_as_miss() {
    let fixture = SolutionFixture::builder("Dup")
        .project("P", &[])
        .file("a.cs", "namespace A { public class Base { } }")
        .file("b.cs", "namespace B { public class Base { } }")
        .build();
    let config = IndexConfig {
        name_resolution: NameResolution::StrictUnique,
    };
    let index = SolutionIndex::load_with_config(fixture.path(), config).unwrap();
    assert!(index.derived_classes("Base", "P").is_empty());
}

#[test]
fn test_strict_unique_resolves_a_unique_name() {
    let fixture = two_project_fixture();
    let config = IndexConfig {
        name_resolution: NameResolution::StrictUnique,
    };
    let index = SolutionIndex::load_with_config(fixture.path(), config).unwrap();
    let names = qualified_names(&index.derived_classes("Base", "P"));
    assert_eq!(names, vec!["Lib.Derived", "Lib.Grandchild"]);
}

#[test]
fn test_strict_unique_partial_type_is_one_symbol() {
    let fixture = SolutionFixture::builder("Partial")
        .project("P", &[])
        .file("a.cs", "namespace N { public partial class Base { } }")
        .file("b.cs", "namespace N { public partial class Base { } }")
        .file("c.cs", "namespace N { public class Child : Base { } }")
        .build();
    let config = IndexConfig {
        name_resolution: NameResolution::StrictUnique,
    };
    let index = SolutionIndex::load_with_config(fixture.path(), config).unwrap();
    let names = qualified_names(&index.derived_classes("Base", "P"));
    assert_eq!(names, vec!["N.Child"]);
}

#[test]
fn test_repeated_queries_agree_on_membership() {
    let fixture = two_project_fixture();
    let index = SolutionIndex::load(fixture.path()).unwrap();
    let first = qualified_names(&index.derived_classes("Base", "P"));
    let second = qualified_names(&index.derived_classes("Base", "P"));
    assert_eq!(first, second);
}
