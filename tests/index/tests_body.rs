//! The method-body locator: empty body vs no body, partial declarations.

use slnscope::semantic::MemberKind;
use slnscope::SolutionIndex;

use crate::helpers::{SolutionFixture, get_method, get_type};

#[test]
fn test_empty_body_is_a_body_with_zero_statements() {
    let fixture = SolutionFixture::builder("Bodies")
        .project("P", &[])
        .file("W.cs", "class Worker { public void Noop() { } }")
        .build();
    let index = SolutionIndex::load(fixture.path()).unwrap();
    let noop = get_method(&index, "P", "Worker", "Noop");
    let body = index.body_of(noop).expect("empty body is still a body");
    assert_eq!(body.statement_count(), 0);
}

#[test]
fn test_body_statements_are_counted() {
    let fixture = SolutionFixture::builder("Bodies")
        .project("P", &[])
        .file(
            "W.cs",
            r#"
            class Calc {
                public int Add(int a, int b) {
                    Console.WriteLine("adding");
                    return a + b;
                }
            }
            "#,
        )
        .build();
    let index = SolutionIndex::load(fixture.path()).unwrap();
    let add = get_method(&index, "P", "Calc", "Add");
    assert_eq!(index.body_of(add).unwrap().statement_count(), 2);
}

#[test]
fn test_abstract_extern_and_interface_methods_have_no_body() {
    let fixture = SolutionFixture::builder("Bodies")
        .project("P", &[])
        .file(
            "S.cs",
            r#"
            abstract class Shape {
                public abstract double Area();
                public extern int Native();
            }
            interface IShape {
                double Perimeter();
            }
            "#,
        )
        .build();
    let index = SolutionIndex::load(fixture.path()).unwrap();

    assert!(index.body_of(get_method(&index, "P", "Shape", "Area")).is_none());
    assert!(index.body_of(get_method(&index, "P", "Shape", "Native")).is_none());
    assert!(index
        .body_of(get_method(&index, "P", "IShape", "Perimeter"))
        .is_none());
}

#[test]
fn test_partial_method_body_found_in_other_unit() {
    // a.cs carries the defining declaration (no body), b.cs the
    // implementation. Both declarations are one symbol with two sites; the
    // locator skips the body-less site.
    let fixture = SolutionFixture::builder("Partial")
        .project("P", &[])
        .file(
            "a.cs",
            "public partial class Worker { partial void Run(); }",
        )
        .file(
            "b.cs",
            r#"public partial class Worker { partial void Run() { Console.WriteLine("go"); } }"#,
        )
        .build();
    let index = SolutionIndex::load(fixture.path()).unwrap();

    let run = get_method(&index, "P", "Worker", "Run");
    assert_eq!(run.symbol().declarations().len(), 2);

    let body = index.body_of(run).expect("body lives in the second unit");
    assert_eq!(body.statement_count(), 1);
    assert_eq!(index.bodies_of(run).len(), 1);
}

#[test]
fn test_bodies_of_returns_every_candidate() {
    // Not valid C#, but the analysis is best-effort: when several sites
    // carry bodies, body_of picks the first and bodies_of exposes them all.
    let fixture = SolutionFixture::builder("Partial")
        .project("P", &[])
        .file(
            "a.cs",
            "public partial class W { partial void M() { } }",
        )
        .file(
            "b.cs",
            "public partial class W { partial void M() { x = 1; } }",
        )
        .build();
    let index = SolutionIndex::load(fixture.path()).unwrap();
    let method = get_method(&index, "P", "W", "M");

    let bodies = index.bodies_of(method);
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[0].statement_count(), 0);
    assert_eq!(bodies[1].statement_count(), 1);
    assert_eq!(index.body_of(method).unwrap().statement_count(), 0);
}

#[test]
fn test_non_method_symbol_has_no_body() {
    let fixture = SolutionFixture::builder("Bodies")
        .project("P", &[])
        .file("C.cs", "class C { int field = 0; }")
        .build();
    let index = SolutionIndex::load(fixture.path()).unwrap();
    let ty = get_type(&index, "P", "C");
    let field = index
        .members_of_kind(ty, MemberKind::Field)
        .next()
        .unwrap();
    assert!(index.body_of(field).is_none());
    assert!(index.bodies_of(field).is_empty());
    assert!(index.body_of(ty).is_none());
}
