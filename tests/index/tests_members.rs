//! Member filtering and syntax ↔ symbol mapping.

use slnscope::semantic::MemberKind;
use slnscope::syntax::ast::AstNode;
use slnscope::syntax::type_declarations;
use slnscope::SolutionIndex;

use crate::helpers::{SolutionFixture, get_type};

fn fixture() -> SolutionFixture {
    // Mirrors the shape of a small analyzed program: a static holder class,
    // an instance class with arithmetic, and a nested-namespace logger.
    SolutionFixture::builder("Analyzed")
        .project("Main", &[])
        .file(
            "Program.cs",
            r#"
            namespace Test1 {
                public static class StaticClassTest {
                    public static int[] testStaticArray = new[] { 1, 2, 3 };

                    public static int[] TestStaticMethod() {
                        return new[] { 4, 5, 6 };
                    }
                }

                public class ClassTest {
                    public int Add(int a, int b) {
                        return a + b;
                    }

                    public double Multiply(double a, double b) {
                        return a * b;
                    }

                    public int Count { get; set; }
                }
            }

            namespace Test2 {
                namespace Test2_2 {
                    public class ClassTest {
                        public void DoLog() {
                            Console.WriteLine("test test test");
                        }
                    }
                }
            }
            "#,
        )
        .build()
}

#[test]
fn test_members_filtered_by_kind() {
    let fixture = fixture();
    let index = SolutionIndex::load(fixture.path()).unwrap();

    let class_test = get_type(&index, "Main", "Test1.ClassTest");
    let methods: Vec<&str> = index
        .members_of_kind(class_test, MemberKind::Method)
        .map(|m| m.name())
        .collect();
    assert_eq!(methods, vec!["Add", "Multiply"]);

    let properties: Vec<&str> = index
        .members_of_kind(class_test, MemberKind::Property)
        .map(|m| m.name())
        .collect();
    assert_eq!(properties, vec!["Count"]);

    // No fields on ClassTest: silently empty, not an error.
    assert_eq!(
        index.members_of_kind(class_test, MemberKind::Field).count(),
        0
    );

    let static_class = get_type(&index, "Main", "Test1.StaticClassTest");
    let fields: Vec<&str> = index
        .members_of_kind(static_class, MemberKind::Field)
        .map(|m| m.name())
        .collect();
    assert_eq!(fields, vec!["testStaticArray"]);
}

#[test]
fn test_nested_type_is_an_other_member() {
    let fixture = SolutionFixture::builder("Nested")
        .project("P", &[])
        .file("N.cs", "class Outer { class Inner { } int x; }")
        .build();
    let index = SolutionIndex::load(fixture.path()).unwrap();
    let outer = get_type(&index, "P", "Outer");
    let others: Vec<&str> = index
        .members_of_kind(outer, MemberKind::Other)
        .map(|m| m.name())
        .collect();
    assert_eq!(others, vec!["Inner"]);
}

#[test]
fn test_symbol_for_declaration_roundtrip() {
    let fixture = fixture();
    let index = SolutionIndex::load(fixture.path()).unwrap();
    let project = index.project("Main").unwrap();
    let document = project.documents()[0];
    let model = project.compilation().semantic_model(document).unwrap();
    let root = model.syntax_root().unwrap();

    let names: Vec<String> = type_declarations(&root)
        .filter_map(|decl| index.symbol_for_declaration(&model, decl.syntax()))
        .map(|symbol| symbol.qualified_name().to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "Test1.StaticClassTest",
            "Test1.ClassTest",
            "Test2.Test2_2.ClassTest"
        ]
    );
}

#[test]
fn test_symbol_for_non_declaration_is_none() {
    let fixture = fixture();
    let index = SolutionIndex::load(fixture.path()).unwrap();
    let project = index.project("Main").unwrap();
    let document = project.documents()[0];
    let model = project.compilation().semantic_model(document).unwrap();
    let root = model.syntax_root().unwrap();

    // The root node declares nothing; the contract tolerates the misuse.
    assert!(index.symbol_for_declaration(&model, &root).is_none());
}
