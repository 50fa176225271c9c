//! Shared fixtures and assertion helpers for the integration suite.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use slnscope::semantic::{MemberKind, SymbolRef};
use slnscope::SolutionIndex;

/// An on-disk solution built from inline sources.
pub struct SolutionFixture {
    dir: TempDir,
}

impl SolutionFixture {
    pub fn builder(name: &str) -> FixtureBuilder {
        FixtureBuilder {
            name: name.to_string(),
            projects: Vec::new(),
        }
    }

    /// Path of the solution directory (contains `solution.toml`)
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

pub struct FixtureBuilder {
    name: String,
    projects: Vec<ProjectFixture>,
}

struct ProjectFixture {
    name: String,
    references: Vec<String>,
    files: Vec<(String, String)>,
}

impl FixtureBuilder {
    /// Start a new project; subsequent `file` calls attach to it
    pub fn project(mut self, name: &str, references: &[&str]) -> Self {
        self.projects.push(ProjectFixture {
            name: name.to_string(),
            references: references.iter().map(|r| r.to_string()).collect(),
            files: Vec::new(),
        });
        self
    }

    pub fn file(mut self, file_name: &str, text: &str) -> Self {
        self.projects
            .last_mut()
            .expect("call project() before file()")
            .files
            .push((file_name.to_string(), text.to_string()));
        self
    }

    pub fn build(self) -> SolutionFixture {
        let dir = TempDir::new().expect("create temp dir");

        let mut descriptor = format!("name = \"{}\"\n", self.name);
        for project in &self.projects {
            descriptor.push_str("\n[[projects]]\n");
            descriptor.push_str(&format!("name = \"{}\"\n", project.name));
            descriptor.push_str(&format!("root = \"{}\"\n", project.name));
            let refs: Vec<String> = project
                .references
                .iter()
                .map(|r| format!("\"{r}\""))
                .collect();
            descriptor.push_str(&format!("references = [{}]\n", refs.join(", ")));

            let project_dir = dir.path().join(&project.name);
            fs::create_dir_all(&project_dir).expect("create project dir");
            for (file_name, text) in &project.files {
                fs::write(project_dir.join(file_name), text).expect("write source file");
            }
        }
        fs::write(dir.path().join("solution.toml"), descriptor).expect("write descriptor");

        SolutionFixture { dir }
    }
}

/// Sorted qualified names of a result set, for membership assertions
pub fn qualified_names(symbols: &[SymbolRef<'_>]) -> Vec<String> {
    let mut names: Vec<String> = symbols
        .iter()
        .map(|s| s.qualified_name().to_string())
        .collect();
    names.sort();
    names
}

/// Look up a type symbol by project and qualified name, panicking with a
/// readable message when absent.
pub fn get_type<'a>(
    index: &'a SolutionIndex,
    project: &str,
    qualified_name: &str,
) -> SymbolRef<'a> {
    index
        .project(project)
        .unwrap_or_else(|| panic!("project '{project}' not in index"))
        .compilation()
        .find_type(qualified_name)
        .unwrap_or_else(|| panic!("type '{qualified_name}' not found in project '{project}'"))
}

/// Look up a method member of a type by name.
pub fn get_method<'a>(
    index: &'a SolutionIndex,
    project: &str,
    type_qualified_name: &str,
    method_name: &str,
) -> SymbolRef<'a> {
    let ty = get_type(index, project, type_qualified_name);
    index
        .members_of_kind(ty, MemberKind::Method)
        .find(|m| m.name() == method_name)
        .unwrap_or_else(|| {
            panic!("method '{method_name}' not found on '{type_qualified_name}'")
        })
}
