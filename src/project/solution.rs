//! The solution descriptor: what projects exist, where their sources live,
//! and which projects they reference.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use smol_str::SmolStr;
use thiserror::Error;

/// Solution or project metadata could not be loaded.
///
/// Fatal: raised during solution initialization, never at query time.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed solution descriptor {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },
    #[error("duplicate project name '{name}' in solution")]
    DuplicateProject { name: SmolStr },
    #[error("project '{project}' references unknown project '{reference}'")]
    UnknownReference { project: SmolStr, reference: SmolStr },
    #[error("project reference cycle involving: {}", .projects.join(", "))]
    ReferenceCycle { projects: Vec<String> },
    #[error("project '{project}' source root not found: {path}")]
    MissingProjectRoot { project: SmolStr, path: PathBuf },
}

/// On-disk shape of `solution.toml`
#[derive(Debug, Deserialize)]
struct SolutionFile {
    name: Option<String>,
    #[serde(default)]
    projects: Vec<ProjectEntry>,
}

#[derive(Debug, Deserialize)]
struct ProjectEntry {
    name: String,
    root: String,
    #[serde(default)]
    references: Vec<String>,
}

/// One project of a solution
#[derive(Debug, Clone)]
pub struct ProjectDescriptor {
    pub name: SmolStr,
    /// Directory scanned recursively for source files
    pub root: PathBuf,
    /// Names of referenced projects within the same solution
    pub references: Vec<SmolStr>,
}

/// A validated solution descriptor
#[derive(Debug, Clone)]
pub struct Solution {
    pub name: SmolStr,
    /// Projects in descriptor order
    pub projects: Vec<ProjectDescriptor>,
}

impl Solution {
    /// Parse and validate a descriptor file. `base_dir` anchors relative
    /// project roots.
    pub fn parse(path: &Path, text: &str, base_dir: &Path) -> Result<Self, LoadError> {
        let file: SolutionFile = toml::from_str(text).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source: Box::new(source),
        })?;

        let name = file
            .name
            .map(SmolStr::new)
            .or_else(|| {
                path.file_stem()
                    .and_then(|stem| stem.to_str())
                    .map(SmolStr::new)
            })
            .unwrap_or_else(|| SmolStr::new("solution"));

        let projects: Vec<ProjectDescriptor> = file
            .projects
            .into_iter()
            .map(|entry| ProjectDescriptor {
                name: SmolStr::new(&entry.name),
                root: base_dir.join(entry.root),
                references: entry.references.iter().map(SmolStr::new).collect(),
            })
            .collect();

        let solution = Self { name, projects };
        solution.validate()?;
        Ok(solution)
    }

    fn validate(&self) -> Result<(), LoadError> {
        let mut seen = std::collections::HashSet::new();
        for project in &self.projects {
            if !seen.insert(project.name.clone()) {
                return Err(LoadError::DuplicateProject {
                    name: project.name.clone(),
                });
            }
        }
        for project in &self.projects {
            for reference in &project.references {
                if !seen.contains(reference) {
                    return Err(LoadError::UnknownReference {
                        project: project.name.clone(),
                        reference: reference.clone(),
                    });
                }
            }
        }
        // Cycle check doubles as the compile-order computation.
        self.compile_order().map(|_| ())
    }

    /// Indices into `projects` in dependency order: every project appears
    /// after all projects it references.
    pub fn compile_order(&self) -> Result<Vec<usize>, LoadError> {
        let index_of: std::collections::HashMap<&SmolStr, usize> = self
            .projects
            .iter()
            .enumerate()
            .map(|(i, p)| (&p.name, i))
            .collect();

        let mut order = Vec::with_capacity(self.projects.len());
        let mut state = vec![0u8; self.projects.len()]; // 0 new, 1 visiting, 2 done

        fn visit(
            projects: &[ProjectDescriptor],
            index_of: &std::collections::HashMap<&SmolStr, usize>,
            state: &mut [u8],
            order: &mut Vec<usize>,
            current: usize,
        ) -> bool {
            match state[current] {
                2 => return true,
                1 => return false,
                _ => {}
            }
            state[current] = 1;
            for reference in &projects[current].references {
                if let Some(&next) = index_of.get(reference) {
                    if !visit(projects, index_of, state, order, next) {
                        return false;
                    }
                }
            }
            state[current] = 2;
            order.push(current);
            true
        }

        for i in 0..self.projects.len() {
            if !visit(&self.projects, &index_of, &mut state, &mut order, i) {
                let cyclic: Vec<String> = self
                    .projects
                    .iter()
                    .zip(state.iter())
                    .filter(|&(_, &s)| s == 1)
                    .map(|(p, _)| p.name.to_string())
                    .collect();
                return Err(LoadError::ReferenceCycle { projects: cyclic });
            }
        }
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Solution, LoadError> {
        Solution::parse(Path::new("solution.toml"), text, Path::new("."))
    }

    #[test]
    fn test_parse_minimal() {
        let solution = parse(
            r#"
            name = "Demo"
            [[projects]]
            name = "Core"
            root = "core"
            "#,
        )
        .unwrap();
        assert_eq!(solution.name, "Demo");
        assert_eq!(solution.projects.len(), 1);
        assert!(solution.projects[0].references.is_empty());
    }

    #[test]
    fn test_name_falls_back_to_file_stem() {
        let solution = parse("[[projects]]\nname = \"P\"\nroot = \"p\"\n").unwrap();
        assert_eq!(solution.name, "solution");
    }

    #[test]
    fn test_duplicate_project_rejected() {
        let err = parse(
            r#"
            [[projects]]
            name = "P"
            root = "a"
            [[projects]]
            name = "P"
            root = "b"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::DuplicateProject { .. }));
    }

    #[test]
    fn test_unknown_reference_rejected() {
        let err = parse(
            r#"
            [[projects]]
            name = "P"
            root = "p"
            references = ["Ghost"]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::UnknownReference { .. }));
    }

    #[test]
    fn test_reference_cycle_rejected() {
        let err = parse(
            r#"
            [[projects]]
            name = "A"
            root = "a"
            references = ["B"]
            [[projects]]
            name = "B"
            root = "b"
            references = ["A"]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::ReferenceCycle { .. }));
    }

    #[test]
    fn test_compile_order_puts_references_first() {
        let solution = parse(
            r#"
            [[projects]]
            name = "App"
            root = "app"
            references = ["Core"]
            [[projects]]
            name = "Core"
            root = "core"
            "#,
        )
        .unwrap();
        assert_eq!(solution.compile_order().unwrap(), vec![1, 0]);
    }

    #[test]
    fn test_malformed_descriptor() {
        assert!(matches!(parse("not toml ["), Err(LoadError::Parse { .. })));
    }
}
