//! The workspace loader: discovers and reads every project's compilation
//! units from a solution descriptor.
//!
//! Load problems that make the solution unusable are [`LoadError`]s; oddities
//! the analysis can live with (a project with no sources, skipped files) are
//! logged and carried no further.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::base::FileId;

use super::solution::{LoadError, Solution};
use super::toolchain::Toolchain;

/// Path and text of every compilation unit in a solution, interned by FileId
#[derive(Debug, Default)]
pub struct SourceMap {
    files: Vec<(PathBuf, String)>,
}

impl SourceMap {
    fn insert(&mut self, path: PathBuf, text: String) -> FileId {
        let id = FileId::new(self.files.len() as u32);
        self.files.push((path, text));
        id
    }

    pub fn path(&self, file: FileId) -> Option<&Path> {
        self.files.get(file.raw() as usize).map(|(p, _)| p.as_path())
    }

    pub fn text(&self, file: FileId) -> Option<&str> {
        self.files.get(file.raw() as usize).map(|(_, t)| t.as_str())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// A solution with all of its sources read into memory
#[derive(Debug)]
pub struct LoadedSolution {
    pub solution: Solution,
    pub sources: SourceMap,
    /// Per project (descriptor order), the project's FileIds in path order
    pub project_files: Vec<Vec<FileId>>,
}

/// Read a solution descriptor and every project's sources.
///
/// `path` may be the descriptor file itself or a directory containing
/// `solution.toml`.
pub fn load_solution(path: impl AsRef<Path>) -> Result<LoadedSolution, LoadError> {
    let toolchain = Toolchain::get();

    let path = path.as_ref();
    let descriptor_path = if path.is_dir() {
        path.join("solution.toml")
    } else {
        path.to_path_buf()
    };
    let base_dir = descriptor_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let text = std::fs::read_to_string(&descriptor_path).map_err(|source| LoadError::Read {
        path: descriptor_path.clone(),
        source,
    })?;
    let solution = Solution::parse(&descriptor_path, &text, &base_dir)?;
    tracing::info!(
        solution = %solution.name,
        projects = solution.projects.len(),
        "loading solution"
    );

    let mut sources = SourceMap::default();
    let mut project_files = Vec::with_capacity(solution.projects.len());
    for project in &solution.projects {
        if !project.root.is_dir() {
            return Err(LoadError::MissingProjectRoot {
                project: project.name.clone(),
                path: project.root.clone(),
            });
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&project.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
        {
            if !entry.file_type().is_file() {
                continue;
            }
            if !toolchain.is_source_file(entry.path()) {
                tracing::debug!(path = %entry.path().display(), "skipping non-source file");
                continue;
            }
            let text =
                std::fs::read_to_string(entry.path()).map_err(|source| LoadError::Read {
                    path: entry.path().to_path_buf(),
                    source,
                })?;
            files.push(sources.insert(entry.path().to_path_buf(), text));
        }

        if files.is_empty() {
            tracing::warn!(project = %project.name, "project has no source files");
        }
        tracing::debug!(project = %project.name, files = files.len(), "project sources loaded");
        project_files.push(files);
    }

    Ok(LoadedSolution {
        solution,
        sources,
        project_files,
    })
}
