//! The query layer: a read-only index over one loaded solution.
//!
//! [`SolutionIndex::load`] populates the project map once; every query after
//! that borrows it. Query-time misses (unknown project, unknown base type,
//! method without a body) are empty results by design — absence of data is
//! not exceptional in an exploratory analysis tool. Only initialization can
//! fail.

mod body;
mod derived;
mod members;

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use thiserror::Error;

use crate::base::FileId;
use crate::parser::SyntaxNode;
use crate::project::{LoadError, ProjectDescriptor, SourceMap, load_solution};
use crate::semantic::{Compilation, CompilationFailure, MemberKind, SemanticModel, SymbolRef};
use crate::syntax::Block;

/// Initialization failed; no index exists.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Compilation(#[from] CompilationFailure),
}

/// How `derived_classes` picks its seed when several type declarations in
/// the owner project share the requested simple name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameResolution {
    /// First declaration in document order wins (the historical behavior)
    #[default]
    FirstMatch,
    /// An ambiguous simple name is treated as a miss (logged, empty result)
    StrictUnique,
}

/// Query-layer configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexConfig {
    pub name_resolution: NameResolution,
}

/// One project's record in the index: its descriptor, compiled semantic
/// unit, and ordered compilation units. Immutable after construction.
#[derive(Debug)]
pub struct ProjectInfo {
    descriptor: ProjectDescriptor,
    compilation: Arc<Compilation>,
    documents: Vec<FileId>,
}

impl ProjectInfo {
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn descriptor(&self) -> &ProjectDescriptor {
        &self.descriptor
    }

    pub fn compilation(&self) -> &Compilation {
        &self.compilation
    }

    /// The project's compilation units, in load order
    pub fn documents(&self) -> &[FileId] {
        &self.documents
    }
}

/// A read-only index over one solution snapshot.
///
/// Built eagerly by [`SolutionIndex::load`]; the default value is the empty
/// index, on which every query returns an empty result.
#[derive(Default, Debug)]
pub struct SolutionIndex {
    solution_name: SmolStr,
    sources: SourceMap,
    projects: IndexMap<SmolStr, ProjectInfo>,
    config: IndexConfig,
}

impl SolutionIndex {
    /// Load and index the solution at `path` (a `solution.toml` or the
    /// directory containing one) with the default configuration.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, IndexError> {
        Self::load_with_config(path, IndexConfig::default())
    }

    /// Load and index the solution at `path`.
    ///
    /// Projects compile in dependency order so that each compilation sees
    /// its references. Any load or compile failure aborts the whole
    /// initialization; no partial index is produced.
    pub fn load_with_config(
        path: impl AsRef<std::path::Path>,
        config: IndexConfig,
    ) -> Result<Self, IndexError> {
        let loaded = load_solution(path)?;
        let solution = loaded.solution;
        let order = solution.compile_order()?;

        let mut compiled: FxHashMap<SmolStr, Arc<Compilation>> = FxHashMap::default();
        for project_idx in order {
            let descriptor = &solution.projects[project_idx];
            let references: Vec<Arc<Compilation>> = descriptor
                .references
                .iter()
                .filter_map(|name| compiled.get(name).cloned())
                .collect();
            let units: Vec<(FileId, &str)> = loaded.project_files[project_idx]
                .iter()
                .filter_map(|&file| loaded.sources.text(file).map(|text| (file, text)))
                .collect();
            let compilation =
                Compilation::compile(descriptor.name.clone(), &units, references)?;
            compiled.insert(descriptor.name.clone(), Arc::new(compilation));
        }

        let mut projects = IndexMap::with_capacity(solution.projects.len());
        for (project_idx, descriptor) in solution.projects.iter().enumerate() {
            let Some(compilation) = compiled.remove(&descriptor.name) else {
                continue;
            };
            projects.insert(
                descriptor.name.clone(),
                ProjectInfo {
                    descriptor: descriptor.clone(),
                    compilation,
                    documents: loaded.project_files[project_idx].clone(),
                },
            );
        }

        tracing::info!(
            solution = %solution.name,
            projects = projects.len(),
            files = loaded.sources.len(),
            "solution indexed"
        );
        Ok(Self {
            solution_name: solution.name,
            sources: loaded.sources,
            projects,
            config,
        })
    }

    pub fn solution_name(&self) -> &str {
        &self.solution_name
    }

    pub fn config(&self) -> IndexConfig {
        self.config
    }

    pub fn sources(&self) -> &SourceMap {
        &self.sources
    }

    /// Number of indexed projects
    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    /// One project's record, by name
    pub fn project(&self, name: &str) -> Option<&ProjectInfo> {
        self.projects.get(name)
    }

    /// All project records, in descriptor order
    pub fn projects(&self) -> impl Iterator<Item = &ProjectInfo> {
        self.projects.values()
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Every type in the solution deriving (directly or transitively) from
    /// the type named `base_type_name` declared in project
    /// `owner_project_name`.
    ///
    /// Unknown project and unknown base type both yield an empty sequence —
    /// the two are indistinguishable at this boundary by design. Result
    /// order is not guaranteed; rely on set membership only.
    pub fn derived_classes(
        &self,
        base_type_name: &str,
        owner_project_name: &str,
    ) -> Vec<SymbolRef<'_>> {
        derived::derived_classes(self, base_type_name, owner_project_name)
    }

    /// Members of `type_symbol` whose kind is `kind`; other members are
    /// silently excluded.
    pub fn members_of_kind<'a>(
        &self,
        type_symbol: SymbolRef<'a>,
        kind: MemberKind,
    ) -> impl Iterator<Item = SymbolRef<'a>> {
        members::members_of_kind(type_symbol, kind)
    }

    /// The symbol declared at `node`, or None when the node is not itself a
    /// declaration.
    pub fn symbol_for_declaration<'a>(
        &self,
        model: &SemanticModel<'a>,
        node: &SyntaxNode,
    ) -> Option<SymbolRef<'a>> {
        members::symbol_for_declaration(model, node)
    }

    /// One representative executable body of `method`: the first declaration
    /// site that has one. None for symbols that are not methods and for
    /// methods with no body anywhere (abstract, extern, interface).
    pub fn body_of(&self, method: SymbolRef<'_>) -> Option<Block> {
        body::body_of(method)
    }

    /// Every executable body of `method`, in declaration-site order.
    /// Partial methods may yield one body among several sites.
    pub fn bodies_of(&self, method: SymbolRef<'_>) -> Vec<Block> {
        body::bodies_of(method)
    }
}
