//! The derived-type query: seed lookup in the owner project, then the
//! solution-wide assignable-types closure.

use crate::semantic::{SolutionScope, SymbolRef};
use crate::syntax::ast::AstNode;
use crate::syntax::type_declarations;

use super::{NameResolution, ProjectInfo, SolutionIndex};

pub(super) fn derived_classes<'a>(
    index: &'a SolutionIndex,
    base_type_name: &str,
    owner_project_name: &str,
) -> Vec<SymbolRef<'a>> {
    let Some(project) = index.project(owner_project_name) else {
        tracing::debug!(project = owner_project_name, "project not in index");
        return Vec::new();
    };
    let Some(seed) = find_seed(project, base_type_name, index.config().name_resolution) else {
        return Vec::new();
    };
    let Some(base_key) = seed.type_key() else {
        return Vec::new();
    };

    let scope = SolutionScope::new(index.projects().map(ProjectInfo::compilation));
    scope.find_assignable_types(&base_key)
}

/// Scan the owner project's units in order for type declarations whose
/// simple name matches.
fn find_seed<'a>(
    project: &'a ProjectInfo,
    base_type_name: &str,
    mode: NameResolution,
) -> Option<SymbolRef<'a>> {
    let compilation = project.compilation();
    let mut matches: Vec<SymbolRef<'a>> = Vec::new();
    for &document in project.documents() {
        let Some(model) = compilation.semantic_model(document) else {
            continue;
        };
        let Some(root) = model.syntax_root() else {
            continue;
        };
        for declaration in type_declarations(&root) {
            let Some(symbol) = model.declared_symbol(declaration.syntax()) else {
                continue;
            };
            if symbol.name() != base_type_name {
                continue;
            }
            match mode {
                NameResolution::FirstMatch => return Some(symbol),
                NameResolution::StrictUnique => {
                    // Partial declarations of one type are a single symbol,
                    // not an ambiguity.
                    if !matches.contains(&symbol) {
                        matches.push(symbol);
                    }
                }
            }
        }
    }

    match matches.len() {
        0 => None,
        1 => matches.pop(),
        _ => {
            tracing::warn!(
                base = base_type_name,
                project = project.name(),
                candidates = matches.len(),
                "ambiguous base type name under strict-unique resolution"
            );
            None
        }
    }
}
