//! Semantic layer: compilations, symbols, and whole-solution type queries.
//!
//! A [`Compilation`] is one project's compiled semantic unit: a symbol arena
//! plus indexes for qualified-name and declaration-site lookup. The
//! [`SemanticModel`] maps syntax declarations in one unit back to symbols.
//! [`SolutionScope`] answers the cross-compilation derived-type query.

mod compilation;
mod diagnostics;
mod model;
mod symbol;

pub use compilation::{Compilation, ResolvedBase, SolutionScope, SymbolRef};
pub use diagnostics::{CompilationFailure, Diagnostic, Severity};
pub use model::SemanticModel;
pub use symbol::{
    DeclSite, FieldSymbol, MemberKind, MethodParam, MethodSymbol, NamespaceSymbol, PropertySymbol,
    Symbol, SymbolId, SymbolKind, TypeKey, TypeKind, TypeSymbol,
};
