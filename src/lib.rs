//! # slnscope
//!
//! Cross-project symbol index and derived-type resolution for C#-style
//! solutions.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! index     → cross-project queries (SolutionIndex, derived types, bodies)
//!   ↓
//! project   → solution descriptor, workspace loading, toolchain
//!   ↓
//! semantic  → compilation, symbol arena, semantic model
//!   ↓
//! syntax    → typed AST wrappers, declaration scanner
//!   ↓
//! parser    → Logos lexer, recursive-descent rowan parser
//!   ↓
//! base      → primitives (FileId, TextRange)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → syntax → semantic → project → index)
// ============================================================================

/// Foundation types: FileId, TextRange
pub mod base;

/// Parser: Logos lexer, recursive-descent parser over a rowan green tree
pub mod parser;

/// Syntax: typed AST wrappers, declaration scanner
pub mod syntax;

/// Semantic model: compilation, symbol arena, derived-type closure
pub mod semantic;

/// Project management: solution descriptor, workspace loading, toolchain
pub mod project;

/// The query layer: SolutionIndex and the cross-project queries
pub mod index;

// Re-export foundation types
pub use base::{FileId, TextRange, TextSize};

// Re-export the types most callers touch
pub use index::{IndexConfig, IndexError, NameResolution, ProjectInfo, SolutionIndex};
pub use project::LoadError;
pub use semantic::{
    Compilation, CompilationFailure, MemberKind, SemanticModel, Symbol, SymbolKind, SymbolRef,
};
