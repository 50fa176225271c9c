//! Symbol types: the closed tagged union of named program entities.
//!
//! Symbols live in a per-compilation arena addressed by [`SymbolId`].
//! Capability checks are `as_*` methods returning optional typed views —
//! callers never inspect runtime types.

use smol_str::SmolStr;

use crate::base::{FileId, TextRange};

/// Unique identifier for a symbol in a compilation's arena.
/// Uses u32 for compact storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(u32);

impl SymbolId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One declaration site of a symbol.
///
/// Most symbols have exactly one; `partial` types and methods have several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeclSite {
    pub file: FileId,
    pub range: TextRange,
}

/// Coarse symbol classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Namespace,
    Type,
    Field,
    Method,
    Property,
}

/// Member classification used by the member-filter query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field,
    Method,
    Property,
    /// Anything else a type can contain (nested types)
    Other,
}

/// Class or interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
}

/// A namespace, merged across all of its declaration sites
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceSymbol {
    pub name: SmolStr,
    pub qualified_name: SmolStr,
    /// Direct members (types and child namespaces), in declaration order
    pub members: Vec<SymbolId>,
    pub decls: Vec<DeclSite>,
}

/// A class or interface, merged across partial declarations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSymbol {
    pub name: SmolStr,
    pub qualified_name: SmolStr,
    pub kind: TypeKind,
    pub is_abstract: bool,
    pub is_static: bool,
    pub is_sealed: bool,
    pub is_partial: bool,
    /// Enclosing namespace path, outermost first. Base names resolve
    /// against these scopes from innermost outward.
    pub namespace: Vec<SmolStr>,
    /// Base types as written in source (simple or dotted), unresolved
    pub base_names: Vec<SmolStr>,
    /// Members in declaration order (fields, methods, properties, nested types)
    pub members: Vec<SymbolId>,
    pub decls: Vec<DeclSite>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSymbol {
    pub name: SmolStr,
    pub qualified_name: SmolStr,
    pub ty: SmolStr,
    pub decls: Vec<DeclSite>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodParam {
    pub ty: SmolStr,
    pub name: SmolStr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSymbol {
    pub name: SmolStr,
    pub qualified_name: SmolStr,
    pub return_type: SmolStr,
    pub params: Vec<MethodParam>,
    pub is_abstract: bool,
    pub is_extern: bool,
    pub is_partial: bool,
    pub decls: Vec<DeclSite>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySymbol {
    pub name: SmolStr,
    pub qualified_name: SmolStr,
    pub ty: SmolStr,
    pub decls: Vec<DeclSite>,
}

/// A named program entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    Namespace(NamespaceSymbol),
    Type(TypeSymbol),
    Field(FieldSymbol),
    Method(MethodSymbol),
    Property(PropertySymbol),
}

impl Symbol {
    /// Returns the simple name of this symbol
    pub fn name(&self) -> &str {
        match self {
            Symbol::Namespace(s) => &s.name,
            Symbol::Type(s) => &s.name,
            Symbol::Field(s) => &s.name,
            Symbol::Method(s) => &s.name,
            Symbol::Property(s) => &s.name,
        }
    }

    /// Returns the dotted qualified name of this symbol
    pub fn qualified_name(&self) -> &str {
        match self {
            Symbol::Namespace(s) => &s.qualified_name,
            Symbol::Type(s) => &s.qualified_name,
            Symbol::Field(s) => &s.qualified_name,
            Symbol::Method(s) => &s.qualified_name,
            Symbol::Property(s) => &s.qualified_name,
        }
    }

    pub fn kind(&self) -> SymbolKind {
        match self {
            Symbol::Namespace(_) => SymbolKind::Namespace,
            Symbol::Type(_) => SymbolKind::Type,
            Symbol::Field(_) => SymbolKind::Field,
            Symbol::Method(_) => SymbolKind::Method,
            Symbol::Property(_) => SymbolKind::Property,
        }
    }

    /// How this symbol counts when filtering a type's members
    pub fn member_kind(&self) -> MemberKind {
        match self {
            Symbol::Field(_) => MemberKind::Field,
            Symbol::Method(_) => MemberKind::Method,
            Symbol::Property(_) => MemberKind::Property,
            Symbol::Namespace(_) | Symbol::Type(_) => MemberKind::Other,
        }
    }

    /// Every declaration site of this symbol, in discovery order
    pub fn declarations(&self) -> &[DeclSite] {
        match self {
            Symbol::Namespace(s) => &s.decls,
            Symbol::Type(s) => &s.decls,
            Symbol::Field(s) => &s.decls,
            Symbol::Method(s) => &s.decls,
            Symbol::Property(s) => &s.decls,
        }
    }

    // ============================================================
    // Capability-checked views
    // ============================================================

    pub fn as_namespace(&self) -> Option<&NamespaceSymbol> {
        match self {
            Symbol::Namespace(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_type(&self) -> Option<&TypeSymbol> {
        match self {
            Symbol::Type(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_field(&self) -> Option<&FieldSymbol> {
        match self {
            Symbol::Field(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_method(&self) -> Option<&MethodSymbol> {
        match self {
            Symbol::Method(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_property(&self) -> Option<&PropertySymbol> {
        match self {
            Symbol::Property(s) => Some(s),
            _ => None,
        }
    }
}

/// Identity of a type across the whole solution: owning assembly + qualified
/// name. Two queries about the same declared type compare equal on this.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeKey {
    pub assembly: SmolStr,
    pub qualified_name: SmolStr,
}
