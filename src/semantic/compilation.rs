//! Compilation: one project's units compiled into a symbol arena.
//!
//! `Compilation::compile` parses every unit, extracts symbols into an arena
//! with a qualified-name index and a declaration map, and validates that all
//! base-type names resolve inside the project or its references. The result
//! is immutable; every query borrows it read-only.

use std::sync::Arc;

use rowan::GreenNode;
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;

use crate::base::{FileId, TextRange};
use crate::parser::{SyntaxNode, parse};
use crate::syntax::ast::{AstNode, FieldDecl, MethodDecl, NamespaceDecl, PropertyDecl, TypeDecl};

use super::diagnostics::{CompilationFailure, Diagnostic};
use super::model::SemanticModel;
use super::symbol::{
    DeclSite, FieldSymbol, MethodParam, MethodSymbol, NamespaceSymbol, PropertySymbol, Symbol,
    SymbolId, TypeKey, TypeKind, TypeSymbol,
};

/// One parsed compilation unit
#[derive(Debug)]
struct SourceUnit {
    file: FileId,
    green: GreenNode,
}

/// A member of a named scope: the two things a namespace can contain.
///
/// Namespace descent is a depth-first walk over this sum.
enum ScopeMember<'a> {
    Type(&'a TypeSymbol),
    Namespace(&'a NamespaceSymbol),
}

/// A borrowed handle to one symbol of one compilation.
///
/// Queries hand these out; the handle stays valid for as long as the
/// compilation it points into.
#[derive(Clone, Copy)]
pub struct SymbolRef<'a> {
    compilation: &'a Compilation,
    id: SymbolId,
}

impl<'a> SymbolRef<'a> {
    pub fn compilation(&self) -> &'a Compilation {
        self.compilation
    }

    pub fn id(&self) -> SymbolId {
        self.id
    }

    pub fn symbol(&self) -> &'a Symbol {
        &self.compilation.symbols[self.id.index()]
    }

    pub fn name(&self) -> &'a str {
        self.symbol().name()
    }

    pub fn qualified_name(&self) -> &'a str {
        self.symbol().qualified_name()
    }

    /// Solution-wide identity, for type symbols
    pub fn type_key(&self) -> Option<TypeKey> {
        self.symbol().as_type().map(|t| TypeKey {
            assembly: self.compilation.name.clone(),
            qualified_name: t.qualified_name.clone(),
        })
    }
}

impl PartialEq for SymbolRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.compilation, other.compilation) && self.id == other.id
    }
}

impl Eq for SymbolRef<'_> {}

impl std::fmt::Debug for SymbolRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SymbolRef({}::{})",
            self.compilation.name(),
            self.qualified_name()
        )
    }
}

/// A base-type name resolved to its declaring compilation
pub struct ResolvedBase<'a> {
    pub key: TypeKey,
    pub compilation: &'a Compilation,
    pub id: SymbolId,
}

/// One project's compiled semantic unit
#[derive(Debug)]
pub struct Compilation {
    name: SmolStr,
    units: Vec<SourceUnit>,
    symbols: Vec<Symbol>,
    /// Qualified name → type symbol, O(1) lookup
    types_by_qname: FxHashMap<SmolStr, SymbolId>,
    /// (file, declaration-node range) → declared symbol
    decl_index: FxHashMap<(FileId, TextRange), SymbolId>,
    /// Global-namespace members (namespaces and types), in declaration order
    top_members: Vec<SymbolId>,
    references: Vec<Arc<Compilation>>,
}

impl Compilation {
    /// Compile one project's units against its already-compiled references.
    ///
    /// Fails with [`CompilationFailure`] when any unit does not parse, a
    /// declared base type cannot be resolved in the project or its
    /// references, or two non-partial types share a qualified name.
    pub fn compile(
        name: impl Into<SmolStr>,
        units: &[(FileId, &str)],
        references: Vec<Arc<Compilation>>,
    ) -> Result<Self, CompilationFailure> {
        let name = name.into();
        tracing::debug!(project = %name, units = units.len(), "compiling project");

        let mut builder = Builder::default();
        let mut parsed = Vec::with_capacity(units.len());
        for &(file, text) in units {
            let parse_result = parse(text);
            for error in &parse_result.errors {
                builder
                    .diagnostics
                    .push(Diagnostic::error(file, error.range, error.message.clone()));
            }
            parsed.push(SourceUnit {
                file,
                green: parse_result.green,
            });
        }

        if builder.diagnostics.is_empty() {
            for unit in &parsed {
                let root = SyntaxNode::new_root(unit.green.clone());
                builder.extract_unit(unit.file, &root);
            }
        }

        let compilation = Self {
            name: name.clone(),
            units: parsed,
            symbols: builder.symbols,
            types_by_qname: builder.types_by_qname,
            decl_index: builder.decl_index,
            top_members: builder.top_members,
            references,
        };

        let mut diagnostics = builder.diagnostics;
        if diagnostics.is_empty() {
            diagnostics.extend(compilation.validate_bases());
        }
        if diagnostics.iter().any(|d| d.severity.is_error()) {
            return Err(CompilationFailure {
                project: name,
                diagnostics,
            });
        }

        tracing::debug!(
            project = %compilation.name,
            symbols = compilation.symbols.len(),
            "project compiled"
        );
        Ok(compilation)
    }

    /// Check that every declared base name resolves somewhere visible
    fn validate_bases(&self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for symbol in &self.symbols {
            let Some(ty) = symbol.as_type() else { continue };
            for base in &ty.base_names {
                if self.resolve_base(&ty.namespace, base).is_none() {
                    let Some(site) = ty.decls.first().copied() else {
                        continue;
                    };
                    diagnostics.push(Diagnostic::error(
                        site.file,
                        site.range,
                        format!(
                            "the type or namespace name '{}' could not be found (base of '{}')",
                            base, ty.qualified_name
                        ),
                    ));
                }
            }
        }
        diagnostics
    }

    /// The project/assembly name this compilation was built for
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The compilation units, in project order
    pub fn files(&self) -> impl Iterator<Item = FileId> + '_ {
        self.units.iter().map(|u| u.file)
    }

    pub fn references(&self) -> &[Arc<Compilation>] {
        &self.references
    }

    /// The syntax root of one compilation unit
    pub fn syntax_root(&self, file: FileId) -> Option<SyntaxNode> {
        self.units
            .iter()
            .find(|u| u.file == file)
            .map(|u| SyntaxNode::new_root(u.green.clone()))
    }

    /// A semantic model for one compilation unit
    pub fn semantic_model(&self, file: FileId) -> Option<SemanticModel<'_>> {
        self.units
            .iter()
            .any(|u| u.file == file)
            .then(|| SemanticModel::new(self, file))
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.index())
    }

    /// Build a handle for a known-valid id
    pub fn symbol_ref(&self, id: SymbolId) -> Option<SymbolRef<'_>> {
        self.symbols.get(id.index())?;
        Some(SymbolRef {
            compilation: self,
            id,
        })
    }

    /// Find a type by its exact dotted qualified name
    pub fn find_type(&self, qualified_name: &str) -> Option<SymbolRef<'_>> {
        let id = *self.types_by_qname.get(qualified_name)?;
        self.symbol_ref(id)
    }

    pub(crate) fn declared_symbol_at(&self, file: FileId, range: TextRange) -> Option<SymbolId> {
        self.decl_index.get(&(file, range)).copied()
    }

    fn scope_member(&self, id: SymbolId) -> Option<ScopeMember<'_>> {
        match self.symbol(id)? {
            Symbol::Type(t) => Some(ScopeMember::Type(t)),
            Symbol::Namespace(ns) => Some(ScopeMember::Namespace(ns)),
            _ => None,
        }
    }

    /// Every type in this compilation, nested namespaces and nested types
    /// included, in declaration order.
    pub fn all_types(&self) -> Vec<SymbolRef<'_>> {
        let mut out = Vec::new();
        self.collect_types(&self.top_members, &mut out);
        out
    }

    fn collect_types<'a>(&'a self, members: &[SymbolId], out: &mut Vec<SymbolRef<'a>>) {
        for &id in members {
            match self.scope_member(id) {
                Some(ScopeMember::Type(ty)) => {
                    out.push(SymbolRef {
                        compilation: self,
                        id,
                    });
                    let nested: Vec<SymbolId> = ty
                        .members
                        .iter()
                        .copied()
                        .filter(|&m| self.symbol(m).is_some_and(|s| s.as_type().is_some()))
                        .collect();
                    self.collect_types(&nested, out);
                }
                Some(ScopeMember::Namespace(ns)) => self.collect_types(&ns.members, out),
                None => {}
            }
        }
    }

    /// Resolve a base-type name written inside `ns_path` to the type it
    /// denotes, searching enclosing namespaces innermost-first, this
    /// compilation before its references.
    pub fn resolve_base(&self, ns_path: &[SmolStr], name: &str) -> Option<ResolvedBase<'_>> {
        for depth in (0..=ns_path.len()).rev() {
            let candidate: SmolStr = if depth == 0 {
                SmolStr::new(name)
            } else {
                SmolStr::new(format!("{}.{}", ns_path[..depth].join("."), name))
            };
            if let Some(&id) = self.types_by_qname.get(&candidate) {
                return Some(ResolvedBase {
                    key: TypeKey {
                        assembly: self.name.clone(),
                        qualified_name: candidate,
                    },
                    compilation: self,
                    id,
                });
            }
            for reference in &self.references {
                if let Some(&id) = reference.types_by_qname.get(&candidate) {
                    return Some(ResolvedBase {
                        key: TypeKey {
                            assembly: reference.name.clone(),
                            qualified_name: candidate,
                        },
                        compilation: reference,
                        id,
                    });
                }
            }
        }
        None
    }

    /// Whether the type derives from `target`, directly or transitively,
    /// through class bases and interface implementations.
    pub fn derives_from(&self, id: SymbolId, target: &TypeKey) -> bool {
        let mut visited = FxHashSet::default();
        derives_rec(self, id, target, &mut visited)
    }
}

fn derives_rec(
    compilation: &Compilation,
    id: SymbolId,
    target: &TypeKey,
    visited: &mut FxHashSet<TypeKey>,
) -> bool {
    let Some(ty) = compilation.symbol(id).and_then(Symbol::as_type) else {
        return false;
    };
    for base in &ty.base_names {
        let Some(resolved) = compilation.resolve_base(&ty.namespace, base) else {
            continue;
        };
        if resolved.key == *target {
            return true;
        }
        if visited.insert(resolved.key.clone())
            && derives_rec(resolved.compilation, resolved.id, target, visited)
        {
            return true;
        }
    }
    false
}

/// The whole-solution view the derived-type query runs against.
///
/// Ordering of results follows compilation order, then declaration order
/// within each compilation — callers must rely on set membership only.
pub struct SolutionScope<'a> {
    compilations: Vec<&'a Compilation>,
}

impl<'a> SolutionScope<'a> {
    pub fn new(compilations: impl IntoIterator<Item = &'a Compilation>) -> Self {
        Self {
            compilations: compilations.into_iter().collect(),
        }
    }

    /// Every type in scope assignable to `base` (deriving from it directly
    /// or transitively), excluding `base` itself.
    pub fn find_assignable_types(&self, base: &TypeKey) -> Vec<SymbolRef<'a>> {
        let mut out = Vec::new();
        for compilation in &self.compilations {
            for type_ref in compilation.all_types() {
                if type_ref.type_key().as_ref() == Some(base) {
                    continue;
                }
                if compilation.derives_from(type_ref.id(), base) {
                    out.push(type_ref);
                }
            }
        }
        out
    }
}

// ============================================================================
// EXTRACTION
// ============================================================================

enum TypeContainer {
    Global,
    Namespace(SymbolId),
    Type(SymbolId),
}

#[derive(Default)]
struct Builder {
    symbols: Vec<Symbol>,
    types_by_qname: FxHashMap<SmolStr, SymbolId>,
    ns_by_qname: FxHashMap<SmolStr, SymbolId>,
    decl_index: FxHashMap<(FileId, TextRange), SymbolId>,
    top_members: Vec<SymbolId>,
    diagnostics: Vec<Diagnostic>,
}

impl Builder {
    fn alloc(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId::new(self.symbols.len());
        self.symbols.push(symbol);
        id
    }

    fn extract_unit(&mut self, file: FileId, root: &SyntaxNode) {
        for child in root.children() {
            if let Some(ns) = NamespaceDecl::cast(child.clone()) {
                self.extract_namespace(file, &ns, &[]);
            } else if let Some(ty) = TypeDecl::cast(child) {
                self.extract_type(file, &ty, &[], TypeContainer::Global);
            }
        }
    }

    /// Get or create the namespace chain for `segments`, returning the
    /// innermost namespace (None for an empty segment list). Namespaces
    /// merge across files and declarations.
    fn ensure_namespace(
        &mut self,
        parent_path: &[SmolStr],
        segments: &[SmolStr],
    ) -> Option<SymbolId> {
        let mut path: Vec<SmolStr> = parent_path.to_vec();
        let mut parent: Option<SymbolId> = if parent_path.is_empty() {
            None
        } else {
            self.ns_by_qname.get(parent_path.join(".").as_str()).copied()
        };
        for segment in segments {
            path.push(segment.clone());
            let qname = SmolStr::new(path.join("."));
            let id = match self.ns_by_qname.get(&qname) {
                Some(&id) => id,
                None => {
                    let id = self.alloc(Symbol::Namespace(NamespaceSymbol {
                        name: segment.clone(),
                        qualified_name: qname.clone(),
                        members: Vec::new(),
                        decls: Vec::new(),
                    }));
                    self.ns_by_qname.insert(qname, id);
                    match parent {
                        Some(parent_id) => self.push_namespace_member(parent_id, id),
                        None => self.top_members.push(id),
                    }
                    id
                }
            };
            parent = Some(id);
        }
        parent
    }

    fn push_namespace_member(&mut self, ns: SymbolId, member: SymbolId) {
        if let Symbol::Namespace(ns) = &mut self.symbols[ns.index()] {
            ns.members.push(member);
        }
    }

    fn extract_namespace(&mut self, file: FileId, decl: &NamespaceDecl, parent_path: &[SmolStr]) {
        let Some(name) = decl.name() else { return };
        let segments: Vec<SmolStr> = name.segments().map(|t| SmolStr::new(t.text())).collect();
        let Some(ns_id) = self.ensure_namespace(parent_path, &segments) else {
            return;
        };

        let range = decl.syntax().text_range();
        if let Symbol::Namespace(ns) = &mut self.symbols[ns_id.index()] {
            ns.decls.push(DeclSite { file, range });
        }
        self.decl_index.insert((file, range), ns_id);

        let full_path: Vec<SmolStr> = parent_path
            .iter()
            .cloned()
            .chain(segments.iter().cloned())
            .collect();
        for child in decl.syntax().children() {
            if let Some(nested) = NamespaceDecl::cast(child.clone()) {
                self.extract_namespace(file, &nested, &full_path);
            } else if let Some(ty) = TypeDecl::cast(child) {
                self.extract_type(file, &ty, &full_path, TypeContainer::Namespace(ns_id));
            }
        }
    }

    fn extract_type(
        &mut self,
        file: FileId,
        decl: &TypeDecl,
        ns_path: &[SmolStr],
        container: TypeContainer,
    ) {
        let Some(name) = decl.name() else { return };
        let name = SmolStr::new(name);
        let qualified_name: SmolStr = match &container {
            TypeContainer::Type(outer) => {
                let outer_qname = self.symbols[outer.index()].qualified_name();
                SmolStr::new(format!("{outer_qname}.{name}"))
            }
            _ if ns_path.is_empty() => name.clone(),
            _ => SmolStr::new(format!("{}.{}", ns_path.join("."), name)),
        };
        let kind = if decl.is_interface() {
            TypeKind::Interface
        } else {
            TypeKind::Class
        };
        let site = DeclSite {
            file,
            range: decl.syntax().text_range(),
        };
        let base_names: Vec<SmolStr> = decl
            .base_list()
            .into_iter()
            .flat_map(|list| list.types())
            .filter_map(|base| base.name())
            .map(|name| SmolStr::new(name.text()))
            .collect();

        let id = match self.types_by_qname.get(&qualified_name).copied() {
            Some(existing) => {
                let merged = self.merge_partial(existing, decl, kind, site, &base_names);
                if !merged {
                    // Duplicate definition: keep the first symbol, index the
                    // extra declaration against it so back-mapping still works.
                    self.decl_index.insert((file, site.range), existing);
                    return;
                }
                existing
            }
            None => {
                let id = self.alloc(Symbol::Type(TypeSymbol {
                    name,
                    qualified_name: qualified_name.clone(),
                    kind,
                    is_abstract: decl.is_abstract(),
                    is_static: decl.is_static(),
                    is_sealed: decl.is_sealed(),
                    is_partial: decl.is_partial(),
                    namespace: ns_path.to_vec(),
                    base_names,
                    members: Vec::new(),
                    decls: vec![site],
                }));
                self.types_by_qname.insert(qualified_name.clone(), id);
                match container {
                    TypeContainer::Global => self.top_members.push(id),
                    TypeContainer::Namespace(ns) => self.push_namespace_member(ns, id),
                    TypeContainer::Type(outer) => {
                        if let Symbol::Type(t) = &mut self.symbols[outer.index()] {
                            t.members.push(id);
                        }
                    }
                }
                id
            }
        };
        self.decl_index.insert((file, site.range), id);
        self.extract_members(file, decl, ns_path, id);
    }

    /// Fold another declaration of an already-known type into its symbol.
    /// Returns false (and records a diagnostic) unless both sides are partial
    /// declarations of the same type kind.
    fn merge_partial(
        &mut self,
        existing: SymbolId,
        decl: &TypeDecl,
        kind: TypeKind,
        site: DeclSite,
        base_names: &[SmolStr],
    ) -> bool {
        let Symbol::Type(ty) = &mut self.symbols[existing.index()] else {
            return false;
        };
        if !(ty.is_partial && decl.is_partial() && ty.kind == kind) {
            self.diagnostics.push(Diagnostic::error(
                site.file,
                site.range,
                format!("duplicate type definition '{}'", ty.qualified_name),
            ));
            return false;
        }
        ty.is_abstract |= decl.is_abstract();
        ty.is_static |= decl.is_static();
        ty.is_sealed |= decl.is_sealed();
        for base in base_names {
            if !ty.base_names.contains(base) {
                ty.base_names.push(base.clone());
            }
        }
        ty.decls.push(site);
        true
    }

    fn extract_members(
        &mut self,
        file: FileId,
        decl: &TypeDecl,
        ns_path: &[SmolStr],
        type_id: SymbolId,
    ) {
        let type_qname = SmolStr::new(self.symbols[type_id.index()].qualified_name());
        for child in decl.syntax().children() {
            if let Some(nested) = TypeDecl::cast(child.clone()) {
                self.extract_type(file, &nested, ns_path, TypeContainer::Type(type_id));
            } else if let Some(field) = FieldDecl::cast(child.clone()) {
                self.extract_field(file, &field, &type_qname, type_id);
            } else if let Some(method) = MethodDecl::cast(child.clone()) {
                self.extract_method(file, &method, &type_qname, type_id);
            } else if let Some(property) = PropertyDecl::cast(child) {
                self.extract_property(file, &property, &type_qname, type_id);
            }
        }
    }

    fn extract_field(
        &mut self,
        file: FileId,
        decl: &FieldDecl,
        type_qname: &SmolStr,
        type_id: SymbolId,
    ) {
        let Some(name) = decl.name() else { return };
        let site = DeclSite {
            file,
            range: decl.syntax().text_range(),
        };
        let id = self.alloc(Symbol::Field(FieldSymbol {
            name: SmolStr::new(&name),
            qualified_name: SmolStr::new(format!("{type_qname}.{name}")),
            ty: SmolStr::new(decl.ty().map(|t| t.text()).unwrap_or_default()),
            decls: vec![site],
        }));
        self.attach_member(type_id, id, site);
    }

    fn extract_method(
        &mut self,
        file: FileId,
        decl: &MethodDecl,
        type_qname: &SmolStr,
        type_id: SymbolId,
    ) {
        let Some(name) = decl.name() else { return };
        let site = DeclSite {
            file,
            range: decl.syntax().text_range(),
        };

        // Partial methods: the defining and implementing declarations are one
        // symbol with two sites.
        if decl.is_partial() {
            if let Some(existing) = self.find_partial_method(type_id, &name) {
                if let Symbol::Method(m) = &mut self.symbols[existing.index()] {
                    m.decls.push(site);
                }
                self.decl_index.insert((file, site.range), existing);
                return;
            }
        }

        let params = decl
            .param_list()
            .into_iter()
            .flat_map(|list| list.params())
            .map(|param| MethodParam {
                ty: SmolStr::new(param.ty().map(|t| t.text()).unwrap_or_default()),
                name: SmolStr::new(param.name().unwrap_or_default()),
            })
            .collect();
        let id = self.alloc(Symbol::Method(MethodSymbol {
            name: SmolStr::new(&name),
            qualified_name: SmolStr::new(format!("{type_qname}.{name}")),
            return_type: SmolStr::new(decl.return_type().map(|t| t.text()).unwrap_or_default()),
            params,
            is_abstract: decl.is_abstract(),
            is_extern: decl.is_extern(),
            is_partial: decl.is_partial(),
            decls: vec![site],
        }));
        self.attach_member(type_id, id, site);
    }

    fn find_partial_method(&self, type_id: SymbolId, name: &str) -> Option<SymbolId> {
        let Symbol::Type(ty) = &self.symbols[type_id.index()] else {
            return None;
        };
        ty.members.iter().copied().find(|&member| {
            self.symbols[member.index()]
                .as_method()
                .is_some_and(|m| m.is_partial && m.name == name)
        })
    }

    fn extract_property(
        &mut self,
        file: FileId,
        decl: &PropertyDecl,
        type_qname: &SmolStr,
        type_id: SymbolId,
    ) {
        let Some(name) = decl.name() else { return };
        let site = DeclSite {
            file,
            range: decl.syntax().text_range(),
        };
        let id = self.alloc(Symbol::Property(PropertySymbol {
            name: SmolStr::new(&name),
            qualified_name: SmolStr::new(format!("{type_qname}.{name}")),
            ty: SmolStr::new(decl.ty().map(|t| t.text()).unwrap_or_default()),
            decls: vec![site],
        }));
        self.attach_member(type_id, id, site);
    }

    fn attach_member(&mut self, type_id: SymbolId, member: SymbolId, site: DeclSite) {
        if let Symbol::Type(ty) = &mut self.symbols[type_id.index()] {
            ty.members.push(member);
        }
        self.decl_index.insert((site.file, site.range), member);
    }
}
