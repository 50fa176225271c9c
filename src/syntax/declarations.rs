//! The declaration scanner.
//!
//! [`declarations`] is the generic primitive: a lazy, restartable walk over a
//! syntax tree yielding every descendant declaration of the requested kind,
//! in document order (pre-order, parents before children, siblings in source
//! order). The type/namespace/interface functions are convenience wrappers.

use rowan::WalkEvent;

use crate::parser::SyntaxNode;

use super::ast::{AstNode, InterfaceDecl, NamespaceDecl, TypeDecl};

/// All descendant declarations castable to `N`, in document order.
///
/// The iterator owns its cursor, so it borrows nothing from the caller and
/// can be collected, dropped, and re-created freely. An empty tree yields an
/// empty sequence.
pub fn declarations<N: AstNode>(root: &SyntaxNode) -> impl Iterator<Item = N> + use<N> {
    root.preorder().filter_map(|event| match event {
        WalkEvent::Enter(node) => N::cast(node),
        WalkEvent::Leave(_) => None,
    })
}

/// All class and interface declarations under `root`
pub fn type_declarations(root: &SyntaxNode) -> impl Iterator<Item = TypeDecl> + use<> {
    declarations(root)
}

/// All namespace declarations under `root`
pub fn namespace_declarations(root: &SyntaxNode) -> impl Iterator<Item = NamespaceDecl> + use<> {
    declarations(root)
}

/// All interface declarations under `root`
pub fn interface_declarations(root: &SyntaxNode) -> impl Iterator<Item = InterfaceDecl> + use<> {
    declarations(root)
}
