//! Member filtering and syntax → symbol mapping.

use crate::parser::SyntaxNode;
use crate::semantic::{MemberKind, SemanticModel, SymbolRef};

/// Members of the type whose kind matches; everything else is silently
/// excluded. A non-type symbol has no members, so the sequence is empty.
pub(super) fn members_of_kind<'a>(
    type_symbol: SymbolRef<'a>,
    kind: MemberKind,
) -> impl Iterator<Item = SymbolRef<'a>> {
    let compilation = type_symbol.compilation();
    type_symbol
        .symbol()
        .as_type()
        .map(|ty| ty.members.clone())
        .unwrap_or_default()
        .into_iter()
        .filter_map(move |id| compilation.symbol_ref(id))
        .filter(move |member| member.symbol().member_kind() == kind)
}

/// The symbol declared at `node`. Callers are expected to pass declaration
/// nodes; anything else maps to None rather than an error.
pub(super) fn symbol_for_declaration<'a>(
    model: &SemanticModel<'a>,
    node: &SyntaxNode,
) -> Option<SymbolRef<'a>> {
    model.declared_symbol(node)
}
