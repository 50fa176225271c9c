//! The method-body locator: symbol → declaration site → syntax → body.
//!
//! A method symbol's sites can live in different compilation units (partial
//! methods), and a site may have no body at all (abstract, extern,
//! interface). The locator re-derives the body from syntax every time — the
//! symbol stores only where its declarations are, not what they contain.

use crate::semantic::{DeclSite, SymbolRef};
use crate::syntax::Block;
use crate::syntax::ast::{AstNode, MethodDecl};

/// First declaration site that yields a body wins.
pub(super) fn body_of(method: SymbolRef<'_>) -> Option<Block> {
    let symbol = method.symbol().as_method()?;
    symbol
        .decls
        .iter()
        .find_map(|site| body_at(method, site))
}

/// Every body across all declaration sites, in site order.
pub(super) fn bodies_of(method: SymbolRef<'_>) -> Vec<Block> {
    let Some(symbol) = method.symbol().as_method() else {
        return Vec::new();
    };
    symbol
        .decls
        .iter()
        .filter_map(|site| body_at(method, site))
        .collect()
}

fn body_at(method: SymbolRef<'_>, site: &DeclSite) -> Option<Block> {
    // A site without a live syntax tree is skipped, not an error.
    let root = method.compilation().syntax_root(site.file)?;
    let token = root.token_at_offset(site.range.start()).right_biased()?;
    let declaration = token.parent_ancestors().find_map(MethodDecl::cast)?;
    declaration.body()
}
