//! The per-unit semantic model: syntax → symbol back-mapping.

use crate::base::FileId;
use crate::parser::SyntaxNode;

use super::compilation::{Compilation, SymbolRef};

/// Read-only view pairing one compilation unit with its compilation.
///
/// The model resolves declaration nodes in this unit back to the symbols
/// they declare. It owns nothing; it borrows the compilation for the
/// duration of a query.
#[derive(Clone, Copy)]
pub struct SemanticModel<'a> {
    compilation: &'a Compilation,
    file: FileId,
}

impl<'a> SemanticModel<'a> {
    pub(crate) fn new(compilation: &'a Compilation, file: FileId) -> Self {
        Self { compilation, file }
    }

    pub fn compilation(&self) -> &'a Compilation {
        self.compilation
    }

    pub fn file(&self) -> FileId {
        self.file
    }

    /// The syntax root of this model's compilation unit
    pub fn syntax_root(&self) -> Option<SyntaxNode> {
        self.compilation.syntax_root(self.file)
    }

    /// The symbol declared at `node`, or None when the node is not itself a
    /// declaration. Tolerates arbitrary nodes; never fails.
    pub fn declared_symbol(&self, node: &SyntaxNode) -> Option<SymbolRef<'a>> {
        let id = self
            .compilation
            .declared_symbol_at(self.file, node.text_range())?;
        self.compilation.symbol_ref(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::Compilation;
    use crate::syntax::ast::{AstNode, MethodDecl};
    use crate::syntax::type_declarations;

    fn compile(text: &str) -> Compilation {
        Compilation::compile("Test", &[(FileId::new(0), text)], Vec::new())
            .expect("compilation failed")
    }

    #[test]
    fn test_declared_symbol_for_type_declaration() {
        let compilation = compile("namespace N { class Widget { } }");
        let model = compilation.semantic_model(FileId::new(0)).unwrap();
        let root = model.syntax_root().unwrap();
        let decl = type_declarations(&root).next().unwrap();
        let symbol = model.declared_symbol(decl.syntax()).unwrap();
        assert_eq!(symbol.qualified_name(), "N.Widget");
    }

    #[test]
    fn test_declared_symbol_for_member_declaration() {
        let compilation = compile("class C { public void Run() { } }");
        let model = compilation.semantic_model(FileId::new(0)).unwrap();
        let root = model.syntax_root().unwrap();
        let method = root.descendants().find_map(MethodDecl::cast).unwrap();
        let symbol = model.declared_symbol(method.syntax()).unwrap();
        assert_eq!(symbol.qualified_name(), "C.Run");
    }

    #[test]
    fn test_non_declaration_node_yields_none() {
        let compilation = compile("class C { }");
        let model = compilation.semantic_model(FileId::new(0)).unwrap();
        let root = model.syntax_root().unwrap();
        // The root itself declares nothing
        assert!(model.declared_symbol(&root).is_none());
        // Neither does a node from a different file's model
        let decl = type_declarations(&root).next().unwrap();
        assert!(model.declared_symbol(decl.syntax()).is_some());
    }

    #[test]
    fn test_model_for_unknown_file_is_none() {
        let compilation = compile("class C { }");
        assert!(compilation.semantic_model(FileId::new(9)).is_none());
    }
}
